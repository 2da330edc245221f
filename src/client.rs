//! Typed API client: the same CRUD calls the handlers expose, with the bearer
//! token attached. Register/login capture the returned token so subsequent
//! calls are authenticated.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    Airline, AuthResponse, Flight, Hotel, Location, LoginRequest, NewAirline, NewFlight, NewHotel,
    NewLocation, NewViewPoint, RegisterRequest, UpdateAirline, UpdateFlight, UpdateHotel,
    UpdateLocation, UpdateViewPoint, UserAccount, ViewPoint, ViewPointDetail,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(serde::Deserialize)]
struct DeleteConfirmation {
    message: String,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| status.to_string());
            Err(ClientError::Api { status, message })
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    async fn delete_at(&self, path: &str) -> Result<String, ClientError> {
        self.request::<(), DeleteConfirmation>(Method::DELETE, path, None)
            .await
            .map(|c| c.message)
    }

    fn list_path(entity: &str, owner: Option<i32>) -> String {
        match owner {
            Some(id) => format!("/{}?userId={}", entity, id),
            None => format!("/{}", entity),
        }
    }

    // ---- auth ----

    pub async fn register(&mut self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let response: AuthResponse = self.post("/auth/register", request).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.post("/auth/login", &request).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    pub async fn me(&self) -> Result<UserAccount, ClientError> {
        self.get("/auth/me").await
    }

    // ---- locations ----

    pub async fn list_locations(&self, owner: Option<i32>) -> Result<Vec<Location>, ClientError> {
        self.get(&Self::list_path("locations", owner)).await
    }

    pub async fn get_location(&self, id: i32) -> Result<Location, ClientError> {
        self.get(&format!("/locations/{}", id)).await
    }

    pub async fn create_location(&self, location: &NewLocation) -> Result<Location, ClientError> {
        self.post("/locations", location).await
    }

    pub async fn update_location(
        &self,
        id: i32,
        changes: &UpdateLocation,
    ) -> Result<Location, ClientError> {
        self.put(&format!("/locations/{}", id), changes).await
    }

    pub async fn delete_location(&self, id: i32) -> Result<String, ClientError> {
        self.delete_at(&format!("/locations/{}", id)).await
    }

    // ---- viewpoints ----

    pub async fn list_viewpoints(&self, owner: Option<i32>) -> Result<Vec<ViewPoint>, ClientError> {
        self.get(&Self::list_path("viewpoints", owner)).await
    }

    pub async fn get_viewpoint(&self, id: i32) -> Result<ViewPointDetail, ClientError> {
        // Detail payload: the view point plus its nested images
        self.get(&format!("/viewpoints/{}", id)).await
    }

    pub async fn create_viewpoint(&self, viewpoint: &NewViewPoint) -> Result<ViewPoint, ClientError> {
        self.post("/viewpoints", viewpoint).await
    }

    pub async fn update_viewpoint(
        &self,
        id: i32,
        changes: &UpdateViewPoint,
    ) -> Result<ViewPoint, ClientError> {
        self.put(&format!("/viewpoints/{}", id), changes).await
    }

    pub async fn delete_viewpoint(&self, id: i32) -> Result<String, ClientError> {
        self.delete_at(&format!("/viewpoints/{}", id)).await
    }

    // ---- hotels ----

    pub async fn list_hotels(&self, owner: Option<i32>) -> Result<Vec<Hotel>, ClientError> {
        self.get(&Self::list_path("hotels", owner)).await
    }

    pub async fn get_hotel(&self, id: i32) -> Result<Hotel, ClientError> {
        self.get(&format!("/hotels/{}", id)).await
    }

    pub async fn create_hotel(&self, hotel: &NewHotel) -> Result<Hotel, ClientError> {
        self.post("/hotels", hotel).await
    }

    pub async fn update_hotel(&self, id: i32, changes: &UpdateHotel) -> Result<Hotel, ClientError> {
        self.put(&format!("/hotels/{}", id), changes).await
    }

    pub async fn delete_hotel(&self, id: i32) -> Result<String, ClientError> {
        self.delete_at(&format!("/hotels/{}", id)).await
    }

    // ---- flights ----

    pub async fn list_flights(&self, owner: Option<i32>) -> Result<Vec<Flight>, ClientError> {
        self.get(&Self::list_path("flights", owner)).await
    }

    pub async fn get_flight(&self, id: i32) -> Result<Flight, ClientError> {
        self.get(&format!("/flights/{}", id)).await
    }

    pub async fn create_flight(&self, flight: &NewFlight) -> Result<Flight, ClientError> {
        self.post("/flights", flight).await
    }

    pub async fn update_flight(&self, id: i32, changes: &UpdateFlight) -> Result<Flight, ClientError> {
        self.put(&format!("/flights/{}", id), changes).await
    }

    pub async fn delete_flight(&self, id: i32) -> Result<String, ClientError> {
        self.delete_at(&format!("/flights/{}", id)).await
    }

    // ---- airlines ----

    pub async fn list_airlines(&self, owner: Option<i32>) -> Result<Vec<Airline>, ClientError> {
        self.get(&Self::list_path("airlines", owner)).await
    }

    pub async fn get_airline(&self, id: i32) -> Result<Airline, ClientError> {
        self.get(&format!("/airlines/{}", id)).await
    }

    pub async fn create_airline(&self, airline: &NewAirline) -> Result<Airline, ClientError> {
        self.post("/airlines", airline).await
    }

    pub async fn update_airline(
        &self,
        id: i32,
        changes: &UpdateAirline,
    ) -> Result<Airline, ClientError> {
        self.put(&format!("/airlines/{}", id), changes).await
    }

    pub async fn delete_airline(&self, id: i32) -> Result<String, ClientError> {
        self.delete_at(&format!("/airlines/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_under_api() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(
            client.url("/locations/3"),
            "http://localhost:5000/api/locations/3"
        );
    }

    #[test]
    fn list_path_carries_the_owner_filter() {
        assert_eq!(ApiClient::list_path("hotels", None), "/hotels");
        assert_eq!(ApiClient::list_path("hotels", Some(4)), "/hotels?userId=4");
    }
}
