use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Account roles, stored as uppercase strings in the database.
///
/// `SUPER_ADMIN` is reserved for the seeded main admin and is never assignable
/// through public registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "MINI_ADMIN")]
    MiniAdmin,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::MiniAdmin => "MINI_ADMIN",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Unknown strings fall back to the least privileged role.
    pub fn parse(s: &str) -> Role {
        match s {
            "MINI_ADMIN" => Role::MiniAdmin,
            "ADMIN" => Role::Admin,
            "SUPER_ADMIN" => Role::SuperAdmin,
            _ => Role::User,
        }
    }

    /// ADMIN and SUPER_ADMIN may mutate any Owned Resource unconditionally.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    /// Roles allowed to create Owned Resources at all.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::MiniAdmin | Role::Admin | Role::SuperAdmin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "INACTIVE")]
    Inactive,
    #[serde(rename = "BANNED")]
    Banned,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
            AccountStatus::Banned => "BANNED",
        }
    }

    /// Anything unrecognized is treated as INACTIVE so a corrupted status
    /// row locks the account out instead of letting it through the gate.
    pub fn parse(s: &str) -> AccountStatus {
        match s {
            "ACTIVE" => AccountStatus::Active,
            "BANNED" => AccountStatus::Banned,
            _ => AccountStatus::Inactive,
        }
    }
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub profile_image: Option<String>,
    pub address: Option<String>,
    pub date_registered: NaiveDateTime,
}

impl UserAccount {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    pub fn status(&self) -> AccountStatus {
        AccountStatus::parse(&self.status)
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::user_account)]
pub struct NewUserAccount {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub profile_image: Option<String>,
    pub address: Option<String>,
}

// DTOs
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Option<Role>,
    pub profile_image: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Minimal projection returned by the auth endpoints - never the hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String, // Subject (user_id)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
    pub user_id: i32,
    pub role: Role,
}

/// Advisory owner filter for list endpoints ("my work only" view). The caller
/// is not required to match the filter.
#[derive(Deserialize, Debug)]
pub struct OwnerFilter {
    #[serde(rename = "userId")]
    pub user_id: Option<i32>,
}

// ---- Location ----

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: i32,
    pub city_name: String,
    pub country: String,
    pub description: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub coordinates: Option<String>,
    pub thumbnail: Option<String>,
    pub user_id: i32,
}

// The owner column is never taken from the payload: serde skips it, the
// handler overwrites it with the authenticated caller's id.
#[derive(Insertable, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::location)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub city_name: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub description: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub coordinates: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(skip)]
    pub user_id: i32,
}

fn default_country() -> String {
    "Pakistan".to_string()
}

#[derive(AsChangeset, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::location)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    pub city_name: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub coordinates: Option<String>,
    pub thumbnail: Option<String>,
}

impl UpdateLocation {
    /// diesel rejects an empty changeset, so handlers treat an all-None
    /// payload as a no-op merge.
    pub fn is_noop(&self) -> bool {
        self.city_name.is_none()
            && self.country.is_none()
            && self.description.is_none()
            && self.best_time_to_visit.is_none()
            && self.coordinates.is_none()
            && self.thumbnail.is_none()
    }
}

// ---- ViewPoint ----

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ViewPoint {
    pub view_point_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub banner_image: Option<String>,
    pub opening_hours: Option<String>,
    pub entry_fee: i32,
    pub location_id: Option<i32>,
    pub user_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::view_point)]
#[serde(rename_all = "camelCase")]
pub struct NewViewPoint {
    pub name: String,
    pub description: Option<String>,
    pub banner_image: Option<String>,
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub entry_fee: i32,
    pub location_id: Option<i32>,
    #[serde(skip)]
    pub user_id: i32,
}

#[derive(AsChangeset, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::view_point)]
#[serde(rename_all = "camelCase")]
pub struct UpdateViewPoint {
    pub name: Option<String>,
    pub description: Option<String>,
    pub banner_image: Option<String>,
    pub opening_hours: Option<String>,
    pub entry_fee: Option<i32>,
    pub location_id: Option<i32>,
}

impl UpdateViewPoint {
    pub fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.banner_image.is_none()
            && self.opening_hours.is_none()
            && self.entry_fee.is_none()
            && self.location_id.is_none()
    }
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ViewPointImage {
    pub image_id: i32,
    pub view_point_id: i32,
    pub image_url: String,
    pub caption: Option<String>,
}

/// `GET /api/viewpoints/{id}` response: the view point with its attachments.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ViewPointDetail {
    #[serde(flatten)]
    pub view_point: ViewPoint,
    pub images: Vec<ViewPointImage>,
}

// ---- Hotel ----

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub hotel_id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub star_category: String,
    pub price_per_night: i32,
    pub amenities: Option<String>,
    pub rating: f32,
    pub contact_number: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub view_point_id: Option<i32>,
    pub user_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::hotel)]
#[serde(rename_all = "camelCase")]
pub struct NewHotel {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub star_category: String,
    pub price_per_night: i32,
    pub amenities: Option<String>,
    #[serde(default)]
    pub rating: f32,
    pub contact_number: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub view_point_id: Option<i32>,
    #[serde(skip)]
    pub user_id: i32,
}

#[derive(AsChangeset, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::hotel)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotel {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub star_category: Option<String>,
    pub price_per_night: Option<i32>,
    pub amenities: Option<String>,
    pub rating: Option<f32>,
    pub contact_number: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub view_point_id: Option<i32>,
}

impl UpdateHotel {
    pub fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.description.is_none()
            && self.star_category.is_none()
            && self.price_per_night.is_none()
            && self.amenities.is_none()
            && self.rating.is_none()
            && self.contact_number.is_none()
            && self.website.is_none()
            && self.image.is_none()
            && self.view_point_id.is_none()
    }
}

// ---- Airline ----

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    pub airline_id: i32,
    pub name: String,
    pub code: String,
    pub logo: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub user_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::airline)]
#[serde(rename_all = "camelCase")]
pub struct NewAirline {
    pub name: String,
    pub code: String,
    pub logo: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    #[serde(skip)]
    pub user_id: i32,
}

#[derive(AsChangeset, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::airline)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAirline {
    pub name: Option<String>,
    pub code: Option<String>,
    pub logo: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
}

impl UpdateAirline {
    pub fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.code.is_none()
            && self.logo.is_none()
            && self.country.is_none()
            && self.website.is_none()
            && self.contact_email.is_none()
    }
}

// ---- Flight ----

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_id: i32,
    pub flight_number: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub duration: Option<String>,
    pub price: i32,
    pub class: String,
    pub status: String,
    pub airline_id: Option<i32>,
    pub user_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::flight)]
#[serde(rename_all = "camelCase")]
pub struct NewFlight {
    pub flight_number: String,
    pub from_city: String,
    pub to_city: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub duration: Option<String>,
    pub price: i32,
    #[serde(default = "default_flight_class")]
    pub class: String,
    #[serde(default = "default_flight_status")]
    pub status: String,
    pub airline_id: Option<i32>,
    #[serde(skip)]
    pub user_id: i32,
}

fn default_flight_class() -> String {
    "ECONOMY".to_string()
}

fn default_flight_status() -> String {
    "SCHEDULED".to_string()
}

#[derive(AsChangeset, Serialize, Deserialize, Debug)]
#[diesel(table_name = crate::schema::flight)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlight {
    pub flight_number: Option<String>,
    pub from_city: Option<String>,
    pub to_city: Option<String>,
    pub departure_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub duration: Option<String>,
    pub price: Option<i32>,
    pub class: Option<String>,
    pub status: Option<String>,
    pub airline_id: Option<i32>,
}

impl UpdateFlight {
    pub fn is_noop(&self) -> bool {
        self.flight_number.is_none()
            && self.from_city.is_none()
            && self.to_city.is_none()
            && self.departure_time.is_none()
            && self.arrival_time.is_none()
            && self.duration.is_none()
            && self.price.is_none()
            && self.class.is_none()
            && self.status.is_none()
            && self.airline_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_user() -> UserAccount {
        UserAccount {
            user_id: 7,
            name: "Test User".into(),
            email: "test@example.com".into(),
            phone: "0300".into(),
            password_hash: "$2b$10$secret".into(),
            role: "MINI_ADMIN".into(),
            status: "ACTIVE".into(),
            profile_image: None,
            address: None,
            date_registered: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "test@example.com");
    }

    #[test]
    fn role_strings_round_trip() {
        for role in [Role::User, Role::MiniAdmin, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), role);
        }
        // Garbage degrades to USER rather than escalating
        assert_eq!(Role::parse("ROOT"), Role::User);
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            AccountStatus::Active,
            AccountStatus::Inactive,
            AccountStatus::Banned,
        ] {
            assert_eq!(AccountStatus::parse(status.as_str()), status);
        }
        // Garbage locks the account out rather than activating it
        assert_eq!(AccountStatus::parse("SHADOWBANNED"), AccountStatus::Inactive);
        assert_eq!(AccountStatus::parse(""), AccountStatus::Inactive);
    }

    #[test]
    fn client_supplied_owner_is_ignored_on_deserialize() {
        let payload = serde_json::json!({
            "cityName": "Hunza",
            "userId": 9999
        });
        let new_location: NewLocation = serde_json::from_value(payload).unwrap();
        assert_eq!(new_location.user_id, 0);
        assert_eq!(new_location.country, "Pakistan");
    }

    #[test]
    fn view_point_detail_flattens_the_record() {
        let detail = ViewPointDetail {
            view_point: ViewPoint {
                view_point_id: 3,
                name: "Fairy Meadows".into(),
                description: None,
                banner_image: None,
                opening_hours: None,
                entry_fee: 500,
                location_id: None,
                user_id: 7,
            },
            images: vec![],
        };
        let value = serde_json::to_value(detail).unwrap();
        assert_eq!(value["viewPointId"], 3);
        assert_eq!(value["entryFee"], 500);
        assert!(value["images"].as_array().unwrap().is_empty());
    }

    #[test]
    fn view_point_detail_parses_from_the_wire_shape() {
        let value = serde_json::json!({
            "viewPointId": 3,
            "name": "Fairy Meadows",
            "description": null,
            "bannerImage": null,
            "openingHours": null,
            "entryFee": 500,
            "locationId": null,
            "userId": 7,
            "images": [
                { "imageId": 1, "viewPointId": 3, "imageUrl": "https://cdn/fm.jpg", "caption": null }
            ]
        });
        let detail: ViewPointDetail = serde_json::from_value(value).unwrap();
        assert_eq!(detail.view_point.view_point_id, 3);
        assert_eq!(detail.view_point.user_id, 7);
        assert_eq!(detail.images.len(), 1);
        assert_eq!(detail.images[0].image_url, "https://cdn/fm.jpg");
    }
}
