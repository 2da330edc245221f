// Database schema definitions
diesel::table! {
    user_account (user_id) {
        user_id -> Int4,
        name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        password_hash -> Varchar,
        role -> Varchar,
        status -> Varchar,
        profile_image -> Nullable<Varchar>,
        address -> Nullable<Text>,
        date_registered -> Timestamp,
    }
}

diesel::table! {
    location (location_id) {
        location_id -> Int4,
        city_name -> Varchar,
        country -> Varchar,
        description -> Nullable<Text>,
        best_time_to_visit -> Nullable<Varchar>,
        coordinates -> Nullable<Varchar>,
        thumbnail -> Nullable<Varchar>,
        user_id -> Int4,
    }
}

diesel::table! {
    view_point (view_point_id) {
        view_point_id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        banner_image -> Nullable<Varchar>,
        opening_hours -> Nullable<Varchar>,
        entry_fee -> Int4,
        location_id -> Nullable<Int4>,
        user_id -> Int4,
    }
}

diesel::table! {
    view_point_image (image_id) {
        image_id -> Int4,
        view_point_id -> Int4,
        image_url -> Varchar,
        caption -> Nullable<Varchar>,
    }
}

diesel::table! {
    hotel (hotel_id) {
        hotel_id -> Int4,
        name -> Varchar,
        address -> Varchar,
        description -> Nullable<Text>,
        star_category -> Varchar,
        price_per_night -> Int4,
        amenities -> Nullable<Text>,
        rating -> Float4,
        contact_number -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        image -> Nullable<Varchar>,
        view_point_id -> Nullable<Int4>,
        user_id -> Int4,
    }
}

diesel::table! {
    airline (airline_id) {
        airline_id -> Int4,
        name -> Varchar,
        code -> Varchar,
        logo -> Nullable<Varchar>,
        country -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        contact_email -> Nullable<Varchar>,
        user_id -> Int4,
    }
}

diesel::table! {
    flight (flight_id) {
        flight_id -> Int4,
        flight_number -> Varchar,
        from_city -> Varchar,
        to_city -> Varchar,
        departure_time -> Timestamp,
        arrival_time -> Timestamp,
        duration -> Nullable<Varchar>,
        price -> Int4,
        class -> Varchar,
        status -> Varchar,
        airline_id -> Nullable<Int4>,
        user_id -> Int4,
    }
}

diesel::joinable!(location -> user_account (user_id));
diesel::joinable!(view_point -> user_account (user_id));
diesel::joinable!(view_point -> location (location_id));
diesel::joinable!(view_point_image -> view_point (view_point_id));
diesel::joinable!(hotel -> user_account (user_id));
diesel::joinable!(hotel -> view_point (view_point_id));
diesel::joinable!(airline -> user_account (user_id));
diesel::joinable!(flight -> user_account (user_id));
diesel::joinable!(flight -> airline (airline_id));

diesel::allow_tables_to_appear_in_same_query!(
    user_account,
    location,
    view_point,
    view_point_image,
    hotel,
    airline,
    flight,
);
