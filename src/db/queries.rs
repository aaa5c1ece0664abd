use sqlx::query_as;

use super::{
    error::QueryError,
    filters::PropertyFilterBuilder,
    models::*,
    pool::{fetch_all, fetch_one, Database},
};

pub const DEFAULT_LIMIT: i64 = 10;

// User queries
pub async fn get_user_with_email(db: &Database, email: &str) -> Result<User, QueryError> {
    let query = query_as("SELECT id, name, email, password FROM users WHERE email = $1").bind(email);

    fetch_one(db, query).await
}

pub async fn get_user_with_id(db: &Database, id: i32) -> Result<User, QueryError> {
    let query = query_as("SELECT id, name, email, password FROM users WHERE id = $1").bind(id);

    fetch_one(db, query).await
}

/// Duplicate emails are left to the unique index and surface as
/// `QueryError::ConstraintViolation`.
pub async fn add_user(db: &Database, user: &NewUser) -> Result<User, QueryError> {
    let query = query_as(
        "INSERT INTO users (name, email, password)
         VALUES ($1, $2, $3)
         RETURNING id, name, email, password",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password);

    fetch_one(db, query).await
}

// Reservation queries
pub async fn get_all_reservations(
    db: &Database,
    guest_id: i32,
    limit: i64,
) -> Result<Vec<ReservationListing>, QueryError> {
    if limit <= 0 {
        return Err(QueryError::invalid("limit must be positive"));
    }

    let query = query_as(
        "SELECT reservations.id AS reservation_id, reservations.start_date, reservations.end_date,
                properties.*, avg(property_reviews.rating)::float8 AS average_rating
         FROM reservations
         JOIN properties ON reservations.property_id = properties.id
         LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
         WHERE reservations.guest_id = $1
         GROUP BY reservations.id, properties.id
         ORDER BY reservations.start_date
         LIMIT $2",
    )
    .bind(guest_id)
    .bind(limit);

    fetch_all(db, query).await
}

// Property queries
pub async fn get_all_properties(
    db: &Database,
    search: &PropertySearch,
    limit: i64,
) -> Result<Vec<PropertyListing>, QueryError> {
    let mut query_builder = PropertyFilterBuilder::from_search(search)?.build(limit)?;

    fetch_all(db, query_builder.build_query_as()).await
}

pub async fn add_property(db: &Database, property: &NewProperty) -> Result<Property, QueryError> {
    let cost_per_night = dollars_to_cents(property.cost_per_night)?;

    let query = query_as(
        "INSERT INTO properties (
            owner_id, title, description, thumbnail_photo_url, cover_photo_url,
            cost_per_night, street, city, province, post_code, country,
            parking_spaces, number_of_bathrooms, number_of_bedrooms)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
         RETURNING *",
    )
    .bind(property.owner_id)
    .bind(&property.title)
    .bind(&property.description)
    .bind(&property.thumbnail_photo_url)
    .bind(&property.cover_photo_url)
    .bind(cost_per_night)
    .bind(&property.street)
    .bind(&property.city)
    .bind(&property.province)
    .bind(&property.post_code)
    .bind(&property.country)
    .bind(property.parking_spaces)
    .bind(property.number_of_bathrooms)
    .bind(property.number_of_bedrooms);

    fetch_one(db, query).await
}
