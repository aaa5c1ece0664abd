// [library] Serde - JSON serialization for API responses and request parsing
use serde::{Deserialize, Deserializer, Serialize};

// [library] Calendar dates map to PostgreSQL DATE columns
use time::Date;

use super::error::QueryError;

// [business] User entity - a guest and/or property owner
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
// [rust] Derive attributes:
// - Serialize/Deserialize: JSON conversion (the password hash is never serialized)
// - sqlx::FromRow: automatic mapping from database rows by column name
pub struct User {
    pub id: i32,       // [business] Primary key (SERIAL)
    pub name: String,  // [business] Display name
    pub email: String, // [business] Login identifier, unique in storage

    #[serde(skip_serializing)]
    pub password: String, // [security] Argon2id PHC string - opaque to the query layer
}

// [business] Fields required to create a user; the password is already hashed
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// [business] Property entity - a rental listed by its owner
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: i32,       // [business] Primary key
    pub owner_id: i32, // [business] Foreign key - the listing user
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32, // [business] Integer cents - presentation divides by 100

    // [business] Address
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,

    // [business] Amenities
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,

    pub active: bool, // [business] Listing visibility flag
}

// [business] Property joined with its review aggregate
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,

    // [business] None when the property has no reviews yet
    pub average_rating: Option<f64>,
}

// [business] Stay dates of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReservationDates {
    pub start_date: Date,
    pub end_date: Date,
}

// [business] Reservation joined with the reserved property and its review aggregate
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReservationListing {
    pub reservation_id: i32,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub dates: ReservationDates,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: PropertyListing,
}

// [business] Fields submitted when listing a new property
// cost_per_night arrives in major units (dollars) and is stored in cents
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    #[serde(default)]
    pub owner_id: i32, // [security] Overwritten from the session by the web layer
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: f64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

// [business] Optional filters for the property search
// Blank query-string values ("city=") are treated as absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearch {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub owner_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub minimum_price_per_night: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub maximum_price_per_night: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub minimum_rating: Option<f64>,
}

// [rust] HTML forms submit empty inputs as empty strings - map those to None
fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

// [business] Convert a major-unit amount to integer cents, rounding to the nearest cent
pub fn dollars_to_cents(amount: f64) -> Result<i32, QueryError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(QueryError::invalid(format!(
            "amount must be a non-negative number, got {}",
            amount
        )));
    }
    let cents = (amount * 100.0).round();
    if cents > i32::MAX as f64 {
        return Err(QueryError::invalid(format!("amount {} is too large", amount)));
    }
    Ok(cents as i32)
}

// [business] Same conversion for upper bounds, which saturate at the largest storable amount
pub fn dollars_to_cents_capped(amount: f64) -> Result<i32, QueryError> {
    match dollars_to_cents(amount) {
        Err(QueryError::InvalidInput(_)) if amount.is_finite() && amount >= 0.0 => Ok(i32::MAX),
        result => result,
    }
}

// [business] Integer cents back to major units for display
pub fn cents_to_dollars(cents: i32) -> f64 {
    f64::from(cents) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollars_to_cents() {
        assert_eq!(dollars_to_cents(150.0).unwrap(), 15000);
        assert_eq!(dollars_to_cents(0.0).unwrap(), 0);
        assert_eq!(dollars_to_cents(19.99).unwrap(), 1999);
        assert_eq!(dollars_to_cents(0.125).unwrap(), 13);
    }

    #[test]
    fn test_dollars_to_cents_rejects_bad_amounts() {
        assert!(dollars_to_cents(-0.01).is_err());
        assert!(dollars_to_cents(f64::INFINITY).is_err());
        assert!(dollars_to_cents(f64::NAN).is_err());
        assert!(dollars_to_cents(1e12).is_err());
    }

    #[test]
    fn test_dollars_to_cents_capped() {
        assert_eq!(dollars_to_cents_capped(150.0).unwrap(), 15000);
        assert_eq!(dollars_to_cents_capped(3e7).unwrap(), i32::MAX);
        assert_eq!(dollars_to_cents_capped(1e12).unwrap(), i32::MAX);
        assert!(dollars_to_cents_capped(-1.0).is_err());
        assert!(dollars_to_cents_capped(f64::INFINITY).is_err());
    }

    #[test]
    fn test_cents_to_dollars() {
        assert_eq!(cents_to_dollars(15000), 150.0);
        assert_eq!(cents_to_dollars(12050), 120.5);
    }

    #[test]
    fn test_user_serialization_omits_password() {
        let user = User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_property_search_blank_values_are_none() {
        let search: PropertySearch = serde_json::from_value(serde_json::json!({
            "city": "",
            "minimum_price_per_night": "50",
            "maximum_price_per_night": " ",
            "minimum_rating": "4"
        }))
        .unwrap();
        assert_eq!(search.city, None);
        assert_eq!(search.minimum_price_per_night, Some(50.0));
        assert_eq!(search.maximum_price_per_night, None);
        assert_eq!(search.minimum_rating, Some(4.0));
        assert_eq!(search.owner_id, None);
    }

    #[test]
    fn test_property_search_rejects_garbage_numbers() {
        let result: Result<PropertySearch, _> =
            serde_json::from_value(serde_json::json!({ "minimum_rating": "four" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_listing_serializes_flat() {
        let listing = PropertyListing {
            property: Property {
                id: 7,
                owner_id: 1,
                title: "Cabin".to_string(),
                description: String::new(),
                thumbnail_photo_url: "t.jpg".to_string(),
                cover_photo_url: "c.jpg".to_string(),
                cost_per_night: 15000,
                street: "1 Main".to_string(),
                city: "Banff".to_string(),
                province: "AB".to_string(),
                post_code: "T1L".to_string(),
                country: "Canada".to_string(),
                parking_spaces: 1,
                number_of_bathrooms: 1,
                number_of_bedrooms: 2,
                active: true,
            },
            average_rating: None,
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["cost_per_night"], 15000);
        assert!(json["average_rating"].is_null());
    }
}
