//! Query construction for the property search.
//!
//! Optional filters are rendered in a fixed order: the first predicate opens
//! the `WHERE` clause and every later one is chained with `AND`. The rating
//! filter becomes a `HAVING` clause after `GROUP BY`, and ordering plus the
//! row limit always come last. Values go through `push_bind`, so placeholders
//! are numbered `$1, $2, ...` in the order the filters appear.

use sqlx::{Postgres, QueryBuilder};

use super::{
    error::QueryError,
    models::{dollars_to_cents, dollars_to_cents_capped, PropertySearch},
};

const PROPERTY_SEARCH_BASE: &str = "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating
FROM properties
LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropertyFilterBuilder {
    owner_id: Option<i32>,
    city_pattern: Option<String>,
    minimum_cost: Option<i32>,
    maximum_cost: Option<i32>,
    minimum_rating: Option<f64>,
}

impl PropertyFilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the filters present in `search`, validating and converting
    /// money from major units to cents.
    pub fn from_search(search: &PropertySearch) -> Result<Self, QueryError> {
        let mut builder = Self::new();

        if let Some(owner_id) = search.owner_id {
            builder = builder.owner(owner_id);
        }
        if let Some(city) = search.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            builder = builder.city(city);
        }
        if let Some(minimum) = search.minimum_price_per_night {
            builder = builder.minimum_cost(dollars_to_cents(minimum)?);
        }
        // An upper bound past the column range matches everything rather than failing
        if let Some(maximum) = search.maximum_price_per_night {
            builder = builder.maximum_cost(dollars_to_cents_capped(maximum)?);
        }
        if let Some(rating) = search.minimum_rating {
            if !rating.is_finite() {
                return Err(QueryError::invalid("minimum_rating must be a number"));
            }
            builder = builder.minimum_rating(rating);
        }

        Ok(builder)
    }

    pub fn owner(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Case-insensitive substring match; LIKE wildcards in `city` match literally.
    pub fn city(mut self, city: &str) -> Self {
        self.city_pattern = Some(format!("%{}%", escape_like(city)));
        self
    }

    pub fn minimum_cost(mut self, cents: i32) -> Self {
        self.minimum_cost = Some(cents);
        self
    }

    pub fn maximum_cost(mut self, cents: i32) -> Self {
        self.maximum_cost = Some(cents);
        self
    }

    pub fn minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// Renders the search query. `limit` must be positive.
    pub fn build(self, limit: i64) -> Result<QueryBuilder<'static, Postgres>, QueryError> {
        if limit <= 0 {
            return Err(QueryError::invalid("limit must be positive"));
        }

        let mut query_builder = QueryBuilder::new(PROPERTY_SEARCH_BASE);
        let mut first_condition = true;

        let mut next_condition = |query_builder: &mut QueryBuilder<'static, Postgres>| {
            query_builder.push(if first_condition { "\nWHERE " } else { "\nAND " });
            first_condition = false;
        };

        if let Some(owner_id) = self.owner_id {
            next_condition(&mut query_builder);
            query_builder.push("properties.owner_id = ").push_bind(owner_id);
        }

        if let Some(pattern) = self.city_pattern {
            next_condition(&mut query_builder);
            query_builder.push("properties.city ILIKE ").push_bind(pattern);
        }

        if let Some(cents) = self.minimum_cost {
            next_condition(&mut query_builder);
            query_builder.push("properties.cost_per_night >= ").push_bind(cents);
        }

        if let Some(cents) = self.maximum_cost {
            next_condition(&mut query_builder);
            query_builder.push("properties.cost_per_night <= ").push_bind(cents);
        }

        query_builder.push("\nGROUP BY properties.id");

        if let Some(rating) = self.minimum_rating {
            query_builder
                .push("\nHAVING avg(property_reviews.rating) >= ")
                .push_bind(rating);
        }

        query_builder
            .push("\nORDER BY properties.cost_per_night, properties.id\nLIMIT ")
            .push_bind(limit);

        Ok(query_builder)
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
