// [business] Query layer, request shapes and shared handler helpers
use crate::{
    db::{queries, Database, NewProperty, PropertySearch, DEFAULT_LIMIT}, // [business] Listing operations
    web::{
        error::{query_error, ApiError}, // [business] QueryError to status mapping
        session::current_user_id,       // [security] Signed session lookup
        users::not_logged_in,           // [security] 401 body shared with /users/me
    },
};

// [library] Axum web framework components for HTTP handling
use axum::{
    extract::{Query, State}, // [library] Search filters from the query string, pool from state
    http::StatusCode,        // [library] HTTP status codes
    response::Json,          // [library] JSON responses
    Form,                    // [library] HTML form data extraction
};

// [library] JSON bodies for the browser client
use serde_json::{json, Value};

// [library] Cookie jar plus the key that verifies signed cookies
use tower_cookies::{Cookies, Key};

// [library] Structured logging for listing events
use tracing::info;

// [business] Page size of the public property search
pub const PROPERTY_PAGE_SIZE: i64 = 20;

// [business] GET /api/properties - Search with optional filters
// Bad filter values are rejected by the query layer as InvalidInput (400)
pub async fn properties_handler(
    State(db): State<Database>,
    Query(search): Query<PropertySearch>,
) -> Result<Json<Value>, ApiError> {
    let properties = queries::get_all_properties(&db, &search, PROPERTY_PAGE_SIZE)
        .await
        .map_err(query_error)?;

    Ok(Json(json!({ "properties": properties })))
}

// [business] GET /api/reservations - Reservations of the logged-in guest
pub async fn reservations_handler(
    State(db): State<Database>,
    State(key): State<Key>,
    cookies: Cookies,
) -> Result<Json<Value>, ApiError> {
    // [security] Only the session decides whose reservations are returned
    let guest_id = current_user_id(&cookies, &key).ok_or_else(not_logged_in)?;

    let reservations = queries::get_all_reservations(&db, guest_id, DEFAULT_LIMIT)
        .await
        .map_err(query_error)?;

    Ok(Json(json!({ "reservations": reservations })))
}

// [business] POST /api/properties - List a property owned by the logged-in user
pub async fn create_property_handler(
    State(db): State<Database>,
    State(key): State<Key>,
    cookies: Cookies,
    Form(mut form): Form<NewProperty>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let owner_id = current_user_id(&cookies, &key).ok_or_else(not_logged_in)?;

    // [security] The owner always comes from the session, never from the form
    form.owner_id = owner_id;

    // [business] Nightly cost arrives in dollars and is stored in cents
    let property = queries::add_property(&db, &form)
        .await
        .map_err(query_error)?;

    info!("User {} listed property {}", owner_id, property.id);
    Ok((StatusCode::CREATED, Json(json!(property))))
}
