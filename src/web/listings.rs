// [business] Query layer, listing renderer and shared handler helpers
use crate::{
    db::{queries, Database, PropertySearch, DEFAULT_LIMIT}, // [business] Listing operations
    render::{create_listing, create_reservation_listing, listings_page}, // [business] HTML cards and page
    web::{
        api::PROPERTY_PAGE_SIZE,         // [business] Same page size as the JSON search
        error::{page_error, PageError}, // [business] QueryError to HTML error page
        session::current_user_id,       // [security] Signed session lookup
    },
};

// [library] Axum web framework components for HTTP handling
use axum::{
    extract::{Query, State}, // [library] Search filters from the query string, pool from state
    http::StatusCode,        // [library] HTTP status codes
    response::Html,          // [library] HTML responses
};

// [library] Cookie jar plus the key that verifies signed cookies
use tower_cookies::{Cookies, Key};

// [business] GET /listings - Search results as HTML
pub async fn search_page_handler(
    State(db): State<Database>,
    Query(search): Query<PropertySearch>,
) -> Result<Html<String>, PageError> {
    let listings = queries::get_all_properties(&db, &search, PROPERTY_PAGE_SIZE)
        .await
        .map_err(page_error)?;

    let cards: Vec<String> = listings.iter().map(|l| create_listing(l, None)).collect();
    Ok(Html(listings_page("Search Results", &cards)))
}

// [business] GET /listings/mine - Properties owned by the logged-in user
pub async fn my_listings_page_handler(
    State(db): State<Database>,
    State(key): State<Key>,
    cookies: Cookies,
) -> Result<Html<String>, PageError> {
    // [security] The owner filter comes from the session, not the query string
    let owner_id = current_user_id(&cookies, &key).ok_or_else(login_required)?;

    let search = PropertySearch {
        owner_id: Some(owner_id),
        ..Default::default()
    };
    let listings = queries::get_all_properties(&db, &search, PROPERTY_PAGE_SIZE)
        .await
        .map_err(page_error)?;

    let cards: Vec<String> = listings.iter().map(|l| create_listing(l, None)).collect();
    Ok(Html(listings_page("My Listings", &cards)))
}

// [business] GET /reservations - Reservations of the logged-in user as HTML
pub async fn reservations_page_handler(
    State(db): State<Database>,
    State(key): State<Key>,
    cookies: Cookies,
) -> Result<Html<String>, PageError> {
    let guest_id = current_user_id(&cookies, &key).ok_or_else(login_required)?;

    let reservations = queries::get_all_reservations(&db, guest_id, DEFAULT_LIMIT)
        .await
        .map_err(page_error)?;

    // [business] Reservation cards also show the stay dates
    let cards: Vec<String> = reservations.iter().map(create_reservation_listing).collect();
    Ok(Html(listings_page("My Reservations", &cards)))
}

// [security] Anonymous visitors get a 401 page instead of someone else's listings
fn login_required() -> PageError {
    (
        StatusCode::UNAUTHORIZED,
        Html("<p class=\"error\">Please log in first.</p>".to_string()),
    )
}
