// [library] Axum web framework routing components
use axum::{
    extract::FromRef,     // [library] State extraction trait
    routing::{get, post}, // [library] HTTP method routing builders
    Router,
};

// [library] Cookie management middleware; Key signs the session cookie
use tower_cookies::{CookieManagerLayer, Key};

// [business] Import application modules for dependency injection and routing
use crate::{
    config::Config,
    db::Database,
    web::{api, listings, users},
};

// [business] Application state combining the pool handle and the session signing key
// Axum hands each handler only the pieces it extracts via FromRef
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub cookie_key: Key,
}

impl AppState {
    // [security] Fails when the session secret is too short to derive a signing key
    pub fn new(db: Database, config: &Config) -> Result<Self, anyhow::Error> {
        let cookie_key = Key::try_from(config.session_secret())
            .map_err(|e| anyhow::anyhow!("Invalid SESSION_SECRET: {}", e))?;
        Ok(Self { db, cookie_key })
    }
}

// [library] Implement FromRef to allow Axum to extract Database from AppState
impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

// [library] Implement FromRef to allow Axum to extract the cookie Key from AppState
impl FromRef<AppState> for Key {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.cookie_key.clone()
    }
}

// [business] Create the main HTTP application router
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        // [business] Account and session endpoints
        .route("/users", post(users::register_handler))
        .route("/users/login", post(users::login_handler))
        .route("/users/logout", post(users::logout_handler))
        .route("/users/me", get(users::me_handler))
        // [business] JSON API consumed by the browser client
        .route(
            "/api/properties",
            get(api::properties_handler).post(api::create_property_handler),
        )
        .route("/api/reservations", get(api::reservations_handler))
        // [business] Server-rendered listing pages
        .route("/listings", get(listings::search_page_handler))
        .route("/listings/mine", get(listings::my_listings_page_handler))
        .route("/reservations", get(listings::reservations_page_handler))
        // [business] System health monitoring endpoint
        .route("/health", get(health_check))
        // [library] Dependency injection - make state available to all handlers
        .with_state(state)
        // [library] Parses request cookies and writes Set-Cookie headers
        .layer(CookieManagerLayer::new())
}

// [business] Health check endpoint for load balancer probes
async fn health_check() -> &'static str {
    "OK"
}
