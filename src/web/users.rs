// [business] Import application modules for account and session handling
use crate::{
    db::{queries, Database, NewUser, QueryError}, // [business] User operations and their errors
    security::{hash_password, verify_password},   // [security] Password hashing using Argon2id
    web::{
        error::{api_error, query_error, ApiError}, // [business] Error bodies and status mapping
        session::{current_user_id, end_session, start_session}, // [security] Signed session cookie
    },
};

// [library] Axum web framework components for HTTP handling
use axum::{
    extract::State,   // [library] Extract pool and cookie key from application state
    http::StatusCode, // [library] HTTP status codes
    response::Json,   // [library] JSON responses
    Form,             // [library] HTML form data extraction
};

// [library] Form deserialization and JSON bodies
use serde::Deserialize;
use serde_json::{json, Value};

// [library] Cookie management for session handling
use tower_cookies::{Cookies, Key};

// [library] Structured logging for authentication events
use tracing::{error, info, warn};

// [business] Registration form submitted by the sign-up page
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,     // [business] Display name
    pub email: String,    // [business] Login identifier, unique in storage
    pub password: String, // [security] Plaintext password, hashed before storage
}

// [business] Login form data
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,    // [business] User's email address (login identifier)
    pub password: String, // [security] User's plaintext password (verified against the hash)
}

// [business] POST /users - Create an account and log it in
pub async fn register_handler(
    State(db): State<Database>,
    State(key): State<Key>,
    cookies: Cookies,
    Form(form): Form<RegisterForm>,
) -> Result<Json<Value>, ApiError> {
    info!("Registration attempt for email: {}", form.email);

    // [business] Reject incomplete forms before touching storage
    if let Some(problem) = validate_registration(&form) {
        warn!("Rejected registration for {}: {}", form.email, problem);
        return Err(api_error(StatusCode::BAD_REQUEST, problem));
    }

    // [security] Only the Argon2id hash is stored
    let password = hash_password(&form.password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Registration failed")
    })?;

    let new_user = NewUser {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password,
    };

    // [business] The unique email index reports duplicates as a constraint violation
    let user = queries::add_user(&db, &new_user).await.map_err(|e| match e {
        QueryError::ConstraintViolation(_) => {
            warn!("Registration with existing email: {}", new_user.email);
            api_error(StatusCode::CONFLICT, "An account with this email already exists")
        }
        other => query_error(other),
    })?;

    info!("Created user {} ({})", user.id, user.email);
    // [security] New accounts are logged in straight away
    start_session(&cookies, &key, user.id);

    Ok(Json(json!({ "user": user })))
}

// [business] POST /users/login - Verify credentials and start a session
pub async fn login_handler(
    State(db): State<Database>,
    State(key): State<Key>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Json<Value>, ApiError> {
    info!("Login attempt for email: {}", form.email);

    let user = match queries::get_user_with_email(&db, form.email.trim()).await {
        Ok(user) => user,
        // [security] Unknown email and wrong password share one response
        Err(QueryError::NotFound) => {
            warn!("User not found: {}", form.email);
            return Err(invalid_credentials());
        }
        Err(e) => return Err(query_error(e)),
    };

    // [security] Verify password using constant-time comparison (Argon2id)
    match verify_password(&form.password, &user.password) {
        Ok(true) => {
            info!("Successful login for user: {}", user.email);
            start_session(&cookies, &key, user.id);
            Ok(Json(json!({ "user": user })))
        }
        Ok(false) => {
            warn!("Invalid password for user: {}", form.email);
            Err(invalid_credentials())
        }
        Err(e) => {
            error!("Password verification error for user {}: {}", user.id, e);
            Err(invalid_credentials())
        }
    }
}

// [security] POST /users/logout - Remove the session cookie
pub async fn logout_handler(State(key): State<Key>, cookies: Cookies) -> StatusCode {
    end_session(&cookies, &key);
    StatusCode::NO_CONTENT
}

// [business] GET /users/me - Session hydration
pub async fn me_handler(
    State(db): State<Database>,
    State(key): State<Key>,
    cookies: Cookies,
) -> Result<Json<Value>, ApiError> {
    let Some(user_id) = current_user_id(&cookies, &key) else {
        return Err(not_logged_in());
    };

    match queries::get_user_with_id(&db, user_id).await {
        Ok(user) => Ok(Json(json!({ "user": user }))),
        Err(QueryError::NotFound) => {
            // Account is gone; drop the stale cookie
            warn!("Session refers to missing user {}", user_id);
            end_session(&cookies, &key);
            Err(not_logged_in())
        }
        Err(e) => Err(query_error(e)),
    }
}

// [business] Body the browser client checks for on every page load
pub fn not_logged_in() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "not logged in" })),
    )
}

fn invalid_credentials() -> ApiError {
    api_error(StatusCode::UNAUTHORIZED, "Invalid email or password")
}

// [business] Minimal shape checks; uniqueness is left to storage
fn validate_registration(form: &RegisterForm) -> Option<&'static str> {
    if form.name.trim().is_empty() {
        return Some("Name is required");
    }
    let email = form.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Some("A valid email is required");
    }
    if form.password.is_empty() {
        return Some("Password is required");
    }
    None
}
