// [library] Axum response building blocks
use axum::{
    http::StatusCode,
    response::{Html, Json},
};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::db::QueryError;

// [rust] Handler error types - a status code plus a body, like the rest of the router
pub type ApiError = (StatusCode, Json<Value>);
pub type PageError = (StatusCode, Html<String>);

// [business] HTTP status for each query failure kind
pub fn status_for(err: &QueryError) -> StatusCode {
    match err {
        QueryError::NotFound => StatusCode::NOT_FOUND,
        QueryError::ConstraintViolation(_) => StatusCode::CONFLICT,
        QueryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        QueryError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        QueryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// [security] Storage details stay in the logs; clients get a generic message
fn public_message(err: &QueryError) -> String {
    match err {
        QueryError::NotFound => "Not found".to_string(),
        QueryError::ConstraintViolation(_) => "Conflicts with existing data".to_string(),
        QueryError::InvalidInput(message) => message.clone(),
        QueryError::StorageUnavailable(_) => "Service temporarily unavailable".to_string(),
        QueryError::Storage(_) => "Internal server error".to_string(),
    }
}

fn log(err: &QueryError) {
    match err {
        QueryError::StorageUnavailable(_) | QueryError::Storage(_) => {
            error!("Request failed: {}", err)
        }
        _ => warn!("Request rejected: {}", err),
    }
}

pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

pub fn query_error(err: QueryError) -> ApiError {
    log(&err);
    api_error(status_for(&err), &public_message(&err))
}

pub fn page_error(err: QueryError) -> PageError {
    log(&err);
    (
        status_for(&err),
        Html(format!(
            "<p class=\"error\">{}</p>",
            html_escape::encode_text(&public_message(&err))
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&QueryError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&QueryError::ConstraintViolation("dup".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&QueryError::invalid("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&QueryError::StorageUnavailable(sqlx::Error::PoolTimedOut)),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&QueryError::Storage(sqlx::Error::RowNotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_details_not_leaked() {
        let (status, Json(body)) = query_error(QueryError::ConstraintViolation(
            "duplicate key value violates unique constraint \"users_email_key\"".into(),
        ));
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflicts with existing data");
    }

    #[test]
    fn test_invalid_input_message_passed_through() {
        let (status, Json(body)) = query_error(QueryError::invalid("limit must be positive"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "limit must be positive");
    }
}
