// [library] SQLx - async PostgreSQL driver with built-in connection pooling
use sqlx::{
    postgres::{PgArguments, PgConnectOptions, PgPoolOptions, PgRow},
    query::QueryAs,
    Execute, FromRow, Pool, Postgres,
};
use std::sync::Arc; // [rust] Atomic Reference Counting for shared ownership across tasks

// [library] Structured logging for statement failures
use tracing::{debug, error};

// [business] Local types - connection settings and the error taxonomy
use super::error::QueryError;
use crate::config::DatabaseSettings;

// [rust] Type alias - the pool handle injected into handlers and query functions
// Arc makes cloning into axum state and spawned tasks cheap
pub type Database = Arc<Pool<Postgres>>;

// [business] Translate the four recognized options into driver connect options
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .username(&settings.user)
        .password(settings.password())
        .database(&settings.database)
}

// [business] Database connection factory - establishes the pool and runs migrations
// Called once at startup; the returned handle is the only way to reach the database
pub async fn create_pool(settings: &DatabaseSettings) -> Result<Database, sqlx::Error> {
    // [library] Pool connections are opened on demand and reused for the life of the process
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(connect_options(settings))
        .await?; // [rust] ? operator propagates connection errors

    // [business] Schema lives in ./migrations and is embedded at compile time
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(Arc::new(pool))
}

// [business] Graceful teardown - waits for checked-out connections to be returned
pub async fn close_pool(db: &Database) {
    db.close().await;
}

// Parameters are never logged; they carry emails and password hashes
fn compact(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn log_failure(sql: &str, err: sqlx::Error) -> QueryError {
    let err = QueryError::from(err);
    match &err {
        QueryError::NotFound | QueryError::ConstraintViolation(_) => {
            debug!("Statement rejected: {} - {}", compact(sql), err)
        }
        _ => error!("Statement failed: {} - {}", compact(sql), err),
    }
    err
}

// [business] Execute a bound query and return all rows
pub async fn fetch_all<'q, T>(
    db: &Database,
    query: QueryAs<'q, Postgres, T, PgArguments>,
) -> Result<Vec<T>, QueryError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = query.sql();
    debug!("Executing {}", compact(sql));
    query
        .fetch_all(db.as_ref())
        .await
        .map_err(|e| log_failure(sql, e))
}

// [business] Execute a bound query that must yield exactly one row
// An empty result is reported as QueryError::NotFound
pub async fn fetch_one<'q, T>(
    db: &Database,
    query: QueryAs<'q, Postgres, T, PgArguments>,
) -> Result<T, QueryError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = query.sql();
    debug!("Executing {}", compact(sql));
    query
        .fetch_optional(db.as_ref())
        .await
        .map_err(|e| log_failure(sql, e))?
        .ok_or(QueryError::NotFound)
}
