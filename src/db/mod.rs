// [rust] Module declarations - organize database-related functionality
pub mod error; // Query failure taxonomy
pub mod filters; // Property search query builder
pub mod models; // Rows and request shapes
pub mod pool; // Connection pool wrapper - the single path to the database
pub mod queries; // The six query-layer operations

// [rust] Re-export so callers can write db::get_user_with_email instead of db::queries::...
pub use error::QueryError;
pub use models::*;
pub use pool::{close_pool, create_pool, Database};
pub use queries::*;
