// [rust] Module declarations - the binary and the integration tests share these
pub mod config; // Configuration management and environment variable handling
pub mod db; // Connection pool, statements, models and the query layer
pub mod render; // HTML rendering of property listings
pub mod security; // Password hashing
pub mod web; // HTTP routing, handlers and session cookie
