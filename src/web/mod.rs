pub mod api;
pub mod error;
pub mod listings;
pub mod routes;
pub mod session;
pub mod users;

pub use routes::*;
