// [rust] HTML output for listing pages
pub mod listing; // Property cards and the page that holds them
pub mod scroll; // Scroll-to-top button behaviour

pub use listing::*;
pub use scroll::*;
