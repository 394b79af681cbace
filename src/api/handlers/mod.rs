//! HTTP request handlers.

pub mod auth_handler;
pub mod oil_handler;
pub mod report_handler;
pub mod sale_handler;

pub use auth_handler::{admin_auth_routes, auth_routes};
pub use oil_handler::{admin_oil_routes, oil_routes};
pub use report_handler::report_routes;
pub use sale_handler::sale_routes;
