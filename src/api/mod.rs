//! API layer - HTTP handlers and middleware
//!
//! Routes are split into a public group (login, active catalogue) and an
//! admin group guarded by JWT plus role checks.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
