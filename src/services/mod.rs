//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They reach the database only through the
//! Unit of Work.

mod auth_service;
pub mod container;
mod oil_service;
mod report_service;
mod sale_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, LoginOutcome, PasswordChange};
pub use oil_service::{OilCatalogue, OilService};
pub use report_service::{ReportService, Reporter};
pub use sale_service::{SaleRecorder, SaleService, Weighing};
