//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod oil_repository;
mod report_repository;
mod user_repository;

pub use oil_repository::{OilRepository, OilStore};
pub(crate) use oil_repository::into_oils;
pub use report_repository::{ReportRepository, ReportStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use oil_repository::MockOilRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use report_repository::MockReportRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
