//! Infrastructure layer - database access
//!
//! Connection management, migrations, SeaORM repositories and the
//! Unit of Work used for transactional writes.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    OilRepository, OilStore, ReportRepository, ReportStore, UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxOilRepository, TxSaleRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockOilRepository, MockReportRepository, MockUserRepository};
