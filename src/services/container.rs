//! Service container plus helpers for running independent queries together.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, OilCatalogue, OilService, ReportService, Reporter, SaleRecorder,
    SaleService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn oils(&self) -> Arc<dyn OilService>;

    fn sales(&self) -> Arc<dyn SaleService>;

    fn reports(&self) -> Arc<dyn ReportService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    oil_service: Arc<dyn OilService>,
    sale_service: Arc<dyn SaleService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    /// Wire every service over one shared Unit of Work
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            oil_service: Arc::new(OilCatalogue::new(uow.clone())),
            sale_service: Arc::new(SaleRecorder::new(uow.clone())),
            report_service: Arc::new(Reporter::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn oils(&self) -> Arc<dyn OilService> {
        self.oil_service.clone()
    }

    fn sales(&self) -> Arc<dyn SaleService> {
        self.sale_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently and the function returns when both complete.
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
