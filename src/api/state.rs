//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, OilService, ReportService, SaleService, ServiceContainer, Services,
};

/// Services and infrastructure shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub oil_service: Arc<dyn OilService>,
    pub sale_service: Arc<dyn SaleService>,
    pub report_service: Arc<dyn ReportService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
    /// Extra CORS origin for the deployed frontend
    pub frontend_url: Option<String>,
}

impl AppState {
    /// Wire all services over the given database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let frontend_url = config.frontend_url.clone();
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            oil_service: container.oils(),
            sale_service: container.sales(),
            report_service: container.reports(),
            database,
            frontend_url,
        }
    }
}
