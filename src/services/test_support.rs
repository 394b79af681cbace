//! Unit of Work over mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{Oil, OilStatus, OilUnit};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    MockOilRepository, MockReportRepository, MockUserRepository, OilRepository,
    ReportRepository, TransactionContext, UnitOfWork, UserRepository,
};

pub(crate) struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    oils: Arc<MockOilRepository>,
    reports: Arc<MockReportRepository>,
}

impl TestUnitOfWork {
    fn new(users: MockUserRepository, oils: MockOilRepository, reports: MockReportRepository) -> Self {
        Self {
            users: Arc::new(users),
            oils: Arc::new(oils),
            reports: Arc::new(reports),
        }
    }

    pub(crate) fn with_users(users: MockUserRepository) -> Self {
        Self::new(users, MockOilRepository::new(), MockReportRepository::new())
    }

    pub(crate) fn with_oils(oils: MockOilRepository) -> Self {
        Self::new(MockUserRepository::new(), oils, MockReportRepository::new())
    }

    pub(crate) fn with_reports(reports: MockReportRepository, oils: MockOilRepository) -> Self {
        Self::new(MockUserRepository::new(), oils, reports)
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn oils(&self) -> Arc<dyn OilRepository> {
        self.oils.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.reports.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transactions need a real connection; see tests/sale_flow_test.rs
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub(crate) fn oil(id: i32, name_en: &str, price_per_unit: Decimal) -> Oil {
    Oil {
        id,
        name_en: name_en.to_string(),
        name_my: "ဆီ".to_string(),
        description_en: format!("{name_en} from the shop"),
        description_my: "ဆီ".to_string(),
        price_per_unit,
        unit: OilUnit::Viss,
        image_url: None,
        status: OilStatus::Active,
        created_at: Utc::now(),
    }
}
