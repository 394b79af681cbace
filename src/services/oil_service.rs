//! Oil catalogue management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewOil, Oil, OilChanges, OilStatus};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait OilService: Send + Sync {
    /// Active oils, newest first
    async fn list_active(&self) -> AppResult<Vec<Oil>>;

    /// Every oil including deactivated ones, newest first
    async fn list_all(&self) -> AppResult<Vec<Oil>>;

    async fn create(&self, oil: NewOil) -> AppResult<Oil>;

    async fn update(&self, id: i32, changes: OilChanges) -> AppResult<Oil>;

    /// Hide an oil from the catalogue. Past sales keep referencing it.
    async fn deactivate(&self, id: i32) -> AppResult<Oil>;
}

pub struct OilCatalogue<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OilCatalogue<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> OilService for OilCatalogue<U> {
    async fn list_active(&self) -> AppResult<Vec<Oil>> {
        self.uow.oils().list(false).await
    }

    async fn list_all(&self) -> AppResult<Vec<Oil>> {
        self.uow.oils().list(true).await
    }

    async fn create(&self, oil: NewOil) -> AppResult<Oil> {
        oil.validate()?;
        let created = self.uow.oils().create(oil).await?;
        tracing::info!(oil_id = created.id, name = %created.name_en, "Oil created");
        Ok(created)
    }

    async fn update(&self, id: i32, changes: OilChanges) -> AppResult<Oil> {
        changes.validate()?;
        self.uow.oils().update(id, changes).await
    }

    async fn deactivate(&self, id: i32) -> AppResult<Oil> {
        let changes = OilChanges {
            status: Some(OilStatus::Inactive),
            ..Default::default()
        };
        let oil = self.uow.oils().update(id, changes).await?;
        tracing::info!(oil_id = id, "Oil deactivated");
        Ok(oil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OilUnit;
    use crate::errors::AppError;
    use crate::infra::MockOilRepository;
    use crate::services::test_support::{oil, TestUnitOfWork};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn service(oils: MockOilRepository) -> OilCatalogue<TestUnitOfWork> {
        OilCatalogue::new(Arc::new(TestUnitOfWork::with_oils(oils)))
    }

    fn sesame() -> NewOil {
        NewOil {
            name_en: "Sesame Oil".to_string(),
            name_my: "နှမ်းဆီ".to_string(),
            description_en: "Cold-pressed sesame oil".to_string(),
            description_my: "နှမ်းဆီ".to_string(),
            price_per_unit: dec!(6800),
            unit: OilUnit::Viss,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_public_list_hides_inactive() {
        let mut oils = MockOilRepository::new();
        oils.expect_list()
            .with(eq(false))
            .times(1)
            .returning(|_| Ok(vec![oil(2, "Groundnut Oil", dec!(5200))]));

        let listed = service(oils).list_active().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_admin_list_includes_inactive() {
        let mut oils = MockOilRepository::new();
        oils.expect_list().with(eq(true)).times(1).returning(|_| Ok(vec![]));

        assert!(service(oils).list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_price() {
        let mut oils = MockOilRepository::new();
        oils.expect_create().never();

        let mut new_oil = sesame();
        new_oil.price_per_unit = Decimal::ZERO;
        let result = service(oils).create(new_oil).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_valid_oil() {
        let mut oils = MockOilRepository::new();
        oils.expect_create()
            .times(1)
            .returning(|new_oil| Ok(oil(9, &new_oil.name_en, new_oil.price_per_unit)));

        let created = service(oils).create(sesame()).await.unwrap();
        assert_eq!(created.id, 9);
        assert_eq!(created.name_en, "Sesame Oil");
    }

    #[tokio::test]
    async fn test_deactivate_sets_inactive_status() {
        let mut oils = MockOilRepository::new();
        oils.expect_update()
            .withf(|id, changes| *id == 4 && changes.status == Some(OilStatus::Inactive))
            .times(1)
            .returning(|id, _| {
                let mut inactive = oil(id, "Sunflower Oil", dec!(4500));
                inactive.status = OilStatus::Inactive;
                Ok(inactive)
            });

        let oil = service(oils).deactivate(4).await.unwrap();
        assert!(!oil.is_active());
    }

    #[tokio::test]
    async fn test_update_missing_oil() {
        let mut oils = MockOilRepository::new();
        oils.expect_update()
            .returning(|_, _| Err(AppError::not_found("Oil")));

        let changes = OilChanges {
            price_per_unit: Some(dec!(3600)),
            ..Default::default()
        };
        let result = service(oils).update(99, changes).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
