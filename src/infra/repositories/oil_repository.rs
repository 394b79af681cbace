//! Oil catalogue persistence.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::oil::{self, ActiveModel, Entity as OilEntity, Model};
use crate::domain::{NewOil, Oil, OilChanges, OilStatus};
use crate::errors::{AppResult, OptionExt};

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OilRepository: Send + Sync {
    /// Newest first; inactive oils only when `include_inactive` is set
    async fn list(&self, include_inactive: bool) -> AppResult<Vec<Oil>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Oil>>;

    /// Batch lookup; ids without a row are simply absent from the result
    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Oil>>;

    async fn create(&self, oil: NewOil) -> AppResult<Oil>;

    async fn update(&self, id: i32, changes: OilChanges) -> AppResult<Oil>;

    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM-backed oil repository
pub struct OilStore {
    db: DatabaseConnection,
}

impl OilStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn into_oils(models: Vec<Model>) -> AppResult<Vec<Oil>> {
    models.into_iter().map(Oil::try_from).collect()
}

#[async_trait]
impl OilRepository for OilStore {
    async fn list(&self, include_inactive: bool) -> AppResult<Vec<Oil>> {
        let mut query = OilEntity::find();
        if !include_inactive {
            query = query.filter(oil::Column::Status.eq(OilStatus::Active.as_str()));
        }

        let models = query
            .order_by_desc(oil::Column::CreatedAt)
            .order_by_desc(oil::Column::Id)
            .all(&self.db)
            .await?;

        into_oils(models)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Oil>> {
        OilEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Oil::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Oil>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = OilEntity::find()
            .filter(oil::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        into_oils(models)
    }

    async fn create(&self, new_oil: NewOil) -> AppResult<Oil> {
        let now = Utc::now();
        let model = ActiveModel {
            name_en: Set(new_oil.name_en),
            name_my: Set(new_oil.name_my),
            description_en: Set(new_oil.description_en),
            description_my: Set(new_oil.description_my),
            price_per_unit: Set(new_oil.price_per_unit),
            unit: Set(new_oil.unit.as_str().to_string()),
            image_url: Set(new_oil.image_url),
            status: Set(OilStatus::Active.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Oil::try_from(model)
    }

    async fn update(&self, id: i32, changes: OilChanges) -> AppResult<Oil> {
        let model = OilEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Oil")?;

        let mut active: ActiveModel = model.into();
        if let Some(name_en) = changes.name_en {
            active.name_en = Set(name_en);
        }
        if let Some(name_my) = changes.name_my {
            active.name_my = Set(name_my);
        }
        if let Some(description_en) = changes.description_en {
            active.description_en = Set(description_en);
        }
        if let Some(description_my) = changes.description_my {
            active.description_my = Set(description_my);
        }
        if let Some(price) = changes.price_per_unit {
            active.price_per_unit = Set(price);
        }
        if let Some(unit) = changes.unit {
            active.unit = Set(unit.as_str().to_string());
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Oil::try_from(model)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(OilEntity::find().count(&self.db).await?)
    }
}
