//! The `oils` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::domain::{Oil, OilStatus, OilUnit};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "oils")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name_en: String,
    pub name_my: String,
    #[sea_orm(column_type = "Text")]
    pub description_en: String,
    #[sea_orm(column_type = "Text")]
    pub description_my: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub price_per_unit: Decimal,
    pub unit: String,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_item::Entity")]
    SaleItems,
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Oil {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let unit = OilUnit::try_from(model.unit.as_str())
            .map_err(|_| AppError::internal(format!("Oil {} has unknown unit '{}'", model.id, model.unit)))?;
        Ok(Self {
            id: model.id,
            name_en: model.name_en,
            name_my: model.name_my,
            description_en: model.description_en,
            description_my: model.description_my,
            price_per_unit: model.price_per_unit,
            unit,
            image_url: model.image_url,
            status: OilStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
        })
    }
}
