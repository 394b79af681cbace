//! The `sales` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::domain::{Sale, SaleType};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub total_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub total_quantity: Decimal,
    pub sale_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
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

impl TryFrom<Model> for Sale {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let sale_type = SaleType::try_from(model.sale_type.as_str()).map_err(|_| {
            AppError::internal(format!("Sale {} has unknown type '{}'", model.id, model.sale_type))
        })?;
        Ok(Self {
            id: model.id,
            total_amount: model.total_amount,
            total_quantity: model.total_quantity,
            sale_type,
            note: model.note,
            created_at: model.created_at,
        })
    }
}
