//! Aggregate queries over recorded sales.
//!
//! Both queries take a half-open UTC range: `start <= created_at < end`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect, RelationTrait,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{
    sale::{self, Entity as SaleEntity},
    sale_item::{self, Entity as SaleItemEntity},
};
use crate::domain::{OilRevenue, SalesTotals, UtcRange};
use crate::errors::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Sum of sale totals and number of sales in range
    async fn sales_totals(&self, range: UtcRange) -> AppResult<SalesTotals>;

    /// Sale lines in range grouped by oil, in no particular order
    async fn revenue_by_oil(&self, range: UtcRange) -> AppResult<Vec<OilRevenue>>;
}

pub struct ReportStore {
    db: DatabaseConnection,
}

impl ReportStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct OilRevenueRow {
    oil_id: i32,
    oil_name_snapshot: Option<String>,
    quantity_sold: Option<Decimal>,
    revenue: Option<Decimal>,
    line_count: i64,
}

impl From<OilRevenueRow> for OilRevenue {
    fn from(row: OilRevenueRow) -> Self {
        Self {
            oil_id: row.oil_id,
            oil_name_snapshot: row.oil_name_snapshot,
            quantity_sold: row.quantity_sold.unwrap_or_default(),
            revenue: row.revenue.unwrap_or_default(),
            line_count: u64::try_from(row.line_count).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ReportRepository for ReportStore {
    async fn sales_totals(&self, range: UtcRange) -> AppResult<SalesTotals> {
        let row = SaleEntity::find()
            .select_only()
            .column_as(Expr::col((SaleEntity, sale::Column::TotalAmount)).sum(), "total_amount")
            .column_as(Expr::col((SaleEntity, sale::Column::Id)).count(), "transactions")
            .filter(sale::Column::CreatedAt.gte(range.start))
            .filter(sale::Column::CreatedAt.lt(range.end))
            .into_tuple::<(Option<Decimal>, i64)>()
            .one(&self.db)
            .await?;

        Ok(match row {
            Some((total_amount, transactions)) => SalesTotals {
                total_amount: total_amount.unwrap_or_default(),
                transactions: u64::try_from(transactions).unwrap_or_default(),
            },
            None => SalesTotals::default(),
        })
    }

    async fn revenue_by_oil(&self, range: UtcRange) -> AppResult<Vec<OilRevenue>> {
        let rows = SaleItemEntity::find()
            .select_only()
            .column(sale_item::Column::OilId)
            .column_as(
                Expr::col((SaleItemEntity, sale_item::Column::OilNameSnapshot)).max(),
                "oil_name_snapshot",
            )
            .column_as(
                Expr::col((SaleItemEntity, sale_item::Column::Quantity)).sum(),
                "quantity_sold",
            )
            .column_as(
                Expr::col((SaleItemEntity, sale_item::Column::LineAmount)).sum(),
                "revenue",
            )
            .column_as(Expr::col((SaleItemEntity, sale_item::Column::Id)).count(), "line_count")
            .join(sea_orm::JoinType::InnerJoin, sale_item::Relation::Sale.def())
            .filter(sale::Column::CreatedAt.gte(range.start))
            .filter(sale::Column::CreatedAt.lt(range.end))
            .group_by(sale_item::Column::OilId)
            .into_model::<OilRevenueRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(OilRevenue::from).collect())
    }
}
