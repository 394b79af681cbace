//! Revenue reporting over shop-local calendar periods.
//!
//! Each report issues the totals query and the per-oil breakdown
//! concurrently over the same UTC range.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use super::container::parallel;
use crate::config::DAILY_TOP_OILS_LIMIT;
use crate::domain::period::utc_month_range;
use crate::domain::report::rank_by_revenue;
use crate::domain::{
    DailyReport, DayBounds, MonthBounds, MonthlyReport, MonthlySalesSummary, OilUnit,
};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ReportService: Send + Sync {
    /// Totals and top oils for one shop-local day
    async fn daily(&self, day: DayBounds) -> AppResult<DailyReport>;

    /// Totals and full per-oil breakdown for one shop-local month
    async fn monthly(&self, month: MonthBounds) -> AppResult<MonthlyReport>;

    /// Revenue total for a calendar month measured in UTC
    async fn monthly_summary(&self, year: i32, month: u32) -> AppResult<MonthlySalesSummary>;
}

pub struct Reporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Reporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    pub async fn daily_at(&self, day: DayBounds, generated_at: DateTime<Utc>) -> AppResult<DailyReport> {
        let range = day.range.utc();
        let reports = self.uow.reports();
        let (totals, rows) =
            parallel::join2(reports.sales_totals(range), reports.revenue_by_oil(range)).await?;

        let top = rank_by_revenue(rows, Some(DAILY_TOP_OILS_LIMIT));
        Ok(DailyReport::new(&day, totals, top, generated_at))
    }

    pub async fn monthly_at(
        &self,
        month: MonthBounds,
        generated_at: DateTime<Utc>,
    ) -> AppResult<MonthlyReport> {
        let range = month.range.utc();
        let reports = self.uow.reports();
        let (totals, rows) =
            parallel::join2(reports.sales_totals(range), reports.revenue_by_oil(range)).await?;

        let rows = rank_by_revenue(rows, None);
        let units: HashMap<i32, OilUnit> = if rows.is_empty() {
            HashMap::new()
        } else {
            let ids = rows.iter().map(|row| row.oil_id).collect();
            self.uow
                .oils()
                .find_by_ids(ids)
                .await?
                .into_iter()
                .map(|oil| (oil.id, oil.unit))
                .collect()
        };

        Ok(MonthlyReport::new(&month, totals, rows, &units, generated_at))
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for Reporter<U> {
    async fn daily(&self, day: DayBounds) -> AppResult<DailyReport> {
        self.daily_at(day, Utc::now()).await
    }

    async fn monthly(&self, month: MonthBounds) -> AppResult<MonthlyReport> {
        self.monthly_at(month, Utc::now()).await
    }

    async fn monthly_summary(&self, year: i32, month: u32) -> AppResult<MonthlySalesSummary> {
        let range = utc_month_range(year, month)?;
        let totals = self.uow.reports().sales_totals(range).await?;

        Ok(MonthlySalesSummary {
            year,
            month,
            total_sales_value: totals.total_amount,
        })
    }
}
