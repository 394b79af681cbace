//! Sale recording and mix quotes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{mix, MixLine, MixQuote, NewSale, Sale};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// One oil put on the scale, weight in ticals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighing {
    pub oil_id: i32,
    pub ticals: Decimal,
}

#[async_trait]
pub trait SaleService: Send + Sync {
    /// Persist a sale and its lines atomically, stamped with the current time
    async fn record(&self, sale: NewSale) -> AppResult<Sale>;

    /// Price weighed oils at their current catalogue prices
    async fn quote(&self, weighings: Vec<Weighing>) -> AppResult<MixQuote>;
}

pub struct SaleRecorder<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SaleRecorder<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Record a sale with an explicit timestamp.
    ///
    /// All referenced oils are loaded in one query inside the transaction;
    /// a missing oil aborts before anything is written.
    pub async fn record_at(&self, new_sale: NewSale, created_at: DateTime<Utc>) -> AppResult<Sale> {
        let oil_ids = new_sale.oil_ids();
        let line_count = new_sale.items.len();

        let sale = with_transaction!(self.uow, |ctx| {
            let oils = ctx.oils().find_by_ids(&oil_ids).await?;
            let items = new_sale.snapshot(&oils)?;
            ctx.sales().insert(&new_sale, items, created_at).await
        })?;

        tracing::info!(
            sale_id = sale.id,
            sale_type = sale.sale_type.as_str(),
            lines = line_count,
            total = %sale.total_amount,
            "Sale recorded"
        );
        Ok(sale)
    }
}

#[async_trait]
impl<U: UnitOfWork> SaleService for SaleRecorder<U> {
    async fn record(&self, sale: NewSale) -> AppResult<Sale> {
        self.record_at(sale, Utc::now()).await
    }

    async fn quote(&self, weighings: Vec<Weighing>) -> AppResult<MixQuote> {
        if weighings.is_empty() {
            return Err(AppError::validation("Enter weights to calculate"));
        }

        let mut ids: Vec<i32> = weighings.iter().map(|w| w.oil_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let oils: HashMap<i32, _> = self
            .uow
            .oils()
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|oil| (oil.id, oil))
            .collect();

        let lines = weighings
            .into_iter()
            .map(|w| {
                let oil = oils.get(&w.oil_id).ok_or_else(|| {
                    AppError::NotFound(format!("Oil not found for id {}", w.oil_id))
                })?;
                Ok(MixLine {
                    oil_id: oil.id,
                    oil_name: oil.name_en.clone(),
                    price_per_unit: oil.price_per_unit,
                    ticals: w.ticals,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        mix::quote(lines)
    }
}
