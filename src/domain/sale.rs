//! Sale header and line items.
//!
//! Sales are immutable once recorded. Line amounts arrive already computed
//! by the till and are stored as submitted.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::oil::Oil;
use crate::errors::{AppError, AppResult};

/// Kind of sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleType {
    SingleOil,
    Mix,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::SingleOil => "SINGLE_OIL",
            SaleType::Mix => "MIX",
        }
    }
}

impl TryFrom<&str> for SaleType {
    type Error = AppError;

    fn try_from(value: &str) -> AppResult<Self> {
        match value {
            "SINGLE_OIL" => Ok(SaleType::SingleOil),
            "MIX" => Ok(SaleType::Mix),
            _ => Err(AppError::validation("Invalid sale type")),
        }
    }
}

/// Recorded sale header
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(value_type = f64, example = 12000.0)]
    pub total_amount: Decimal,
    #[schema(value_type = f64, example = 3.5)]
    pub total_quantity: Decimal,
    pub sale_type: SaleType,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One requested line, quantity in viss-equivalent
#[derive(Debug, Clone, PartialEq)]
pub struct NewSaleItem {
    pub oil_id: i32,
    pub quantity: Decimal,
    pub line_amount: Decimal,
}

/// Line ready for insertion, with the oil name captured at sale time
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotItem {
    pub oil_id: i32,
    pub oil_name_snapshot: String,
    pub quantity: Decimal,
    pub line_amount: Decimal,
}

/// A validated sale awaiting persistence
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub total_amount: Decimal,
    pub total_quantity: Decimal,
    pub sale_type: SaleType,
    pub note: Option<String>,
    pub items: Vec<NewSaleItem>,
}

impl NewSale {
    /// Validate raw till input.
    ///
    /// Missing or non-positive totals and an empty item list are rejected
    /// together, matching what the till expects to display.
    pub fn new(
        total_amount: Option<Decimal>,
        total_quantity: Option<Decimal>,
        sale_type: Option<&str>,
        note: Option<String>,
        items: Vec<NewSaleItem>,
    ) -> AppResult<Self> {
        let positive = |v: Option<Decimal>| v.filter(|v| *v > Decimal::ZERO);
        let (Some(total_amount), Some(total_quantity), Some(sale_type)) = (
            positive(total_amount),
            positive(total_quantity),
            sale_type.filter(|s| !s.is_empty()),
        ) else {
            return Err(AppError::validation("Missing required sale fields or items"));
        };
        if items.is_empty() {
            return Err(AppError::validation("Missing required sale fields or items"));
        }
        let sale_type = SaleType::try_from(sale_type)?;

        for item in &items {
            if item.quantity <= Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Quantity must be greater than zero for oil {}",
                    item.oil_id
                )));
            }
            if item.line_amount < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Line amount cannot be negative for oil {}",
                    item.oil_id
                )));
            }
        }

        Ok(Self {
            total_amount,
            total_quantity,
            sale_type,
            note: note.filter(|n| !n.trim().is_empty()),
            items,
        })
    }

    /// Distinct oil ids referenced by the items, for a single batch lookup.
    pub fn oil_ids(&self) -> Vec<i32> {
        self.items
            .iter()
            .map(|item| item.oil_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Pair each item with its oil's current English name.
    ///
    /// Fails on the first item whose oil is not in `oils`.
    pub fn snapshot(&self, oils: &[Oil]) -> AppResult<Vec<SnapshotItem>> {
        let names: HashMap<i32, &str> = oils
            .iter()
            .map(|oil| (oil.id, oil.snapshot_name()))
            .collect();

        self.items
            .iter()
            .map(|item| {
                let name = names.get(&item.oil_id).ok_or_else(|| {
                    AppError::NotFound(format!("Oil not found for id {}", item.oil_id))
                })?;
                Ok(SnapshotItem {
                    oil_id: item.oil_id,
                    oil_name_snapshot: (*name).to_string(),
                    quantity: item.quantity,
                    line_amount: item.line_amount,
                })
            })
            .collect()
    }
}
