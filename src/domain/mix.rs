//! Weight-based pricing for the mix calculator.
//!
//! Oils are weighed in ticals and priced per viss (100 ticals), so each
//! line costs `price_per_unit * ticals / 100`.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::sale::SaleType;
use crate::config::TICALS_PER_VISS;
use crate::errors::{AppError, AppResult};

pub fn ticals_to_viss(ticals: Decimal) -> Decimal {
    ticals / Decimal::from(TICALS_PER_VISS)
}

/// One weighed oil
#[derive(Debug, Clone, PartialEq)]
pub struct MixLine {
    pub oil_id: i32,
    pub oil_name: String,
    pub price_per_unit: Decimal,
    pub ticals: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotedLine {
    pub oil_id: i32,
    pub oil_name: String,
    #[schema(value_type = f64)]
    pub price_per_unit: Decimal,
    #[schema(value_type = f64)]
    pub ticals: Decimal,
    /// viss-equivalent
    #[schema(value_type = f64)]
    pub quantity: Decimal,
    #[schema(value_type = f64)]
    pub line_amount: Decimal,
}

/// Priced mix, shaped so it can be submitted as a sale
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MixQuote {
    pub sale_type: SaleType,
    pub items: Vec<QuotedLine>,
    #[schema(value_type = f64)]
    pub total_ticals: Decimal,
    #[schema(value_type = f64)]
    pub total_quantity: Decimal,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
}

/// Price a set of weighed oils. Zero-weight lines are dropped.
pub fn quote(lines: Vec<MixLine>) -> AppResult<MixQuote> {
    if let Some(line) = lines.iter().find(|l| l.ticals < Decimal::ZERO) {
        return Err(AppError::validation(format!(
            "Weight cannot be negative for oil {}",
            line.oil_id
        )));
    }

    let items: Vec<QuotedLine> = lines
        .into_iter()
        .filter(|l| l.ticals > Decimal::ZERO)
        .map(|l| {
            let quantity = ticals_to_viss(l.ticals);
            QuotedLine {
                line_amount: l.price_per_unit * quantity,
                quantity,
                oil_id: l.oil_id,
                oil_name: l.oil_name,
                price_per_unit: l.price_per_unit,
                ticals: l.ticals,
            }
        })
        .collect();

    if items.is_empty() {
        return Err(AppError::validation("Enter weights to calculate"));
    }

    let total_ticals = items.iter().map(|i| i.ticals).sum();
    let total_quantity = items.iter().map(|i| i.quantity).sum();
    let total_amount = items.iter().map(|i| i.line_amount).sum();
    let sale_type = if items.len() == 1 {
        SaleType::SingleOil
    } else {
        SaleType::Mix
    };

    Ok(MixQuote {
        sale_type,
        items,
        total_ticals,
        total_quantity,
        total_amount,
    })
}
