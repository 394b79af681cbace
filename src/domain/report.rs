//! Revenue report figures and their response shapes.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use super::oil::OilUnit;
use super::period::{DayBounds, MonthBounds};
use crate::config::{
    CURRENCY_CODE, CURRENCY_MINOR_UNIT, QUANTITY_PRECISION, SHOP_TIMEZONE,
    SHOP_UTC_OFFSET_MINUTES, TICALS_PER_VISS,
};

/// `2026-01-15T03:00:00.123Z`, matching the period bounds.
fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Sum and count of sale headers in a range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesTotals {
    pub total_amount: Decimal,
    pub transactions: u64,
}

/// Sale lines of one oil aggregated over a range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OilRevenue {
    pub oil_id: i32,
    /// Latest-sorting name snapshot among the grouped lines
    pub oil_name_snapshot: Option<String>,
    pub quantity_sold: Decimal,
    pub revenue: Decimal,
    pub line_count: u64,
}

/// Order by revenue, highest first, keeping at most `limit` rows.
///
/// The sort is stable, so groups with equal revenue keep their input order.
pub fn rank_by_revenue(mut rows: Vec<OilRevenue>, limit: Option<usize>) -> Vec<OilRevenue> {
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

// =============================================================================
// Daily report
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPeriod {
    #[serde(rename = "type")]
    #[schema(example = "day")]
    pub kind: String,
    #[schema(example = "Asia/Yangon")]
    pub timezone: String,
    #[schema(example = "2026-01-15")]
    pub date_local: String,
    #[schema(example = "2026-01-15T00:00:00+06:30")]
    pub start_local: String,
    #[schema(example = "2026-01-16T00:00:00+06:30")]
    pub end_local_exclusive: String,
    #[schema(example = "2026-01-14T17:30:00.000Z")]
    pub start_utc: String,
    #[schema(example = "2026-01-15T17:30:00.000Z")]
    pub end_utc_exclusive: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    #[schema(value_type = f64)]
    pub total_sales_amount: Decimal,
    pub transactions_count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopOil {
    pub oil_id: i32,
    pub oil_name_snapshot: Option<String>,
    #[schema(value_type = f64)]
    pub revenue: Decimal,
    #[schema(value_type = f64)]
    pub quantity_sold: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub period: DailyPeriod,
    #[schema(example = "MMK")]
    pub currency: String,
    #[schema(example = "viss-equivalent")]
    pub quantity_definition: String,
    pub totals: DailyTotals,
    pub top_oils_by_revenue: Vec<TopOil>,
    #[serde(serialize_with = "iso_millis")]
    #[schema(value_type = String, example = "2026-01-15T03:00:00.123Z")]
    pub generated_at: DateTime<Utc>,
}

impl DailyReport {
    pub fn new(
        day: &DayBounds,
        totals: SalesTotals,
        top: Vec<OilRevenue>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            period: DailyPeriod {
                kind: "day".to_string(),
                timezone: SHOP_TIMEZONE.to_string(),
                date_local: day.date_local(),
                start_local: day.range.start_local(),
                end_local_exclusive: day.range.end_local_exclusive(),
                start_utc: day.range.start_utc_iso(),
                end_utc_exclusive: day.range.end_utc_exclusive_iso(),
            },
            currency: CURRENCY_CODE.to_string(),
            quantity_definition: "viss-equivalent".to_string(),
            totals: DailyTotals {
                total_sales_amount: totals.total_amount,
                transactions_count: totals.transactions,
            },
            top_oils_by_revenue: top
                .into_iter()
                .map(|row| TopOil {
                    oil_id: row.oil_id,
                    oil_name_snapshot: row.oil_name_snapshot,
                    revenue: row.revenue,
                    quantity_sold: row.quantity_sold,
                })
                .collect(),
            generated_at,
        }
    }
}

// =============================================================================
// Monthly report
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPeriod {
    pub year: i32,
    pub month: u32,
    pub timezone: String,
    pub utc_offset_minutes: i32,
    pub start_local: String,
    pub end_local_exclusive: String,
    pub start_utc: String,
    pub end_utc_exclusive: String,
    #[schema(example = "2026-01")]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub minor_unit: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuantityDefinition {
    pub base_unit: String,
    pub display_unit: String,
    pub conversion: String,
    pub precision: u32,
    pub meaning: String,
}

impl QuantityDefinition {
    fn viss_equivalent() -> Self {
        Self {
            base_unit: "viss_equivalent".to_string(),
            display_unit: "viss".to_string(),
            conversion: format!("1 viss = {} ticals", TICALS_PER_VISS),
            precision: QUANTITY_PRECISION,
            meaning: "All quantities are standardized to viss-equivalent at time of sale. \
                      They are not raw entered units."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    #[schema(value_type = f64)]
    pub total_sales_amount: Decimal,
    pub transactions: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOil {
    pub oil_id: i32,
    pub oil_name_snapshot: Option<String>,
    /// Current catalogue unit; not captured at sale time
    pub unit_at_sale: Option<OilUnit>,
    #[schema(value_type = f64)]
    pub quantity_sold: Decimal,
    #[schema(value_type = f64)]
    pub revenue: Decimal,
    pub line_count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub period: MonthlyPeriod,
    pub currency: Currency,
    pub quantity_definition: QuantityDefinition,
    pub totals: MonthlyTotals,
    pub by_oil: Vec<MonthlyOil>,
    #[serde(serialize_with = "iso_millis")]
    #[schema(value_type = String, example = "2026-01-15T03:00:00.123Z")]
    pub generated_at: DateTime<Utc>,
}

impl MonthlyReport {
    pub fn new(
        month: &MonthBounds,
        totals: SalesTotals,
        rows: Vec<OilRevenue>,
        units: &HashMap<i32, OilUnit>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            period: MonthlyPeriod {
                year: month.year,
                month: month.month,
                timezone: SHOP_TIMEZONE.to_string(),
                utc_offset_minutes: SHOP_UTC_OFFSET_MINUTES,
                start_local: month.range.start_local(),
                end_local_exclusive: month.range.end_local_exclusive(),
                start_utc: month.range.start_utc_iso(),
                end_utc_exclusive: month.range.end_utc_exclusive_iso(),
                label: month.label(),
            },
            currency: Currency {
                code: CURRENCY_CODE.to_string(),
                minor_unit: CURRENCY_MINOR_UNIT,
            },
            quantity_definition: QuantityDefinition::viss_equivalent(),
            totals: MonthlyTotals {
                total_sales_amount: totals.total_amount,
                transactions: totals.transactions,
            },
            by_oil: rows
                .into_iter()
                .map(|row| MonthlyOil {
                    unit_at_sale: units.get(&row.oil_id).copied(),
                    oil_id: row.oil_id,
                    oil_name_snapshot: row.oil_name_snapshot,
                    quantity_sold: row.quantity_sold,
                    revenue: row.revenue,
                    line_count: row.line_count,
                })
                .collect(),
            generated_at,
        }
    }
}

/// Legacy total-only month summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesSummary {
    pub year: i32,
    pub month: u32,
    #[schema(value_type = f64)]
    pub total_sales_value: Decimal,
}
