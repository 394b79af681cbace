//! Sale recording, mix quotes and the legacy monthly total.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{parse_year_month, MixQuote, MonthlySalesSummary, NewSale, NewSaleItem, Sale};
use crate::errors::{AppError, AppResult};
use crate::services::Weighing;
use crate::types::{ApiResponse, Created};

/// Sale as submitted by the till.
///
/// Fields are optional here so that missing values produce one combined
/// validation message instead of a deserialization error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    #[schema(value_type = Option<f64>, example = 12000.0)]
    pub total_amount: Option<Decimal>,
    #[schema(value_type = Option<f64>, example = 3.5)]
    pub total_quantity: Option<Decimal>,
    #[schema(example = "MIX")]
    pub sale_type: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequest {
    pub oil_id: Option<i32>,
    /// viss-equivalent
    #[schema(value_type = Option<f64>)]
    pub quantity: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub line_amount: Option<Decimal>,
}

impl SaleRequest {
    fn into_new_sale(self) -> AppResult<NewSale> {
        let items = self
            .items
            .into_iter()
            .map(|item| match item {
                SaleItemRequest {
                    oil_id: Some(oil_id),
                    quantity: Some(quantity),
                    line_amount: Some(line_amount),
                } => Ok(NewSaleItem {
                    oil_id,
                    quantity,
                    line_amount,
                }),
                _ => Err(AppError::validation("Missing required sale fields or items")),
            })
            .collect::<AppResult<Vec<_>>>()?;

        NewSale::new(
            self.total_amount,
            self.total_quantity,
            self.sale_type.as_deref(),
            self.note,
            items,
        )
    }
}

/// Weighed oils to price
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Enter weights to calculate"))]
    pub items: Vec<QuoteItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemRequest {
    pub oil_id: i32,
    #[schema(value_type = f64, example = 75.0)]
    pub ticals: Decimal,
}

/// Raw `year`/`month` query values
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearMonthQuery {
    #[param(example = "2026")]
    pub year: Option<String>,
    #[param(example = "1")]
    pub month: Option<String>,
}

impl YearMonthQuery {
    pub fn parse(&self) -> AppResult<(i32, u32)> {
        parse_year_month(self.year.as_deref(), self.month.as_deref())
    }
}

/// Sale routes (admin)
pub fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/confirm", post(confirm_sale))
        .route("/quote", post(quote_mix))
        .route("/summary", get(monthly_summary))
}

/// Record a sale with its line items in one transaction
#[utoipa::path(
    post,
    path = "/api/sales/confirm",
    tag = "Sales",
    request_body = SaleRequest,
    responses(
        (status = 201, description = "Sale recorded", body = Sale),
        (status = 400, description = "Missing required sale fields or items"),
        (status = 404, description = "Oil not found for an item")
    ),
    security(("bearer_auth" = []))
)]
pub async fn confirm_sale(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SaleRequest>,
) -> AppResult<Created<Sale>> {
    let new_sale = payload.into_new_sale()?;
    let sale = state.sale_service.record(new_sale).await?;
    Ok(Created::new(sale, "Sale recorded successfully"))
}

/// Price weighed oils at current catalogue prices
#[utoipa::path(
    post,
    path = "/api/sales/quote",
    tag = "Sales",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Priced mix", body = MixQuote),
        (status = 400, description = "No positive weights"),
        (status = 404, description = "Oil not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn quote_mix(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<QuoteRequest>,
) -> AppResult<Json<ApiResponse<MixQuote>>> {
    let weighings = payload
        .items
        .into_iter()
        .map(|item| Weighing {
            oil_id: item.oil_id,
            ticals: item.ticals,
        })
        .collect();
    let quote = state.sale_service.quote(weighings).await?;
    Ok(Json(ApiResponse::success(quote)))
}

/// Total sales value for a UTC calendar month
#[utoipa::path(
    get,
    path = "/api/sales/summary",
    tag = "Sales",
    params(YearMonthQuery),
    responses(
        (status = 200, description = "Monthly total", body = MonthlySalesSummary),
        (status = 400, description = "Invalid year or month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn monthly_summary(
    State(state): State<AppState>,
    Query(query): Query<YearMonthQuery>,
) -> AppResult<Json<ApiResponse<MonthlySalesSummary>>> {
    let (year, month) = query.parse()?;
    let summary = state.report_service.monthly_summary(year, month).await?;
    Ok(Json(ApiResponse::success(summary)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SaleType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sale_request_builds_new_sale() {
        let req: SaleRequest = serde_json::from_str(
            r#"{
                "totalAmount": 5300,
                "totalQuantity": 1.5,
                "saleType": "MIX",
                "items": [
                    {"oilId": 1, "quantity": 1, "lineAmount": 3500},
                    {"oilId": 4, "quantity": 0.5, "lineAmount": 1800}
                ]
            }"#,
        )
        .unwrap();

        let sale = req.into_new_sale().unwrap();

        assert_eq!(sale.sale_type, SaleType::Mix);
        assert_eq!(sale.total_quantity, dec!(1.5));
        assert_eq!(sale.oil_ids(), vec![1, 4]);
    }

    #[test]
    fn test_incomplete_item_rejected() {
        let req: SaleRequest = serde_json::from_str(
            r#"{"totalAmount": 10, "totalQuantity": 1, "saleType": "SINGLE_OIL",
                "items": [{"oilId": 1, "quantity": 1}]}"#,
        )
        .unwrap();

        let err = req.into_new_sale().unwrap_err();
        assert_eq!(err.to_string(), "Missing required sale fields or items");
    }

    #[test]
    fn test_year_month_query_parsing() {
        let query = YearMonthQuery {
            year: Some("2026".to_string()),
            month: Some("13".to_string()),
        };
        assert!(matches!(query.parse(), Err(AppError::Validation(_))));
        assert!(YearMonthQuery::default().parse().is_err());
    }

    #[test]
    fn test_quote_request_requires_items() {
        let empty: QuoteRequest = serde_json::from_str(r#"{"items": []}"#).unwrap();
        let errors = empty.validate().unwrap_err();
        let items = &errors.field_errors()["items"];
        assert_eq!(items[0].message.as_deref(), Some("Enter weights to calculate"));

        let missing: QuoteRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.validate().is_err());

        let quote: QuoteRequest =
            serde_json::from_str(r#"{"items": [{"oilId": 2, "ticals": 75}]}"#).unwrap();
        assert!(quote.validate().is_ok());
        assert_eq!(quote.items[0].ticals, dec!(75));
    }
}
