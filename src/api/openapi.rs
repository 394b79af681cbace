//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, oil_handler, report_handler, sale_handler};
use crate::domain::report::{
    Currency, DailyPeriod, DailyReport, DailyTotals, MonthlyOil, MonthlyPeriod, MonthlyReport,
    MonthlySalesSummary, MonthlyTotals, QuantityDefinition, TopOil,
};
use crate::domain::{
    MixQuote, OilResponse, OilStatus, OilUnit, QuotedLine, Sale, SaleType, UserResponse, UserRole,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Oil Shop POS API",
        version = "0.1.0",
        description = "Catalogue, sales recording and revenue reports for an edible-oil shop"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        auth_handler::change_password,
        auth_handler::logout,
        oil_handler::list_oils,
        oil_handler::list_all_oils,
        oil_handler::create_oil,
        oil_handler::update_oil,
        oil_handler::delete_oil,
        sale_handler::confirm_sale,
        sale_handler::quote_mix,
        sale_handler::monthly_summary,
        report_handler::daily_report,
        report_handler::monthly_report,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            auth_handler::ChangePasswordRequest,
            OilUnit,
            OilStatus,
            OilResponse,
            oil_handler::CreateOilRequest,
            oil_handler::UpdateOilRequest,
            SaleType,
            Sale,
            sale_handler::SaleRequest,
            sale_handler::SaleItemRequest,
            sale_handler::QuoteRequest,
            sale_handler::QuoteItemRequest,
            QuotedLine,
            MixQuote,
            MonthlySalesSummary,
            DailyPeriod,
            DailyTotals,
            TopOil,
            DailyReport,
            MonthlyPeriod,
            Currency,
            QuantityDefinition,
            MonthlyTotals,
            MonthlyOil,
            MonthlyReport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Owner login and password management"),
        (name = "Oils", description = "Bilingual oil catalogue"),
        (name = "Sales", description = "Sale recording and mix pricing"),
        (name = "Reports", description = "Revenue reports in Asia/Yangon time")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_report_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/reports/daily"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/oils/{id}"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
