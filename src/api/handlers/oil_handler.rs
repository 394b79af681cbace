//! Oil catalogue handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewOil, OilChanges, OilResponse, OilStatus, OilUnit};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, ListResponse};

/// New catalogue entry. Missing text fields are reported together.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOilRequest {
    #[serde(default)]
    #[schema(example = "Palm Oil")]
    pub name_en: String,
    #[serde(default)]
    pub name_my: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_my: String,
    #[schema(value_type = Option<f64>, example = 3500.0)]
    pub price_per_unit: Option<Decimal>,
    /// Defaults to `viss`
    pub unit: Option<OilUnit>,
    pub image_url: Option<String>,
}

impl CreateOilRequest {
    fn into_new_oil(self) -> NewOil {
        NewOil {
            name_en: self.name_en,
            name_my: self.name_my,
            description_en: self.description_en,
            description_my: self.description_my,
            price_per_unit: self.price_per_unit.unwrap_or_default(),
            unit: self.unit.unwrap_or_default(),
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOilRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name_en: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name_my: Option<String>,
    pub description_en: Option<String>,
    pub description_my: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price_per_unit: Option<Decimal>,
    pub unit: Option<OilUnit>,
    /// An empty string clears the image
    pub image_url: Option<String>,
    /// Reactivate (`true`) or deactivate (`false`)
    pub is_active: Option<bool>,
}

impl From<UpdateOilRequest> for OilChanges {
    fn from(req: UpdateOilRequest) -> Self {
        Self {
            name_en: req.name_en,
            name_my: req.name_my,
            description_en: req.description_en,
            description_my: req.description_my,
            price_per_unit: req.price_per_unit,
            unit: req.unit,
            image_url: req
                .image_url
                .map(|url| Some(url).filter(|u| !u.trim().is_empty())),
            status: req.is_active.map(OilStatus::from_flag),
        }
    }
}

/// Public catalogue routes
pub fn oil_routes() -> Router<AppState> {
    Router::new().route("/", get(list_oils))
}

/// Catalogue management routes (admin)
pub fn admin_oil_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_oil))
        .route("/admin/all", get(list_all_oils))
        .route("/:id", put(update_oil).delete(delete_oil))
}

/// List active oils, newest first
#[utoipa::path(
    get,
    path = "/api/oils",
    tag = "Oils",
    responses((status = 200, description = "Active oils", body = [OilResponse]))
)]
pub async fn list_oils(State(state): State<AppState>) -> AppResult<Json<ListResponse<OilResponse>>> {
    let oils = state.oil_service.list_active().await?;
    Ok(Json(ListResponse::new(
        oils.into_iter().map(OilResponse::from).collect(),
    )))
}

/// List every oil including deactivated ones
#[utoipa::path(
    get,
    path = "/api/oils/admin/all",
    tag = "Oils",
    responses(
        (status = 200, description = "All oils", body = [OilResponse]),
        (status = 401, description = "Access token required"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_all_oils(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<OilResponse>>> {
    let oils = state.oil_service.list_all().await?;
    Ok(Json(ListResponse::new(
        oils.into_iter().map(OilResponse::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/oils",
    tag = "Oils",
    request_body = CreateOilRequest,
    responses(
        (status = 201, description = "Oil created", body = OilResponse),
        (status = 400, description = "Missing fields or invalid price")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_oil(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOilRequest>,
) -> AppResult<Created<OilResponse>> {
    let oil = state.oil_service.create(payload.into_new_oil()).await?;
    Ok(Created::new(OilResponse::from(oil), "Oil created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/oils/{id}",
    tag = "Oils",
    params(("id" = i32, Path, description = "Oil id")),
    request_body = UpdateOilRequest,
    responses(
        (status = 200, description = "Oil updated", body = OilResponse),
        (status = 400, description = "Invalid price"),
        (status = 404, description = "Oil not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_oil(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateOilRequest>,
) -> AppResult<Json<ApiResponse<OilResponse>>> {
    let oil = state.oil_service.update(id, payload.into()).await?;
    Ok(Json(ApiResponse::with_message(
        OilResponse::from(oil),
        "Oil updated successfully",
    )))
}

/// Deactivate an oil. The row is kept for sale history.
#[utoipa::path(
    delete,
    path = "/api/oils/{id}",
    tag = "Oils",
    params(("id" = i32, Path, description = "Oil id")),
    responses(
        (status = 200, description = "Oil deactivated", body = OilResponse),
        (status = 404, description = "Oil not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_oil(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OilResponse>>> {
    let oil = state.oil_service.deactivate(id).await?;
    Ok(Json(ApiResponse::with_message(
        OilResponse::from(oil),
        "Oil deactivated successfully",
    )))
}
