//! Oil catalogue entry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

/// Unit an oil is priced in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OilUnit {
    #[default]
    Viss,
    Liter,
    Kg,
    KyatThar,
}

impl OilUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            OilUnit::Viss => "viss",
            OilUnit::Liter => "liter",
            OilUnit::Kg => "kg",
            OilUnit::KyatThar => "kyat_thar",
        }
    }
}

impl TryFrom<&str> for OilUnit {
    type Error = AppError;

    fn try_from(value: &str) -> AppResult<Self> {
        match value {
            "viss" => Ok(OilUnit::Viss),
            "liter" => Ok(OilUnit::Liter),
            "kg" => Ok(OilUnit::Kg),
            // older rows stored the gallon option under this key
            "kyat_thar" | "gallon" => Ok(OilUnit::KyatThar),
            other => Err(AppError::validation(format!("Unknown unit '{}'", other))),
        }
    }
}

/// Catalogue lifecycle. Oils are never deleted, only deactivated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OilStatus {
    #[default]
    Active,
    Inactive,
}

impl OilStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OilStatus::Active => "active",
            OilStatus::Inactive => "inactive",
        }
    }

    pub fn from_flag(is_active: bool) -> Self {
        if is_active {
            OilStatus::Active
        } else {
            OilStatus::Inactive
        }
    }
}

impl TryFrom<&str> for OilStatus {
    type Error = AppError;

    fn try_from(value: &str) -> AppResult<Self> {
        match value {
            "active" => Ok(OilStatus::Active),
            "inactive" => Ok(OilStatus::Inactive),
            other => Err(AppError::internal(format!("Unknown oil status '{}'", other))),
        }
    }
}

/// Oil product
#[derive(Debug, Clone, PartialEq)]
pub struct Oil {
    pub id: i32,
    pub name_en: String,
    pub name_my: String,
    pub description_en: String,
    pub description_my: String,
    pub price_per_unit: Decimal,
    pub unit: OilUnit,
    pub image_url: Option<String>,
    pub status: OilStatus,
    pub created_at: DateTime<Utc>,
}

impl Oil {
    pub fn is_active(&self) -> bool {
        self.status == OilStatus::Active
    }

    /// Name captured on sale lines
    pub fn snapshot_name(&self) -> &str {
        &self.name_en
    }
}

/// Fields for a new catalogue entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewOil {
    pub name_en: String,
    pub name_my: String,
    pub description_en: String,
    pub description_my: String,
    pub price_per_unit: Decimal,
    pub unit: OilUnit,
    pub image_url: Option<String>,
}

impl NewOil {
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            &self.name_en,
            &self.name_my,
            &self.description_en,
            &self.description_my,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::validation("Missing required fields"));
        }
        ensure_positive_price(self.price_per_unit)
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OilChanges {
    pub name_en: Option<String>,
    pub name_my: Option<String>,
    pub description_en: Option<String>,
    pub description_my: Option<String>,
    pub price_per_unit: Option<Decimal>,
    pub unit: Option<OilUnit>,
    pub image_url: Option<Option<String>>,
    pub status: Option<OilStatus>,
}

impl OilChanges {
    pub fn validate(&self) -> AppResult<()> {
        match self.price_per_unit {
            Some(price) => ensure_positive_price(price),
            None => Ok(()),
        }
    }
}

pub fn ensure_positive_price(price: Decimal) -> AppResult<()> {
    if price <= Decimal::ZERO {
        return Err(AppError::validation("Price must be greater than zero"));
    }
    Ok(())
}

/// Catalogue entry as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OilResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Palm Oil")]
    pub name_en: String,
    pub name_my: String,
    pub description_en: String,
    pub description_my: String,
    #[schema(value_type = f64, example = 3500.0)]
    pub price_per_unit: Decimal,
    pub unit: OilUnit,
    pub image_url: Option<String>,
    pub status: OilStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Oil> for OilResponse {
    fn from(oil: Oil) -> Self {
        Self {
            is_active: oil.is_active(),
            id: oil.id,
            name_en: oil.name_en,
            name_my: oil.name_my,
            description_en: oil.description_en,
            description_my: oil.description_my,
            price_per_unit: oil.price_per_unit,
            unit: oil.unit,
            image_url: oil.image_url,
            status: oil.status,
            created_at: oil.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn palm_oil() -> NewOil {
        NewOil {
            name_en: "Palm Oil".to_string(),
            name_my: "ထန်းဆီ".to_string(),
            description_en: "Refined palm oil".to_string(),
            description_my: "သန့်စင်ထားသော ထန်းဆီ".to_string(),
            price_per_unit: dec!(3500),
            unit: OilUnit::Viss,
            image_url: None,
        }
    }

    #[test]
    fn test_new_oil_valid() {
        assert!(palm_oil().validate().is_ok());
    }

    #[test]
    fn test_new_oil_requires_bilingual_fields() {
        let mut oil = palm_oil();
        oil.name_my = "  ".to_string();
        assert!(matches!(oil.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_price_must_be_positive() {
        let mut oil = palm_oil();
        oil.price_per_unit = Decimal::ZERO;
        assert!(oil.validate().is_err());

        let changes = OilChanges {
            price_per_unit: Some(dec!(-1)),
            ..Default::default()
        };
        assert!(changes.validate().is_err());
        assert!(OilChanges::default().validate().is_ok());
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!(OilUnit::try_from("kyat_thar").unwrap(), OilUnit::KyatThar);
        assert_eq!(OilUnit::try_from("gallon").unwrap(), OilUnit::KyatThar);
        assert!(OilUnit::try_from("barrel").is_err());
        assert_eq!(
            serde_json::to_value(OilUnit::KyatThar).unwrap(),
            serde_json::json!("kyat_thar")
        );
    }

    #[test]
    fn test_status_flag() {
        assert_eq!(OilStatus::from_flag(false), OilStatus::Inactive);
        assert_eq!(OilStatus::try_from("active").unwrap(), OilStatus::Active);
    }
}
