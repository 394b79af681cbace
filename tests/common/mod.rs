//! Shared fixtures: a migrated in-memory SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use oil_shop_pos::config::Config;
use oil_shop_pos::domain::{NewOil, NewSale, NewSaleItem, Oil, OilUnit};
use oil_shop_pos::infra::{Database, Persistence, UnitOfWork};

pub const JWT_SECRET: &str = "integration-secret-at-least-32-chars";

pub fn config() -> Config {
    Config::new("sqlite::memory:", JWT_SECRET).expect("valid test config")
}

pub async fn database() -> Database {
    let db = Database::open("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    db.run_migrations().await.expect("apply migrations");
    db
}

pub fn persistence(db: &Database) -> Arc<Persistence> {
    Arc::new(Persistence::new(db.get_connection()))
}

pub async fn add_oil(uow: &Persistence, name_en: &str, price: i64) -> Oil {
    uow.oils()
        .create(NewOil {
            name_en: name_en.to_string(),
            name_my: "ဆီ".to_string(),
            description_en: format!("{name_en} for cooking"),
            description_my: "ချက်ပြုတ်ဆီ".to_string(),
            price_per_unit: Decimal::from(price),
            unit: OilUnit::Viss,
            image_url: None,
        })
        .await
        .expect("create oil")
}

/// Sale whose header total equals the sum of its lines
pub fn sale(lines: &[(i32, i64)]) -> NewSale {
    let items: Vec<NewSaleItem> = lines
        .iter()
        .map(|&(oil_id, amount)| NewSaleItem {
            oil_id,
            quantity: Decimal::ONE,
            line_amount: Decimal::from(amount),
        })
        .collect();
    let total: i64 = lines.iter().map(|&(_, amount)| amount).sum();
    let kind = if items.len() == 1 { "SINGLE_OIL" } else { "MIX" };

    NewSale::new(
        Some(Decimal::from(total)),
        Some(Decimal::from(items.len() as i64)),
        Some(kind),
        None,
        items,
    )
    .expect("valid sale")
}

pub async fn count(db: &Database, sql: &str) -> i64 {
    let row = db
        .connection()
        .query_one(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
        .await
        .expect("count query")
        .expect("one row");
    row.try_get::<i64>("", "n").expect("count column")
}
