//! Sale recording and reporting against a real SQLite database.

mod common;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use oil_shop_pos::domain::{DayBounds, MonthBounds};
use oil_shop_pos::errors::AppError;
use oil_shop_pos::infra::UnitOfWork;
use oil_shop_pos::services::{OilCatalogue, OilService, Reporter, SaleRecorder, SaleService};

#[tokio::test]
async fn test_sale_with_three_items_writes_one_header_and_three_lines() {
    let db = common::database().await;
    let uow = common::persistence(&db);
    let palm = common::add_oil(&uow, "Palm Oil", 3500).await;
    let sesame = common::add_oil(&uow, "Sesame Oil", 6800).await;

    let sale = SaleRecorder::new(uow.clone())
        .record(common::sale(&[(palm.id, 3500), (sesame.id, 6800), (palm.id, 875)]))
        .await
        .unwrap();

    assert_eq!(common::count(&db, "SELECT COUNT(*) AS n FROM sales").await, 1);
    let lines = common::count(
        &db,
        &format!("SELECT COUNT(*) AS n FROM sale_items WHERE sale_id = {}", sale.id),
    )
    .await;
    assert_eq!(lines, 3);
    assert_eq!(sale.total_amount, Decimal::from(11175));
}

#[tokio::test]
async fn test_missing_oil_rolls_back_everything() {
    let db = common::database().await;
    let uow = common::persistence(&db);
    let palm = common::add_oil(&uow, "Palm Oil", 3500).await;

    let result = SaleRecorder::new(uow.clone())
        .record(common::sale(&[(palm.id, 3500), (999, 100)]))
        .await;

    match result {
        Err(AppError::NotFound(message)) => assert_eq!(message, "Oil not found for id 999"),
        other => panic!("expected not found, got {:?}", other),
    }
    assert_eq!(common::count(&db, "SELECT COUNT(*) AS n FROM sales").await, 0);
    assert_eq!(common::count(&db, "SELECT COUNT(*) AS n FROM sale_items").await, 0);
}

#[tokio::test]
async fn test_monthly_totals_only_count_sales_inside_local_month() {
    let db = common::database().await;
    let uow = common::persistence(&db);
    let palm = common::add_oil(&uow, "Palm Oil", 3500).await;
    let recorder = SaleRecorder::new(uow.clone());

    // 2026-01-01 00:10 local is still 2025-12-31 in UTC
    let early_january = Utc.with_ymd_and_hms(2025, 12, 31, 17, 40, 0).unwrap();
    let mid_january = Utc.with_ymd_and_hms(2026, 1, 15, 4, 0, 0).unwrap();
    // 2026-02-01 00:00 local
    let february = Utc.with_ymd_and_hms(2026, 1, 31, 17, 30, 0).unwrap();

    recorder.record_at(common::sale(&[(palm.id, 1000)]), early_january).await.unwrap();
    recorder.record_at(common::sale(&[(palm.id, 2500)]), mid_january).await.unwrap();
    recorder.record_at(common::sale(&[(palm.id, 9999)]), february).await.unwrap();

    let report = Reporter::new(uow.clone())
        .monthly_at(MonthBounds::new(2026, 1).unwrap(), Utc::now())
        .await
        .unwrap();

    assert_eq!(report.totals.total_sales_amount, Decimal::from(3500));
    assert_eq!(report.totals.transactions, 2);
    assert_eq!(report.by_oil.len(), 1);
    assert_eq!(report.by_oil[0].line_count, 2);
    assert_eq!(report.by_oil[0].oil_name_snapshot.as_deref(), Some("Palm Oil"));
}

#[tokio::test]
async fn test_daily_report_keeps_top_three_by_revenue() {
    let db = common::database().await;
    let uow = common::persistence(&db);
    let mut ids = Vec::new();
    for name in ["Palm Oil", "Groundnut Oil", "Sesame Oil", "Coconut Oil"] {
        ids.push(common::add_oil(&uow, name, 1000).await.id);
    }
    let at = Utc.with_ymd_and_hms(2026, 1, 15, 3, 0, 0).unwrap();
    let recorder = SaleRecorder::new(uow.clone());
    for (oil_id, amount) in ids.iter().copied().zip([500, 1500, 300, 900]) {
        recorder.record_at(common::sale(&[(oil_id, amount)]), at).await.unwrap();
    }

    let report = Reporter::new(uow.clone())
        .daily_at(DayBounds::parse("2026-01-15").unwrap(), Utc::now())
        .await
        .unwrap();

    let revenues: Vec<Decimal> = report.top_oils_by_revenue.iter().map(|o| o.revenue).collect();
    assert_eq!(
        revenues,
        vec![Decimal::from(1500), Decimal::from(900), Decimal::from(500)]
    );
    assert_eq!(report.totals.transactions_count, 4);
    assert_eq!(report.totals.total_sales_amount, Decimal::from(3200));
}

#[tokio::test]
async fn test_deactivated_oil_hidden_from_catalogue_but_kept_in_reports() {
    let db = common::database().await;
    let uow = common::persistence(&db);
    let palm = common::add_oil(&uow, "Palm Oil", 3500).await;
    let coconut = common::add_oil(&uow, "Coconut Oil", 7500).await;
    let at = Utc.with_ymd_and_hms(2026, 1, 10, 6, 0, 0).unwrap();
    SaleRecorder::new(uow.clone())
        .record_at(common::sale(&[(coconut.id, 7500)]), at)
        .await
        .unwrap();

    let catalogue = OilCatalogue::new(uow.clone());
    catalogue.deactivate(coconut.id).await.unwrap();

    let active = catalogue.list_active().await.unwrap();
    assert_eq!(active.iter().map(|o| o.id).collect::<Vec<_>>(), vec![palm.id]);
    assert_eq!(catalogue.list_all().await.unwrap().len(), 2);

    let report = Reporter::new(uow.clone())
        .daily_at(DayBounds::parse("2026-01-10").unwrap(), Utc::now())
        .await
        .unwrap();
    assert_eq!(
        report.top_oils_by_revenue[0].oil_name_snapshot.as_deref(),
        Some("Coconut Oil")
    );
}

#[tokio::test]
async fn test_snapshot_survives_rename() {
    let db = common::database().await;
    let uow = common::persistence(&db);
    let palm = common::add_oil(&uow, "Palm Oil", 3500).await;
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 6, 0, 0).unwrap();
    SaleRecorder::new(uow.clone())
        .record_at(common::sale(&[(palm.id, 3500)]), at)
        .await
        .unwrap();

    uow.oils()
        .update(
            palm.id,
            oil_shop_pos::domain::OilChanges {
                name_en: Some("Refined Palm Oil".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let report = Reporter::new(uow.clone())
        .monthly_at(MonthBounds::new(2026, 3).unwrap(), Utc::now())
        .await
        .unwrap();
    assert_eq!(report.by_oil[0].oil_name_snapshot.as_deref(), Some("Palm Oil"));
    assert_eq!(
        report.by_oil[0].unit_at_sale,
        Some(oil_shop_pos::domain::OilUnit::Viss)
    );
}
