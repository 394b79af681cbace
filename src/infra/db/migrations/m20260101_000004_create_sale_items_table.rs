//! Migration: Create sale_items table.

use sea_orm_migration::prelude::*;

use super::m20260101_000002_create_oils_table::Oils;
use super::m20260101_000003_create_sales_table::Sales;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SaleItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SaleItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SaleItems::SaleId).integer().not_null())
                    .col(ColumnDef::new(SaleItems::OilId).integer().not_null())
                    .col(ColumnDef::new(SaleItems::OilNameSnapshot).string().not_null())
                    .col(ColumnDef::new(SaleItems::Quantity).decimal_len(12, 3).not_null())
                    .col(ColumnDef::new(SaleItems::LineAmount).decimal_len(14, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_items_sale_id")
                            .from(SaleItems::Table, SaleItems::SaleId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_items_oil_id")
                            .from(SaleItems::Table, SaleItems::OilId)
                            .to(Oils::Table, Oils::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sale_items_sale_id")
                    .table(SaleItems::Table)
                    .col(SaleItems::SaleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sale_items_oil_id")
                    .table(SaleItems::Table)
                    .col(SaleItems::OilId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SaleItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SaleItems {
    Table,
    Id,
    SaleId,
    OilId,
    OilNameSnapshot,
    Quantity,
    LineAmount,
}
