//! Migration: Create sales table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::TotalAmount).decimal_len(14, 2).not_null())
                    .col(ColumnDef::new(Sales::TotalQuantity).decimal_len(12, 3).not_null())
                    .col(ColumnDef::new(Sales::SaleType).string_len(16).not_null())
                    .col(ColumnDef::new(Sales::Note).text().null())
                    .col(
                        ColumnDef::new(Sales::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Every report filters on the sale timestamp
        manager
            .create_index(
                Index::create()
                    .name("idx_sales_created_at")
                    .table(Sales::Table)
                    .col(Sales::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Sales {
    Table,
    Id,
    TotalAmount,
    TotalQuantity,
    SaleType,
    Note,
    CreatedAt,
}
