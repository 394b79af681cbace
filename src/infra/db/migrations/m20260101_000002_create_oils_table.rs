//! Migration: Create oils table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Oils::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Oils::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Oils::NameEn).string().not_null())
                    .col(ColumnDef::new(Oils::NameMy).string().not_null())
                    .col(ColumnDef::new(Oils::DescriptionEn).text().not_null())
                    .col(ColumnDef::new(Oils::DescriptionMy).text().not_null())
                    .col(ColumnDef::new(Oils::PricePerUnit).decimal_len(14, 2).not_null())
                    .col(
                        ColumnDef::new(Oils::Unit)
                            .string_len(16)
                            .not_null()
                            .default("viss"),
                    )
                    .col(ColumnDef::new(Oils::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Oils::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Oils::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Oils::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Public catalogue lists active oils only
        manager
            .create_index(
                Index::create()
                    .name("idx_oils_status")
                    .table(Oils::Table)
                    .col(Oils::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Oils::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Oils {
    Table,
    Id,
    NameEn,
    NameMy,
    DescriptionEn,
    DescriptionMy,
    PricePerUnit,
    Unit,
    ImageUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}
