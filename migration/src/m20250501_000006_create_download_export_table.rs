use sea_orm_migration::{prelude::*, schema::*};

use super::m20250428_000002_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DownloadExport::Table)
                    .if_not_exists()
                    .col(pk_auto(DownloadExport::Id))
                    .col(string(DownloadExport::Name))
                    .col(string_len(DownloadExport::Type, 16))
                    .col(string_null(DownloadExport::Path))
                    .col(string_len(DownloadExport::Status, 16).default("pending"))
                    .col(text_null(DownloadExport::Error))
                    .col(integer_null(DownloadExport::UserId))
                    .col(json(DownloadExport::Payload))
                    .col(timestamp_with_time_zone_null(DownloadExport::FinishedAt))
                    .col(
                        timestamp_with_time_zone(DownloadExport::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(DownloadExport::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_download_export_user_id")
                            .from(DownloadExport::Table, DownloadExport::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_download_export_status")
                    .table(DownloadExport::Table)
                    .col(DownloadExport::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DownloadExport::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DownloadExport {
    Table,
    Id,
    Name,
    Type,
    Path,
    Status,
    Error,
    UserId,
    Payload,
    FinishedAt,
    CreatedAt,
    UpdatedAt,
}
