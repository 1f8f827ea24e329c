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
                    .table(Seminar::Table)
                    .if_not_exists()
                    .col(uuid(Seminar::Id).primary_key())
                    .col(string(Seminar::Title))
                    .col(text_null(Seminar::Description))
                    .col(timestamp_with_time_zone(Seminar::Schedule))
                    .col(boolean(Seminar::IsActive).default(false))
                    .col(json_null(Seminar::AdditionalInfo))
                    .col(integer_null(Seminar::UserId))
                    .col(
                        timestamp_with_time_zone(Seminar::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Seminar::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Seminar::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seminar_user_id")
                            .from(Seminar::Table, Seminar::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Seminar::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Seminar {
    Table,
    Id,
    Title,
    Description,
    Schedule,
    IsActive,
    AdditionalInfo,
    UserId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
