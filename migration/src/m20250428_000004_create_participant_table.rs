use sea_orm_migration::{prelude::*, schema::*};

use super::m20250428_000003_create_seminar_table::Seminar;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participant::Table)
                    .if_not_exists()
                    .col(uuid(Participant::Id).primary_key())
                    .col(uuid(Participant::SeminarId))
                    .col(string(Participant::Name))
                    .col(string(Participant::Email))
                    .col(timestamp_with_time_zone_null(Participant::RegisteredAt))
                    .col(json_null(Participant::ExtraData))
                    .col(boolean_null(Participant::IsConfirmed))
                    .col(
                        timestamp_with_time_zone(Participant::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Participant::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Participant::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participant_seminar_id")
                            .from(Participant::Table, Participant::SeminarId)
                            .to(Seminar::Table, Seminar::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Participant {
    Table,
    Id,
    SeminarId,
    Name,
    Email,
    RegisteredAt,
    ExtraData,
    IsConfirmed,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
