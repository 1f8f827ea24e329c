use sea_orm_migration::{prelude::*, schema::*};

use super::m20250428_000004_create_participant_table::Participant;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(uuid(Payment::ParticipantId))
                    .col(string_null(Payment::FilePath))
                    .col(timestamp_with_time_zone_null(Payment::UploadedAt))
                    .col(boolean(Payment::IsVerified).default(false))
                    .col(json_null(Payment::Metadata))
                    .col(
                        timestamp_with_time_zone(Payment::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Payment::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Payment::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_participant_id")
                            .from(Payment::Table, Payment::ParticipantId)
                            .to(Participant::Table, Participant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    ParticipantId,
    FilePath,
    UploadedAt,
    IsVerified,
    Metadata,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
