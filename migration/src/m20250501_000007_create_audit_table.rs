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
                    .table(Audit::Table)
                    .if_not_exists()
                    .col(pk_auto(Audit::Id))
                    .col(integer_null(Audit::UserId))
                    .col(string_len(Audit::Event, 16))
                    .col(string(Audit::AuditableType))
                    .col(string(Audit::AuditableId))
                    .col(json_null(Audit::OldValues))
                    .col(json_null(Audit::NewValues))
                    .col(
                        timestamp_with_time_zone(Audit::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audit_user_id")
                            .from(Audit::Table, Audit::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_auditable")
                    .table(Audit::Table)
                    .col(Audit::AuditableType)
                    .col(Audit::AuditableId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Audit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Audit {
    Table,
    Id,
    UserId,
    Event,
    AuditableType,
    AuditableId,
    OldValues,
    NewValues,
    CreatedAt,
}
