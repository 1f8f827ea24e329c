pub use sea_orm_migration::prelude::*;

mod m20250428_000001_create_role_table;
mod m20250428_000002_create_user_table;
mod m20250428_000003_create_seminar_table;
mod m20250428_000004_create_participant_table;
mod m20250429_000005_create_payment_table;
mod m20250501_000006_create_download_export_table;
mod m20250501_000007_create_audit_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250428_000001_create_role_table::Migration),
            Box::new(m20250428_000002_create_user_table::Migration),
            Box::new(m20250428_000003_create_seminar_table::Migration),
            Box::new(m20250428_000004_create_participant_table::Migration),
            Box::new(m20250429_000005_create_payment_table::Migration),
            Box::new(m20250501_000006_create_download_export_table::Migration),
            Box::new(m20250501_000007_create_audit_table::Migration),
        ]
    }
}
