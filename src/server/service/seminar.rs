use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::seminar::SeminarRepository,
    datatable::{ListParams, Page},
    error::AppError,
    model::{
        audit::AuditTarget,
        seminar::{Seminar, SeminarParams},
    },
    service::{audit::AuditService, require_ids},
};

pub struct SeminarService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeminarService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page, AppError> {
        Ok(SeminarRepository::new(self.db).list(params).await?)
    }

    pub async fn show(&self, id: Uuid) -> Result<Seminar, AppError> {
        let seminar = self.find(id).await?;
        Ok(Seminar::from_entity(seminar))
    }

    /// Creates a seminar owned by `actor`.
    pub async fn create(
        &self,
        params: SeminarParams,
        actor: Option<i32>,
    ) -> Result<Seminar, AppError> {
        let seminar = SeminarRepository::new(self.db).create(params, actor).await?;

        AuditService::new(self.db)
            .created(actor, AuditTarget::Seminar, seminar.id, &seminar)
            .await?;

        Ok(Seminar::from_entity(seminar))
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: SeminarParams,
        actor: Option<i32>,
    ) -> Result<Seminar, AppError> {
        let before = self.find(id).await?;
        let after = SeminarRepository::new(self.db)
            .update(before.clone(), params)
            .await?;

        AuditService::new(self.db)
            .updated(actor, AuditTarget::Seminar, id, &before, &after)
            .await?;

        Ok(Seminar::from_entity(after))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        is_active: bool,
        actor: Option<i32>,
    ) -> Result<Seminar, AppError> {
        let before = self.find(id).await?;
        let after = SeminarRepository::new(self.db)
            .set_active(before.clone(), is_active)
            .await?;

        AuditService::new(self.db)
            .updated(actor, AuditTarget::Seminar, id, &before, &after)
            .await?;

        Ok(Seminar::from_entity(after))
    }

    pub async fn destroy(&self, id: Uuid, actor: Option<i32>) -> Result<(), AppError> {
        let seminar = self.find(id).await?;
        let deleted = SeminarRepository::new(self.db).soft_delete(seminar).await?;

        AuditService::new(self.db)
            .deleted(actor, AuditTarget::Seminar, id, &deleted)
            .await?;

        Ok(())
    }

    /// Soft-deletes every live seminar among `ids`; unknown ids are ignored.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of seminars deleted
    /// - `Err(AppError::BadRequest)` - `ids` is empty
    pub async fn bulk_destroy(&self, ids: &[Uuid], actor: Option<i32>) -> Result<u64, AppError> {
        require_ids(ids)?;

        let repo = SeminarRepository::new(self.db);
        let seminars = repo.find_by_ids(ids).await?;
        let deleted = repo.soft_delete_many(ids).await?;

        let audit = AuditService::new(self.db);
        for seminar in &seminars {
            audit
                .deleted(actor, AuditTarget::Seminar, seminar.id, seminar)
                .await?;
        }

        Ok(deleted)
    }

    async fn find(&self, id: Uuid) -> Result<entity::seminar::Model, AppError> {
        SeminarRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Seminar not found".to_string()))
    }
}
