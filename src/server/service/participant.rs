use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{participant::ParticipantRepository, seminar::SeminarRepository},
    datatable::{ListParams, Page},
    error::{validation::ValidationErrors, AppError},
    model::{
        audit::AuditTarget,
        participant::{Participant, ParticipantParams},
    },
    service::{audit::AuditService, require_ids},
};

pub struct ParticipantService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParticipantService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page, AppError> {
        Ok(ParticipantRepository::new(self.db).list(params).await?)
    }

    pub async fn show(&self, id: Uuid) -> Result<Participant, AppError> {
        let participant = self.find(id).await?;
        Ok(Participant::from_entity(participant))
    }

    pub async fn create(
        &self,
        params: ParticipantParams,
        actor: Option<i32>,
    ) -> Result<Participant, AppError> {
        self.ensure_seminar(params.seminar_id).await?;

        let participant = ParticipantRepository::new(self.db).create(params).await?;

        AuditService::new(self.db)
            .created(actor, AuditTarget::Participant, participant.id, &participant)
            .await?;

        Ok(Participant::from_entity(participant))
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: ParticipantParams,
        actor: Option<i32>,
    ) -> Result<Participant, AppError> {
        let before = self.find(id).await?;
        self.ensure_seminar(params.seminar_id).await?;

        let after = ParticipantRepository::new(self.db)
            .update(before.clone(), params)
            .await?;

        AuditService::new(self.db)
            .updated(actor, AuditTarget::Participant, id, &before, &after)
            .await?;

        Ok(Participant::from_entity(after))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        is_confirmed: bool,
        actor: Option<i32>,
    ) -> Result<Participant, AppError> {
        let before = self.find(id).await?;
        let after = ParticipantRepository::new(self.db)
            .set_confirmed(before.clone(), is_confirmed)
            .await?;

        AuditService::new(self.db)
            .updated(actor, AuditTarget::Participant, id, &before, &after)
            .await?;

        Ok(Participant::from_entity(after))
    }

    pub async fn destroy(&self, id: Uuid, actor: Option<i32>) -> Result<(), AppError> {
        let participant = self.find(id).await?;
        let deleted = ParticipantRepository::new(self.db)
            .soft_delete(participant)
            .await?;

        AuditService::new(self.db)
            .deleted(actor, AuditTarget::Participant, id, &deleted)
            .await?;

        Ok(())
    }

    pub async fn bulk_destroy(&self, ids: &[Uuid], actor: Option<i32>) -> Result<u64, AppError> {
        require_ids(ids)?;

        let repo = ParticipantRepository::new(self.db);
        let participants = repo.find_by_ids(ids).await?;
        let deleted = repo.soft_delete_many(ids).await?;

        let audit = AuditService::new(self.db);
        for participant in &participants {
            audit
                .deleted(actor, AuditTarget::Participant, participant.id, participant)
                .await?;
        }

        Ok(deleted)
    }

    async fn find(&self, id: Uuid) -> Result<entity::participant::Model, AppError> {
        ParticipantRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))
    }

    /// The `seminar_id|exists` rule.
    async fn ensure_seminar(&self, seminar_id: Uuid) -> Result<(), AppError> {
        match SeminarRepository::new(self.db).find_by_id(seminar_id).await? {
            Some(_) => Ok(()),
            None => Err(ValidationErrors::single(
                "seminar_id",
                "The selected seminar id is invalid.",
            )
            .into()),
        }
    }
}
