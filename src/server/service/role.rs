use sea_orm::DatabaseConnection;

use crate::server::{
    data::role::RoleRepository,
    datatable::{ListParams, Page},
    error::AppError,
    model::{
        audit::AuditTarget,
        role::{Role, RoleParams},
    },
    service::{audit::AuditService, require_ids},
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page, AppError> {
        Ok(RoleRepository::new(self.db).list(params).await?)
    }

    pub async fn show(&self, id: i32) -> Result<Role, AppError> {
        Ok(Role::from_entity(self.find(id).await?))
    }

    pub async fn create(&self, params: RoleParams, actor: Option<i32>) -> Result<Role, AppError> {
        let role = RoleRepository::new(self.db).create(params).await?;

        AuditService::new(self.db)
            .created(actor, AuditTarget::Role, role.id, &role)
            .await?;

        Ok(Role::from_entity(role))
    }

    pub async fn update(
        &self,
        id: i32,
        params: RoleParams,
        actor: Option<i32>,
    ) -> Result<Role, AppError> {
        let before = self.find(id).await?;
        let after = RoleRepository::new(self.db)
            .update(before.clone(), params)
            .await?;

        AuditService::new(self.db)
            .updated(actor, AuditTarget::Role, id, &before, &after)
            .await?;

        Ok(Role::from_entity(after))
    }

    pub async fn destroy(&self, id: i32, actor: Option<i32>) -> Result<(), AppError> {
        let role = self.find(id).await?;
        let deleted = RoleRepository::new(self.db).soft_delete(role).await?;

        AuditService::new(self.db)
            .deleted(actor, AuditTarget::Role, id, &deleted)
            .await?;

        Ok(())
    }

    pub async fn bulk_destroy(&self, ids: &[i32], actor: Option<i32>) -> Result<u64, AppError> {
        require_ids(ids)?;

        let repo = RoleRepository::new(self.db);
        let roles = repo.find_by_ids(ids).await?;
        let deleted = repo.soft_delete_many(ids).await?;

        let audit = AuditService::new(self.db);
        for role in &roles {
            audit.deleted(actor, AuditTarget::Role, role.id, role).await?;
        }

        Ok(deleted)
    }

    async fn find(&self, id: i32) -> Result<entity::role::Model, AppError> {
        RoleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))
    }
}
