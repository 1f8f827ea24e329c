//! Payment management, including the receipt files on the public disk.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{
        participant::ParticipantRepository,
        payment::{PaymentRecord, PaymentRepository},
    },
    datatable::{ListParams, Page},
    error::{validation::ValidationErrors, AppError},
    model::{
        audit::AuditTarget,
        payment::{Payment, PaymentParams},
        upload::UploadedFile,
    },
    service::{audit::AuditService, require_ids},
    storage::{Disk, Storage},
};

/// Public-disk directory receipts are stored in.
const UPLOAD_DIR: &str = "uploads";

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a Storage) -> Self {
        Self { db, storage }
    }

    pub async fn list(&self, params: &ListParams, app_url: &str) -> Result<Page, AppError> {
        Ok(PaymentRepository::new(self.db).list(params, app_url).await?)
    }

    pub async fn show(&self, id: Uuid) -> Result<Payment, AppError> {
        let (payment, participant) = PaymentRepository::new(self.db)
            .find_with_participant(id)
            .await?
            .ok_or_else(not_found)?;

        Ok(Payment::from_entity(payment, participant))
    }

    /// Stores the receipt, then inserts the payment.
    pub async fn create(
        &self,
        params: PaymentParams,
        actor: Option<i32>,
    ) -> Result<Payment, AppError> {
        self.ensure_participant(params.participant_id).await?;

        let file_path = match &params.file {
            Some(file) => Some(self.store_receipt(file).await?),
            None => None,
        };

        let payment = PaymentRepository::new(self.db)
            .create(record(&params, file_path))
            .await?;

        AuditService::new(self.db)
            .created(actor, AuditTarget::Payment, payment.id, &payment)
            .await?;

        self.show(payment.id).await
    }

    /// Updates a payment. A new receipt replaces the stored one, which is then
    /// removed from disk.
    pub async fn update(
        &self,
        id: Uuid,
        params: PaymentParams,
        actor: Option<i32>,
    ) -> Result<Payment, AppError> {
        let repo = PaymentRepository::new(self.db);
        let before = repo.find_by_id(id).await?.ok_or_else(not_found)?;
        self.ensure_participant(params.participant_id).await?;

        let file_path = match &params.file {
            Some(file) => Some(self.store_receipt(file).await?),
            None => None,
        };
        let replaced = file_path.is_some();

        let after = repo.update(before.clone(), record(&params, file_path)).await?;

        if replaced {
            if let Some(old) = before.file_path.as_deref() {
                if let Err(e) = self.storage.delete(Disk::Public, old).await {
                    tracing::warn!(payment_id = %id, "Failed to delete replaced receipt: {}", e);
                }
            }
        }

        AuditService::new(self.db)
            .updated(actor, AuditTarget::Payment, id, &before, &after)
            .await?;

        self.show(id).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        is_verified: bool,
        actor: Option<i32>,
    ) -> Result<Payment, AppError> {
        let repo = PaymentRepository::new(self.db);
        let before = repo.find_by_id(id).await?.ok_or_else(not_found)?;
        let after = repo.set_verified(before.clone(), is_verified).await?;

        AuditService::new(self.db)
            .updated(actor, AuditTarget::Payment, id, &before, &after)
            .await?;

        self.show(id).await
    }

    pub async fn destroy(&self, id: Uuid, actor: Option<i32>) -> Result<(), AppError> {
        let repo = PaymentRepository::new(self.db);
        let payment = repo.find_by_id(id).await?.ok_or_else(not_found)?;
        let deleted = repo.soft_delete(payment).await?;

        AuditService::new(self.db)
            .deleted(actor, AuditTarget::Payment, id, &deleted)
            .await?;

        Ok(())
    }

    pub async fn bulk_destroy(&self, ids: &[Uuid], actor: Option<i32>) -> Result<u64, AppError> {
        require_ids(ids)?;

        let repo = PaymentRepository::new(self.db);
        let payments = repo.find_by_ids(ids).await?;
        let deleted = repo.soft_delete_many(ids).await?;

        let audit = AuditService::new(self.db);
        for payment in &payments {
            audit
                .deleted(actor, AuditTarget::Payment, payment.id, payment)
                .await?;
        }

        Ok(deleted)
    }

    /// Writes a receipt to `uploads/<unix ts>_<safe name>` on the public disk.
    async fn store_receipt(&self, file: &UploadedFile) -> Result<String, AppError> {
        let path = format!(
            "{}/{}_{}",
            UPLOAD_DIR,
            Utc::now().timestamp(),
            file.safe_name()
        );

        self.storage.put(Disk::Public, &path, &file.bytes).await?;

        Ok(path)
    }

    async fn ensure_participant(&self, participant_id: Uuid) -> Result<(), AppError> {
        match ParticipantRepository::new(self.db)
            .find_by_id(participant_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(ValidationErrors::single(
                "participant_id",
                "The selected participant id is invalid.",
            )
            .into()),
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Payment not found".to_string())
}

fn record(params: &PaymentParams, file_path: Option<String>) -> PaymentRecord {
    PaymentRecord {
        participant_id: params.participant_id,
        file_path,
        uploaded_at: params.uploaded_at,
        is_verified: params.is_verified,
        metadata: params.metadata.to_json(),
    }
}
