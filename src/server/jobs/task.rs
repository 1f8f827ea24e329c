//! Typed job descriptors.
//!
//! A `JobTask` names the routine a worker runs and carries its arguments. It is
//! stored as the job record's payload so the sweep can re-queue work lost on
//! restart.

use entity::sea_orm_active_enums::JobKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::server::{
    error::job::JobError,
    jobs::{export, import, JobContext},
};

/// One exported column: the record key and its label in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportHeader {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum JobTask {
    ExportSeminars { headers: Vec<ExportHeader> },
    ExportParticipants { headers: Vec<ExportHeader> },
    ExportPayments { headers: Vec<ExportHeader> },
    ImportSeminars { path: String, user_id: Option<i32> },
    ImportParticipants { path: String, user_id: Option<i32> },
    ImportPayments { path: String, user_id: Option<i32> },
}

impl JobTask {
    /// Display name stored on the job record.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExportSeminars { .. } => "Seminar Download",
            Self::ExportParticipants { .. } => "Participant Download",
            Self::ExportPayments { .. } => "Payment Download",
            Self::ImportSeminars { .. } => "Seminar Import",
            Self::ImportParticipants { .. } => "Participant Import",
            Self::ImportPayments { .. } => "Payment Import",
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            Self::ExportSeminars { .. }
            | Self::ExportParticipants { .. }
            | Self::ExportPayments { .. } => JobKind::Export,
            Self::ImportSeminars { .. }
            | Self::ImportParticipants { .. }
            | Self::ImportPayments { .. } => JobKind::Import,
        }
    }

    /// Uploaded file of an import, recorded on the job at creation.
    pub fn source_path(&self) -> Option<&str> {
        match self {
            Self::ImportSeminars { path, .. }
            | Self::ImportParticipants { path, .. }
            | Self::ImportPayments { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn to_payload(&self) -> Result<Value, JobError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_payload(payload: &Value) -> Result<Self, JobError> {
        Ok(Self::deserialize(payload)?)
    }

    /// Runs the routine.
    ///
    /// # Returns
    /// - `Ok(Some(path))` - Artifact path: the written workbook for exports, the
    ///   source file for imports
    /// - `Err(JobError)` - The routine failed
    pub async fn run(&self, ctx: &JobContext) -> Result<Option<String>, JobError> {
        match self {
            Self::ExportSeminars { headers } => export::seminars(ctx, headers).await.map(Some),
            Self::ExportParticipants { headers } => {
                export::participants(ctx, headers).await.map(Some)
            }
            Self::ExportPayments { headers } => export::payments(ctx, headers).await.map(Some),
            Self::ImportSeminars { path, user_id } => {
                let summary = import::seminars(ctx, path, *user_id).await?;
                tracing::info!(imported = summary.imported, skipped = summary.skipped, "Seminar import finished");
                Ok(Some(path.clone()))
            }
            Self::ImportParticipants { path, user_id } => {
                let summary = import::participants(ctx, path, *user_id).await?;
                tracing::info!(imported = summary.imported, skipped = summary.skipped, "Participant import finished");
                Ok(Some(path.clone()))
            }
            Self::ImportPayments { path, user_id } => {
                let summary = import::payments(ctx, path, *user_id).await?;
                tracing::info!(imported = summary.imported, skipped = summary.skipped, "Payment import finished");
                Ok(Some(path.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that payloads decode back to the same task.
    ///
    /// Expected: tagged JSON with the task name, equal after decoding
    #[test]
    fn payload_is_tagged() {
        let task = JobTask::ImportParticipants {
            path: "participants/imported/a.csv".to_string(),
            user_id: Some(3),
        };

        let payload = task.to_payload().unwrap();
        assert_eq!(payload["task"], "import_participants");
        assert_eq!(JobTask::from_payload(&payload).unwrap(), task);
        assert_eq!(task.name(), "Participant Import");
        assert_eq!(task.kind(), JobKind::Import);
        assert_eq!(task.source_path(), Some("participants/imported/a.csv"));
    }

    /// Tests that an unknown payload is rejected.
    ///
    /// Expected: Err(InvalidPayload)
    #[test]
    fn rejects_unknown_payload() {
        let result = JobTask::from_payload(&serde_json::json!({ "task": "reindex" }));
        assert!(matches!(result, Err(JobError::InvalidPayload(_))));
    }
}
