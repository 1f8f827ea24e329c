//! Spreadsheet imports, one routine per entity.
//!
//! The uploaded file is read from the private disk into a grid of cells. The first
//! two rows are the title and header rows and are skipped. Rows that are malformed
//! or whose parent record cannot be found are skipped and logged; they never fail
//! the job. Rows commit one by one.

use chrono::Utc;

use crate::{
    model::metadata::Metadata,
    server::{
        data::{
            participant::ParticipantRepository,
            payment::{PaymentRecord, PaymentRepository},
            seminar::SeminarRepository,
        },
        error::job::JobError,
        jobs::{
            sheet::{self, cell, Cell},
            JobContext,
        },
        model::{audit::AuditTarget, participant::ParticipantParams, seminar::SeminarParams},
        service::audit::AuditService,
        storage::Disk,
    },
};

/// Leading rows that hold the sheet title and column labels.
pub const HEADER_ROWS: usize = 2;

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

impl ImportSummary {
    fn skip(&mut self, row: usize, reason: &str) {
        tracing::warn!(row = row + 1, "Skipping import row: {}", reason);
        self.skipped += 1;
    }
}

async fn load(ctx: &JobContext, path: &str) -> Result<Vec<Vec<Cell>>, JobError> {
    let full = ctx.storage.path(Disk::Private, path)?;

    tokio::task::spawn_blocking(move || sheet::read_rows(&full))
        .await
        .map_err(|e| JobError::Spreadsheet(e.to_string()))?
}

fn lowercase(cell: &Cell) -> Option<String> {
    cell.text().map(|text| text.to_lowercase())
}

/// Columns: title, description, schedule, `active`/`inactive`.
pub async fn seminars(
    ctx: &JobContext,
    path: &str,
    user_id: Option<i32>,
) -> Result<ImportSummary, JobError> {
    let rows = load(ctx, path).await?;
    let repo = SeminarRepository::new(&ctx.db);
    let audit = AuditService::new(&ctx.db);
    let mut summary = ImportSummary::default();

    for (index, row) in rows.iter().enumerate().skip(HEADER_ROWS) {
        let (Some(title), Some(schedule)) = (cell(row, 0).text(), cell(row, 2).datetime()) else {
            summary.skip(index, "missing title or schedule");
            continue;
        };

        let is_active = match lowercase(cell(row, 3)).as_deref() {
            Some("active") => Some(true),
            Some("inactive") => Some(false),
            _ => None,
        };

        let seminar = repo
            .create(
                SeminarParams {
                    title,
                    description: cell(row, 1).text(),
                    schedule,
                    is_active,
                    additional_info: Metadata::default(),
                },
                user_id,
            )
            .await?;
        audit
            .created(user_id, AuditTarget::Seminar, seminar.id, &seminar)
            .await?;

        summary.imported += 1;
    }

    Ok(summary)
}

/// Columns: seminar title (substring match), name, email, registered_at, confirmed.
///
/// Only `yes` confirms; any other confirmation cell is stored as `false`.
pub async fn participants(
    ctx: &JobContext,
    path: &str,
    user_id: Option<i32>,
) -> Result<ImportSummary, JobError> {
    let rows = load(ctx, path).await?;
    let seminars = SeminarRepository::new(&ctx.db);
    let repo = ParticipantRepository::new(&ctx.db);
    let audit = AuditService::new(&ctx.db);
    let mut summary = ImportSummary::default();

    for (index, row) in rows.iter().enumerate().skip(HEADER_ROWS) {
        let Some(title) = cell(row, 0).text() else {
            summary.skip(index, "missing seminar title");
            continue;
        };
        let Some(seminar) = seminars.find_by_title_like(&title).await? else {
            summary.skip(index, "no seminar matches the title");
            continue;
        };
        let (Some(name), Some(email)) = (cell(row, 1).text(), cell(row, 2).text()) else {
            summary.skip(index, "missing name or email");
            continue;
        };

        let is_confirmed = Some(lowercase(cell(row, 4)).as_deref() == Some("yes"));

        let participant = repo
            .create(ParticipantParams {
                seminar_id: seminar.id,
                name,
                email,
                registered_at: cell(row, 3).datetime(),
                is_confirmed,
                extra_data: Metadata::default(),
            })
            .await?;
        audit
            .created(user_id, AuditTarget::Participant, participant.id, &participant)
            .await?;

        summary.imported += 1;
    }

    Ok(summary)
}

/// Columns: participant email (exact match). The upload time is the import time.
pub async fn payments(
    ctx: &JobContext,
    path: &str,
    user_id: Option<i32>,
) -> Result<ImportSummary, JobError> {
    let rows = load(ctx, path).await?;
    let participants = ParticipantRepository::new(&ctx.db);
    let repo = PaymentRepository::new(&ctx.db);
    let audit = AuditService::new(&ctx.db);
    let mut summary = ImportSummary::default();

    for (index, row) in rows.iter().enumerate().skip(HEADER_ROWS) {
        let Some(email) = cell(row, 0).text() else {
            summary.skip(index, "missing participant email");
            continue;
        };
        let Some(participant) = participants.find_by_email(&email).await? else {
            summary.skip(index, "no participant has that email");
            continue;
        };

        let payment = repo
            .create(PaymentRecord {
                participant_id: participant.id,
                file_path: None,
                uploaded_at: Some(Utc::now()),
                is_verified: None,
                metadata: None,
            })
            .await?;
        audit
            .created(user_id, AuditTarget::Payment, payment.id, &payment)
            .await?;

        summary.imported += 1;
    }

    Ok(summary)
}
