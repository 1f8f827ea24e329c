//! Spreadsheet exports, one routine per entity.
//!
//! Each routine loads every live row with its relations, flattens it into a
//! key → display value record, keeps the columns named by the request headers and
//! stores an xlsx workbook on the private disk. The stored path is returned.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    model::metadata::Metadata,
    server::{
        data::{
            participant::ParticipantRepository, payment::PaymentRepository,
            seminar::SeminarRepository,
        },
        error::job::JobError,
        jobs::{sheet, task::ExportHeader, JobContext},
        model::payment::public_url,
        storage::Disk,
        util::parse::format_datetime,
    },
};

type Record = HashMap<&'static str, String>;

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

fn optional_date(value: Option<chrono::DateTime<Utc>>) -> String {
    value.as_ref().map(format_datetime).unwrap_or_default()
}

fn metadata(value: Option<&serde_json::Value>) -> String {
    Metadata::from_json(value).joined()
}

/// Private-disk path for a new export, unique per call.
fn export_path(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}.xlsx",
        prefix,
        Utc::now().format("%Y-%m-%d_%H-%M-%S"),
        &suffix[..8]
    )
}

/// Renders `records` under `headers` and stores the workbook.
async fn store(
    ctx: &JobContext,
    title: &str,
    prefix: &str,
    headers: &[ExportHeader],
    records: Vec<Record>,
) -> Result<String, JobError> {
    let labels: Vec<&str> = headers.iter().map(|h| h.label.as_str()).collect();
    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|mut record| {
            headers
                .iter()
                .map(|h| record.remove(h.value.as_str()).unwrap_or_default())
                .collect()
        })
        .collect();

    let bytes = sheet::write_table(title, &labels, &rows)?;
    let path = export_path(prefix);

    ctx.storage.put(Disk::Private, &path, &bytes).await?;

    tracing::info!(path = %path, rows = rows.len(), "Stored {}", title);

    Ok(path)
}

pub async fn seminars(ctx: &JobContext, headers: &[ExportHeader]) -> Result<String, JobError> {
    let rows = SeminarRepository::new(&ctx.db)
        .all_with_owner_and_counts()
        .await?;

    let records = rows
        .into_iter()
        .map(|(seminar, owner, participants)| {
            Record::from([
                ("id", seminar.id.to_string()),
                ("title", seminar.title),
                ("description", seminar.description.unwrap_or_default()),
                ("schedule", format_datetime(&seminar.schedule)),
                ("created_by", owner.map(|u| u.name).unwrap_or_default()),
                ("is_active", yes_no(seminar.is_active)),
                ("participants_count", participants.to_string()),
                ("created_at", format_datetime(&seminar.created_at)),
                ("additional_info", metadata(seminar.additional_info.as_ref())),
            ])
        })
        .collect();

    store(
        ctx,
        "Seminar Export",
        "seminars/exported/seminar",
        headers,
        records,
    )
    .await
}

pub async fn participants(ctx: &JobContext, headers: &[ExportHeader]) -> Result<String, JobError> {
    let rows = ParticipantRepository::new(&ctx.db).all_with_seminar().await?;

    let records = rows
        .into_iter()
        .map(|(participant, seminar)| {
            Record::from([
                ("id", participant.id.to_string()),
                ("seminar", seminar.map(|s| s.title).unwrap_or_default()),
                ("name", participant.name),
                ("email", participant.email),
                ("registered_at", optional_date(participant.registered_at)),
                ("is_confirmed", yes_no(participant.is_confirmed.unwrap_or(false))),
                ("created_at", format_datetime(&participant.created_at)),
                ("extra_data", metadata(participant.extra_data.as_ref())),
            ])
        })
        .collect();

    store(
        ctx,
        "Participant Export",
        "participants/exported/participants",
        headers,
        records,
    )
    .await
}

pub async fn payments(ctx: &JobContext, headers: &[ExportHeader]) -> Result<String, JobError> {
    let rows = PaymentRepository::new(&ctx.db).all_with_participant().await?;

    let records = rows
        .into_iter()
        .map(|(payment, participant)| {
            let (name, email) = participant
                .map(|p| (p.name, p.email))
                .unwrap_or_default();

            Record::from([
                ("id", payment.id.to_string()),
                ("participant_name", name),
                ("participant_email", email),
                (
                    "file_path",
                    payment
                        .file_path
                        .as_deref()
                        .map(|path| public_url(&ctx.app_url, path))
                        .unwrap_or_default(),
                ),
                ("uploaded_at", optional_date(payment.uploaded_at)),
                ("is_verified", yes_no(payment.is_verified)),
                ("created_at", format_datetime(&payment.created_at)),
                ("metadata", metadata(payment.metadata.as_ref())),
            ])
        })
        .collect();

    store(
        ctx,
        "Payment Export",
        "payments/exported/payments",
        headers,
        records,
    )
    .await
}
