use super::*;
use crate::{
    model::api::ExportHeaderDto,
    server::{
        model::upload::UploadedFile,
        service::job::{export_headers, store_import},
        storage::{Disk, Storage},
    },
};

/// Tests export header validation.
///
/// Expected: missing list and incomplete entries rejected with indexed keys
#[test]
fn validates_export_headers() {
    assert!(export_headers(None).unwrap_err().has("headers"));
    assert!(export_headers(Some(Vec::new())).unwrap_err().has("headers"));

    let errors = export_headers(Some(vec![
        ExportHeaderDto {
            value: Some("title".to_string()),
            label: Some("Title".to_string()),
        },
        ExportHeaderDto {
            value: Some("schedule".to_string()),
            label: None,
        },
    ]))
    .unwrap_err();
    assert!(errors.has("headers.1.label"));
    assert!(!errors.has("headers.0.label"));

    let headers = export_headers(Some(vec![ExportHeaderDto {
        value: Some("name".to_string()),
        label: Some("Name".to_string()),
    }]))
    .unwrap();
    assert_eq!(headers[0].value, "name");
}

/// Tests import upload storage.
///
/// Expected: txt rejected; csv stored under `<dir>/imported/` with its extension
#[tokio::test]
async fn stores_import_uploads() -> Result<(), DbErr> {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(dir.path());

    let rejected = store_import(
        &storage,
        "seminars",
        Some(UploadedFile {
            file_name: "seminars.txt".to_string(),
            bytes: b"title".to_vec(),
        }),
    )
    .await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));

    let missing = store_import(&storage, "seminars", None).await;
    assert!(matches!(missing, Err(AppError::Validation(_))));

    let path = store_import(
        &storage,
        "seminars",
        Some(UploadedFile {
            file_name: "Seminars.CSV".to_string(),
            bytes: b"title".to_vec(),
        }),
    )
    .await
    .unwrap();

    assert!(path.starts_with("seminars/imported/"));
    assert!(path.ends_with(".csv"));
    assert!(storage.exists(Disk::Private, &path).await);

    Ok(())
}
