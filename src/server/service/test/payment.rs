use super::*;
use crate::server::{
    model::{payment::PaymentParams, upload::UploadedFile},
    service::payment::PaymentService,
    storage::{Disk, Storage},
};

fn receipt(name: &str) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        bytes: vec![7; 150 * 1024],
    }
}

/// Tests that a replaced receipt is removed from the public disk.
///
/// Expected: new file stored under uploads/, old file deleted, URL in the DTO
#[tokio::test]
async fn update_replaces_receipt() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let storage = Storage::new(root);

    let seminar = factory::create_seminar(db, None).await?;
    let participant = factory::create_participant(db, seminar.id).await?;
    let service = PaymentService::new(db, &storage);

    let created = service
        .create(
            PaymentParams {
                participant_id: participant.id,
                uploaded_at: None,
                is_verified: None,
                metadata: Default::default(),
                file: Some(receipt("first.pdf")),
            },
            None,
        )
        .await
        .unwrap();
    let old_path = created.file_path.clone().unwrap();
    assert!(old_path.starts_with("uploads/"));
    assert!(old_path.ends_with("_first.pdf"));
    assert!(!created.is_verified);
    assert!(storage.exists(Disk::Public, &old_path).await);

    let updated = service
        .update(
            created.id,
            PaymentParams {
                participant_id: participant.id,
                uploaded_at: None,
                is_verified: Some(true),
                metadata: Default::default(),
                file: Some(receipt("second.pdf")),
            },
            None,
        )
        .await
        .unwrap();

    let new_path = updated.file_path.clone().unwrap();
    assert!(new_path.ends_with("_second.pdf"));
    assert!(updated.is_verified);
    assert!(storage.exists(Disk::Public, &new_path).await);
    assert!(!storage.exists(Disk::Public, &old_path).await);

    let dto = updated.into_dto("http://localhost:8080");
    assert_eq!(
        dto.file_path,
        Some(format!("http://localhost:8080/storage/{}", new_path))
    );

    Ok(())
}

/// Tests a payment for an unknown participant.
///
/// Expected: Err(Validation) on participant_id, no file written
#[tokio::test]
async fn create_requires_known_participant() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_storage()
        .build()
        .await
        .unwrap();
    let (db, root) = test.db_and_storage().await.unwrap();
    let storage = Storage::new(root);

    let result = PaymentService::new(db, &storage)
        .create(
            PaymentParams {
                participant_id: uuid::Uuid::new_v4(),
                uploaded_at: None,
                is_verified: None,
                metadata: Default::default(),
                file: Some(receipt("receipt.pdf")),
            },
            None,
        )
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation errors");
    };
    assert!(errors.has("participant_id"));
    assert!(!storage.disk_root(Disk::Public).join("uploads").exists());

    Ok(())
}
