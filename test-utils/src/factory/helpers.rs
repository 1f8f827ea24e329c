//! Shared helper utilities for factory methods.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Returns a timestamp `seconds` after a fixed base instant.
///
/// Lets tests control `created_at` ordering without sleeping.
pub fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default() + Duration::seconds(seconds)
}

/// Creates a payment together with its participant, seminar and owning user.
///
/// # Returns
/// - `Ok((user, seminar, participant, payment))` - All created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_payment_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::seminar::Model,
        entity::participant::Model,
        entity::payment::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let seminar = crate::factory::seminar::create_seminar(db, Some(user.id)).await?;
    let participant = crate::factory::participant::create_participant(db, seminar.id).await?;
    let payment = crate::factory::payment::create_payment(db, participant.id).await?;

    Ok((user, seminar, participant, payment))
}
