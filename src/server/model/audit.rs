//! Audit trail targets and list row.

use entity::sea_orm_active_enums::AuditEvent;
use serde::Serialize;

/// Entity kinds that record audit rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTarget {
    Seminar,
    Participant,
    User,
    Payment,
    Role,
}

impl AuditTarget {
    pub const ALL: [AuditTarget; 5] = [
        Self::Seminar,
        Self::Participant,
        Self::User,
        Self::Payment,
        Self::Role,
    ];

    /// Stored in `audits.auditable_type` and used in `audits/data/{slug}`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Seminar => "seminars",
            Self::Participant => "participants",
            Self::User => "users",
            Self::Payment => "payments",
            Self::Role => "roles",
        }
    }

    /// Display name used in audit notes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Seminar => "Seminar",
            Self::Participant => "Participant",
            Self::User => "User",
            Self::Payment => "Payment",
            Self::Role => "Role",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.slug() == slug)
    }
}

pub fn event_name(event: AuditEvent) -> &'static str {
    match event {
        AuditEvent::Created => "created",
        AuditEvent::Updated => "updated",
        AuditEvent::Deleted => "deleted",
    }
}

/// Audit row joined with its actor.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRow {
    #[serde(flatten)]
    pub audit: entity::audit::Model,
    #[serde(skip)]
    pub user: Option<entity::user::Model>,
}

impl From<(entity::audit::Model, Option<entity::user::Model>)> for AuditRow {
    fn from((audit, user): (entity::audit::Model, Option<entity::user::Model>)) -> Self {
        Self {
            audit,
            user: user.filter(|u| u.deleted_at.is_none()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests slug round-trips and unknown slugs.
    ///
    /// Expected: every target resolves from its slug; unknown is None
    #[test]
    fn resolves_slugs() {
        for target in AuditTarget::ALL {
            assert_eq!(AuditTarget::from_slug(target.slug()), Some(target));
        }
        assert_eq!(AuditTarget::from_slug("invoices"), None);
    }
}
