//! Coach invite entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{CoachInvite, InviteStatus};
use sqlx::FromRow;
use uuid::Uuid;

use super::AccountEntity;

/// Database enum for invite_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invite_status", rename_all = "lowercase")]
pub enum InviteStatusDb {
    Pending,
    Accepted,
    Declined,
    Revoked,
}

impl From<InviteStatusDb> for InviteStatus {
    fn from(status: InviteStatusDb) -> Self {
        match status {
            InviteStatusDb::Pending => InviteStatus::Pending,
            InviteStatusDb::Accepted => InviteStatus::Accepted,
            InviteStatusDb::Declined => InviteStatus::Declined,
            InviteStatusDb::Revoked => InviteStatus::Revoked,
        }
    }
}

impl From<InviteStatus> for InviteStatusDb {
    fn from(status: InviteStatus) -> Self {
        match status {
            InviteStatus::Pending => InviteStatusDb::Pending,
            InviteStatus::Accepted => InviteStatusDb::Accepted,
            InviteStatus::Declined => InviteStatusDb::Declined,
            InviteStatus::Revoked => InviteStatusDb::Revoked,
        }
    }
}

/// Database row mapping for the coach_clients table.
#[derive(Debug, Clone, FromRow)]
pub struct CoachInviteEntity {
    pub id: Uuid,
    pub coach_id: Uuid,
    pub invite_token: String,
    pub invite_email: Option<String>,
    pub client_id: Option<Uuid>,
    pub invite_status: InviteStatusDb,
    pub invite_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CoachInviteEntity> for CoachInvite {
    fn from(entity: CoachInviteEntity) -> Self {
        Self {
            id: entity.id,
            coach_id: entity.coach_id,
            invite_token: entity.invite_token,
            invite_email: entity.invite_email,
            client_id: entity.client_id,
            invite_status: entity.invite_status.into(),
            invite_sent_at: entity.invite_sent_at,
            created_at: entity.created_at,
        }
    }
}

/// Invite row joined with the issuing coach's account.
#[derive(Debug, Clone, FromRow)]
pub struct InviteWithCoachEntity {
    pub invite_token: String,
    pub invite_email: Option<String>,
    pub invite_status: InviteStatusDb,
    #[sqlx(flatten)]
    pub coach: AccountEntity,
}
