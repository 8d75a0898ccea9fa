//! Coach invite domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle state of a coach invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
    Revoked,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Declined => "declined",
            InviteStatus::Revoked => "revoked",
        }
    }
}

impl FromStr for InviteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InviteStatus::Pending),
            "accepted" => Ok(InviteStatus::Accepted),
            "declined" => Ok(InviteStatus::Declined),
            "revoked" => Ok(InviteStatus::Revoked),
            _ => Err(format!("Invalid invite status: {}", s)),
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An invite issued by a coach.
///
/// Invites addressed to neither an email nor a client are public: any
/// visitor following the coach's link may use them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachInvite {
    pub id: Uuid,
    pub coach_id: Uuid,
    pub invite_token: String,
    pub invite_email: Option<String>,
    pub client_id: Option<Uuid>,
    pub invite_status: InviteStatus,
    pub invite_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CoachInvite {
    pub fn is_public(&self) -> bool {
        self.invite_email.is_none() && self.client_id.is_none()
    }
}

/// Outcome of choosing a coach's public invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicInviteSelection<'a> {
    /// Reuse this existing public invite.
    Existing(&'a CoachInvite),
    /// No public invite exists yet; persist one with this token.
    Mint { token: String },
}

impl PublicInviteSelection<'_> {
    pub fn token(&self) -> &str {
        match self {
            PublicInviteSelection::Existing(invite) => &invite.invite_token,
            PublicInviteSelection::Mint { token } => token,
        }
    }
}

/// Picks the public invite for `coach_id` out of `invites`.
///
/// Returns the first invite belonging to the coach with no invitee email and
/// no assigned client. Scoped invites are skipped wherever they appear. When
/// none qualifies a fresh token is minted.
pub fn select_public_invite(coach_id: Uuid, invites: &[CoachInvite]) -> PublicInviteSelection<'_> {
    invites
        .iter()
        .find(|invite| invite.coach_id == coach_id && invite.is_public())
        .map(PublicInviteSelection::Existing)
        .unwrap_or_else(|| PublicInviteSelection::Mint {
            token: generate_invite_token(),
        })
}

/// Generates a fresh opaque invite token.
pub fn generate_invite_token() -> String {
    Uuid::new_v4().to_string()
}
