//! Account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account record as seen by the coach features.
///
/// Every user has one; only accounts with `is_coach` set may hold branding
/// fields and an invite slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachAccount {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub is_coach: bool,
    pub brand_name: Option<String>,
    pub brand_color: Option<String>,
    pub brand_logo: Option<String>,
    pub invite_slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CoachAccount {
    /// Creates a plain, non-coach account with no branding.
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            name: None,
            is_coach: false,
            brand_name: None,
            brand_color: None,
            brand_logo: None,
            invite_slug: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An `(id, invite_slug)` pair for an account that currently holds a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugHolder {
    pub id: Uuid,
    pub invite_slug: String,
}
