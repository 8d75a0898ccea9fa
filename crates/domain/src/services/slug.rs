//! Invite slug uniqueness and resolution.

use shared::validation::normalize_slug;
use uuid::Uuid;

use crate::models::{CoachAccount, SlugHolder};

pub const SLUG_TAKEN_MESSAGE: &str = "This invite slug is already taken";

/// Result of a uniqueness check.
///
/// `normalized_slug` is always populated so callers persist the canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCheck {
    pub valid: bool,
    pub error: Option<String>,
    pub normalized_slug: String,
}

/// Checks `incoming` against the slugs currently held by other accounts.
///
/// An account re-saving its own slug never conflicts with itself.
pub fn check_slug_uniqueness(
    incoming: &str,
    current_id: Uuid,
    existing: &[SlugHolder],
) -> SlugCheck {
    let normalized_slug = normalize_slug(incoming);

    let taken = existing
        .iter()
        .any(|holder| holder.invite_slug == normalized_slug && holder.id != current_id);

    if taken {
        SlugCheck {
            valid: false,
            error: Some(SLUG_TAKEN_MESSAGE.to_string()),
            normalized_slug,
        }
    } else {
        SlugCheck {
            valid: true,
            error: None,
            normalized_slug,
        }
    }
}

/// Finds the coach account owning a public slug.
///
/// The slug is only lowercased, not normalized. Accounts holding a matching
/// slug without the coach flag never match.
pub fn find_coach_by_slug<'a>(slug: &str, accounts: &'a [CoachAccount]) -> Option<&'a CoachAccount> {
    let wanted = slug.to_lowercase();
    accounts
        .iter()
        .find(|account| account.is_coach && account.invite_slug.as_deref() == Some(wanted.as_str()))
}
