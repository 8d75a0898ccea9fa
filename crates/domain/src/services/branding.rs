//! Coach branding: display identity, invite URLs and defaults.

use crate::models::{
    CoachAccount, CoachDisplay, CoachSettingsResponse, InviteValidationResponse,
};

/// Brand color used when a coach has not chosen one (coral).
pub const DEFAULT_BRAND_COLOR: &str = "#FF6B6B";

/// Display name used when a coach has neither a brand name nor a name.
pub const FALLBACK_COACH_NAME: &str = "Coach";

/// Returns the first candidate that is present and non-empty.
///
/// Empty strings count as unset at every position.
pub fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.is_empty())
}

/// Derives the public-facing identity of a coach.
pub fn build_coach_display(account: &CoachAccount) -> CoachDisplay {
    CoachDisplay {
        name: first_present(&[account.brand_name.as_deref(), account.name.as_deref()])
            .map(str::to_string),
        brand_color: first_present(&[account.brand_color.as_deref()])
            .unwrap_or(DEFAULT_BRAND_COLOR)
            .to_string(),
        brand_logo: account.brand_logo.clone(),
    }
}

/// The display name with the literal fallback applied.
pub fn display_name_or_default(display: &CoachDisplay) -> String {
    first_present(&[display.name.as_deref()])
        .unwrap_or(FALLBACK_COACH_NAME)
        .to_string()
}

/// Builds the link a coach shares with prospective clients.
///
/// A custom slug wins over the public invite token.
pub fn build_invite_url(
    base_url: &str,
    invite_slug: Option<&str>,
    invite_token: Option<&str>,
) -> Option<String> {
    let base_url = base_url.trim_end_matches('/');

    if let Some(slug) = first_present(&[invite_slug]) {
        return Some(format!("{}/join/{}", base_url, slug));
    }
    first_present(&[invite_token]).map(|token| format!("{}/coach/invite/{}", base_url, token))
}

/// Assembles the settings view for a coach.
pub fn build_coach_settings(
    account: &CoachAccount,
    public_invite_token: Option<&str>,
    base_url: &str,
) -> CoachSettingsResponse {
    CoachSettingsResponse {
        name: account.name.clone(),
        brand_name: account.brand_name.clone(),
        brand_color: first_present(&[account.brand_color.as_deref()])
            .unwrap_or(DEFAULT_BRAND_COLOR)
            .to_string(),
        brand_logo: account.brand_logo.clone(),
        invite_slug: account.invite_slug.clone(),
        invite_url: build_invite_url(
            base_url,
            account.invite_slug.as_deref(),
            public_invite_token,
        ),
    }
}

/// The join-page view of a pending invite.
pub fn build_invite_validation(
    coach: &CoachAccount,
    invite_email: Option<String>,
) -> InviteValidationResponse {
    let display = build_coach_display(coach);
    InviteValidationResponse {
        valid: true,
        display_name: display_name_or_default(&display),
        initials: coach_initials(display.name.as_deref()),
        coach: display,
        invite_email,
    }
}

/// Avatar initials for a coach name.
///
/// First and last word initials for multi-word names, otherwise the first two
/// characters; `"C"` when there is no usable name.
pub fn coach_initials(name: Option<&str>) -> String {
    let words: Vec<&str> = name.map(|n| n.split_whitespace().collect()).unwrap_or_default();

    let initials: String = match words.as_slice() {
        [] => return "C".to_string(),
        [only] => only.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    initials.to_uppercase()
}
