//! Coach settings and lookup DTOs.

use serde::{Deserialize, Deserializer, Serialize};

/// A partial-update field: absent, explicitly null, or a new value.
///
/// Use with `#[serde(default)]` so a missing key deserializes to
/// [`Patch::Unchanged`] while `null` becomes [`Patch::Clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    /// The new value, if one was supplied.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    /// Applies the patch to a current value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Unchanged => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

/// Request body for `PUT /coach/settings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoachSettingsRequest {
    #[serde(default)]
    pub brand_name: Patch<String>,
    #[serde(default)]
    pub brand_color: Patch<String>,
    #[serde(default)]
    pub brand_logo: Patch<String>,
    #[serde(default)]
    pub invite_slug: Patch<String>,
}

/// A settings update that passed every check, with the slug in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoachBrandingUpdate {
    pub brand_name: Patch<String>,
    pub brand_color: Patch<String>,
    pub brand_logo: Patch<String>,
    pub invite_slug: Patch<String>,
}

/// Coach settings as returned by `GET`/`PUT /coach/settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachSettingsResponse {
    pub name: Option<String>,
    pub brand_name: Option<String>,
    pub brand_color: String,
    pub brand_logo: Option<String>,
    pub invite_slug: Option<String>,
    pub invite_url: Option<String>,
}

/// Public-facing coach identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachDisplay {
    pub name: Option<String>,
    pub brand_color: String,
    pub brand_logo: Option<String>,
}

/// Query string for `GET /coach/lookup-slug`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupSlugQuery {
    pub slug: Option<String>,
}

/// Response for a resolved coach slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachLookupResponse {
    #[serde(flatten)]
    pub coach: CoachDisplay,
    pub invite_token: String,
}

/// Response for a valid, pending invite token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteValidationResponse {
    pub valid: bool,
    pub coach: CoachDisplay,
    /// `coach.name` with the `"Coach"` fallback applied, for the join page.
    pub display_name: String,
    /// Avatar initials for the join page.
    pub initials: String,
    pub invite_email: Option<String>,
}
