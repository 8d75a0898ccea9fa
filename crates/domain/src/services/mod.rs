//! Domain services for the coach portal.
//!
//! Services contain business logic that operates on domain models. None of
//! them perform I/O; callers load the inputs and persist the results.

pub mod access;
pub mod branding;
pub mod settings;
pub mod slug;

pub use access::{authenticated_user_id, check_coach_permission, AccessError};
pub use branding::{
    build_coach_display, build_coach_settings, build_invite_url, build_invite_validation,
    coach_initials, display_name_or_default, first_present, DEFAULT_BRAND_COLOR,
    FALLBACK_COACH_NAME,
};
pub use settings::{validate_settings_update, SettingsError};
pub use slug::{check_slug_uniqueness, find_coach_by_slug, SlugCheck, SLUG_TAKEN_MESSAGE};
