//! Common validation utilities.

use validator::ValidationError;

/// Minimum length of a normalized invite slug.
pub const MIN_SLUG_LENGTH: usize = 3;

/// Maximum length of a normalized invite slug.
pub const MAX_SLUG_LENGTH: usize = 30;

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
}

/// Reduces arbitrary input to the canonical invite slug form.
///
/// Lowercases the input, replaces every character outside `[a-z0-9-]` with a
/// hyphen, collapses hyphen runs and strips leading/trailing hyphens. Never
/// fails; input with no usable characters normalizes to an empty string.
pub fn normalize_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());

    for c in input.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Validates the length of an invite slug after normalization.
pub fn validate_invite_slug(slug: &str) -> Result<(), ValidationError> {
    let normalized = normalize_slug(slug);

    if normalized.len() < MIN_SLUG_LENGTH {
        let mut err = ValidationError::new("invite_slug_too_short");
        err.message = Some("Invite slug must be at least 3 characters".into());
        return Err(err);
    }

    if normalized.len() > MAX_SLUG_LENGTH {
        let mut err = ValidationError::new("invite_slug_too_long");
        err.message = Some("Invite slug must be 30 characters or less".into());
        return Err(err);
    }

    Ok(())
}

/// Returns true if `color` is `#` followed by exactly six hex digits.
pub fn is_hex_color(color: &str) -> bool {
    HEX_COLOR_REGEX.is_match(color)
}

/// Validates a brand color in `#RRGGBB` form.
pub fn validate_brand_color(color: &str) -> Result<(), ValidationError> {
    if is_hex_color(color) {
        Ok(())
    } else {
        let mut err = ValidationError::new("brand_color_format");
        err.message = Some("Invalid color format. Use hex like #FF6B6B".into());
        Err(err)
    }
}
