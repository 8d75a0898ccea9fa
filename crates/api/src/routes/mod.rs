//! HTTP route handlers.

pub mod coach_invites;
pub mod coach_lookup;
pub mod coach_settings;
pub mod health;
