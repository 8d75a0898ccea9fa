//! Domain models for the coach portal.

pub mod account;
pub mod coach_settings;
pub mod invite;
pub mod session;

pub use account::{CoachAccount, SlugHolder};
pub use coach_settings::{
    CoachBrandingUpdate, CoachDisplay, CoachLookupResponse, CoachSettingsResponse,
    InviteValidationResponse, LookupSlugQuery, Patch, UpdateCoachSettingsRequest,
};
pub use invite::{
    generate_invite_token, select_public_invite, CoachInvite, InviteStatus, PublicInviteSelection,
};
pub use session::{Session, SessionUser};
