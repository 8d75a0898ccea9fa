//! Entity definitions (database row mappings).

pub mod account;
pub mod coach_invite;

pub use account::{AccountEntity, SlugHolderEntity};
pub use coach_invite::{CoachInviteEntity, InviteStatusDb, InviteWithCoachEntity};
