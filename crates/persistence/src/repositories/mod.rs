//! Repository implementations for database operations.

pub mod account;
pub mod coach_invite;

pub use account::AccountRepository;
pub use coach_invite::CoachInviteRepository;
