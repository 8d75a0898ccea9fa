//! Domain layer for the coach portal backend.
//!
//! This crate contains:
//! - Domain models (CoachAccount, CoachInvite, Session) and API DTOs
//! - Business logic services (access gate, slug rules, branding, settings updates)

pub mod models;
pub mod services;
