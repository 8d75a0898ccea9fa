//! Shared utilities and common types for the coach portal backend.
//!
//! This crate provides functionality used across all other crates:
//! - Invite slug normalization and validation
//! - Brand color validation
//! - Session token (JWT) issuing and verification

pub mod jwt;
pub mod validation;
