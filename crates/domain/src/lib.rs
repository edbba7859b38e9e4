//! Domain layer for the Huddle backend.
//!
//! This crate contains:
//! - Domain models (GroupPost, Participant, golf extension data)
//! - Business logic services (authorization, attestation, scoring)
//! - Domain error types
pub mod models;
pub mod services;
