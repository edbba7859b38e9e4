//! HTTP route handlers.

pub mod attestation;
pub mod golf;
pub mod group_posts;
pub mod health;
pub mod participants;
