//! Shared utilities and common types for the Huddle backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token validation (session issuance lives in the auth service)
//! - Cursor-based pagination
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod validation;
