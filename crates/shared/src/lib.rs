//! Shared utilities and common types for the chamber workflow backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Common validation logic
//! - Amount formatting for vouchers

pub mod validation;
pub mod words;
