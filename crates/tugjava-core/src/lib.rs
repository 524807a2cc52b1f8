//! Core infrastructure for tugjava.
//!
//! This crate provides the language-agnostic pieces shared by the recipe
//! crates and the `tugj` front door:
//! - Unified error type and stable error codes
//! - JSON output types for CLI responses

pub mod error;
pub mod output;
