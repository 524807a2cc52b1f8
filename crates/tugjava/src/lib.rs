//! tugjava - recipe-driven rewrites of typed Java syntax trees.
//!
//! This crate provides the `tugj` binary and its command implementations.
//!
//! ## Modules
//!
//! - `cli` - CLI command implementations
//! - `config` - Recipe options from files and flags

pub mod cli;
pub mod config;

// Re-export core types for convenience
pub use tugjava_core::error::{OutputErrorCode, TugError};
pub use tugjava_core::output::{
    ErrorInfo, ErrorResponse, RunResponse, SearchResponse, SCHEMA_VERSION,
};
pub use tugjava_recipes::{Recipe, ReplaceMethodCallWithTernary};
