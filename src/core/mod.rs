//! # Core Module
//!
//! Configuration, text helpers and request validation shared by every layer.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add validation module for structured request errors
//! - 1.1.0: Add text module with log line truncation
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod text;
pub mod validation;

// Re-export commonly used items
pub use config::Config;
pub use text::{capitalize_first, truncate_with_ellipsis, LOG_LINE_LIMIT};
pub use validation::{json_kind, ObjectValidator, ValidationIssue};
