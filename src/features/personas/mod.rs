//! # Personas Feature
//!
//! Investor persona catalog with 5 archetypes.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add picker choices and display-name helper
//! - 1.0.0: Initial release

pub mod catalog;
pub mod choices;

pub use catalog::{catalog, display_name, PersonaProfile, PersonaType};
pub use choices::{choice_label, is_valid_persona};
