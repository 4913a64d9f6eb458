//! # Advisor Feature
//!
//! Persona-aware canned replies for the chat assistant.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Split keyword classification from the reply scripts
//! - 1.0.0: Initial release

pub mod classifier;
pub mod responder;

pub use classifier::{is_greeting, Category, MessageSignals};
pub use responder::{
    script, select_response, select_response_with, PersonaScript, Reply, ReplySource,
    DEFAULT_GREETING, GENERIC_REPLIES,
};
