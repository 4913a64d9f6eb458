//! # TUI Module
//!
//! Terminal chat client: pick an investor persona, then talk to the advisor.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true (cargo feature `tui`)
//!
//! ## Changelog
//! - 1.1.0: Save the chosen persona through the HTTP API
//! - 1.0.0: Persona picker and chat screens

pub mod api;
pub mod app;
pub mod event;
pub mod ui;

pub use api::ApiClient;
pub use app::{App, Screen};
pub use event::{Event, EventHandler};
