// Core layer - shared config, text and validation helpers
pub mod core;

// Features layer - personas, advisor, conversation
pub mod features;

// Storage layer - persona selection persistence
pub mod storage;

// HTTP layer - JSON API
pub mod server;

// TUI layer - terminal chat client (optional feature)
#[cfg(feature = "tui")]
pub mod tui;

pub use core::Config;

pub use features::{
    // Advisor
    select_response, select_response_with, Category, Reply, ReplySource,
    // Conversation
    BotReply, ChatMessage, Conversation, Sender,
    // Personas
    display_name, is_valid_persona, PersonaProfile, PersonaType,
};

pub use server::{bind_with_retry, router, AppState};
pub use storage::{open_store, NewPersona, PersonaRecord, PersonaStore};
