//! # Features Layer
//!
//! Domain features of the assistant: the persona catalog, the rule-based
//! advisor that answers chat messages, and the conversation transcript.

pub mod advisor;
pub mod conversation;
pub mod personas;

pub use advisor::{select_response, select_response_with, Category, Reply, ReplySource};
pub use conversation::{BotReply, ChatMessage, Conversation, Sender};
pub use personas::{display_name, is_valid_persona, PersonaProfile, PersonaType};
