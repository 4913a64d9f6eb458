//! # Conversation Feature
//!
//! Chat transcript with delayed bot replies.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//! - **Toggleable**: false

pub mod transcript;

pub use transcript::{
    schedule_reply, welcome_text, BotReply, ChatMessage, Conversation, Sender, WELCOME_ID,
};
