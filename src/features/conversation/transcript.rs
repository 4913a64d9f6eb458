//! # Feature: Chat Transcript
//!
//! Conversation state kept by the chat front-end: a welcome message, user
//! messages appended as soon as they are sent, and bot replies appended after
//! a short simulated "thinking" delay.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Tag delayed replies with their conversation so stale ones are dropped
//! - 1.0.0: Initial release

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::features::advisor::select_response;

/// Id of the message every conversation starts with
pub const WELCOME_ID: &str = "welcome";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(content: impl Into<String>, sender: Sender) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// A bot reply produced by a delayed task, addressed to one conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub conversation_id: Uuid,
    pub content: String,
}

pub fn welcome_text(persona: &str) -> String {
    format!(
        "Welcome to your Financial Multiverse AI assistant! As a {persona} investor, I'll provide personalized advice tailored to your investment style. How can I help you today?"
    )
}

#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    persona: String,
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
}

impl Conversation {
    pub fn new(persona: impl Into<String>) -> Self {
        let persona = persona.into();
        let welcome = ChatMessage {
            id: WELCOME_ID.to_string(),
            content: welcome_text(&persona),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        };

        Conversation {
            id: Uuid::new_v4(),
            persona,
            messages: vec![welcome],
            awaiting_reply: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Append a user message. Blank input is ignored and returns `None`.
    ///
    /// The content is stored as typed, surrounding whitespace included.
    pub fn push_user(&mut self, text: &str) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        let message = ChatMessage::new(text, Sender::User);
        self.messages.push(message.clone());
        self.awaiting_reply = true;
        Some(message)
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(text, Sender::Bot);
        self.messages.push(message.clone());
        self.awaiting_reply = false;
        message
    }

    /// Reply the advisor would give to `message` for this conversation's persona
    pub fn reply_to(&self, message: &str) -> String {
        select_response(message, &self.persona)
    }

    /// Append a delayed reply if it belongs to this conversation.
    pub fn accept_reply(&mut self, reply: BotReply) -> bool {
        if reply.conversation_id != self.id {
            debug!("Dropping reply addressed to conversation {}", reply.conversation_id);
            return false;
        }
        self.push_bot(reply.content);
        true
    }

    /// Drop everything but the welcome message.
    ///
    /// A reply that is still pending will be appended when it arrives.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }

    /// Send a user message and schedule the bot's reply after `delay`.
    ///
    /// The user message is appended immediately. The reply is computed when
    /// the timer fires and delivered through `replies`. The timer cannot be
    /// cancelled.
    pub fn send(
        &mut self,
        text: &str,
        delay: Duration,
        replies: mpsc::UnboundedSender<BotReply>,
    ) -> Option<JoinHandle<()>> {
        let message = self.push_user(text)?;
        Some(schedule_reply(
            self.id,
            self.persona.clone(),
            message.content,
            delay,
            replies,
        ))
    }
}

/// One-shot timer that computes and delivers a bot reply.
pub fn schedule_reply(
    conversation_id: Uuid,
    persona: String,
    message: String,
    delay: Duration,
    replies: mpsc::UnboundedSender<BotReply>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let content = select_response(&message, &persona);
        if replies
            .send(BotReply {
                conversation_id,
                content,
            })
            .is_err()
        {
            debug!("Reply receiver gone, discarding reply for {conversation_id}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::advisor::script;
    use crate::features::personas::PersonaType;

    #[test]
    fn test_new_conversation_has_welcome() {
        let conversation = Conversation::new("athlete");
        let messages = conversation.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, WELCOME_ID);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert!(messages[0].content.contains("As a athlete investor"));
        assert!(!conversation.is_awaiting_reply());
    }

    #[test]
    fn test_push_user_ignores_blank() {
        let mut conversation = Conversation::new("artist");
        assert!(conversation.push_user("").is_none());
        assert!(conversation.push_user("   \n").is_none());
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_awaiting_reply());
    }

    #[test]
    fn test_push_user_keeps_text_verbatim() {
        let mut conversation = Conversation::new("artist");
        let message = conversation.push_user("  ESG funds?  ").unwrap();
        assert_eq!(message.content, "  ESG funds?  ");
        assert_eq!(message.sender, Sender::User);
        assert!(conversation.is_awaiting_reply());
        assert_ne!(message.id, WELCOME_ID);
    }

    #[test]
    fn test_push_bot_clears_waiting_flag() {
        let mut conversation = Conversation::new("artist");
        conversation.push_user("hello");
        conversation.push_bot("hi!");
        assert!(!conversation.is_awaiting_reply());
        assert_eq!(conversation.messages().len(), 3);
    }

    #[test]
    fn test_reply_to_uses_persona() {
        let conversation = Conversation::new("innovator");
        assert_eq!(
            conversation.reply_to("hello"),
            script(PersonaType::Innovator).greeting
        );
    }

    #[test]
    fn test_clear_keeps_welcome() {
        let mut conversation = Conversation::new("traditionalist");
        conversation.push_user("stocks?");
        conversation.push_bot("blue chips");
        conversation.clear();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].id, WELCOME_ID);
    }

    #[test]
    fn test_accept_reply_checks_conversation() {
        let mut conversation = Conversation::new("adventurer");
        let stale = BotReply {
            conversation_id: Uuid::new_v4(),
            content: "old".to_string(),
        };
        assert!(!conversation.accept_reply(stale));
        assert_eq!(conversation.messages().len(), 1);

        let fresh = BotReply {
            conversation_id: conversation.id(),
            content: "new".to_string(),
        };
        assert!(conversation.accept_reply(fresh));
        assert_eq!(conversation.messages().last().unwrap().content, "new");
    }

    #[test]
    fn test_message_serialization() {
        let conversation = Conversation::new("artist");
        let json = serde_json::to_value(&conversation.messages()[0]).unwrap();
        assert_eq!(json["id"], "welcome");
        assert_eq!(json["sender"], "bot");
    }

    #[tokio::test]
    async fn test_send_delivers_reply_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut conversation = Conversation::new("adventurer");

        let handle = conversation
            .send("crypto and risk?", Duration::from_millis(20), tx)
            .expect("message should be sent");

        // User message shows up before the reply
        assert_eq!(conversation.messages().len(), 2);
        assert!(conversation.is_awaiting_reply());

        handle.await.unwrap();
        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.conversation_id, conversation.id());
        assert!(reply
            .content
            .starts_with("As an Adventurer, you might enjoy exploring newer cryptocurrencies"));

        assert!(conversation.accept_reply(reply));
        assert_eq!(conversation.messages().len(), 3);
        assert!(!conversation.is_awaiting_reply());
    }

    #[tokio::test]
    async fn test_send_blank_schedules_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut conversation = Conversation::new("artist");
        assert!(conversation.send("  ", Duration::from_millis(1), tx).is_none());
        // Sender dropped with no reply queued
        assert!(rx.recv().await.is_none());
    }
}
