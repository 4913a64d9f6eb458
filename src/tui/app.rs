//! # TUI Application Core
//!
//! Application state and screen navigation for the chat client.

use chrono::{SecondsFormat, Utc};
use log::{debug, warn};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::features::conversation::{BotReply, Conversation};
use crate::features::personas::PersonaType;
use crate::storage::{NewPersona, PersonaRecord};

/// Shown on the picker when a selection could not be saved
pub const SAVE_FAILED: &str = "Failed to save your persona selection. Please try again.";

/// Available screens in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Picker,
    Chat,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Picker => "Choose Your Investor Persona",
            Screen::Chat => "Chat",
        }
    }

    /// Key hints shown in the status bar
    pub fn hints(&self) -> &'static str {
        match self {
            Screen::Picker => " ↑/↓:Move Enter:Choose q:Quit ",
            Screen::Chat => " Enter:Send Esc:Change persona Ctrl-L:Clear ",
        }
    }
}

/// Main application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Highlighted row in the persona picker
    pub selected_index: usize,
    /// Active conversation, present on the chat screen
    pub conversation: Option<Conversation>,
    /// Input buffer for the message being typed
    pub input_buffer: String,
    /// Error message to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Ticks since the typing indicator started
    pub typing_ticks: usize,
    /// Persona whose selection is being saved; the chat opens once it lands
    pub saving: Option<PersonaType>,
    user_id: i64,
    reply_delay: Duration,
    replies: mpsc::UnboundedSender<BotReply>,
}

impl App {
    pub fn new(
        user_id: i64,
        reply_delay: Duration,
        replies: mpsc::UnboundedSender<BotReply>,
    ) -> Self {
        App {
            current_screen: Screen::Picker,
            should_quit: false,
            selected_index: 0,
            conversation: None,
            input_buffer: String::new(),
            error_message: None,
            status_message: None,
            typing_ticks: 0,
            saving: None,
            user_id,
            reply_delay,
            replies,
        }
    }

    pub fn selected_persona(&self) -> PersonaType {
        PersonaType::ALL[self.selected_index % PersonaType::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % PersonaType::ALL.len();
    }

    pub fn select_previous(&mut self) {
        let len = PersonaType::ALL.len();
        self.selected_index = (self.selected_index + len - 1) % len;
    }

    /// Highlight a persona in the picker, e.g. the one chosen last time
    pub fn highlight(&mut self, persona: PersonaType) {
        if let Some(index) = PersonaType::ALL.iter().position(|p| *p == persona) {
            self.selected_index = index;
        }
    }

    /// Selection record for the highlighted persona
    pub fn selection(&self) -> NewPersona {
        NewPersona {
            user_id: self.user_id,
            persona_type: self.selected_persona().id().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Open a chat with the highlighted persona
    pub fn choose_persona(&mut self) {
        let persona = self.selected_persona();
        self.open_chat(persona);
    }

    /// Start saving the highlighted persona. The picker stays up until
    /// `handle_saved` reports the outcome. `None` while a save is in flight.
    pub fn begin_save(&mut self) -> Option<NewPersona> {
        if self.saving.is_some() {
            return None;
        }
        let persona = self.selected_persona();
        self.saving = Some(persona);
        self.error_message = None;
        self.status_message = Some(format!("Saving {} selection...", persona.title()));
        Some(self.selection())
    }

    fn open_chat(&mut self, persona: PersonaType) {
        self.conversation = Some(Conversation::new(persona.id()));
        self.input_buffer.clear();
        self.error_message = None;
        self.status_message = Some(format!("Chatting as {}", persona.title()));
        self.current_screen = Screen::Chat;
        debug!("Opened chat for persona {persona}");
    }

    /// Leave the chat and return to the picker. Pending replies are dropped.
    pub fn back_to_picker(&mut self) {
        self.conversation = None;
        self.input_buffer.clear();
        self.status_message = None;
        self.current_screen = Screen::Picker;
    }

    pub fn push_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Send the input line. Blank input is left in place and nothing is sent.
    pub fn submit(&mut self) -> bool {
        let Some(conversation) = self.conversation.as_mut() else {
            return false;
        };
        if conversation
            .send(&self.input_buffer, self.reply_delay, self.replies.clone())
            .is_none()
        {
            return false;
        }
        self.input_buffer.clear();
        self.typing_ticks = 0;
        true
    }

    pub fn clear_chat(&mut self) {
        if let Some(conversation) = self.conversation.as_mut() {
            conversation.clear();
            self.status_message = Some("Conversation cleared".to_string());
        }
    }

    pub fn is_typing(&self) -> bool {
        self.conversation
            .as_ref()
            .is_some_and(Conversation::is_awaiting_reply)
    }

    /// "Thinking" with one to three animated dots
    pub fn typing_indicator(&self) -> Option<String> {
        self.is_typing()
            .then(|| format!("Thinking{}", ".".repeat(self.typing_ticks % 3 + 1)))
    }

    pub fn on_tick(&mut self) {
        if self.is_typing() {
            self.typing_ticks = self.typing_ticks.wrapping_add(1);
        }
    }

    pub fn handle_reply(&mut self, reply: BotReply) {
        match self.conversation.as_mut() {
            Some(conversation) => {
                conversation.accept_reply(reply);
            }
            None => debug!("Reply arrived with no open chat, dropping it"),
        }
    }

    pub fn handle_saved(&mut self, result: Result<PersonaRecord, String>) {
        let Some(persona) = self.saving.take() else {
            debug!("Save result arrived with nothing pending, ignoring it");
            return;
        };
        match result {
            Ok(record) => {
                self.open_chat(persona);
                debug!("Saved {} selection #{}", record.persona_type, record.id);
            }
            Err(e) => {
                warn!("Failed to save persona selection: {e}");
                self.status_message = None;
                self.error_message = Some(SAVE_FAILED.to_string());
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::conversation::Sender;

    fn app() -> (App, mpsc::UnboundedReceiver<BotReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(7, Duration::from_millis(5), tx), rx)
    }

    #[test]
    fn test_picker_wraps() {
        let (mut app, _rx) = app();
        assert_eq!(app.selected_persona(), PersonaType::Innovator);
        app.select_previous();
        assert_eq!(app.selected_persona(), PersonaType::Artist);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_persona(), PersonaType::Traditionalist);
    }

    #[test]
    fn test_choose_persona_opens_chat() {
        let (mut app, _rx) = app();
        app.highlight(PersonaType::Athlete);
        app.choose_persona();

        assert_eq!(app.current_screen, Screen::Chat);
        assert_eq!(app.conversation.as_ref().unwrap().persona(), "athlete");
    }

    #[test]
    fn test_selection_record() {
        let (mut app, _rx) = app();
        app.highlight(PersonaType::Artist);
        let selection = app.selection();

        assert_eq!(selection.user_id, 7);
        assert_eq!(selection.persona_type, "artist");
        assert!(selection.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_saved_selection_opens_chat() {
        let (mut app, _rx) = app();
        app.highlight(PersonaType::Innovator);
        let selection = app.begin_save().unwrap();
        assert_eq!(app.current_screen, Screen::Picker);
        assert!(app.begin_save().is_none());

        app.handle_saved(Ok(selection.into_record(3)));
        assert_eq!(app.current_screen, Screen::Chat);
        assert_eq!(app.conversation.as_ref().unwrap().persona(), "innovator");
        assert!(app.saving.is_none());
    }

    #[test]
    fn test_back_to_picker_drops_conversation() {
        let (mut app, _rx) = app();
        app.choose_persona();
        app.push_char('x');
        app.back_to_picker();

        assert_eq!(app.current_screen, Screen::Picker);
        assert!(app.conversation.is_none());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_blank_submit_keeps_input() {
        let (mut app, _rx) = app();
        app.choose_persona();
        app.push_char(' ');
        assert!(!app.submit());
        assert_eq!(app.input_buffer, " ");
        assert!(!app.is_typing());
    }

    #[test]
    fn test_backspace_on_empty_input() {
        let (mut app, _rx) = app();
        app.backspace();
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_save_failure_stays_on_picker() {
        let (mut app, _rx) = app();
        app.begin_save().unwrap();
        app.handle_saved(Err("connection refused".to_string()));

        assert_eq!(app.current_screen, Screen::Picker);
        assert!(app.conversation.is_none());
        assert_eq!(app.error_message.as_deref(), Some(SAVE_FAILED));

        // The user can try again
        assert!(app.begin_save().is_some());
    }

    #[tokio::test]
    async fn test_submit_then_reply() {
        let (mut app, mut rx) = app();
        app.choose_persona();
        for c in "hello".chars() {
            app.push_char(c);
        }

        assert!(app.submit());
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.typing_indicator().as_deref(), Some("Thinking."));
        app.on_tick();
        assert_eq!(app.typing_indicator().as_deref(), Some("Thinking.."));

        let reply = rx.recv().await.unwrap();
        app.handle_reply(reply);

        let messages = app.conversation.as_ref().unwrap().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].sender, Sender::Bot);
        assert!(app.typing_indicator().is_none());
    }

    #[tokio::test]
    async fn test_reply_for_previous_chat_is_ignored() {
        let (mut app, mut rx) = app();
        app.choose_persona();
        app.push_char('?');
        app.submit();
        app.back_to_picker();
        app.choose_persona();

        let stale = rx.recv().await.unwrap();
        app.handle_reply(stale);
        assert_eq!(app.conversation.as_ref().unwrap().messages().len(), 1);
    }

    #[test]
    fn test_clear_chat_keeps_welcome() {
        let (mut app, _rx) = app();
        app.choose_persona();
        app.conversation.as_mut().unwrap().push_bot("extra");
        app.clear_chat();
        assert_eq!(app.conversation.as_ref().unwrap().messages().len(), 1);
    }
}
