//! # TUI Event Handling
//!
//! Keyboard input, tick events and results of background work.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::features::conversation::BotReply;
use crate::storage::PersonaRecord;
use crate::tui::Screen;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic updates
    Tick,
    /// Delayed advisor reply
    Reply(BotReply),
    /// Outcome of saving the chosen persona
    Saved(Result<PersonaRecord, String>),
}

/// Event handler that merges keyboard, tick and background events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    ///
    /// The returned sender lets background tasks feed events into the loop.
    pub fn new(tick_rate: Duration) -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let key_tx = tx.clone();
        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => key_tx.send(Event::Key(key)),
                    Ok(CrosstermEvent::Resize(w, h)) => key_tx.send(Event::Resize(w, h)),
                    _ => Ok(()),
                };
                if forwarded.is_err() {
                    break;
                }
            } else if key_tx.send(Event::Tick).is_err() {
                break;
            }
        });

        (EventHandler { rx }, tx)
    }

    /// Forward advisor replies from `replies` into the event stream
    pub fn forward_replies(
        mut replies: mpsc::UnboundedReceiver<BotReply>,
        events: mpsc::UnboundedSender<Event>,
    ) {
        tokio::spawn(async move {
            while let Some(reply) = replies.recv().await {
                if events.send(Event::Reply(reply)).is_err() {
                    break;
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Move selection up
    Up,
    /// Move selection down
    Down,
    /// Choose the highlighted persona
    Select,
    /// Leave the chat for the picker
    Back,
    /// Send the input line
    Submit,
    /// Drop the transcript
    Clear,
    /// Character input
    Char(char),
    /// Backspace
    Backspace,
}

/// Map a key event to an action for the current screen
pub fn map_key_event(key: KeyEvent, screen: Screen) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match screen {
        Screen::Picker => match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => KeyAction::Quit,
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Select,
            _ => KeyAction::None,
        },
        // The chat screen is always in edit mode
        Screen::Chat => match key.code {
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyAction::Clear
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyAction::Char(c)
            }
            _ => KeyAction::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_picker_navigation() {
        assert_eq!(map_key_event(key(KeyCode::Up), Screen::Picker), KeyAction::Up);
        assert_eq!(map_key_event(key(KeyCode::Char('j')), Screen::Picker), KeyAction::Down);
        assert_eq!(map_key_event(key(KeyCode::Enter), Screen::Picker), KeyAction::Select);
        assert_eq!(map_key_event(key(KeyCode::Char('q')), Screen::Picker), KeyAction::Quit);
    }

    #[test]
    fn test_chat_keys_are_text() {
        // Letters that navigate the picker are plain input in the chat
        assert_eq!(map_key_event(key(KeyCode::Char('q')), Screen::Chat), KeyAction::Char('q'));
        assert_eq!(map_key_event(key(KeyCode::Char('j')), Screen::Chat), KeyAction::Char('j'));
        assert_eq!(map_key_event(key(KeyCode::Enter), Screen::Chat), KeyAction::Submit);
        assert_eq!(map_key_event(key(KeyCode::Esc), Screen::Chat), KeyAction::Back);
        assert_eq!(map_key_event(key(KeyCode::Backspace), Screen::Chat), KeyAction::Backspace);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key_event(ctrl('l'), Screen::Chat), KeyAction::Clear);
        assert_eq!(map_key_event(ctrl('c'), Screen::Chat), KeyAction::Quit);
        assert_eq!(map_key_event(ctrl('c'), Screen::Picker), KeyAction::Quit);
        assert_eq!(map_key_event(ctrl('x'), Screen::Chat), KeyAction::None);
    }

    #[test]
    fn test_shifted_characters_are_input() {
        let upper = KeyEvent::new(KeyCode::Char('E'), KeyModifiers::SHIFT);
        assert_eq!(map_key_event(upper, Screen::Chat), KeyAction::Char('E'));
    }
}
