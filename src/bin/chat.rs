//! # Financial Multiverse Chat
//!
//! Terminal chat with the persona-aware investment advisor.
//!
//! Usage: `cargo run --features tui --bin chat`

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenvy::dotenv;
use log::{error, info, warn};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

use multiverse::core::Config;
use multiverse::features::personas::PersonaType;
use multiverse::tui::event::{map_key_event, KeyAction};
use multiverse::tui::{ApiClient, App, Event, EventHandler};

/// TUI refresh rate, also drives the typing indicator
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Logs would tear the alternate screen, so stay quiet unless asked
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    info!("Starting Financial Multiverse chat...");

    let api = config.api_url.as_deref().map(ApiClient::new);

    let (reply_tx, reply_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config.user_id, config.reply_delay, reply_tx);

    match &api {
        Some(client) => restore_last_persona(&mut app, client, config.user_id).await,
        None => {
            app.status_message = Some("Offline: persona choices are not saved".to_string());
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut events, event_tx) = EventHandler::new(TICK_RATE);
    EventHandler::forward_replies(reply_rx, event_tx.clone());

    let result = run_app(&mut terminal, &mut app, &mut events, &event_tx, api.as_ref()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {e}");
        return Err(e);
    }

    info!("Chat shutdown complete");
    Ok(())
}

/// Preselect the persona this user picked most recently
async fn restore_last_persona(app: &mut App, api: &ApiClient, user_id: i64) {
    match api.personas(user_id).await {
        Ok(history) => {
            if let Some(persona) = history
                .last()
                .and_then(|record| PersonaType::parse(&record.persona_type))
            {
                app.highlight(persona);
                app.status_message = Some(format!("Welcome back, {} investor", persona.title()));
            }
        }
        Err(e) => {
            warn!("Could not load persona history: {e:#}");
            app.error_message = Some(format!("Server unavailable at {}", api.base_url()));
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    event_tx: &mpsc::UnboundedSender<Event>,
    api: Option<&ApiClient>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            multiverse::tui::ui::render(frame, app);
        })?;

        match events.next().await {
            Some(Event::Key(key)) => {
                let action = map_key_event(key, app.current_screen);
                handle_action(app, action, event_tx, api);
            }
            Some(Event::Reply(reply)) => app.handle_reply(reply),
            Some(Event::Saved(result)) => app.handle_saved(result),
            Some(Event::Tick) => app.on_tick(),
            Some(Event::Resize(_, _)) => {
                // Terminal will redraw automatically
            }
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(
    app: &mut App,
    action: KeyAction,
    event_tx: &mpsc::UnboundedSender<Event>,
    api: Option<&ApiClient>,
) {
    match action {
        KeyAction::Quit => app.quit(),
        KeyAction::Up => app.select_previous(),
        KeyAction::Down => app.select_next(),
        KeyAction::Select => match api {
            Some(client) => {
                let Some(selection) = app.begin_save() else {
                    return;
                };
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let result = client
                        .save_persona(&selection)
                        .await
                        .map_err(|e| format!("{e:#}"));
                    let _ = tx.send(Event::Saved(result));
                });
            }
            None => app.choose_persona(),
        },
        KeyAction::Back => app.back_to_picker(),
        KeyAction::Submit => {
            app.submit();
        }
        KeyAction::Clear => app.clear_chat(),
        KeyAction::Char(c) => app.push_char(c),
        KeyAction::Backspace => app.backspace(),
        KeyAction::None => {}
    }
}
