//! # TUI UI Components
//!
//! Ratatui rendering for the picker and chat screens.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::features::conversation::{ChatMessage, Sender};
use crate::features::personas::{choice_label, display_name, PersonaType};
use crate::tui::{App, Screen};

/// Main render function - dispatches to screen-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Picker => render_picker(frame, app, chunks[1]),
        Screen::Chat => render_chat(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let heading = match (&app.current_screen, &app.conversation) {
        (Screen::Chat, Some(conversation)) => {
            format!("{} AI Assistant", display_name(conversation.persona()))
        }
        _ => app.current_screen.title().to_string(),
    };

    let title = Paragraph::new(Line::from(heading).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .block(titled_block("Financial Multiverse"));

    frame.render_widget(title, area);
}

fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let items: Vec<ListItem> = PersonaType::ALL
        .iter()
        .map(|persona| ListItem::new(choice_label(*persona)))
        .collect();

    let list = List::new(items)
        .block(titled_block("Personas"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, columns[0], &mut state);

    let persona = app.selected_persona();
    let tags: Vec<Span> = persona
        .tags()
        .iter()
        .flat_map(|tag| {
            [
                Span::styled(format!("[{tag}]"), Style::default().fg(Color::Cyan)),
                Span::raw(" "),
            ]
        })
        .collect();

    let details = Paragraph::new(vec![
        Line::from(Span::styled(
            persona.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(persona.description()),
        Line::raw(""),
        Line::from(tags),
    ])
    .wrap(Wrap { trim: true })
    .block(titled_block("Profile"));

    frame.render_widget(details, columns[1]);
}

fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let Some(conversation) = app.conversation.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for message in conversation.messages() {
        lines.extend(message_lines(message));
        lines.push(Line::raw(""));
    }
    if let Some(indicator) = app.typing_indicator() {
        lines.push(Line::from(Span::styled(
            indicator,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest messages in view
    let inner_width = chunks[0].width.saturating_sub(2);
    let inner_height = chunks[0].height.saturating_sub(2);
    let total: usize = lines
        .iter()
        .map(|line| wrapped_height(line, inner_width))
        .sum();
    let scroll = total.saturating_sub(usize::from(inner_height));

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        .block(titled_block("Conversation"));
    frame.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(app.input_buffer.as_str())
        .block(titled_block("Ask about stocks, crypto, ETFs, risk or strategy"));
    frame.render_widget(input, chunks[1]);

    let typed = u16::try_from(app.input_buffer.chars().count()).unwrap_or(u16::MAX);
    let cursor_x = (chunks[1].x + 1)
        .saturating_add(typed)
        .min(chunks[1].right().saturating_sub(2));
    frame.set_cursor_position((cursor_x, chunks[1].y + 1));
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let (label, color) = match message.sender {
        Sender::User => ("You", Color::Green),
        Sender::Bot => ("Advisor", Color::Magenta),
    };

    let header = Line::from(vec![
        Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", message.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let mut lines = vec![header];
    lines.extend(
        message
            .content
            .lines()
            .map(|line| Line::raw(line.to_string())),
    );
    lines
}

/// Rows a line takes once wrapped to `width` columns
fn wrapped_height(line: &Line, width: u16) -> usize {
    let width = usize::from(width.max(1));
    line.width().max(1).div_ceil(width)
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let message = if let Some(err) = &app.error_message {
        Span::styled(format!(" Error: {err} "), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {status} "), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let help_hint = Span::styled(
        app.current_screen.hints(),
        Style::default().fg(Color::Gray),
    );

    let paragraph = Paragraph::new(Line::from(vec![message, Span::raw(" | "), help_hint]))
        .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height(&Line::raw(""), 10), 1);
        assert_eq!(wrapped_height(&Line::raw("abcde"), 10), 1);
        assert_eq!(wrapped_height(&Line::raw("a".repeat(25)), 10), 3);
        assert_eq!(wrapped_height(&Line::raw("abc"), 0), 3);
    }
}
