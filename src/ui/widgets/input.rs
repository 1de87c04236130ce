// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::app::{App, AppState};

/// Renders the URL input box. The title shows who is signed in.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.store.active_account() {
        Some(account) => format!("URL to analyze · signed in as {}", account.display_name),
        None => "URL to analyze · not signed in".to_string(),
    };
    let input_block = Block::default().borders(Borders::ALL).title(title);
    let input_paragraph = Paragraph::new(app.input.as_str())
        .block(input_block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    // Show the cursor only while the user can type a URL.
    if let AppState::Idle = app.state {
        frame.set_cursor_position((area.x + app.input.chars().count() as u16 + 1, area.y + 1));
    }
}
