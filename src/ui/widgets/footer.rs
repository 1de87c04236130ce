// src/ui/widgets/footer.rs

use crate::app::{App, AppState, ExportStatus};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer: a pending notice if there is one, otherwise the keys
/// available in the current state.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = &app.notice {
        let line = Line::from(Span::styled(notice.as_str(), Style::new().fg(Color::Cyan)));
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
        return;
    }

    let spans = match app.state {
        AppState::Idle => Line::from(vec![
            key("Enter"), Span::raw(" analyze, "),
            key("Tab"), Span::raw(" history, "),
            key("F2"), Span::raw(" sign in, "),
            key("F3"), Span::raw(" sign out, "),
            key("Esc"), Span::raw(" quit"),
        ]),
        AppState::Finished => {
            let export = match &app.export_status {
                ExportStatus::Idle => Span::raw("xport, "),
                ExportStatus::Success(path) => Span::styled(format!("xported to {path}, "), Style::new().fg(Color::Green)),
                ExportStatus::Error(e) => Span::styled(format!("xport failed: {e}, "), Style::new().fg(Color::Red)),
            };
            Line::from(vec![
                key("[N]"), Span::raw("ew scan, "),
                key("[E]"), export,
                key("[H]"), Span::raw("istory, "),
                key("[Q]"), Span::raw("uit"),
            ])
        }
        AppState::History => Line::from(vec![
            Span::raw("Type to search, "),
            key("←/→"), Span::raw(" status, "),
            key("Tab"), Span::raw(" sort, "),
            key("Enter"), Span::raw(" open, "),
            key("Esc"), Span::raw(" back"),
        ]),
        AppState::SignIn => Line::from(vec![
            key("Tab"), Span::raw(" next field, "),
            key("Shift+Tab"), Span::raw(" sign in/register, "),
            key("Enter"), Span::raw(" submit, "),
            key("Esc"), Span::raw(" cancel"),
        ]),
        AppState::Scanning => Line::from("Analyzing... Press Q to quit."),
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
