// src/ui/widgets/auth_popup.rs

use crate::app::{App, AuthField, AuthMode};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![Span::raw(marker), Span::raw(label).bold(), Span::styled(value, style)])
}

/// Draws the sign-in / register form over the rest of the UI.
pub fn render_auth_popup(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.auth;
    let title = match form.mode {
        AuthMode::SignIn => "Sign In",
        AuthMode::Register => "Create Account",
    };

    let mut lines = vec![
        field_line("Email:    ", form.email.clone(), form.focus == AuthField::Email),
        field_line("Password: ", "*".repeat(form.password.chars().count()), form.focus == AuthField::Password),
    ];
    if form.mode == AuthMode::Register {
        lines.push(field_line("Name:     ", form.name.clone(), form.focus == AuthField::Name));
    }
    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        "Enter".bold().yellow(),
        Span::raw(" submit  "),
        "Tab".bold().yellow(),
        Span::raw(" next field  "),
        "Shift+Tab".bold().yellow(),
        Span::raw(" switch mode  "),
        "Esc".bold().yellow(),
        Span::raw(" cancel"),
    ]));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let popup_area = centered_rect(60, 40, area);
    let popup = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// A rectangle of the given percentages centered in `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
