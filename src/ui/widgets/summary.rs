// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use crate::core::models::ScoreBand;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

fn band_style(band: ScoreBand) -> Style {
    match band {
        ScoreBand::Good => Style::default().fg(Color::Green),
        ScoreBand::Fair => Style::default().fg(Color::Yellow),
        ScoreBand::Poor => Style::default().fg(Color::Red),
    }
}

/// Renders the score overview next to the report. Empty until an analysis is shown.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score & band
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(4), // Checks
            Constraint::Length(1),
            Constraint::Min(0), // Issues
        ])
        .split(area);

    if app.state != AppState::Finished {
        return;
    }
    let (Some(analysis), Some(band)) = (&app.current, app.summary.band) else {
        return;
    };

    let score_text = Text::from(vec![
        Line::from("Safety Score".bold()),
        Line::from(format!("{}/100 ({})", app.summary.score, band)).style(band_style(band)),
    ]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    let score_gauge = Gauge::default()
        .percent(u16::from(app.summary.score.min(100)))
        .label("")
        .gauge_style(band_style(band));
    frame.render_widget(score_gauge, summary_chunks[1]);

    let checks = [
        ("SSL Certificate", analysis.ssl.valid),
        ("Threat Intelligence", !analysis.threats.any()),
    ];
    let mut checks_lines = vec![Line::from("CHECKS".bold())];
    for (name, passed) in checks {
        let (icon, style) = if passed {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("✗", Style::default().fg(Color::Red))
        };
        checks_lines.push(Line::from(vec![Span::styled(format!("{icon} "), style), Span::raw(name)]));
    }
    frame.render_widget(Paragraph::new(checks_lines), summary_chunks[3]);

    let issues_text = Text::from(vec![
        Line::from("ISSUES FOUND".bold()),
        Line::from(vec![
            Span::raw("Critical: "),
            Span::styled(app.summary.critical_issues.to_string(), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::raw("Warnings: "),
            Span::styled(app.summary.warning_issues.to_string(), Style::default().fg(Color::Yellow)),
        ]),
    ]);
    frame.render_widget(Paragraph::new(issues_text), summary_chunks[5]);
}
