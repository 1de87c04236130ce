// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState};
use crate::core::knowledge_base;
use crate::core::models::{SafetyStatus, SecurityAnalysis, Severity};
use crate::core::scanner::Stage;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
};

pub fn status_style(status: SafetyStatus) -> Style {
    match status {
        SafetyStatus::Safe => Style::default().fg(Color::Green),
        SafetyStatus::Warning => Style::default().fg(Color::Yellow),
        SafetyStatus::Dangerous => Style::default().fg(Color::Red),
        SafetyStatus::Unknown => Style::default().fg(Color::Gray),
    }
}

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Security Report (scroll with ↑ ↓)");

    match app.state {
        AppState::Scanning => {
            render_progress(frame, app, main_block, area);
            return;
        }
        AppState::Finished => {}
        _ if app.current.is_none() => {
            let placeholder = Paragraph::new("Enter a URL and press Enter to analyze it.")
                .alignment(Alignment::Center)
                .block(main_block);
            frame.render_widget(placeholder, area);
            return;
        }
        _ => {}
    }

    let Some(analysis) = &app.current else { return };
    let lines = build_report_lines(analysis, app);
    let line_count = lines.len();

    let inner_area = main_block.inner(area);
    let report = Paragraph::new(lines)
        .block(main_block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset as u16, 0));
    frame.render_widget(report, area);

    app.report_scroll_state = app.report_scroll_state.content_length(line_count);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        inner_area,
        &mut app.report_scroll_state,
    );
}

fn render_progress(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let (ratio, label) = match app.progress {
        Some(progress) => (
            progress.ratio(),
            progress.next_stage().map(|s| s.to_string()).unwrap_or_else(|| "Finishing".to_string()),
        ),
        None => (0.0, Stage::ValidateUrl.to_string()),
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Analyzing URL security: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{label}...")),
        ])),
        chunks[0],
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(ratio.clamp(0.0, 1.0)),
        chunks[1],
    );
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Critical => Style::default().fg(Color::Red).bold(),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Info => Style::default().fg(Color::Cyan),
    }
}

fn flag(name: &str, raised: bool) -> Line<'static> {
    let (icon, style) = if raised {
        ("✗", Style::default().fg(Color::Red))
    } else {
        ("✓", Style::default().fg(Color::Green))
    };
    Line::from(vec![Span::styled(format!("  {icon} "), style), Span::raw(name.to_string())])
}

fn build_report_lines<'a>(analysis: &'a SecurityAnalysis, app: &App) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(vec![Span::raw("URL: ").bold(), Span::raw(analysis.url.as_str())]),
        Line::from(vec![
            Span::raw("Status: ").bold(),
            Span::styled(knowledge_base::status_label(analysis.status), status_style(analysis.status)),
            Span::raw(format!("   Score: {}/100", analysis.safety_score)),
        ]),
        Line::from(format!("Analyzed: {}", analysis.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))),
        Line::from(""),
        Line::from("ANALYSIS".yellow().bold()),
        Line::from(analysis.ai_analysis.as_str()),
        Line::from(""),
        Line::from("SSL CERTIFICATE".yellow().bold()),
        flag(if analysis.ssl.valid { "Valid" } else { "Invalid" }, !analysis.ssl.valid),
        Line::from(format!("  Issuer: {}", analysis.ssl.issuer)),
        Line::from(format!(
            "  Expires: {}",
            analysis.ssl.expires.map(|e| e.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "unknown".to_string())
        )),
        Line::from(""),
        Line::from("THREATS".yellow().bold()),
        flag("Phishing", analysis.threats.phishing),
        flag("Malware", analysis.threats.malware),
        flag("Suspicious activity", analysis.threats.suspicious),
        Line::from(""),
        Line::from("FINDINGS".yellow().bold()),
    ];

    if app.findings.is_empty() {
        lines.push(Line::from(Span::styled("  ✓ No issues found.", Style::default().fg(Color::Green))));
    }
    for finding in &app.findings {
        let Some(detail) = knowledge_base::get_finding_detail(&finding.code) else { continue };
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", detail.category), Style::default().fg(Color::DarkGray)),
            Span::styled(detail.title, severity_style(detail.severity)),
        ]));
        lines.push(Line::from(format!("    {}", detail.description)));
        lines.push(Line::from(Span::styled(format!("    Fix: {}", detail.remediation), Style::default().fg(Color::Gray))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("RECOMMENDATIONS".yellow().bold()));
    for recommendation in &analysis.recommendations {
        lines.push(Line::from(format!("  • {recommendation}")));
    }
    lines
}
