// src/ui/widgets/history_view.rs

use crate::app::App;
use crate::ui::widgets::analysis_view::status_style;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

/// Renders the signed-in account's scan history with the active search,
/// status filter and sort order.
pub fn render_history_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let query = &app.history_query;
    let controls = Line::from(vec![
        Span::raw("Search: ").bold(),
        Span::styled(format!("{}_", query.search), Style::default().fg(Color::Yellow)),
        Span::raw("   Filter: ").bold(),
        Span::raw(query.status.to_string()),
        Span::raw("   Sort: ").bold(),
        Span::raw(query.sort.to_string()),
    ]);
    frame.render_widget(
        Paragraph::new(controls).block(Block::default().borders(Borders::ALL).title("Scan History")),
        chunks[0],
    );

    let total = app.store.active_account().map_or(0, |account| account.scan_history.len());
    let rows: Vec<Row<'static>> = app
        .history_view()
        .into_iter()
        .map(|scan| {
            Row::new(vec![
                Cell::from(scan.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(scan.url.clone()),
                Cell::from(scan.status.to_string()).style(status_style(scan.status)),
                Cell::from(scan.safety_score.to_string()),
            ])
        })
        .collect();
    let shown = rows.len();

    let header = Row::new(vec!["Date", "URL", "Status", "Score"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let table = Table::new(
        rows,
        [Constraint::Length(17), Constraint::Min(20), Constraint::Length(10), Constraint::Length(6)],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(format!("{shown} of {total} scans")))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, chunks[1], &mut app.history_state);
}
