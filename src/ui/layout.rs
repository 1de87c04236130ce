// src/ui/layout.rs

use ratatui::layout::{Constraint, Layout, Rect};

/// The screen areas each widget renders into.
pub struct AppLayout {
    pub input: Rect,
    /// Report and summary together; used by full-width views.
    pub content: Rect,
    pub report: Rect,
    pub summary: Rect,
    pub footer: Rect,
}

/// Input row on top, footer row at the bottom, and the report (70%) beside
/// the summary (30%) in between.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let [input, content, footer] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)]).areas(frame_size);
    let [report, summary] =
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(content);

    AppLayout { input, content, report, summary, footer }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_split_between_report_and_summary() {
        let layout = create_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.content.height, 36);
        assert_eq!(layout.report.width + layout.summary.width, 100);
        assert_eq!(layout.report.width, 70);
    }
}
