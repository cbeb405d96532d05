//! Status bar rendering: progress counts, notices, key hints.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{ListSnapshot, theme};
use crate::app::App;

/// Render the one-line status bar.
///
/// A pending notice takes priority over the hint line; the user
/// dismisses it with Esc.
pub fn render(frame: &mut Frame, area: Rect, _app: &App, snapshot: &ListSnapshot) {
    let line = snapshot.notice.map_or_else(
        || {
            let counts = if snapshot.total > 0 {
                format!(" {} of {} completed ", snapshot.completed, snapshot.total)
            } else {
                String::from(" ")
            };
            Line::from(vec![
                Span::styled(counts, theme::status_bar_bg()),
                Span::styled(
                    " a add · e edit · space toggle · d delete · f filter · s sort · r reload · l logout · q quit",
                    theme::status_bar_bg(),
                ),
            ])
        },
        |notice| {
            Line::from(vec![
                Span::styled(format!(" {} ", notice.message), theme::error()),
                Span::styled("(Esc to dismiss)", theme::dimmed()),
            ])
        },
    );
    frame.render_widget(Paragraph::new(line).style(theme::status_bar_bg()), area);
}
