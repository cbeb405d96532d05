//! Add/edit form modal rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{FormField, FormState};

/// Render the add/edit modal.
pub fn render(frame: &mut Frame, area: Rect, form: &FormState) {
    let title = if form.editing.is_some() {
        " Edit task "
    } else {
        " New task "
    };
    let block = Block::default()
        .title(Span::styled(title, theme::bold()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let lines = vec![
        input_line("Title", &form.title, form.focus == FormField::Title),
        Line::default(),
        input_line(
            "Description",
            &form.description,
            form.focus == FormField::Description,
        ),
        Line::default(),
        Line::from(Span::styled(
            "Enter to save · Tab to switch field · Esc to cancel",
            theme::dimmed(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value, theme::normal()),
    ];
    if focused {
        spans.push(Span::styled("█", theme::highlighted()));
    }
    Line::from(spans)
}
