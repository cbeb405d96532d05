//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use termtodo_model::Task;

use super::{ListSnapshot, theme};
use crate::app::App;
use crate::list::Phase;

/// Render the task list panel with filter/sort controls in the title.
pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &ListSnapshot) {
    let title = format!(
        " Tasks — {} · filter: {} · sort: {} ",
        snapshot.owner,
        app.filter.label(),
        app.sort.label(),
    );
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::LIST_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    match snapshot.phase {
        Phase::Loading => {
            let item = ListItem::new(Line::from(Span::styled(
                "Loading tasks…",
                theme::dimmed(),
            )));
            frame.render_widget(List::new(vec![item]).block(block), area);
        }
        Phase::Error(message) => {
            let items = vec![
                ListItem::new(Line::from(Span::styled(message.as_str(), theme::error()))),
                ListItem::new(Line::from(Span::styled(
                    "Press r to retry",
                    theme::dimmed(),
                ))),
            ];
            frame.render_widget(List::new(items).block(block), area);
        }
        Phase::Uninitialized | Phase::Ready => {
            if snapshot.view.is_empty() {
                let hint = if snapshot.total == 0 {
                    "No tasks yet — press a to add one"
                } else {
                    "Nothing matches this filter — press f to cycle filters"
                };
                let item = ListItem::new(Line::from(Span::styled(hint, theme::dimmed())));
                frame.render_widget(List::new(vec![item]).block(block), area);
                return;
            }
            let items: Vec<ListItem> = snapshot
                .view
                .iter()
                .enumerate()
                .map(|(i, task)| task_row(task, i == app.selected))
                .collect();
            frame.render_widget(List::new(items).block(block), area);
        }
    }
}

fn task_row(task: &Task, is_selected: bool) -> ListItem<'static> {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };
    let style = if is_selected {
        theme::selected()
    } else if task.completed {
        theme::dimmed()
    } else {
        theme::normal()
    };

    let mut spans = vec![
        Span::styled(checkbox.to_string(), style),
        Span::raw(" "),
        Span::styled(task.title.clone(), style),
    ];
    if let Some(description) = &task.description {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("— {description}"),
            if is_selected { style } else { theme::dimmed() },
        ));
    }
    if let Some(created_at) = task.created_at {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            created_at.format("%Y-%m-%d").to_string(),
            if is_selected { style } else { theme::dimmed() },
        ));
    }

    ListItem::new(Line::from(spans))
}
