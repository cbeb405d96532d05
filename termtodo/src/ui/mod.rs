//! Terminal UI rendering.
//!
//! All rendering is stateless: the draw functions take the app's view
//! state plus a [`ListSnapshot`] of the controller and paint the frame.
//! No module here mutates the task list.

pub mod list_panel;
pub mod status_bar;
pub mod task_form;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use termtodo_model::Task;

use crate::app::{App, Mode};
use crate::list::{Notice, Phase};

/// Read-only controller state needed for one frame.
pub struct ListSnapshot<'a> {
    /// The derived (filtered, sorted) view.
    pub view: &'a [Task],
    /// Controller lifecycle phase.
    pub phase: &'a Phase,
    /// Pending transient notice, if any.
    pub notice: Option<&'a Notice>,
    /// Completed tasks in the full local list.
    pub completed: usize,
    /// Total tasks in the full local list.
    pub total: usize,
    /// Session owner.
    pub owner: &'a str,
}

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App, snapshot: Option<&ListSnapshot>) {
    if matches!(app.mode, Mode::Login) || snapshot.is_none() {
        draw_login(frame, app);
        return;
    }
    let Some(snapshot) = snapshot else { return };

    // List area with the status bar pinned to the bottom row.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    list_panel::render(frame, chunks[0], app, snapshot);
    status_bar::render(frame, chunks[1], app, snapshot);

    if let Mode::Form(form) = &app.mode {
        let area = centered_rect(60, 9, frame.area());
        frame.render_widget(Clear, area);
        task_form::render(frame, area, form);
    }
}

/// Render the login prompt.
fn draw_login(frame: &mut Frame, app: &App) {
    let area = centered_rect(40, 5, frame.area());
    let block = Block::default()
        .title(Span::styled(" termtodo — login ", theme::bold()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let lines = vec![
        Line::from(Span::styled("Who are you?", theme::dimmed())),
        Line::from(vec![
            Span::styled("> ", theme::highlighted()),
            Span::styled(app.login_input.as_str(), theme::normal()),
            Span::styled("█", theme::highlighted()),
        ]),
        Line::from(Span::styled(
            "Enter to continue · Esc to quit",
            theme::dimmed(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
