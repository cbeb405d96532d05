//! Application state and event handling.
//!
//! The TUI translates key events into discrete [`UiCommand`]s consumed
//! by the main loop, which forwards them to the list controller and the
//! session store. Pure view state (selection, filter/sort modes, form
//! buffers) lives here and never touches the network.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termtodo_model::{FilterMode, SortMode, Task};

/// Which form input currently receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// The title line.
    Title,
    /// The description line.
    Description,
}

/// State of the add/edit modal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Id of the task being edited, or `None` for the add form.
    pub editing: Option<i64>,
    /// Title input buffer.
    pub title: String,
    /// Description input buffer.
    pub description: String,
    /// Focused input.
    pub focus: FormField,
}

impl FormState {
    fn add() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            focus: FormField::Title,
        }
    }

    fn edit(task: &Task) -> Option<Self> {
        Some(Self {
            editing: Some(task.id?),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            focus: FormField::Title,
        })
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }
}

/// Which screen the app is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Login prompt; no session owner yet.
    Login,
    /// The task list.
    Browse,
    /// Add/edit modal on top of the list.
    Form(FormState),
}

/// Discrete user actions that need the controller or session store.
///
/// Everything else (selection movement, filter/sort cycling, form
/// editing) is handled inside [`App::handle_key`] without a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Reload the task list from the store (also the error-state retry).
    Reload,
    /// Flip completion of the task with this id.
    Toggle(i64),
    /// Delete the task with this id.
    Delete(i64),
    /// Submit the add/edit form.
    Submit {
        /// Target task id for edits; `None` creates a new task.
        editing: Option<i64>,
        /// Raw title input (validated by the controller).
        title: String,
        /// Raw description input; empty means no description.
        description: String,
    },
    /// Dismiss the transient error notice.
    DismissNotice,
    /// Start a session for this owner.
    Login(String),
    /// End the session: clear persisted identity and local list.
    Logout,
}

/// Main application state.
pub struct App {
    /// Current screen.
    pub mode: Mode,
    /// Selected row in the derived view.
    pub selected: usize,
    /// Active filter mode.
    pub filter: FilterMode,
    /// Active sort mode.
    pub sort: SortMode,
    /// Login prompt input buffer.
    pub login_input: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app, starting at the login prompt unless an owner is
    /// already known.
    #[must_use]
    pub fn new(owner: Option<&str>) -> Self {
        Self {
            mode: if owner.is_some() {
                Mode::Browse
            } else {
                Mode::Login
            },
            selected: 0,
            filter: FilterMode::default(),
            sort: SortMode::default(),
            login_input: String::new(),
            should_quit: false,
        }
    }

    /// Handles a key event against the current derived view.
    ///
    /// Mutates pure view state directly and returns a [`UiCommand`] when
    /// the action needs the controller or the session store.
    pub fn handle_key(&mut self, key: KeyEvent, view: &[Task]) -> Option<UiCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        match self.mode {
            Mode::Login => self.handle_login_key(key),
            Mode::Browse => self.handle_browse_key(key, view),
            Mode::Form(_) => self.handle_form_key(key),
        }
    }

    /// Clamps the selection to the current view length. Called by the
    /// main loop after the view shrinks (deletes, filter changes).
    pub const fn clamp_selection(&mut self, view_len: usize) {
        if view_len == 0 {
            self.selected = 0;
        } else if self.selected >= view_len {
            self.selected = view_len - 1;
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        match key.code {
            KeyCode::Char(c) => {
                self.login_input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.login_input.pop();
                None
            }
            KeyCode::Enter => {
                let owner = self.login_input.trim().to_string();
                if owner.is_empty() {
                    return None;
                }
                self.login_input.clear();
                self.mode = Mode::Browse;
                Some(UiCommand::Login(owner))
            }
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            _ => None,
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent, view: &[Task]) -> Option<UiCommand> {
        let selected_id = view.get(self.selected).and_then(|t| t.id);
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => Some(UiCommand::Reload),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < view.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => selected_id.map(UiCommand::Toggle),
            KeyCode::Char('d') => selected_id.map(UiCommand::Delete),
            KeyCode::Char('a') => {
                self.mode = Mode::Form(FormState::add());
                None
            }
            KeyCode::Char('e') => {
                if let Some(form) = view.get(self.selected).and_then(FormState::edit) {
                    self.mode = Mode::Form(form);
                }
                None
            }
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.selected = 0;
                None
            }
            KeyCode::Char('s') => {
                self.sort = self.sort.next();
                None
            }
            KeyCode::Char('l') => {
                self.mode = Mode::Login;
                Some(UiCommand::Logout)
            }
            KeyCode::Esc => Some(UiCommand::DismissNotice),
            _ => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<UiCommand> {
        let Mode::Form(form) = &mut self.mode else {
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            KeyCode::Tab => {
                form.focus = match form.focus {
                    FormField::Title => FormField::Description,
                    FormField::Description => FormField::Title,
                };
                None
            }
            KeyCode::Char(c) => {
                form.focused_buffer().push(c);
                None
            }
            KeyCode::Backspace => {
                form.focused_buffer().pop();
                None
            }
            KeyCode::Enter => {
                let cmd = UiCommand::Submit {
                    editing: form.editing,
                    title: form.title.clone(),
                    description: form.description.clone(),
                };
                self.mode = Mode::Browse;
                Some(cmd)
            }
            _ => None,
        }
    }
}
