//! `TermTodo` — terminal todo client.
//!
//! Launches the TUI and talks to a remote todo service over HTTP.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/termtodo/config.toml`).
//!
//! ```bash
//! # Offline demo mode (in-memory store, nothing persisted)
//! cargo run --bin termtodo
//!
//! # Against a running server
//! cargo run --bin termtodo -- --api-url http://127.0.0.1:8080/api --user alice
//!
//! # Or via environment variables
//! TERMTODO_API_URL=http://127.0.0.1:8080/api TERMTODO_USER=alice cargo run
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use termtodo_model::TaskPatch;
use tracing_appender::non_blocking::WorkerGuard;

use termtodo::app::{App, Mode, UiCommand};
use termtodo::config::{CliArgs, ClientConfig};
use termtodo::list::{ListController, Phase};
use termtodo::session::SessionStore;
use termtodo::store::{HttpTaskStore, InMemoryTaskStore, TaskStore};
use termtodo::ui::{self, ListSnapshot};

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("termtodo starting");

    let session = match SessionStore::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(io::Error::other(e.to_string()));
        }
    };

    // Build the store before touching the terminal so construction errors
    // print normally.
    let http_store = match &config.api_url {
        Some(url) => match HttpTaskStore::new(url.as_str(), config.request_timeout) {
            Ok(store) => Some(store),
            Err(e) => {
                eprintln!("Error: could not set up HTTP client: {e}");
                return Err(io::Error::other(e.to_string()));
            }
        },
        None => None,
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = match http_store {
        Some(store) => run_app(&mut terminal, store, &session, &config).await,
        None => {
            tracing::info!("no api url configured, running offline demo mode");
            run_app(&mut terminal, InMemoryTaskStore::new(), &session, &config).await
        }
    };

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("termtodo exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtodo.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop, generic over the backing task store.
async fn run_app<S: TaskStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: S,
    session: &SessionStore,
    config: &ClientConfig,
) -> io::Result<()> {
    // A persisted session wins over --user; either skips the login prompt.
    let initial_owner = match session.load() {
        Ok(owner) => owner,
        Err(e) => {
            tracing::warn!(error = %e, "could not read persisted session");
            None
        }
    }
    .or_else(|| config.user.clone());

    let mut app = App::new(initial_owner.as_deref());
    let mut controller = ListController::new(store, initial_owner.clone().unwrap_or_default());
    if let Some(owner) = initial_owner {
        if let Err(e) = session.save(&owner) {
            tracing::warn!(error = %e, "could not persist session");
        }
    }

    loop {
        // Step 0: A logged-in session with no load yet (startup, or the
        // frame after a login) fetches now. The loading row is painted
        // first, since the fetch blocks this task until the response
        // lands.
        if !matches!(app.mode, Mode::Login) && matches!(controller.phase(), Phase::Uninitialized) {
            draw_loading(terminal, &app, &controller)?;
            controller.load().await;
        }

        // Step 1: Derive the view the frame and key handling both see.
        let view = controller.derive_view(app.filter, app.sort);
        app.clamp_selection(view.len());

        // Step 2: Draw the UI frame.
        let logged_in = !matches!(app.mode, Mode::Login);
        terminal.draw(|frame| {
            if logged_in {
                let snapshot = ListSnapshot {
                    view: &view,
                    phase: controller.phase(),
                    notice: controller.notice(),
                    completed: controller.completed_count(),
                    total: controller.total_count(),
                    owner: controller.owner(),
                };
                ui::draw(frame, &app, Some(&snapshot));
            } else {
                ui::draw(frame, &app, None);
            }
        })?;

        if app.should_quit {
            return Ok(());
        }

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(cmd) = app.handle_key(key, &view) {
                // Reloads paint the loading row before awaiting the fetch.
                if cmd == UiCommand::Reload {
                    draw_loading(terminal, &app, &controller)?;
                }
                controller = dispatch(cmd, controller, session).await;
            }
        }
    }
}

/// Paint one frame showing the loading row, used right before an
/// awaited fetch so the user sees the request in flight.
fn draw_loading<S: TaskStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &App,
    controller: &ListController<S>,
) -> io::Result<()> {
    let loading = Phase::Loading;
    let snapshot = ListSnapshot {
        view: &[],
        phase: &loading,
        notice: controller.notice(),
        completed: controller.completed_count(),
        total: controller.total_count(),
        owner: controller.owner(),
    };
    terminal.draw(|frame| ui::draw(frame, app, Some(&snapshot)))?;
    Ok(())
}

/// Apply one [`UiCommand`] to the controller and session store.
///
/// Takes and returns the controller by value because a login swaps it
/// out for a fresh one built around the same store.
async fn dispatch<S: TaskStore>(
    cmd: UiCommand,
    mut controller: ListController<S>,
    session: &SessionStore,
) -> ListController<S> {
    match cmd {
        UiCommand::Reload => controller.load().await,
        UiCommand::Toggle(id) => controller.toggle_completion(id).await,
        UiCommand::Delete(id) => controller.delete(id).await,
        UiCommand::Submit {
            editing,
            title,
            description,
        } => {
            let description = Some(description.trim().to_string()).filter(|d| !d.is_empty());
            match editing {
                None => controller.create(&title, description).await,
                Some(id) => {
                    let patch = TaskPatch {
                        title: Some(title),
                        description,
                    };
                    controller.update(id, patch).await;
                }
            }
        }
        UiCommand::DismissNotice => controller.dismiss_notice(),
        UiCommand::Login(owner) => {
            if let Err(e) = session.save(&owner) {
                tracing::warn!(error = %e, "could not persist session");
            }
            // The fresh controller starts uninitialized; the main loop
            // notices and performs the initial load.
            controller = ListController::new(controller.into_store(), owner);
        }
        UiCommand::Logout => {
            if let Err(e) = session.clear() {
                tracing::warn!(error = %e, "could not clear persisted session");
            }
            controller.clear();
        }
    }
    controller
}
