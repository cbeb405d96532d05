//! Persisted session identity.
//!
//! The session owner is a plain string chosen at the login prompt. It is
//! kept in a small file under the platform data directory so it survives
//! restarts; logging out removes the file. The owner is handed to the
//! [`ListController`](crate::list::ListController) explicitly at
//! construction rather than read ambiently.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Could not determine the platform data directory.
    #[error("could not determine data directory (no HOME or XDG_DATA_HOME)")]
    NoDataDir,

    /// Failed to read or write the session file.
    #[error("session file I/O failed at {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// File-backed store for the current session owner.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store at the default location
    /// (`<data dir>/termtodo/session`).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoDataDir`] if the platform data
    /// directory cannot be determined.
    pub fn new() -> Result<Self, SessionError> {
        let data_dir = dirs::data_dir().ok_or(SessionError::NoDataDir)?;
        Ok(Self {
            path: data_dir.join("termtodo").join("session"),
        })
    }

    /// Creates a store at an explicit path. Used by tests.
    #[must_use]
    pub const fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted owner, if a session exists.
    ///
    /// A missing file or an empty/whitespace-only file means no session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] on any I/O failure other than the
    /// file not existing.
    pub fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let owner = contents.trim();
                if owner.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(owner.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_err(e)),
        }
    }

    /// Persists `owner` as the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the directory or file cannot be
    /// written.
    pub fn save(&self, owner: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        std::fs::write(&self.path, owner).map_err(|e| self.io_err(e))
    }

    /// Removes the persisted session. Clearing an absent session is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] on any other I/O failure.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn io_err(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
