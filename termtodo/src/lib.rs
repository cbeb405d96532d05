//! `TermTodo` — terminal todo client library.

pub mod app;
pub mod config;
pub mod list;
pub mod session;
pub mod store;
pub mod ui;
