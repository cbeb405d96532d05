//! `TermTodo` server library.
//!
//! Exposes the todo HTTP service for use in tests and embedding. The
//! server keeps tasks in memory, scoped per owner, and speaks the JSON
//! API the client's HTTP store expects.

pub mod config;
pub mod routes;
pub mod store;
