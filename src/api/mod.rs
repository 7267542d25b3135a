//! Presentation surfaces over the inference service.
//!
//! `http` exposes the pages as a REST API, `shell` drives a page dispatcher
//! from a line-oriented terminal session.

pub mod http;
pub mod shell;

pub use http::{create_router, run_server, AppState};
pub use shell::Shell;
