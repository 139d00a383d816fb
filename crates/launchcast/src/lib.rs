//! Terminal front end for the launch forecast
//!
//! Wraps `launchcast_core` with an interactive ratatui view, a headless
//! report, data-directory storage and optional remote run logging.

pub mod app;
pub mod cli;
pub mod components;
pub mod data;
pub mod logging;
pub mod remote;
pub mod report;
pub mod state;
pub mod util;

pub use app::App;
pub use logging::init_logging;
