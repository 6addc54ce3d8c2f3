//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the command registry, the location command handlers and the
//! `App` front end that parses arguments and dispatches through the registry.

mod app;
mod commands;
mod registry;

pub use app::App;
