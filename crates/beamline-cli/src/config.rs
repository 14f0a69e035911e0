//! Layered configuration for the `expand` command.
//!
//! Values are merged from four sources, highest precedence first: command-line
//! arguments, the line description, the optional `--config` settings file and
//! the built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
