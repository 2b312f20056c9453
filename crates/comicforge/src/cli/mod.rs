//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the
//! comicforge binary.

mod commands;
mod generate;
mod templates;
mod users;

pub use commands::{Cli, Commands, UsersAction, UsersCommand};
pub use generate::{run_generate, run_generate_one};
pub use templates::list_templates;
pub use users::handle_users_command;
