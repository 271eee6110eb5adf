//! Command line front end

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Command};
pub use output::{map_user_error, UserError};
