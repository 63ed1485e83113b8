//! Non-interactive command-line front end over a stored registry.

pub mod commands;
pub mod output;
pub mod table;

pub use commands::run;
