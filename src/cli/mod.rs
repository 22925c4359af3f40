//! Command-line interface module.

mod args;
pub mod inputs;
pub mod process;

pub use args::Cli;
