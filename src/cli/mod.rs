//! Command-line interface module.

mod args;
pub mod common;
pub mod contact;
pub mod manifest;
pub mod resolve;
pub mod validate;

pub use args::{Cli, Commands, ResolveArgs};
