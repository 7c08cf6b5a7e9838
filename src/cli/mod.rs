//! Command-line interface
//!
//! This module contains the CLI commands and argument parsing
//! for inspecting and exporting the network configuration.

pub mod commands;

pub use commands::{Command, Opt};
