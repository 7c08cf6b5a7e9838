//! # Sepolia Config
//!
//! Builds the settings a contract toolchain needs to reach the Sepolia test
//! network: the Solidity compiler version, the RPC endpoint from `API_URL`,
//! and the deployer account from `PRIVATE_KEY`.
//!
//! ## Layout
//! - `config/`: environment snapshot, loader, validation and export
//! - `error/`: error type shared by the crate
//! - `cli/`: command-line surface used by the binary
//!
//! ## Loading
//! `GLOBAL_CONFIG` is assembled once on first access and never changes.
//! The default loader keeps going when a variable is missing and embeds
//! `undefined` instead; `ConnectionConfig::from_snapshot_strict` and
//! `ConnectionConfig::validate` are there for callers that want to stop early.

pub mod cli;
pub mod config;
pub mod error;

pub use cli::{Command, Opt};
pub use config::{
    Account, ConfigIssue, ConnectionConfig, EnvSnapshot, ExportFormat, NetworkDescriptor,
    GLOBAL_CONFIG,
};
pub use error::{ConfigError, Result};
