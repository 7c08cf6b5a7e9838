//! Configuration management
//!
//! This module assembles the network connection settings handed to the
//! contract toolchain: the compiler version plus one Sepolia network entry
//! built from `PRIVATE_KEY` and `API_URL`.
//!
//! The environment is read once. A missing variable does not fail the default
//! load; it embeds `undefined` and logs a warning. Use the strict loader or
//! `validate()` to catch that early.

pub mod env;
pub mod export;
pub mod settings;
pub mod validation;

pub use env::EnvSnapshot;
pub use export::ExportFormat;
pub use settings::{Account, ConnectionConfig, NetworkDescriptor};
pub use validation::{ConfigIssue, PRIVATE_KEY_HEX_LEN};

use once_cell::sync::Lazy;

/// Built on first access from `.env` and the process environment
pub static GLOBAL_CONFIG: Lazy<ConnectionConfig> = Lazy::new(ConnectionConfig::from_env);

pub const PRIVATE_KEY_KEY: &str = "PRIVATE_KEY";
pub const API_URL_KEY: &str = "API_URL";

pub const COMPILER_VERSION: &str = "0.8.27";
pub const NETWORK_NAME: &str = "sepolia";
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const ACCOUNT_PREFIX: &str = "0x";

/// Text embedded in place of an unset variable
pub const UNSET_PLACEHOLDER: &str = "undefined";
