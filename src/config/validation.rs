//! Post-assembly checks.
//!
//! Loading never rejects a value on its own; these checks surface the problems
//! a toolchain would otherwise only hit at connection time.

use super::settings::{ConnectionConfig, NetworkDescriptor};
use super::UNSET_PLACEHOLDER;
use crate::error::{ConfigError, Result};
use std::fmt;
use url::Url;

/// Private keys are 32 bytes, hex encoded
pub const PRIVATE_KEY_HEX_LEN: usize = 64;

const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    PlaceholderUrl {
        network: String,
    },
    InvalidUrl {
        network: String,
        reason: String,
    },
    UnsupportedScheme {
        network: String,
        scheme: String,
    },
    PlaceholderAccount {
        network: String,
        index: usize,
    },
    MalformedAccount {
        network: String,
        index: usize,
        reason: String,
    },
    NetworkCount(usize),
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::PlaceholderUrl { network } => {
                write!(
                    f,
                    "{network}: url is the placeholder text '{UNSET_PLACEHOLDER}' (check API_URL)"
                )
            }
            ConfigIssue::InvalidUrl { network, reason } => {
                write!(f, "{network}: url is not valid: {reason}")
            }
            ConfigIssue::UnsupportedScheme { network, scheme } => {
                write!(f, "{network}: unsupported url scheme '{scheme}'")
            }
            ConfigIssue::PlaceholderAccount { network, index } => write!(
                f,
                "{network}: account {index} is the placeholder text '{UNSET_PLACEHOLDER}' (check PRIVATE_KEY)"
            ),
            ConfigIssue::MalformedAccount {
                network,
                index,
                reason,
            } => write!(f, "{network}: account {index} is malformed: {reason}"),
            ConfigIssue::NetworkCount(count) => {
                write!(f, "expected exactly one network, found {count}")
            }
        }
    }
}

impl ConnectionConfig {
    /// Collect every problem with the assembled config
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.networks().len() != 1 {
            issues.push(ConfigIssue::NetworkCount(self.networks().len()));
        }

        for (name, network) in self.networks() {
            validate_url(name, network, &mut issues);
            validate_accounts(name, network, &mut issues);
        }

        issues
    }

    /// Fail with every issue found, or pass the config through
    pub fn ensure_valid(&self) -> Result<()> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }
}

fn validate_url(name: &str, network: &NetworkDescriptor, issues: &mut Vec<ConfigIssue>) {
    if network.url() == UNSET_PLACEHOLDER {
        issues.push(ConfigIssue::PlaceholderUrl {
            network: name.to_string(),
        });
        return;
    }

    match Url::parse(network.url()) {
        Ok(url) => {
            if !ALLOWED_SCHEMES.contains(&url.scheme()) {
                issues.push(ConfigIssue::UnsupportedScheme {
                    network: name.to_string(),
                    scheme: url.scheme().to_string(),
                });
            }
        }
        Err(e) => issues.push(ConfigIssue::InvalidUrl {
            network: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn validate_accounts(name: &str, network: &NetworkDescriptor, issues: &mut Vec<ConfigIssue>) {
    for (index, account) in network.accounts().iter().enumerate() {
        if account.is_placeholder() {
            issues.push(ConfigIssue::PlaceholderAccount {
                network: name.to_string(),
                index,
            });
            continue;
        }

        let body = account.body();
        if body.len() != PRIVATE_KEY_HEX_LEN {
            issues.push(ConfigIssue::MalformedAccount {
                network: name.to_string(),
                index,
                reason: format!(
                    "expected {PRIVATE_KEY_HEX_LEN} hex characters, found {}",
                    body.len()
                ),
            });
        } else if let Err(e) = hex::decode(body) {
            issues.push(ConfigIssue::MalformedAccount {
                network: name.to_string(),
                index,
                reason: e.to_string(),
            });
        }
    }
}
