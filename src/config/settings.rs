use super::env::EnvSnapshot;
use super::{
    ACCOUNT_PREFIX, API_URL_KEY, COMPILER_VERSION, NETWORK_NAME, PRIVATE_KEY_KEY,
    SEPOLIA_CHAIN_ID, UNSET_PLACEHOLDER,
};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Prefixed private-key credential. Zeroed on drop, never printed in full.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Account(String);

impl Account {
    /// Prefix a raw credential with `0x`
    pub fn from_raw(raw: &str) -> Account {
        Account(format!("{ACCOUNT_PREFIX}{raw}"))
    }

    /// Full credential string, prefix included (use carefully)
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Credential without the prefix
    pub fn body(&self) -> &str {
        self.0.strip_prefix(ACCOUNT_PREFIX).unwrap_or(&self.0)
    }

    pub fn is_placeholder(&self) -> bool {
        self.body() == UNSET_PLACEHOLDER
    }

    /// `0x…` followed by the body length, safe to print
    pub fn redacted(&self) -> String {
        format!("{ACCOUNT_PREFIX}…({} chars)", self.body().len())
    }

    pub(crate) fn masked(&self) -> Account {
        Account(self.redacted())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("length", &self.body().len())
            .finish()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    url: String,
    accounts: Vec<Account>,
    chain_id: u64,
}

impl NetworkDescriptor {
    pub fn new(url: String, accounts: Vec<Account>, chain_id: u64) -> NetworkDescriptor {
        NetworkDescriptor {
            url,
            accounts,
            chain_id,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub(crate) fn accounts_mut(&mut self) -> &mut Vec<Account> {
        &mut self.accounts
    }
}

/// Settings object handed to the contract toolchain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(rename = "solidity")]
    compiler_version: String,
    networks: BTreeMap<String, NetworkDescriptor>,
}

impl ConnectionConfig {
    /// Load from the default environment (`.env` plus process variables).
    ///
    /// Never fails: an unreadable `.env` falls back to the process environment
    /// and missing variables become placeholders.
    pub fn from_env() -> ConnectionConfig {
        let snapshot = match EnvSnapshot::capture(None) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Could not read .env file, using process environment: {e}");
                EnvSnapshot::process()
            }
        };
        ConnectionConfig::from_snapshot(&snapshot)
    }

    /// Assemble the config, embedding `undefined` for every missing variable
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> ConnectionConfig {
        let private_key = lenient_var(snapshot, PRIVATE_KEY_KEY);
        let url = lenient_var(snapshot, API_URL_KEY);
        ConnectionConfig::assemble(private_key, url)
    }

    /// Assemble the config, failing on the first missing variable
    pub fn from_snapshot_strict(snapshot: &EnvSnapshot) -> Result<ConnectionConfig> {
        let private_key = strict_var(snapshot, PRIVATE_KEY_KEY)?;
        let url = strict_var(snapshot, API_URL_KEY)?;
        Ok(ConnectionConfig::assemble(private_key, url))
    }

    fn assemble(private_key: &str, url: &str) -> ConnectionConfig {
        let descriptor = NetworkDescriptor::new(
            url.to_string(),
            vec![Account::from_raw(private_key)],
            SEPOLIA_CHAIN_ID,
        );

        let mut networks = BTreeMap::new();
        networks.insert(String::from(NETWORK_NAME), descriptor);

        ConnectionConfig {
            compiler_version: String::from(COMPILER_VERSION),
            networks,
        }
    }

    pub fn compiler_version(&self) -> &str {
        &self.compiler_version
    }

    pub fn networks(&self) -> &BTreeMap<String, NetworkDescriptor> {
        &self.networks
    }

    pub fn network(&self, name: &str) -> Option<&NetworkDescriptor> {
        self.networks.get(name)
    }

    pub fn sepolia(&self) -> Option<&NetworkDescriptor> {
        self.network(NETWORK_NAME)
    }

    pub(crate) fn networks_mut(&mut self) -> &mut BTreeMap<String, NetworkDescriptor> {
        &mut self.networks
    }
}

fn lenient_var<'a>(snapshot: &'a EnvSnapshot, name: &str) -> &'a str {
    match snapshot.get(name) {
        Some(value) => value,
        None => {
            log::warn!("{name} is not set, embedding '{UNSET_PLACEHOLDER}' in the config");
            UNSET_PLACEHOLDER
        }
    }
}

fn strict_var<'a>(snapshot: &'a EnvSnapshot, name: &str) -> Result<&'a str> {
    snapshot
        .get(name)
        .ok_or_else(|| ConfigError::MissingVariable(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::CwdGuard;

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const URL: &str = "https://eth-sepolia.g.alchemy.com/v2/demo";

    fn full_snapshot() -> EnvSnapshot {
        EnvSnapshot::from_pairs([(PRIVATE_KEY_KEY, KEY), (API_URL_KEY, URL)])
    }

    #[test]
    fn test_assembles_from_variables() {
        let config = ConnectionConfig::from_snapshot(&full_snapshot());
        let sepolia = config.sepolia().unwrap();

        assert_eq!(sepolia.url(), URL);
        assert_eq!(sepolia.accounts().len(), 1);
        assert_eq!(sepolia.accounts()[0].expose(), format!("0x{KEY}"));
        assert_eq!(sepolia.chain_id(), 11155111);
        assert_eq!(config.compiler_version(), COMPILER_VERSION);
    }

    #[test]
    fn test_url_is_not_transformed() {
        let odd = "  http://LOCALHOST:8545/path?q=1 ";
        let snapshot = EnvSnapshot::from_pairs([(PRIVATE_KEY_KEY, KEY), (API_URL_KEY, odd)]);
        let config = ConnectionConfig::from_snapshot(&snapshot);
        assert_eq!(config.sepolia().unwrap().url(), odd);
    }

    #[test]
    fn test_missing_private_key_embeds_placeholder() {
        let snapshot = EnvSnapshot::from_pairs([(API_URL_KEY, URL)]);
        let config = ConnectionConfig::from_snapshot(&snapshot);
        let account = &config.sepolia().unwrap().accounts()[0];
        assert_eq!(account.expose(), "0xundefined");
        assert!(account.is_placeholder());
    }

    #[test]
    fn test_missing_url_embeds_placeholder() {
        let snapshot = EnvSnapshot::from_pairs([(PRIVATE_KEY_KEY, KEY)]);
        let config = ConnectionConfig::from_snapshot(&snapshot);
        assert_eq!(config.sepolia().unwrap().url(), "undefined");
    }

    #[test]
    fn test_constants_ignore_environment() {
        let snapshot = EnvSnapshot::from_pairs([
            ("CHAIN_ID", "1"),
            ("SOLIDITY_VERSION", "0.4.0"),
        ]);
        let config = ConnectionConfig::from_snapshot(&snapshot);
        assert_eq!(config.sepolia().unwrap().chain_id(), SEPOLIA_CHAIN_ID);
        assert_eq!(config.compiler_version(), "0.8.27");
    }

    #[test]
    fn test_single_network_entry() {
        let config = ConnectionConfig::from_snapshot(&EnvSnapshot::default());
        assert_eq!(config.networks().len(), 1);
        assert!(config.networks().contains_key("sepolia"));
    }

    #[test]
    fn test_strict_reports_missing_private_key_first() {
        let result = ConnectionConfig::from_snapshot_strict(&EnvSnapshot::default());
        match result {
            Err(ConfigError::MissingVariable(name)) => assert_eq!(name, "PRIVATE_KEY"),
            other => panic!("expected missing PRIVATE_KEY, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_reports_missing_url() {
        let snapshot = EnvSnapshot::from_pairs([(PRIVATE_KEY_KEY, KEY)]);
        match ConnectionConfig::from_snapshot_strict(&snapshot) {
            Err(ConfigError::MissingVariable(name)) => assert_eq!(name, "API_URL"),
            other => panic!("expected missing API_URL, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_matches_lenient_when_complete() {
        let strict = ConnectionConfig::from_snapshot_strict(&full_snapshot()).unwrap();
        let lenient = ConnectionConfig::from_snapshot(&full_snapshot());
        assert_eq!(strict, lenient);
    }

    #[test]
    fn test_account_debug_is_redacted() {
        let account = Account::from_raw(KEY);
        let debug = format!("{account:?}");
        let display = format!("{account}");
        assert!(!debug.contains(KEY));
        assert!(!display.contains(KEY));
        assert!(display.contains("64 chars"));

        let config = ConnectionConfig::from_snapshot(&full_snapshot());
        assert!(!format!("{config:?}").contains(KEY));
    }

    #[test]
    fn test_account_body_strips_prefix() {
        let account = Account::from_raw("abc");
        assert_eq!(account.body(), "abc");
        assert!(!account.is_placeholder());
    }

    #[test]
    fn test_from_env_without_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let _cwd = CwdGuard::enter(dir.path());

        temp_env::with_vars([(PRIVATE_KEY_KEY, Some(KEY)), (API_URL_KEY, Some(URL))], || {
            let config = ConnectionConfig::from_env();
            let sepolia = config.sepolia().unwrap();
            assert_eq!(sepolia.url(), URL);
            assert_eq!(sepolia.accounts()[0].expose(), format!("0x{KEY}"));
        });
    }

    #[test]
    fn test_from_env_falls_back_on_malformed_env_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "API_URL='unterminated\n").unwrap();
        let _cwd = CwdGuard::enter(dir.path());

        temp_env::with_vars(
            [(PRIVATE_KEY_KEY, Some(KEY)), (API_URL_KEY, None::<&str>)],
            || {
                let config = ConnectionConfig::from_env();
                let sepolia = config.sepolia().unwrap();
                assert_eq!(sepolia.accounts()[0].expose(), format!("0x{KEY}"));
                assert_eq!(sepolia.url(), UNSET_PLACEHOLDER);
            },
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_from_env_ignores_non_utf8_variables() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let _cwd = CwdGuard::enter(dir.path());

        let raw = OsStr::from_bytes(b"\xff\xfe");
        temp_env::with_vars(
            [
                ("SEPOLIA_CONFIG_TEST_UNRELATED", Some(raw)),
                (API_URL_KEY, Some(OsStr::new(URL))),
                (PRIVATE_KEY_KEY, Some(raw)),
            ],
            || {
                let config = ConnectionConfig::from_env();
                let sepolia = config.sepolia().unwrap();
                assert_eq!(sepolia.url(), URL);
                assert!(sepolia.accounts()[0].is_placeholder());
            },
        );
    }
}
