use crate::error::Result;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs::File;
use std::path::Path;
use zeroize::Zeroize;

/// Read-only view of the environment taken once at startup.
///
/// Values from the dotenv file are overlaid by the process environment, so an
/// exported variable always beats the file. The process environment itself is
/// never modified. Values are zeroed when the snapshot is dropped.
#[derive(Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Build a snapshot from explicit name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> EnvSnapshot
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        EnvSnapshot { vars }
    }

    /// Capture the dotenv file (if any) and the process environment.
    ///
    /// With `env_file` set, that file must exist. Without it, `.env` is searched
    /// for from the current directory upwards and silently skipped when absent.
    pub fn capture(env_file: Option<&Path>) -> Result<EnvSnapshot> {
        let mut vars = match env_file {
            Some(path) => read_env_file(dotenvy::from_path_iter(path)?)?,
            None => match dotenvy::dotenv_iter() {
                Ok(iter) => read_env_file(iter)?,
                Err(e) if e.not_found() => {
                    log::debug!("No .env file found, using process environment only");
                    HashMap::new()
                }
                Err(e) => return Err(e.into()),
            },
        };

        vars.extend(process_vars());

        Ok(EnvSnapshot { vars })
    }

    /// Snapshot of the process environment alone, without any dotenv file
    pub fn process() -> EnvSnapshot {
        EnvSnapshot {
            vars: process_vars().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EnvSnapshot").field("names", &names).finish()
    }
}

impl Drop for EnvSnapshot {
    fn drop(&mut self) {
        for value in self.vars.values_mut() {
            value.zeroize();
        }
    }
}

// Pairs that are not valid UTF-8 are skipped; a variable we need then reads as unset
fn process_vars() -> impl Iterator<Item = (String, String)> {
    env::vars_os().filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
        (Ok(key), Ok(value)) => Some((key, value)),
        (key, _) => {
            let name = match &key {
                Ok(name) => name.clone(),
                Err(raw) => raw.to_string_lossy().into_owned(),
            };
            log::debug!("Skipping non UTF-8 environment variable {name}");
            None
        }
    })
}

// Drains the iterator fully so the file handle is released before returning
fn read_env_file(iter: dotenvy::Iter<File>) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    log::debug!("Loaded {} variables from env file", vars.len());
    Ok(vars)
}

/// Serializes tests that change the working directory and restores it on drop.
#[cfg(test)]
pub(crate) struct CwdGuard {
    previous: std::path::PathBuf,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl CwdGuard {
    pub(crate) fn enter(dir: &Path) -> CwdGuard {
        static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
        let lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        CwdGuard {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.previous);
    }
}
