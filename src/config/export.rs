use super::settings::ConnectionConfig;
use crate::error::Result;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// File formats the config can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Toml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "toml" => Ok(ExportFormat::Toml),
            _ => Err(format!("Invalid format: {s}. Valid options: json, toml")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Toml => write!(f, "toml"),
        }
    }
}

impl ConnectionConfig {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_json_pretty(),
            ExportFormat::Toml => self.to_toml(),
        }
    }

    /// Write the rendered config, replacing any existing file
    pub fn write_to(&self, path: &Path, format: ExportFormat) -> Result<()> {
        let rendered = self.render(format)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(rendered.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        log::info!("Wrote {format} config to {}", path.display());
        Ok(())
    }

    /// Copy with every credential replaced by its redacted form
    pub fn redacted(&self) -> ConnectionConfig {
        let mut copy = self.clone();
        for network in copy.networks_mut().values_mut() {
            for account in network.accounts_mut().iter_mut() {
                *account = account.masked();
            }
        }
        copy
    }
}
