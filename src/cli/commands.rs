use crate::config::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sepolia-config")]
pub struct Opt {
    #[arg(
        long = "env-file",
        global = true,
        help = "Read variables from this file instead of searching for .env"
    )]
    pub env_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "show", about = "Print the assembled configuration as JSON")]
    Show {
        #[arg(long = "reveal", help = "Print private keys instead of redacting them")]
        reveal: bool,
        #[arg(long = "strict", help = "Fail if PRIVATE_KEY or API_URL is unset")]
        strict: bool,
    },
    #[command(name = "export", about = "Write the configuration to a file")]
    Export {
        #[arg(long = "output", short = 'o', help = "Destination file")]
        output: PathBuf,
        #[arg(
            long = "format",
            default_value_t = ExportFormat::Json,
            help = "Output format (json, toml)"
        )]
        format: ExportFormat,
        #[arg(long = "strict", help = "Fail if PRIVATE_KEY or API_URL is unset")]
        strict: bool,
    },
    #[command(name = "check", about = "Load strictly and validate the configuration")]
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_defaults() {
        let opt = Opt::try_parse_from(["sepolia-config", "show"]).unwrap();
        assert!(opt.env_file.is_none());
        assert!(matches!(
            opt.command,
            Command::Show {
                reveal: false,
                strict: false
            }
        ));
    }

    #[test]
    fn test_parse_export_with_format() {
        let opt = Opt::try_parse_from([
            "sepolia-config",
            "export",
            "-o",
            "out.toml",
            "--format",
            "toml",
            "--env-file",
            "ci.env",
        ])
        .unwrap();
        assert_eq!(opt.env_file, Some(PathBuf::from("ci.env")));
        match opt.command {
            Command::Export {
                output,
                format,
                strict,
            } => {
                assert_eq!(output, PathBuf::from("out.toml"));
                assert_eq!(format, ExportFormat::Toml);
                assert!(!strict);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let result =
            Opt::try_parse_from(["sepolia-config", "export", "-o", "x", "--format", "yaml"]);
        assert!(result.is_err());
    }
}
