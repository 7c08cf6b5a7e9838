use clap::Parser;
use log::{error, LevelFilter};
use sepolia_config::{Command, ConfigError, ConnectionConfig, EnvSnapshot, Opt};
use std::path::Path;
use std::process;

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.env_file.as_deref(), opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load(env_file: Option<&Path>, strict: bool) -> Result<ConnectionConfig, ConfigError> {
    let snapshot = EnvSnapshot::capture(env_file)?;
    if strict {
        ConnectionConfig::from_snapshot_strict(&snapshot)
    } else {
        Ok(ConnectionConfig::from_snapshot(&snapshot))
    }
}

fn run_command(env_file: Option<&Path>, command: Command) -> Result<(), ConfigError> {
    match command {
        Command::Show { reveal, strict } => {
            let config = load(env_file, strict)?;
            let shown = if reveal { config } else { config.redacted() };
            println!("{}", shown.to_json_pretty()?);
        }
        Command::Export {
            output,
            format,
            strict,
        } => {
            let config = load(env_file, strict)?;
            config.write_to(&output, format)?;
            println!("Done!");
        }
        Command::Check => {
            let config = load(env_file, true)?;
            let issues = config.validate();
            if !issues.is_empty() {
                for issue in &issues {
                    println!("- {issue}");
                }
                return Err(ConfigError::Invalid(issues));
            }
            println!("Configuration OK");
        }
    }
    Ok(())
}
