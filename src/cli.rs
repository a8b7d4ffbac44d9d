use std::path::{Path, PathBuf};

mod list;
mod terminal;
mod validate;

use clap::ArgAction;
use list::List;
use payroll::Config;
use tracing::{debug, instrument};
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "payroll.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run(&self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Reads the configuration, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Config::load(path).map_err(|e| anyhow::anyhow!(e))
    } else {
        debug!(path = %path.display(), "no configuration file, using defaults");
        Ok(Config::default())
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Write a default configuration file
    Init,

    /// Validate every record in a roster file
    ///
    /// Exits with an error if any record is invalid.
    Validate(Validate),

    /// Assign ids to the valid records in a roster file and list them
    List(List),
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init => init(config_path)?,
            Self::Validate(command) => command.run(&load_config(config_path)?)?,
            Self::List(command) => command.run(&load_config(config_path)?)?,
        }
        Ok(())
    }
}

#[instrument]
fn init(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!(
            "Configuration already exists at {} (not overwriting)",
            path.display()
        );
    }

    Config::default()
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

    println!("Created {}", path.display());
    println!();
    println!("Next steps:");
    println!("  payroll validate roster.yaml");
    Ok(())
}
