use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use payroll::{Config, Employee, Registry, Roster, storage::seed};
use tracing::{instrument, warn};

use super::terminal::Colorize;

/// Command arguments for `payroll list`.
#[derive(Debug, Parser)]
#[command(about = "Save the valid records of a roster and list them with their ids")]
pub struct List {
    /// Roster file (.yaml, .yml or .json)
    file: PathBuf,

    /// Save the sample employee before the roster
    #[arg(long)]
    seed: bool,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl List {
    #[instrument(level = "debug", skip(self, config), fields(file = %self.file.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let registry = self.build_registry(config)?;

        let employees: Vec<&Employee> = registry.iter().collect();
        match self.output {
            OutputFormat::Table => print_table(&employees),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&employees)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&employees)?),
        }
        Ok(())
    }

    fn build_registry(&self, config: &Config) -> anyhow::Result<Registry> {
        let roster = Roster::load(&self.file)
            .with_context(|| format!("failed to load {}", self.file.display()))?;

        let mut registry = Registry::starting_at(config.first_id());
        if self.seed {
            seed(&mut registry)?;
        }

        for (index, result) in roster.validate().enumerate() {
            match result {
                Ok(employee) => {
                    registry.save(employee)?;
                }
                Err(error) => warn!(record = index + 1, %error, "skipping invalid record"),
            }
        }
        Ok(registry)
    }
}

fn print_table(employees: &[&Employee]) {
    if employees.is_empty() {
        println!("{}", "No employees".dim());
        return;
    }

    println!(
        "{}",
        format!(
            "{:>5}  {:<24} {:<16} {:>5}  {}",
            "ID", "NAME", "TITLE", "YEARS", "EMAIL"
        )
        .info()
    );
    for employee in employees {
        let id = employee.id().map(|id| id.to_string()).unwrap_or_default();
        let name = format!("{} {}", employee.first_name(), employee.last_name());
        println!(
            "{id:>5}  {name:<24} {:<16} {:>5}  {}",
            employee.job_title(),
            employee.job_years(),
            employee.email()
        );
    }
}
