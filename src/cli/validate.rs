use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use payroll::{Config, Employee, Error, Roster};
use serde::Serialize;
use tracing::{info, instrument};

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Validate every employee record in a roster file")]
pub struct Validate {
    /// Roster file (.yaml, .yml or .json)
    file: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress the report in every format; failures still set the exit code
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Outcome of validating one record.
#[derive(Debug, Serialize)]
struct RecordReport {
    /// 1-based position in the roster.
    record: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    employee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RecordReport {
    fn new(record: usize, result: &Result<Employee, Error>) -> Self {
        match result {
            Ok(employee) => Self {
                record,
                employee: Some(format!("{} {}", employee.first_name(), employee.last_name())),
                error: None,
            },
            Err(error) => Self {
                record,
                employee: None,
                error: Some(error.to_string()),
            },
        }
    }

    const fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

impl Validate {
    #[instrument(level = "debug", skip(self, config), fields(file = %self.file.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let roster = Roster::load(&self.file)
            .with_context(|| format!("failed to load {}", self.file.display()))?;

        let mut reports = Vec::with_capacity(roster.len());
        for (index, result) in roster.validate().enumerate() {
            let report = RecordReport::new(index + 1, &result);
            let stop = config.fail_fast && !report.is_valid();
            reports.push(report);
            if stop {
                info!(record = index + 1, "stopping at first invalid record");
                break;
            }
        }

        self.write_report(&reports, &mut io::stdout().lock())?;

        let invalid = reports.iter().filter(|report| !report.is_valid()).count();
        if invalid == 0 {
            return Ok(());
        }
        if reports.len() < roster.len() {
            anyhow::bail!(
                "stopped at invalid record {} of {}",
                reports.len(),
                roster.len()
            );
        }
        anyhow::bail!("{invalid} of {} records are invalid", reports.len());
    }

    fn write_report(&self, reports: &[RecordReport], out: &mut impl Write) -> anyhow::Result<()> {
        if self.quiet {
            return Ok(());
        }
        match self.output {
            OutputFormat::Table => write_table(reports, out)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(reports)?)?,
        }
        Ok(())
    }
}

fn write_table(reports: &[RecordReport], out: &mut impl Write) -> io::Result<()> {
    for report in reports {
        match (&report.employee, &report.error) {
            (Some(name), _) => {
                writeln!(out, "{}", format!("✓ {:>4}  {name}", report.record).success())?;
            }
            (None, Some(error)) => {
                writeln!(out, "{}", format!("✗ {:>4}  {error}", report.record).warning())?;
            }
            (None, None) => {}
        }
    }

    let valid = reports.iter().filter(|report| report.is_valid()).count();
    writeln!(out)?;
    writeln!(out, "{}", format!("{valid} of {} records valid", reports.len()).dim())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn roster_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn command(file: &tempfile::NamedTempFile) -> Validate {
        Validate {
            file: file.path().to_path_buf(),
            output: OutputFormat::Table,
            quiet: true,
        }
    }

    fn reports() -> Vec<RecordReport> {
        vec![
            RecordReport::new(1, &Err(Error::InvalidArgument)),
            RecordReport::new(2, &Err(Error::InvalidEmail)),
        ]
    }

    const VALID: &str = "\
- firstName: Frodo
  lastName: Baggins
  description: ring bearer
  jobYears: 1
  jobTitle: Janitor
  email: fbaggins@email.com
";

    #[test]
    fn valid_roster_passes() {
        let file = roster_file(VALID);
        command(&file).run(&Config::default()).unwrap();
    }

    #[test]
    fn invalid_record_fails_the_run() {
        let file = roster_file(&format!("{VALID}- firstName: Bilbo\n"));
        let error = command(&file).run(&Config::default()).unwrap_err();
        assert_eq!(error.to_string(), "1 of 2 records are invalid");
    }

    #[test]
    fn report_names_the_error() {
        let report = RecordReport::new(3, &Err(Error::InvalidEmail));
        assert!(!report.is_valid());
        assert_eq!(report.error.as_deref(), Some("Invalid email"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({ "record": 3, "error": "Invalid email" }));
    }

    #[test]
    fn fail_fast_reports_where_checking_stopped() {
        let file = roster_file(&format!("{VALID}- firstName: Bilbo\n{VALID}"));
        let mut config = Config::default();
        config.fail_fast = true;

        let error = command(&file).run(&config).unwrap_err();
        assert_eq!(error.to_string(), "stopped at invalid record 2 of 3");
    }

    #[test]
    fn quiet_silences_every_format() {
        let file = roster_file(VALID);
        for output in [OutputFormat::Table, OutputFormat::Json] {
            let mut out = Vec::new();
            Validate { output, ..command(&file) }
                .write_report(&reports(), &mut out)
                .unwrap();
            assert!(out.is_empty());
        }
    }

    #[test]
    fn json_report_lists_every_record() {
        let file = roster_file(VALID);
        let validate = Validate {
            output: OutputFormat::Json,
            quiet: false,
            ..command(&file)
        };

        let mut out = Vec::new();
        validate.write_report(&reports(), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "record": 1, "error": "All fields must be filled in" },
                { "record": 2, "error": "Invalid email" }
            ])
        );
    }
}
