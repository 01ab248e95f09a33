//! List command implementation.
//!
//! Shows every link under a root, its stored target and what a fix run
//! would write, in table, JSON, CSV or TSV form. Nothing is modified.

use crate::cli::ModeArg;
use crate::error::CliError;
use crate::utils::{display_in_root, flag_overrides, load_configuration, open_root, GlobalOptions};
use clap::{Args, ValueEnum};
use relink::operations::{inspect, LinkReport};
use relink::{ChainResolver, Sysroot};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["link", "target", "resolved", "status", "hops", "needs_rewrite"];

/// List the links under a root.
#[derive(Args)]
pub struct ListCommand {
    /// Root directory of the sysroot
    #[arg(value_name = "ROOT_DIRECTORY")]
    pub root: PathBuf,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "RELINK_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Resolve as if fixing in this mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Maximum number of links followed in one chain
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Only show links a fix run would rewrite
    #[arg(long)]
    pub pending: bool,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

/// A report row with paths rendered for display.
#[derive(Debug, Serialize)]
struct Row {
    link: String,
    target: String,
    resolved: Option<String>,
    status: String,
    hops: Option<usize>,
    needs_rewrite: bool,
}

impl Row {
    fn new(root: &Sysroot, report: LinkReport) -> Self {
        Self {
            link: display_in_root(root, &report.link_path),
            target: report.raw_target.display().to_string(),
            resolved: report
                .resolved_target
                .map(|target| target.display().to_string()),
            status: report.status,
            hops: report.hops,
            needs_rewrite: report.needs_rewrite,
        }
    }

    fn fields(&self) -> [String; 6] {
        [
            self.link.clone(),
            self.target.clone(),
            self.resolved.clone().unwrap_or_default(),
            self.status.clone(),
            self.hops.map(|h| h.to_string()).unwrap_or_default(),
            self.needs_rewrite.to_string(),
        ]
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Validate root and load configuration
        let root = open_root(&self.root)?;
        let config = load_configuration(global, &root, flag_overrides(self.mode, self.max_depth))?;

        // 2. Resolve without writing
        let resolver = ChainResolver::new(&root)
            .with_mode(config.mode())
            .with_max_depth(config.max_depth());
        let mut reports = inspect(&resolver)?;
        if self.pending {
            reports.retain(|r| r.needs_rewrite);
        }

        let rows: Vec<Row> = reports
            .into_iter()
            .map(|report| Row::new(&root, report))
            .collect();

        // 3. Format and output to stdout
        match self.format {
            OutputFormat::Table => format_as_table(&rows)?,
            OutputFormat::Json => format_as_json(&rows)?,
            OutputFormat::Csv => format_as_delimited(&rows, b',')?,
            OutputFormat::Tsv => format_as_delimited(&rows, b'\t')?,
        }

        if !global.quiet {
            eprintln!("{} links", rows.len());
        }

        Ok(())
    }
}

fn format_as_table(rows: &[Row]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.link,
            row.target,
            row.resolved.as_deref().unwrap_or("-"),
            row.status,
            row.hops.map_or_else(|| "-".to_string(), |h| h.to_string()),
            if row.needs_rewrite { "yes" } else { "no" },
        )?;
    }

    Ok(())
}

fn format_as_json(rows: &[Row]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, rows).map_err(|e| CliError::Io(e.into()))?;
    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Rows as delimited output (CSV or TSV).
fn format_as_delimited(rows: &[Row], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row.fields()).map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}
