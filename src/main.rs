use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;

use demographic_report::config::DEFAULT_CONFIG_FILE;
use demographic_report::report::ReportEnvelope;
use demographic_report::{DemographicReport, OutputFormat, ReportConfig};

/// Descriptive statistics over a census extract (race, sex, age, education,
/// hours worked, native country, salary bracket).
#[derive(Parser, Debug)]
#[command(name = "demographic-report", version, about)]
struct CliArgs {
    /// Census CSV to analyse (overrides `data.path` from the config).
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    data: Option<PathBuf>,

    /// TOML config file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (overrides `output.format`).
    #[arg(long = "format", value_enum)]
    format: Option<OutputFormat>,

    /// Compute without printing the report.
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Log at debug level.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut conf = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::load_or_default(DEFAULT_CONFIG_FILE)?,
    };
    if let Some(data) = args.data {
        conf.data.path = data;
    }
    if let Some(format) = args.format {
        conf.output.format = format;
    }
    if args.quiet {
        conf.output.print = false;
    }
    info!(
        "computing report for {} (format: {})",
        conf.data.path.display(),
        conf.output.format
    );

    let report = DemographicReport::new(&conf.data.path);
    let print_text = conf.output.print && conf.output.format == OutputFormat::Text;
    let data = report
        .compute(print_text)
        .with_context(|| format!("demographic report over {}", conf.data.path.display()))?;

    if conf.output.print && conf.output.format == OutputFormat::Json {
        print_json(report.path(), &data)?;
    }
    Ok(())
}

fn print_json(source: &Path, data: &demographic_report::DemographicData) -> anyhow::Result<()> {
    let envelope = ReportEnvelope::new(source, data);
    let json = serde_json::to_string_pretty(&envelope).context("serialize report")?;
    println!("{}", json);
    Ok(())
}
