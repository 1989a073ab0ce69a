use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use krankcraft_core::{ReportConfig, Reporter};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

mod formatter;

#[derive(Parser)]
#[command(name = "krankreport")]
#[command(about = "Monthly sick-leave report from tour schedule workbooks", long_about = None)]
#[command(version)]
struct Cli {
    /// Tour schedule workbooks to scan
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Output file or directory
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format of the per-file report
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Scan and report without writing the workbook
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output
    Json,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        ReportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("krankreport.toml");
        if default_config_path.exists() {
            ReportConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ReportConfig::default()
        }
    };
    config.validate().context("Invalid configuration")?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_file_name));
    let reporter = Reporter::with_config(config);
    let batch = reporter.process_files(cli.files.as_slice());

    let written = if batch.is_empty() || cli.dry_run {
        None
    } else {
        Some(
            reporter
                .write_report(&batch, &output)
                .context("Failed to write report")?,
        )
    };

    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&batch, reporter.config(), written.as_deref());
        }
        OutputFormat::Json => {
            formatter::print_json(&batch, reporter.config(), written.as_deref())?;
        }
    }

    if batch.all_failed() {
        std::process::exit(1);
    }

    Ok(())
}
