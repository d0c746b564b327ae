mod logging;
mod render;
mod report;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use deporder_core::ResolveConfig;
use deporder_registry::RegistrySource;

use crate::logging::init_logging;
use crate::render::{format_report_lines, output_style, ColorChoice, FetchProgress, ReportOptions};
use crate::report::resolve_report;

#[derive(Parser, Debug)]
#[command(name = "deporder")]
#[command(
    about = "Resolve a package's dependency graph and print its load order",
    long_about = None
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// Overrides `analysis.max_depth`.
    #[arg(long)]
    max_depth: Option<u32>,
    /// Use the built-in fixture table instead of the registry.
    #[arg(long, conflicts_with = "registry_url")]
    test_repository: bool,
    /// Overrides `repository.url` and switches to live mode.
    #[arg(long)]
    registry_url: Option<String>,
    /// Print `name version` instead of the bare package name.
    #[arg(long)]
    show_versions: bool,
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    match run_cli(cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format_fatal_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn format_fatal_error(err: &anyhow::Error) -> String {
    format!("error: {err:#}")
}

/// Config errors surface before logging is installed and before any report
/// line is written to `out`.
fn run_cli<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = load_config(&cli)?;
    init_logging(cli.verbose)?;

    let source = RegistrySource::from_config(&config)?;
    let source_label = source_label(&source);
    let style = output_style(cli.color);

    let progress = FetchProgress::start(style, !source.is_fixture());
    let report = resolve_report(&config, &source, &source_label, |package| {
        progress.observe(package)
    });
    progress.finish();

    let options = ReportOptions {
        show_versions: cli.show_versions,
    };
    for line in format_report_lines(&report, options, style) {
        writeln!(out, "{line}").context("failed writing report")?;
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ResolveConfig> {
    let mut config = ResolveConfig::load(&cli.config)?;
    apply_overrides(&mut config, cli)
        .with_context(|| format!("invalid overrides for config: {}", cli.config.display()))?;
    Ok(config)
}

fn apply_overrides(config: &mut ResolveConfig, cli: &Cli) -> Result<()> {
    if let Some(max_depth) = cli.max_depth {
        config.analysis.max_depth = max_depth;
    }
    if cli.test_repository {
        config.repository.use_test_repository = true;
    }
    if let Some(url) = &cli.registry_url {
        config.repository.use_test_repository = false;
        config.repository.url = Some(url.clone());
    }
    config.validate()?;
    Ok(())
}

fn source_label(source: &RegistrySource) -> String {
    match source {
        RegistrySource::Fixture(_) => "test repository".to_string(),
        RegistrySource::Http(registry) => registry.base_url().to_string(),
    }
}
