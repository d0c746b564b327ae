use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use deporder_core::PackageKey;
use deporder_registry::{FIXTURE_DOCUMENTED_ORDER, FIXTURE_GRAPH_SUMMARY};
use indicatif::{HumanCount, ProgressBar, ProgressStyle};

use crate::report::ResolutionReport;

pub(crate) const RESOLVER_DIVERGENCE_NOTE: &str = "Results may differ from Cargo: real package managers resolve version requirements and handle cyclic dependencies with different algorithms.";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum ColorChoice {
    Auto,
    Always,
    Never,
}

pub(crate) fn output_style(choice: ColorChoice) -> OutputStyle {
    match choice {
        ColorChoice::Always => OutputStyle::Rich,
        ColorChoice::Never => OutputStyle::Plain,
        ColorChoice::Auto => {
            if std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
                OutputStyle::Plain
            } else {
                OutputStyle::Rich
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ReportOptions {
    pub(crate) show_versions: bool,
}

pub(crate) fn format_report_lines(
    report: &ResolutionReport,
    options: ReportOptions,
    style: OutputStyle,
) -> Vec<String> {
    let mut lines = vec![render_section_header(style, "Load order")];

    if report.order.is_empty() {
        lines.push("  (no package could be ordered)".to_string());
    }
    for (position, package) in report.order.iter().enumerate() {
        lines.push(format!("  {}. {}", position + 1, package_label(package, options)));
    }

    if !report.cycles.is_empty() {
        let names = report
            .cycles
            .iter()
            .map(|package| package_label(package, options))
            .collect::<Vec<_>>();
        lines.push(format!("Cycles: {}", names.join(", ")));
    }
    if !report.unordered.is_empty() {
        let names = report
            .unordered
            .iter()
            .map(|package| package_label(package, options))
            .collect::<Vec<_>>();
        lines.push(format!("Not ordered: {}", names.join(", ")));
    }
    lines.push(format_summary_line(report));

    lines.push(String::new());
    lines.push(render_section_header(style, "Comparison with Cargo"));
    lines.push(format!("  {RESOLVER_DIVERGENCE_NOTE}"));

    if report.test_mode {
        lines.push(String::new());
        lines.push(render_section_header(style, "Test example"));
        lines.push(format!("  Graph: {FIXTURE_GRAPH_SUMMARY}"));
        lines.push(format!("  Order: {FIXTURE_DOCUMENTED_ORDER} (cycles excluded)"));
    }

    lines
}

fn format_summary_line(report: &ResolutionReport) -> String {
    format!(
        "Resolved {} from {} ({} packages expanded, {} edges, {} revisits, {} depth cutoffs)",
        report.root.name(),
        report.source_label,
        HumanCount(report.stats.expanded as u64),
        HumanCount(report.edge_count as u64),
        HumanCount(report.stats.revisits as u64),
        HumanCount(report.stats.depth_cutoffs as u64)
    )
}

fn package_label(package: &PackageKey, options: ReportOptions) -> String {
    if options.show_versions {
        package.to_string()
    } else {
        package.name().to_string()
    }
}

fn render_section_header(style: OutputStyle, title: &str) -> String {
    match style {
        OutputStyle::Plain => format!("{title}:"),
        OutputStyle::Rich => colorize(section_style(), &format!("== {title} ==")),
    }
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

/// Spinner counting fetched packages while a live traversal runs. Inert in
/// plain mode.
pub(crate) struct FetchProgress {
    progress_bar: Option<ProgressBar>,
}

impl FetchProgress {
    pub(crate) fn start(style: OutputStyle, enabled: bool) -> Self {
        if style == OutputStyle::Plain || !enabled {
            return Self { progress_bar: None };
        }

        let progress_bar = ProgressBar::new_spinner();
        if let Ok(template) =
            ProgressStyle::with_template("{spinner:.cyan.bold} resolving {pos:>3} {msg}")
        {
            progress_bar.set_style(template.tick_chars("|/-\\ "));
        }
        progress_bar.enable_steady_tick(Duration::from_millis(80));
        Self {
            progress_bar: Some(progress_bar),
        }
    }

    pub(crate) fn observe(&self, package: &PackageKey) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.inc(1);
            progress_bar.set_message(package.to_string());
        }
    }

    pub(crate) fn finish(mut self) {
        if let Some(progress_bar) = self.progress_bar.take() {
            progress_bar.finish_and_clear();
        }
    }
}
