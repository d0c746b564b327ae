use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const WORKSPACE_TARGETS: &[&str] = &[
    "deporder_cli",
    "deporder_core",
    "deporder_registry",
    "deporder_resolver",
];

pub(crate) fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub(crate) fn default_filter(verbose: u8) -> String {
    let level = level_for_verbosity(verbose);
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag.
pub(crate) fn init_logging(verbose: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|err| anyhow!("failed initializing logging: {err}"))
}
