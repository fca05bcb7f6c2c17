use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use site_ui::cli::{self, Cli};
use site_ui::config::AppConfig;
use site_ui::logging;

// ─── configuration ───────────────────────────────────────────────────────────

/// Reads the configuration file when one was given, defaults otherwise.
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Applies the `[logging]` section on top of what `init_logging` set up.
///
/// * `--log-level` and `RUST_LOG` both take precedence over the file's level.
/// * A log file that cannot be opened is reported and skipped.
fn apply_logging_config(
    cli: &Cli,
    config: &AppConfig,
) {
    if cli.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        if let Err(e) = logging::set_log_level(&config.logging.level) {
            warn!("{e:#}");
        }
    }
    if let Some(path) = &config.logging.file {
        if let Err(e) = logging::enable_file_logging(path) {
            warn!("{e:#}");
        }
    }
    if cli.quiet {
        if let Err(e) = logging::set_console_enabled(false) {
            warn!("{e:#}");
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref().unwrap_or("info"));

    let config = load_config(&cli)?;
    apply_logging_config(&cli, &config);
    debug!(?config, "configuration loaded");

    let mut stdout = std::io::stdout().lock();
    let result = cli::run(&cli.command, &config, &mut stdout).await;

    logging::disable_file_logging();
    result
}
