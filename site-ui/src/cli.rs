//! Command-line surface of `site-dashboard`.
//!
//! Parsing lives here rather than in `main` so the commands can be driven
//! from tests with any writer.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use site_core::calculations::{DashboardSummary, Selector, SortConfig, SortKey, inventory, projects};
use site_core::{CatalogKind, LineId, Notifier, ProjectStatus};
use tracing::{debug, warn};

use crate::app::{self, AppData};
use crate::config::AppConfig;
use crate::notify::LogNotifier;
use crate::render;
use crate::state::{EstimateSession, InventoryView};
use crate::utils::LineSpec;

/// Construction site dashboard: projects, cost estimates and inventory.
///
/// Reference data comes from the bundled tables unless the configuration
/// file points at replacements.
#[derive(Debug, Parser)]
#[command(name = "site-dashboard", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `site_core=trace`. Overrides the
    /// configuration file; `RUST_LOG` overrides both.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Hide log output on stderr. A configured log file still receives it.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Overview figures and monthly spending.
    Dashboard,

    /// List projects.
    Projects {
        /// Case-insensitive match on project name or client.
        #[arg(long, default_value = "")]
        search: String,

        /// Only projects with this status (`planning`, `active`, `on-hold`, `completed`).
        #[arg(long, value_parser = parse_status)]
        status: Option<ProjectStatus>,
    },

    /// Show the materials catalog, or the labor catalog with `--labor`.
    Catalog {
        #[arg(long)]
        labor: bool,
    },

    /// Build a cost estimate from catalog items.
    Estimate {
        /// Project the estimate is for.
        #[arg(long, default_value = "")]
        project: String,

        /// Price lines from the labor catalog.
        #[arg(long)]
        labor: bool,

        /// `Category/Item=QUANTITY[:description]`, repeatable.
        #[arg(long = "line", value_parser = LineSpec::parse)]
        lines: Vec<LineSpec>,

        /// Remove the line with this number after adding, repeatable.
        #[arg(long)]
        remove: Vec<u64>,

        /// Hand the finished estimate to the configured sink.
        #[arg(long)]
        save: bool,
    },

    /// List inventory.
    Inventory {
        /// Case-insensitive match on name, category or supplier.
        #[arg(long, default_value = "")]
        search: String,

        /// Exact category, or `all`.
        #[arg(long, default_value = "all")]
        category: String,

        /// Exact supplier, or `all`.
        #[arg(long, default_value = "all")]
        supplier: String,

        /// Column to sort by, e.g. `price` or `last-restocked`.
        #[arg(long, value_parser = SortKey::parse)]
        sort: Option<SortKey>,

        /// Sort descending.
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Items below their minimum stock level.
    LowStock,

    /// Ask the supplier to restock an item.
    Restock {
        /// Inventory item id.
        id: i64,
    },
}

/// A selector that names no known value filters out every row; say why.
fn warn_unknown_selection(
    what: &str,
    value: &str,
    known: &[&str],
) {
    if let Selector::Only(wanted) = Selector::parse(value) {
        if !known.contains(&wanted.as_str()) {
            warn!("no {what} named '{wanted}'; available: {known:?}");
        }
    }
}

fn parse_status(s: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::parse(s).ok_or_else(|| format!("unknown project status '{s}'"))
}

/// Runs one command against the configured data, writing the view to `out`.
///
/// Only configuration and data-load failures are returned as errors. Invalid
/// user input is reported as a notification and the command still succeeds.
pub async fn run(
    command: &Command,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let data = AppData::load(&config.data)?;
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    debug!(?command, "running command");

    match command {
        Command::Dashboard => {
            let summary = DashboardSummary::compute(&data.projects, &data.inventory, &data.spending);
            writeln!(out, "{}", render::dashboard(&summary, &data.spending))?;
        }
        Command::Projects { search, status } => {
            let mut found = projects::search(&data.projects, search);
            if let Some(status) = status {
                found = projects::by_status(found, *status);
            }
            writeln!(out, "{}", render::projects(&found))?;
        }
        Command::Catalog { labor } => {
            let kind = if *labor { CatalogKind::Labor } else { CatalogKind::Materials };
            writeln!(out, "{}", render::catalog(data.catalogs.get(kind)))?;
        }
        Command::Estimate {
            project,
            labor,
            lines,
            remove,
            save,
        } => {
            let mut session = EstimateSession::new(project.as_str(), notifier);
            if *labor {
                session.switch_catalog(CatalogKind::Labor);
            }
            for line in lines {
                session.add_line(
                    &data.catalogs,
                    &line.category,
                    &line.item,
                    line.quantity,
                    &line.description,
                );
            }
            for id in remove {
                session.remove_line(LineId::new(*id));
            }
            writeln!(out, "{}", render::estimate(session.estimate()))?;

            if *save {
                let sink = app::build_registry()
                    .create(&config.sink)
                    .await
                    .with_context(|| format!("Failed to open estimate sink '{}'", config.sink.backend))?;
                if let Some(saved) = session.save(&*sink).await {
                    writeln!(out, "Saved estimate for {}.", saved.project_name)?;
                }
            }
        }
        Command::Inventory {
            search,
            category,
            supplier,
            sort,
            desc,
        } => {
            warn_unknown_selection("category", category, &inventory::categories(&data.inventory));
            warn_unknown_selection("supplier", supplier, &inventory::suppliers(&data.inventory));

            let mut view = InventoryView::new(notifier);
            view.filter.search = search.clone();
            view.filter.category = Selector::parse(category);
            view.filter.supplier = Selector::parse(supplier);
            view.set_sort(sort.map(|key| {
                if *desc {
                    SortConfig::descending(key)
                } else {
                    SortConfig::ascending(key)
                }
            }));
            writeln!(out, "{}", render::inventory(&view.rows(&data.inventory), view.sort()))?;
        }
        Command::LowStock => {
            let view = InventoryView::new(notifier);
            writeln!(out, "{}", render::low_stock(&view.low_stock_rows(&data.inventory)))?;
        }
        Command::Restock { id } => {
            let view = InventoryView::new(notifier);
            match view.restock(&data.inventory, *id) {
                Some(request) => writeln!(out, "{}", render::restock(&request))?,
                None => writeln!(out, "No restock request sent.")?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn estimate_arguments_parse_into_line_specs() {
        let cli = Cli::try_parse_from([
            "site-dashboard",
            "estimate",
            "--project",
            "Villa Renovation Project",
            "--line",
            "Bricks and Blocks/Standard Clay Brick=100",
            "--line",
            "Finishes/Interior Paint=4:Living room",
            "--remove",
            "1",
            "--save",
        ])
        .unwrap();

        match cli.command {
            Command::Estimate {
                project,
                labor,
                lines,
                remove,
                save,
            } => {
                assert_eq!(project, "Villa Renovation Project");
                assert!(!labor);
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[1].quantity, dec!(4));
                assert_eq!(lines[1].description, "Living room");
                assert_eq!(remove, vec![1]);
                assert!(save);
            }
            other => panic!("expected estimate command, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["site-dashboard", "low-stock", "--log-level", "debug", "-q"]).unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::LowStock));
    }

    #[test]
    fn bad_sort_key_and_status_are_usage_errors() {
        assert!(Cli::try_parse_from(["site-dashboard", "inventory", "--sort", "colour"]).is_err());
        assert!(Cli::try_parse_from(["site-dashboard", "inventory", "--desc"]).is_err());
        assert!(Cli::try_parse_from(["site-dashboard", "projects", "--status", "paused"]).is_err());
    }

    #[test]
    fn malformed_line_is_a_usage_error() {
        assert!(Cli::try_parse_from(["site-dashboard", "estimate", "--line", "Portland Cement"]).is_err());
    }
}
