//! Loading the dashboard's data and wiring its collaborators.

use std::path::Path;

use anyhow::{Context, Result};
use site_core::sink::SinkRegistry;
use site_core::{Catalog, CatalogKind, Catalogs, InventoryRecord, MonthlySpend, Project};
use site_data::{CatalogLoader, InventoryLoader, ProjectLoader, SpendingLoader, seed};
use tracing::{debug, info};

use crate::config::DataConfig;
use crate::sink::LogSinkFactory;

/// Every reference table the views read from.
#[derive(Debug, Clone)]
pub struct AppData {
    pub catalogs: Catalogs,
    pub inventory: Vec<InventoryRecord>,
    pub projects: Vec<Project>,
    pub spending: Vec<MonthlySpend>,
}

impl AppData {
    /// Only the bundled tables.
    pub fn seeded() -> Result<Self> {
        Self::load(&DataConfig::default())
    }

    /// Loads each table from its configured file, or from the bundled seed
    /// when no file is configured.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let data = Self {
            catalogs: Catalogs {
                materials: load_catalog(CatalogKind::Materials, config.materials.as_deref())?,
                labor: load_catalog(CatalogKind::Labor, config.labor.as_deref())?,
            },
            inventory: match config.inventory.as_deref() {
                Some(path) => InventoryLoader::load_file(path)
                    .with_context(|| format!("Failed to load inventory: {}", path.display()))?,
                None => seed::inventory().context("Bundled inventory is invalid")?,
            },
            projects: match config.projects.as_deref() {
                Some(path) => ProjectLoader::load_file(path)
                    .with_context(|| format!("Failed to load projects: {}", path.display()))?,
                None => seed::projects().context("Bundled projects are invalid")?,
            },
            spending: match config.spending.as_deref() {
                Some(path) => SpendingLoader::load_file(path)
                    .with_context(|| format!("Failed to load spending: {}", path.display()))?,
                None => seed::spending().context("Bundled spending is invalid")?,
            },
        };

        info!(
            materials = data.catalogs.materials.item_count(),
            labor = data.catalogs.labor.item_count(),
            inventory = data.inventory.len(),
            projects = data.projects.len(),
            months = data.spending.len(),
            "reference data loaded"
        );
        Ok(data)
    }
}

fn load_catalog(
    kind: CatalogKind,
    path: Option<&Path>,
) -> Result<Catalog> {
    match path {
        Some(path) => {
            debug!(kind = kind.as_str(), path = %path.display(), "loading catalog file");
            CatalogLoader::load_file(kind, path)
                .with_context(|| format!("Failed to load {} catalog: {}", kind.as_str(), path.display()))
        }
        None => {
            let catalog = match kind {
                CatalogKind::Materials => seed::materials(),
                CatalogKind::Labor => seed::labor(),
            };
            catalog.with_context(|| format!("Bundled {} catalog is invalid", kind.as_str()))
        }
    }
}

/// Registry with every sink backend the dashboard ships: `memory` and `log`.
pub fn build_registry() -> SinkRegistry {
    let mut registry = SinkRegistry::with_defaults();
    registry.register(Box::new(LogSinkFactory));
    registry
}
