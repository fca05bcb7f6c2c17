//! Reference data bundled with the application.
//!
//! The CSV files under `data/` are compiled in, so the dashboard works with
//! no data directory at all. Each table can be replaced at runtime by
//! pointing the configuration at a file with the same layout.

use site_core::{Catalog, CatalogKind, Catalogs, InventoryRecord, MonthlySpend, Project};

use crate::{CatalogLoader, InventoryLoader, LoaderError, ProjectLoader, SpendingLoader};

pub const MATERIALS_CSV: &str = include_str!("../data/materials.csv");
pub const LABOR_CSV: &str = include_str!("../data/labor.csv");
pub const INVENTORY_CSV: &str = include_str!("../data/inventory.csv");
pub const PROJECTS_CSV: &str = include_str!("../data/projects.csv");
pub const SPENDING_CSV: &str = include_str!("../data/spending.csv");

pub fn materials() -> Result<Catalog, LoaderError> {
    CatalogLoader::parse(CatalogKind::Materials, MATERIALS_CSV.as_bytes())
}

pub fn labor() -> Result<Catalog, LoaderError> {
    CatalogLoader::parse(CatalogKind::Labor, LABOR_CSV.as_bytes())
}

pub fn catalogs() -> Result<Catalogs, LoaderError> {
    Ok(Catalogs {
        materials: materials()?,
        labor: labor()?,
    })
}

pub fn inventory() -> Result<Vec<InventoryRecord>, LoaderError> {
    InventoryLoader::parse(INVENTORY_CSV.as_bytes())
}

pub fn projects() -> Result<Vec<Project>, LoaderError> {
    ProjectLoader::parse(PROJECTS_CSV.as_bytes())
}

pub fn spending() -> Result<Vec<MonthlySpend>, LoaderError> {
    SpendingLoader::parse(SPENDING_CSV.as_bytes())
}
