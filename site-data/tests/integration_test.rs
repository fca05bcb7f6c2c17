//! Integration tests for the bundled seed data and the file-based loaders.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use site_core::calculations::inventory::{classify, low_stock};
use site_core::{CatalogKind, ProjectStatus, StockStatus};
use site_data::{CatalogLoader, DataKind, InventoryLoader, LoaderError, seed};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn seed_materials_have_four_categories_of_three() {
    let materials = seed::materials().expect("bundled materials should load");

    assert_eq!(
        materials.category_names(),
        vec!["Concrete and Cement", "Wood and Timber", "Bricks and Blocks", "Finishes"]
    );
    assert_eq!(materials.item_count(), 12);

    let brick = materials
        .lookup("Bricks and Blocks", "Standard Clay Brick")
        .expect("clay brick is in the seed catalog");
    assert_eq!(brick.unit, "Piece");
    assert_eq!(brick.rate, dec!(12));
}

#[test]
fn seed_labor_rates() {
    let catalogs = seed::catalogs().unwrap();
    let labor = catalogs.get(CatalogKind::Labor);

    assert_eq!(labor.item_count(), 8);
    assert_eq!(labor.lookup("Specialized Labor", "Mason").map(|i| i.rate), Some(dec!(1300)));
    assert!(labor.lookup("General Labor", "Mason").is_none());
}

#[test]
fn seed_inventory_has_one_low_stock_record() {
    let inventory = seed::inventory().unwrap();

    assert_eq!(inventory.len(), 8);

    let low: Vec<_> = low_stock(&inventory).iter().map(|r| r.name.as_str()).collect();
    assert_eq!(low, vec!["PVC Pipes (4-inch)"]);
    assert_eq!(classify(low_stock(&inventory)[0]), StockStatus::LowStock);
}

#[test]
fn seed_projects_cover_every_status() {
    let projects = seed::projects().unwrap();

    for status in ProjectStatus::all() {
        assert_eq!(
            projects.iter().filter(|p| p.status == *status).count(),
            1,
            "expected exactly one {} project",
            status.label()
        );
    }
}

#[test]
fn seed_spending_has_six_months() {
    let spending = seed::spending().unwrap();

    assert_eq!(spending.len(), 6);
    assert_eq!(spending[2].actual, dec!(9800));
}

#[test]
fn catalog_loads_from_file() {
    let catalog = CatalogLoader::load_file(CatalogKind::Materials, &fixture("materials_extra.csv"))
        .expect("fixture should load");

    assert_eq!(catalog.category_names(), vec!["Roofing", "Insulation"]);
    assert_eq!(
        catalog.lookup("Insulation", "Glass Wool Roll").map(|i| i.rate),
        Some(dec!(2150.75))
    );
}

#[test]
fn short_row_is_rejected() {
    let err = InventoryLoader::load_file(&fixture("inventory_bad.csv")).unwrap_err();

    assert!(matches!(err, LoaderError::CsvParse(_)), "got {err:?}");
}

#[test]
fn missing_file_reports_path() {
    let err = InventoryLoader::load_file(&fixture("nope.csv")).unwrap_err();

    match err {
        LoaderError::Io { path, .. } => assert!(path.ends_with("nope.csv")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn data_kind_counts_rows() {
    let file = std::fs::File::open(fixture("materials_extra.csv")).unwrap();

    assert_eq!(DataKind::Materials.count_rows(file).unwrap(), 3);
    assert_eq!(DataKind::Spending.count_rows(seed::SPENDING_CSV.as_bytes()).unwrap(), 6);
}
