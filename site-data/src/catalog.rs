//! Materials and labor catalogs.
//!
//! | Column     | Type    | Notes |
//! |------------|---------|-------|
//! | `category` | string  | rows of one category may be interleaved |
//! | `item`     | string  | unique within its category |
//! | `unit`     | string  | e.g. `Bag`, `Day` |
//! | `rate`     | decimal | unit rate, must not be negative |
//!
//! Categories keep the order in which they first appear; items keep file
//! order within their category.

use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use site_core::{Catalog, CatalogCategory, CatalogItem, CatalogKind};
use tracing::debug;

use crate::error::{LoaderError, open};
use crate::read_rows;

/// A single row of a catalog CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogRecord {
    pub category: String,
    pub item: String,
    pub unit: String,
    pub rate: Decimal,
}

pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse a catalog of the given kind from a CSV reader.
    pub fn parse<R: Read>(
        kind: CatalogKind,
        reader: R,
    ) -> Result<Catalog, LoaderError> {
        let records = read_rows::<CatalogRecord, _>(reader)?;
        let catalog = Self::build(kind, records)?;
        debug!(
            kind = kind.as_str(),
            categories = catalog.categories.len(),
            items = catalog.item_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn load_file(
        kind: CatalogKind,
        path: &Path,
    ) -> Result<Catalog, LoaderError> {
        Self::parse(kind, open(path)?)
    }

    /// Groups numbered records into categories, validating each row.
    pub fn build(
        kind: CatalogKind,
        records: Vec<(usize, CatalogRecord)>,
    ) -> Result<Catalog, LoaderError> {
        let mut categories: Vec<CatalogCategory> = Vec::new();

        for (row, record) in records {
            if record.category.is_empty() || record.item.is_empty() {
                return Err(LoaderError::invalid_row(row, "category and item are required"));
            }
            if record.rate < Decimal::ZERO {
                return Err(LoaderError::invalid_row(
                    row,
                    format!("rate {} is negative", record.rate),
                ));
            }

            let index = match categories.iter().position(|c| c.name == record.category) {
                Some(index) => index,
                None => {
                    categories.push(CatalogCategory {
                        name: record.category.clone(),
                        items: Vec::new(),
                    });
                    categories.len() - 1
                }
            };
            let category = &mut categories[index];

            if category.item(&record.item).is_some() {
                return Err(LoaderError::DuplicateItem {
                    category: record.category,
                    item: record.item,
                });
            }
            category.items.push(CatalogItem {
                name: record.item,
                unit: record.unit,
                rate: record.rate,
            });
        }

        Ok(Catalog::new(kind, categories))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const LABOR_CSV: &str = "\
category,item,unit,rate
General Labor,Unskilled Labor,Day,600
Specialized Labor,Electrician,Day,1500
General Labor,Skilled Labor,Day,1200
";

    #[test]
    fn parse_groups_rows_by_first_seen_category() {
        let catalog = CatalogLoader::parse(CatalogKind::Labor, LABOR_CSV.as_bytes())
            .expect("labor catalog should parse");

        assert_eq!(catalog.kind, CatalogKind::Labor);
        assert_eq!(catalog.category_names(), vec!["General Labor", "Specialized Labor"]);

        let general: Vec<_> = catalog.categories[0]
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(general, vec!["Unskilled Labor", "Skilled Labor"]);
    }

    #[test]
    fn parse_keeps_unit_and_rate() {
        let catalog = CatalogLoader::parse(CatalogKind::Labor, LABOR_CSV.as_bytes()).unwrap();

        assert_eq!(
            catalog.lookup("Specialized Labor", "Electrician"),
            Some(&CatalogItem {
                name: "Electrician".to_string(),
                unit: "Day".to_string(),
                rate: dec!(1500),
            })
        );
    }

    #[test]
    fn parse_trims_whitespace() {
        let csv = "category,item,unit,rate\n Finishes , Ceramic Tile , Sq.m , 450.50 \n";

        let catalog = CatalogLoader::parse(CatalogKind::Materials, csv.as_bytes()).unwrap();

        assert_eq!(
            catalog.lookup("Finishes", "Ceramic Tile").map(|i| i.rate),
            Some(dec!(450.50))
        );
    }

    #[test]
    fn negative_rate_is_rejected_with_row_number() {
        let csv = "category,item,unit,rate\nFinishes,Tile,Sq.m,450\nFinishes,Paint,Gallon,-1\n";

        let err = CatalogLoader::parse(CatalogKind::Materials, csv.as_bytes()).unwrap_err();

        match err {
            LoaderError::InvalidRow { row, message } => {
                assert_eq!(row, 2);
                assert!(message.contains("negative"));
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_item_in_category_is_rejected() {
        let csv = "category,item,unit,rate\nFinishes,Tile,Sq.m,450\nFinishes,Tile,Box,900\n";

        let err = CatalogLoader::parse(CatalogKind::Materials, csv.as_bytes()).unwrap_err();

        assert!(matches!(err, LoaderError::DuplicateItem { .. }));
    }

    #[test]
    fn same_item_name_in_different_categories_is_allowed() {
        let csv = "category,item,unit,rate\nA,Tile,Sq.m,450\nB,Tile,Box,900\n";

        let catalog = CatalogLoader::parse(CatalogKind::Materials, csv.as_bytes()).unwrap();

        assert_eq!(catalog.item_count(), 2);
    }

    #[test]
    fn malformed_rate_is_a_csv_error() {
        let csv = "category,item,unit,rate\nFinishes,Tile,Sq.m,cheap\n";

        let err = CatalogLoader::parse(CatalogKind::Materials, csv.as_bytes()).unwrap_err();

        assert!(matches!(err, LoaderError::CsvParse(_)));
    }
}
