//! CSV loaders for the dashboard's reference data.
//!
//! Every table has a loader with the same shape: `parse` reads any
//! [`std::io::Read`], `load_file` reads a path. The tables shipped with the
//! application live in [`seed`].

mod catalog;
mod error;
mod inventory;
mod projects;
pub mod seed;

use std::io::Read;

use serde::de::DeserializeOwned;

pub use catalog::{CatalogLoader, CatalogRecord};
pub use error::LoaderError;
pub use inventory::InventoryLoader;
pub use projects::{ProjectLoader, SpendingLoader};

/// The kinds of table this crate knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DataKind {
    Materials,
    Labor,
    Inventory,
    Projects,
    Spending,
}

impl DataKind {
    /// Parses `reader` as this kind of table and returns the number of rows.
    pub fn count_rows<R: Read>(
        &self,
        reader: R,
    ) -> Result<usize, LoaderError> {
        use site_core::CatalogKind;

        Ok(match self {
            DataKind::Materials => CatalogLoader::parse(CatalogKind::Materials, reader)?.item_count(),
            DataKind::Labor => CatalogLoader::parse(CatalogKind::Labor, reader)?.item_count(),
            DataKind::Inventory => InventoryLoader::parse(reader)?.len(),
            DataKind::Projects => ProjectLoader::parse(reader)?.len(),
            DataKind::Spending => SpendingLoader::parse(reader)?.len(),
        })
    }
}

/// Deserializes every row of a headed CSV table.
///
/// Headers are matched by name, surrounding whitespace is trimmed and the
/// column count is strict. The returned row numbers are 1-based, header
/// excluded.
pub(crate) fn read_rows<T, R>(reader: R) -> Result<Vec<(usize, T)>, LoaderError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    csv_reader
        .deserialize::<T>()
        .enumerate()
        .map(|(idx, result)| Ok((idx + 1, result?)))
        .collect()
}
