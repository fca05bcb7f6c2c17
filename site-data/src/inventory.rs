//! Inventory snapshot.
//!
//! | Column           | Type    | Notes |
//! |------------------|---------|-------|
//! | `id`             | integer | unique |
//! | `name`           | string  | |
//! | `category`       | string  | |
//! | `unit`           | string  | |
//! | `in_stock`       | decimal | may be fractional (e.g. tons) |
//! | `min_stock`      | decimal | not negative |
//! | `price`          | decimal | not negative |
//! | `supplier`       | string  | |
//! | `last_restocked` | date    | `YYYY-MM-DD` |
//!
//! The snapshot's total value (Σ `in_stock × price`) must fit in a `Decimal`.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use site_core::InventoryRecord;
use tracing::debug;

use crate::error::{LoaderError, open};
use crate::read_rows;

pub struct InventoryLoader;

impl InventoryLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<InventoryRecord>, LoaderError> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut stock_value = Decimal::ZERO;

        for (row, record) in read_rows::<InventoryRecord, _>(reader)? {
            if record.min_stock < Decimal::ZERO {
                return Err(LoaderError::invalid_row(row, "min_stock is negative"));
            }
            if record.price < Decimal::ZERO {
                return Err(LoaderError::invalid_row(row, "price is negative"));
            }
            if !seen.insert(record.id) {
                return Err(LoaderError::DuplicateId(record.id));
            }
            stock_value = record
                .in_stock
                .checked_mul(record.price)
                .and_then(|value| stock_value.checked_add(value))
                .ok_or_else(|| LoaderError::invalid_row(row, "stock value is too large"))?;
            records.push(record);
        }

        debug!(records = records.len(), "inventory loaded");
        Ok(records)
    }

    pub fn load_file(path: &Path) -> Result<Vec<InventoryRecord>, LoaderError> {
        Self::parse(open(path)?)
    }
}
