//! Filtered, sorted, status-annotated views over an inventory snapshot.
//!
//! Nothing here mutates the snapshot: every function borrows the records and
//! returns a fresh ordering of references, so the view can be rebuilt from
//! scratch on every input event.
//!
//! # Stock status
//!
//! | Condition                  | Status       |
//! |----------------------------|--------------|
//! | `in_stock <= 0`            | `OutOfStock` |
//! | `in_stock < min_stock`     | `LowStock`   |
//! | otherwise                  | `InStock`    |
//!
//! Restock requests are accepted for any record that is not `InStock`, in
//! the main list and in the low-stock summary alike.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ErrorKind;
use crate::{InventoryRecord, RestockRequest, StockStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("inventory item {0} not found")]
    RecordNotFound(i64),

    #[error("'{name}' is in stock; no restock needed")]
    RestockNotNeeded { id: i64, name: String },

    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RecordNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Validation,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// A dropdown selection: either the "all" sentinel or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    /// Blank input and the sentinels `All`, `All Categories` and
    /// `All Suppliers` (any case) select everything. Any other text, including
    /// names that merely start with "All", selects that exact value.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        let lowered = trimmed.to_lowercase();
        if matches!(lowered.as_str(), "" | "all" | "all categories" | "all suppliers") {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn matches(
        &self,
        value: &str,
    ) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// The three independent predicates applied by [`filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub search: String,
    pub category: Selector,
    pub supplier: Selector,
}

impl InventoryFilter {
    /// Case-insensitive substring match on name, category or supplier.
    /// An empty search term matches everything.
    pub fn matches_text(
        &self,
        record: &InventoryRecord,
    ) -> bool {
        let term = self.search.to_lowercase();
        term.is_empty()
            || record.name.to_lowercase().contains(&term)
            || record.category.to_lowercase().contains(&term)
            || record.supplier.to_lowercase().contains(&term)
    }

    pub fn matches_category(
        &self,
        record: &InventoryRecord,
    ) -> bool {
        self.category.matches(&record.category)
    }

    pub fn matches_supplier(
        &self,
        record: &InventoryRecord,
    ) -> bool {
        self.supplier.matches(&record.supplier)
    }

    pub fn matches(
        &self,
        record: &InventoryRecord,
    ) -> bool {
        self.matches_text(record) && self.matches_category(record) && self.matches_supplier(record)
    }
}

/// Records accepted by every predicate of `filter`, in their original order.
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
    filter: &InventoryFilter,
) -> Vec<&'a InventoryRecord> {
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    Id,
    Name,
    Category,
    Unit,
    InStock,
    MinStock,
    Price,
    Supplier,
    LastRestocked,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Id,
            SortKey::Name,
            SortKey::Category,
            SortKey::Unit,
            SortKey::InStock,
            SortKey::MinStock,
            SortKey::Price,
            SortKey::Supplier,
            SortKey::LastRestocked,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Unit => "unit",
            Self::InStock => "in-stock",
            Self::MinStock => "min-stock",
            Self::Price => "price",
            Self::Supplier => "supplier",
            Self::LastRestocked => "last-restocked",
        }
    }

    /// Parses the kebab-case name; `_` and case differences are tolerated.
    pub fn parse(s: &str) -> Result<Self, InventoryError> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| InventoryError::UnknownSortKey(s.to_string()))
    }

    fn compare(
        &self,
        a: &InventoryRecord,
        b: &InventoryRecord,
    ) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Category => a.category.cmp(&b.category),
            Self::Unit => a.unit.cmp(&b.unit),
            Self::InStock => a.in_stock.cmp(&b.in_stock),
            Self::MinStock => a.min_stock.cmp(&b.min_stock),
            Self::Price => a.price.cmp(&b.price),
            Self::Supplier => a.supplier.cmp(&b.supplier),
            Self::LastRestocked => a.last_restocked.cmp(&b.last_restocked),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Column-header click behaviour: clicking the column that is already
    /// sorted ascending flips it to descending; every other click sorts the
    /// clicked column ascending.
    pub fn toggle(
        current: Option<SortConfig>,
        key: SortKey,
    ) -> SortConfig {
        match current {
            Some(config) if config.key == key && config.direction == SortDirection::Ascending => {
                Self::descending(key)
            }
            _ => Self::ascending(key),
        }
    }
}

/// Stable sort by `config.key`. Records that compare equal keep their relative
/// order in both directions.
pub fn sort<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
    config: SortConfig,
) -> Vec<&'a InventoryRecord> {
    let mut sorted: Vec<_> = records.into_iter().collect();
    sorted.sort_by(|a, b| match config.direction {
        SortDirection::Ascending => config.key.compare(a, b),
        SortDirection::Descending => config.key.compare(b, a),
    });
    sorted
}

/// Filters, then sorts when a sort is active.
pub fn query<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
    inventory_filter: &InventoryFilter,
    sort_config: Option<SortConfig>,
) -> Vec<&'a InventoryRecord> {
    let filtered = filter(records, inventory_filter);
    match sort_config {
        Some(config) => sort(filtered, config),
        None => filtered,
    }
}

// ---------------------------------------------------------------------------
// Stock status
// ---------------------------------------------------------------------------

pub fn classify(record: &InventoryRecord) -> StockStatus {
    if record.in_stock <= Decimal::ZERO {
        StockStatus::OutOfStock
    } else if record.in_stock < record.min_stock {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// Every record below its minimum threshold, regardless of any active filter.
pub fn low_stock<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>
) -> Vec<&'a InventoryRecord> {
    records
        .into_iter()
        .filter(|record| record.in_stock < record.min_stock)
        .collect()
}

pub fn restock_allowed(record: &InventoryRecord) -> bool {
    classify(record) != StockStatus::InStock
}

/// Builds the acknowledgement for a restock request.
///
/// # Errors
///
/// [`InventoryError::RestockNotNeeded`] when the record is already in stock.
pub fn request_restock(record: &InventoryRecord) -> Result<RestockRequest, InventoryError> {
    let status = classify(record);
    if status == StockStatus::InStock {
        return Err(InventoryError::RestockNotNeeded {
            id: record.id,
            name: record.name.clone(),
        });
    }

    let shortfall = record.min_stock.saturating_sub(record.in_stock).max(Decimal::ZERO);
    debug!(item_id = record.id, %shortfall, "restock requested");

    Ok(RestockRequest {
        item_id: record.id,
        item_name: record.name.clone(),
        supplier: record.supplier.clone(),
        status,
        shortfall,
    })
}

pub fn find(
    records: &[InventoryRecord],
    id: i64,
) -> Result<&InventoryRecord, InventoryError> {
    records
        .iter()
        .find(|record| record.id == id)
        .ok_or(InventoryError::RecordNotFound(id))
}

// ---------------------------------------------------------------------------
// Selector menus and totals
// ---------------------------------------------------------------------------

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Distinct categories in first-seen order.
pub fn categories(records: &[InventoryRecord]) -> Vec<&str> {
    distinct(records.iter().map(|r| r.category.as_str()))
}

/// Distinct suppliers in first-seen order.
pub fn suppliers(records: &[InventoryRecord]) -> Vec<&str> {
    distinct(records.iter().map(|r| r.supplier.as_str()))
}

/// Value of stock on hand: Σ in_stock × price, or `None` when it does not
/// fit in a [`Decimal`].
pub fn checked_inventory_value(records: &[InventoryRecord]) -> Option<Decimal> {
    records.iter().try_fold(Decimal::ZERO, |sum, r| {
        r.in_stock.checked_mul(r.price).and_then(|value| sum.checked_add(value))
    })
}

/// [`checked_inventory_value`], saturating at the `Decimal` bounds. Loaded
/// snapshots are checked against [`checked_inventory_value`] row by row, so
/// they never reach the bound.
pub fn inventory_value(records: &[InventoryRecord]) -> Decimal {
    records.iter().fold(Decimal::ZERO, |sum, r| {
        sum.saturating_add(r.in_stock.saturating_mul(r.price))
    })
}
