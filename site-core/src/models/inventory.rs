use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub in_stock: Decimal,
    pub min_stock: Decimal,
    pub price: Decimal,
    pub supplier: String,
    pub last_restocked: NaiveDate,
}

/// Stock level of a record relative to its minimum threshold. Derived on
/// demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

/// Acknowledgement produced for a restock request. Nothing about the record
/// changes locally; fulfilment belongs to the supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockRequest {
    pub item_id: i64,
    pub item_name: String,
    pub supplier: String,
    pub status: StockStatus,
    /// Units needed to reach the minimum threshold again.
    pub shortfall: Decimal,
}
