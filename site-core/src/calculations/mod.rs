//! Calculation modules behind the dashboard views.
//!
//! Each module is a set of pure functions over caller-owned state:
//! - `estimate` - cost estimate ledger and totals
//! - `inventory` - inventory filtering, sorting and stock status
//! - `projects` - project list search and status tabs
//! - `dashboard` - overview summary figures
//! - `common` - money rounding and formatting

pub mod common;
pub mod dashboard;
pub mod estimate;
pub mod inventory;
pub mod projects;

pub use dashboard::DashboardSummary;
pub use estimate::{EstimateBuilder, EstimateError};
pub use inventory::{InventoryError, InventoryFilter, Selector, SortConfig, SortDirection, SortKey};
