mod catalog;
mod estimate;
mod inventory;
mod project;
mod spending;

pub use catalog::{Catalog, CatalogCategory, CatalogItem, CatalogKind, Catalogs};
pub use estimate::{Estimate, EstimateLine, LineId, SavedEstimate};
pub use inventory::{InventoryRecord, RestockRequest, StockStatus};
pub use project::{Project, ProjectStatus};
pub use spending::MonthlySpend;
