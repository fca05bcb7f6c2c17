//! Session state for the estimator and inventory views.
//!
//! The core calculations are pure and never notify anyone. This module is the
//! layer that owns the mutable view state, calls into the core for each user
//! action, and reports the outcome through a [`Notifier`]. Errors stop here:
//! validation failures become error notifications, a missing line is only
//! logged.

use std::sync::Arc;

use rust_decimal::Decimal;
use site_core::calculations::estimate::{self, EstimateBuilder, EstimateError};
use site_core::calculations::inventory::{self, InventoryError, InventoryFilter, SortConfig, SortKey};
use site_core::{
    CatalogKind, Catalogs, ErrorKind, Estimate, EstimateLine, EstimateSink, InventoryRecord, LineId,
    Notification, Notifier, RestockRequest, SavedEstimate,
};
use tracing::{info, warn};

/// Turns an error message into a toast sentence: capitalized, with a full stop.
fn sentence(message: &str) -> String {
    let mut chars = message.chars();
    let mut text = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if !text.ends_with('.') {
        text.push('.');
    }
    text
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// One cost estimate being edited, plus the catalog tab it is priced from.
pub struct EstimateSession {
    estimate: Estimate,
    catalog_kind: CatalogKind,
    notifier: Arc<dyn Notifier>,
}

impl EstimateSession {
    pub fn new(
        project_name: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            estimate: Estimate::new(project_name),
            catalog_kind: CatalogKind::default(),
            notifier,
        }
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    pub fn set_project_name(
        &mut self,
        name: impl Into<String>,
    ) {
        self.estimate.project_name = name.into();
    }

    pub fn catalog_kind(&self) -> CatalogKind {
        self.catalog_kind
    }

    /// Selects which catalog new lines are priced from. Lines already added
    /// keep their rates.
    pub fn switch_catalog(
        &mut self,
        kind: CatalogKind,
    ) {
        self.catalog_kind = kind;
    }

    pub fn total(&self) -> Decimal {
        estimate::total(&self.estimate)
    }

    /// Prices and appends a line from the active catalog.
    ///
    /// Returns the new line's id, or `None` when the input was rejected. In
    /// both cases the user has been notified.
    pub fn add_line(
        &mut self,
        catalogs: &Catalogs,
        category: &str,
        item: &str,
        quantity: Decimal,
        description: &str,
    ) -> Option<LineId> {
        let builder = EstimateBuilder::new(catalogs.get(self.catalog_kind));
        match builder.add_line(&mut self.estimate, category, item, quantity, description) {
            Ok(line) => {
                let id = line.id;
                self.notifier.notify(&Notification::success(
                    "Item Added",
                    format!("{item} has been added to your estimate."),
                ));
                Some(id)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Removes a line. An id that is not in the estimate changes nothing and
    /// is only logged.
    pub fn remove_line(
        &mut self,
        id: LineId,
    ) -> Option<EstimateLine> {
        match estimate::remove_line(&mut self.estimate, id) {
            Ok(line) => {
                self.notifier.notify(&Notification::success(
                    "Item Removed",
                    "The item has been removed from your estimate.",
                ));
                Some(line)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Validates the estimate and hands it to `sink`. The estimate stays in
    /// the session afterwards so it can be edited and saved again.
    pub async fn save(
        &self,
        sink: &dyn EstimateSink,
    ) -> Option<SavedEstimate> {
        match estimate::save_estimate(&self.estimate, sink).await {
            Ok(saved) => {
                self.notifier.notify(&Notification::success(
                    "Estimate Saved",
                    format!("Your estimate for {} has been saved.", saved.project_name),
                ));
                Some(saved)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    fn report(
        &self,
        err: &EstimateError,
    ) {
        match err.kind() {
            ErrorKind::NotFound => {
                warn!(kind = err.kind().as_str(), "{err}; nothing changed");
            }
            kind => {
                warn!(kind = kind.as_str(), "{err}");
                self.notifier.notify(&Notification::error(sentence(&err.to_string())));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Filter and sort state of the inventory table.
pub struct InventoryView {
    pub filter: InventoryFilter,
    sort: Option<SortConfig>,
    notifier: Arc<dyn Notifier>,
}

impl InventoryView {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            filter: InventoryFilter::default(),
            sort: None,
            notifier,
        }
    }

    pub fn sort(&self) -> Option<SortConfig> {
        self.sort
    }

    /// Column-header click.
    pub fn request_sort(
        &mut self,
        key: SortKey,
    ) -> SortConfig {
        let config = SortConfig::toggle(self.sort, key);
        self.sort = Some(config);
        config
    }

    /// Replaces the sort outright, e.g. from a command-line flag.
    pub fn set_sort(
        &mut self,
        config: Option<SortConfig>,
    ) {
        self.sort = config;
    }

    /// The main table: filtered, then sorted when a sort is active.
    pub fn rows<'a>(
        &self,
        records: &'a [InventoryRecord],
    ) -> Vec<&'a InventoryRecord> {
        inventory::query(records, &self.filter, self.sort)
    }

    /// The low-stock panel ignores the table's filter and sort.
    pub fn low_stock_rows<'a>(
        &self,
        records: &'a [InventoryRecord],
    ) -> Vec<&'a InventoryRecord> {
        inventory::low_stock(records)
    }

    /// Sends a restock request for the record with `id`.
    pub fn restock(
        &self,
        records: &[InventoryRecord],
        id: i64,
    ) -> Option<RestockRequest> {
        let result = inventory::find(records, id).and_then(inventory::request_restock);
        match result {
            Ok(request) => {
                info!(
                    item_id = request.item_id,
                    item = %request.item_name,
                    supplier = %request.supplier,
                    shortfall = %request.shortfall,
                    "restock request sent"
                );
                self.notifier.notify(&Notification::success(
                    "Restock Request Sent",
                    "A restock request has been sent to the supplier.",
                ));
                Some(request)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    fn report(
        &self,
        err: &InventoryError,
    ) {
        warn!(kind = err.kind().as_str(), "{err}");
        self.notifier.notify(&Notification::error(sentence(&err.to_string())));
    }
}
