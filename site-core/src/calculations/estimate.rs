//! Cost estimate ledger.
//!
//! An [`Estimate`] is an ordered, append/remove-only list of priced lines.
//! Lines are priced from a [`Catalog`] when they are added:
//!
//! | Field         | Source |
//! |---------------|--------|
//! | `unit`        | matched catalog item |
//! | `rate`        | matched catalog item |
//! | `amount`      | `rate × quantity`, fixed at creation |
//! | `description` | caller text, or the item name when blank |
//!
//! All arithmetic uses [`Decimal`], so totals are exact to the cent.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use site_core::calculations::estimate::{EstimateBuilder, total};
//! use site_core::{Catalog, CatalogCategory, CatalogItem, CatalogKind, Estimate};
//!
//! let catalog = Catalog::new(
//!     CatalogKind::Materials,
//!     vec![CatalogCategory {
//!         name: "Bricks and Blocks".to_string(),
//!         items: vec![CatalogItem {
//!             name: "Standard Clay Brick".to_string(),
//!             unit: "Piece".to_string(),
//!             rate: dec!(12),
//!         }],
//!     }],
//! );
//!
//! let mut estimate = Estimate::new("Villa Renovation");
//! let builder = EstimateBuilder::new(&catalog);
//! let line = builder
//!     .add_line(&mut estimate, "Bricks and Blocks", "Standard Clay Brick", dec!(100), "")
//!     .unwrap();
//!
//! assert_eq!(line.amount, dec!(1200));
//! assert_eq!(line.description, "Standard Clay Brick");
//! assert_eq!(total(&estimate), dec!(1200));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::error::ErrorKind;
use crate::sink::{EstimateSink, SinkError};
use crate::{Catalog, CatalogItem, Estimate, EstimateLine, LineId, SavedEstimate};

/// Errors returned by estimate operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("please select a category")]
    MissingCategory,

    #[error("please select an item")]
    MissingItem,

    #[error("item '{item}' not found in category '{category}'")]
    UnknownItem { category: String, item: String },

    #[error("quantity must be greater than zero, got {0}")]
    InvalidQuantity(Decimal),

    #[error("amount for {quantity} × {rate} is too large")]
    AmountOverflow { rate: Decimal, quantity: Decimal },

    #[error("please enter a project name")]
    MissingProjectName,

    #[error("please add at least one item to the estimate")]
    NoLines,

    #[error("line {0} is not part of this estimate")]
    LineNotFound(LineId),

    #[error("estimate sink failed: {0}")]
    Sink(#[from] SinkError),
}

impl EstimateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LineNotFound(_) => ErrorKind::NotFound,
            Self::Sink(_) => ErrorKind::Unavailable,
            _ => ErrorKind::Validation,
        }
    }
}

/// Prices lines against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct EstimateBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> EstimateBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Exact, case-sensitive lookup of `item_name` within `category_name`.
    pub fn lookup(
        &self,
        category_name: &str,
        item_name: &str,
    ) -> Option<&'a CatalogItem> {
        self.catalog.lookup(category_name, item_name)
    }

    /// Prices a new line and appends it to `estimate`.
    ///
    /// # Errors
    ///
    /// * [`EstimateError::MissingCategory`] / [`EstimateError::MissingItem`]
    ///   when either selection is blank.
    /// * [`EstimateError::UnknownItem`] when the catalog has no such item.
    /// * [`EstimateError::InvalidQuantity`] when `quantity` is zero or negative.
    /// * [`EstimateError::AmountOverflow`] when the line amount, or the
    ///   estimate total including it, cannot be represented.
    pub fn add_line<'e>(
        &self,
        estimate: &'e mut Estimate,
        category_name: &str,
        item_name: &str,
        quantity: Decimal,
        description: &str,
    ) -> Result<&'e EstimateLine, EstimateError> {
        if category_name.trim().is_empty() {
            return Err(EstimateError::MissingCategory);
        }
        if item_name.trim().is_empty() {
            return Err(EstimateError::MissingItem);
        }

        let item = self.lookup(category_name, item_name).ok_or_else(|| {
            EstimateError::UnknownItem {
                category: category_name.to_string(),
                item: item_name.to_string(),
            }
        })?;

        if quantity <= Decimal::ZERO {
            return Err(EstimateError::InvalidQuantity(quantity));
        }

        let overflow = || EstimateError::AmountOverflow {
            rate: item.rate,
            quantity,
        };
        let amount = item.rate.checked_mul(quantity).ok_or_else(overflow)?;
        checked_total(estimate)
            .and_then(|running| running.checked_add(amount))
            .ok_or_else(overflow)?;

        let description = if description.trim().is_empty() {
            item_name.to_string()
        } else {
            description.trim().to_string()
        };

        let line = EstimateLine {
            id: estimate.allocate_id(),
            category: category_name.to_string(),
            item: item_name.to_string(),
            description,
            quantity,
            unit: item.unit.clone(),
            rate: item.rate,
            amount,
        };
        debug!(id = %line.id, item = %line.item, amount = %line.amount, "estimate line added");

        Ok(estimate.push(line))
    }
}

/// Removes the line with `id` and returns it.
///
/// # Errors
///
/// [`EstimateError::LineNotFound`] when no such line exists. The estimate is
/// left untouched, so callers may treat this as a no-op.
pub fn remove_line(
    estimate: &mut Estimate,
    id: LineId,
) -> Result<EstimateLine, EstimateError> {
    let removed = estimate.take(id).ok_or(EstimateError::LineNotFound(id))?;
    debug!(id = %removed.id, item = %removed.item, "estimate line removed");
    Ok(removed)
}

fn checked_total(estimate: &Estimate) -> Option<Decimal> {
    estimate
        .lines()
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.amount))
}

/// Sum of every line amount; zero for an empty estimate.
///
/// [`EstimateBuilder::add_line`] refuses lines that would push the total out
/// of range, so the saturation here is never reached by built estimates.
pub fn total(estimate: &Estimate) -> Decimal {
    checked_total(estimate).unwrap_or(Decimal::MAX)
}

/// Checks that `estimate` can be saved and snapshots it.
///
/// # Errors
///
/// * [`EstimateError::MissingProjectName`] when the project name is blank.
/// * [`EstimateError::NoLines`] when the estimate is empty.
pub fn prepare_save(estimate: &Estimate) -> Result<SavedEstimate, EstimateError> {
    if estimate.project_name.trim().is_empty() {
        return Err(EstimateError::MissingProjectName);
    }
    if estimate.is_empty() {
        return Err(EstimateError::NoLines);
    }

    Ok(SavedEstimate {
        project_name: estimate.project_name.trim().to_string(),
        lines: estimate.lines().to_vec(),
        total: total(estimate),
    })
}

/// Validates `estimate` and hands the snapshot to `sink`.
pub async fn save_estimate(
    estimate: &Estimate,
    sink: &dyn EstimateSink,
) -> Result<SavedEstimate, EstimateError> {
    let saved = prepare_save(estimate)?;
    sink.save(saved.clone()).await?;
    debug!(project = %saved.project_name, total = %saved.total, "estimate saved");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::sink::InMemoryEstimateSink;
    use crate::{CatalogCategory, CatalogKind};

    fn item(
        name: &str,
        unit: &str,
        rate: Decimal,
    ) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            unit: unit.to_string(),
            rate,
        }
    }

    fn materials() -> Catalog {
        Catalog::new(
            CatalogKind::Materials,
            vec![
                CatalogCategory {
                    name: "Concrete and Cement".to_string(),
                    items: vec![
                        item("Portland Cement", "Bag", dec!(280)),
                        item("Reinforcement Steel", "Ton", dec!(38000)),
                    ],
                },
                CatalogCategory {
                    name: "Bricks and Blocks".to_string(),
                    items: vec![
                        item("Standard Clay Brick", "Piece", dec!(12)),
                        item("AAC Block", "Piece", dec!(75)),
                    ],
                },
            ],
        )
    }

    // =========================================================================
    // add_line tests
    // =========================================================================

    #[test]
    fn add_line_prices_clay_bricks() {
        let catalog = materials();
        let mut estimate = Estimate::new("Villa");

        let line = EstimateBuilder::new(&catalog)
            .add_line(
                &mut estimate,
                "Bricks and Blocks",
                "Standard Clay Brick",
                dec!(100),
                "",
            )
            .unwrap()
            .clone();

        assert_eq!(line.unit, "Piece");
        assert_eq!(line.rate, dec!(12));
        assert_eq!(line.amount, dec!(1200));
        assert_eq!(line.description, "Standard Clay Brick");
        assert_eq!(line.category, "Bricks and Blocks");
        assert_eq!(estimate.lines(), &[line]);
    }

    #[test]
    fn add_line_amount_is_rate_times_quantity_for_every_item() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        for category in &catalog.categories {
            for catalog_item in &category.items {
                for quantity in [dec!(1), dec!(2.5), dec!(0.333), dec!(1000)] {
                    let line = builder
                        .add_line(&mut estimate, &category.name, &catalog_item.name, quantity, "")
                        .unwrap();

                    assert_eq!(line.amount, catalog_item.rate * quantity);
                    assert_eq!(line.rate, catalog_item.rate);
                    assert_eq!(line.unit, catalog_item.unit);
                }
            }
        }
    }

    #[test]
    fn add_line_keeps_explicit_description() {
        let catalog = materials();
        let mut estimate = Estimate::new("Villa");

        let line = EstimateBuilder::new(&catalog)
            .add_line(
                &mut estimate,
                "Concrete and Cement",
                "Portland Cement",
                dec!(40),
                "  Ground floor slab ",
            )
            .unwrap();

        assert_eq!(line.description, "Ground floor slab");
    }

    #[test]
    fn add_line_preserves_insertion_order_and_unique_ids() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        builder
            .add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(1), "")
            .unwrap();
        builder
            .add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(1), "")
            .unwrap();
        builder
            .add_line(&mut estimate, "Concrete and Cement", "Portland Cement", dec!(1), "")
            .unwrap();

        let items: Vec<_> = estimate.lines().iter().map(|l| l.item.as_str()).collect();
        assert_eq!(items, vec!["AAC Block", "AAC Block", "Portland Cement"]);

        let ids: Vec<_> = estimate.lines().iter().map(|l| l.id).collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn add_line_rejects_blank_selections() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        assert_eq!(
            builder.add_line(&mut estimate, "", "AAC Block", dec!(1), ""),
            Err(EstimateError::MissingCategory)
        );
        assert_eq!(
            builder.add_line(&mut estimate, "Bricks and Blocks", " ", dec!(1), ""),
            Err(EstimateError::MissingItem)
        );
        assert!(estimate.is_empty());
    }

    #[test]
    fn add_line_rejects_lookup_miss() {
        let catalog = materials();
        let mut estimate = Estimate::new("Villa");

        let result = EstimateBuilder::new(&catalog).add_line(
            &mut estimate,
            "Bricks and Blocks",
            "Portland Cement",
            dec!(1),
            "",
        );

        assert_eq!(
            result,
            Err(EstimateError::UnknownItem {
                category: "Bricks and Blocks".to_string(),
                item: "Portland Cement".to_string(),
            })
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn add_line_rejects_non_positive_quantity() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        assert_eq!(
            builder.add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(0), ""),
            Err(EstimateError::InvalidQuantity(dec!(0)))
        );
        assert_eq!(
            builder.add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(-3), ""),
            Err(EstimateError::InvalidQuantity(dec!(-3)))
        );
        assert!(estimate.is_empty());
    }

    #[test]
    fn add_line_rejects_amount_out_of_range() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        let result = builder.add_line(
            &mut estimate,
            "Concrete and Cement",
            "Reinforcement Steel",
            Decimal::MAX,
            "",
        );

        assert_eq!(
            result,
            Err(EstimateError::AmountOverflow {
                rate: dec!(38000),
                quantity: Decimal::MAX,
            })
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
        assert!(estimate.is_empty());
    }

    #[test]
    fn add_line_rejects_line_that_would_overflow_the_total() {
        let catalog = Catalog::new(
            CatalogKind::Materials,
            vec![CatalogCategory {
                name: "Bulk".to_string(),
                items: vec![item("Unit", "Piece", dec!(1))],
            }],
        );
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");
        builder
            .add_line(&mut estimate, "Bulk", "Unit", Decimal::MAX, "")
            .unwrap();

        let result = builder.add_line(&mut estimate, "Bulk", "Unit", dec!(1), "");

        assert!(matches!(result, Err(EstimateError::AmountOverflow { .. })));
        assert_eq!(estimate.len(), 1);
        assert_eq!(total(&estimate), Decimal::MAX);
    }

    // =========================================================================
    // total / remove_line tests
    // =========================================================================

    #[test]
    fn total_of_empty_estimate_is_zero() {
        assert_eq!(total(&Estimate::new("Villa")), Decimal::ZERO);
    }

    #[test]
    fn total_is_independent_of_addition_order() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let picks = [
            ("Bricks and Blocks", "AAC Block", dec!(3)),
            ("Concrete and Cement", "Reinforcement Steel", dec!(1.25)),
            ("Concrete and Cement", "Portland Cement", dec!(7)),
        ];

        let mut forward = Estimate::new("Villa");
        for (category, name, quantity) in picks {
            builder.add_line(&mut forward, category, name, quantity, "").unwrap();
        }
        let mut backward = Estimate::new("Villa");
        for (category, name, quantity) in picks.iter().rev() {
            builder.add_line(&mut backward, category, name, *quantity, "").unwrap();
        }

        // 225 + 47500 + 1960
        assert_eq!(total(&forward), dec!(49685));
        assert_eq!(total(&forward), total(&backward));
    }

    #[test]
    fn total_stays_exact_for_cent_amounts() {
        let catalog = Catalog::new(
            CatalogKind::Materials,
            vec![CatalogCategory {
                name: "Fasteners".to_string(),
                items: vec![item("Nail", "Piece", dec!(0.10))],
            }],
        );
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        for _ in 0..3 {
            builder.add_line(&mut estimate, "Fasteners", "Nail", dec!(1), "").unwrap();
        }

        assert_eq!(total(&estimate), dec!(0.30));
    }

    #[test]
    fn remove_line_excludes_exactly_that_line() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        builder
            .add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(2), "")
            .unwrap();
        let steel = builder
            .add_line(&mut estimate, "Concrete and Cement", "Reinforcement Steel", dec!(1), "")
            .unwrap()
            .id;
        let before = total(&estimate);

        let removed = remove_line(&mut estimate, steel).unwrap();

        assert_eq!(removed.amount, dec!(38000));
        assert_eq!(total(&estimate), before - removed.amount);
        assert_eq!(estimate.len(), 1);
        assert!(estimate.line(steel).is_none());
    }

    #[test]
    fn remove_missing_line_leaves_total_unchanged() {
        let catalog = materials();
        let mut estimate = Estimate::new("Villa");
        EstimateBuilder::new(&catalog)
            .add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(2), "")
            .unwrap();
        let before = total(&estimate);

        let result = remove_line(&mut estimate, LineId::new(99));

        assert_eq!(result, Err(EstimateError::LineNotFound(LineId::new(99))));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(total(&estimate), before);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let catalog = materials();
        let builder = EstimateBuilder::new(&catalog);
        let mut estimate = Estimate::new("Villa");

        let first = builder
            .add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(1), "")
            .unwrap()
            .id;
        remove_line(&mut estimate, first).unwrap();
        let second = builder
            .add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(1), "")
            .unwrap()
            .id;

        assert_ne!(first, second);
    }

    // =========================================================================
    // save tests
    // =========================================================================

    #[test]
    fn prepare_save_requires_project_name() {
        let catalog = materials();
        let mut estimate = Estimate::new("");
        EstimateBuilder::new(&catalog)
            .add_line(&mut estimate, "Bricks and Blocks", "AAC Block", dec!(1), "")
            .unwrap();

        assert_eq!(prepare_save(&estimate), Err(EstimateError::MissingProjectName));
    }

    #[test]
    fn prepare_save_requires_lines() {
        let estimate = Estimate::new("Office Building");

        let result = prepare_save(&estimate);

        assert_eq!(result, Err(EstimateError::NoLines));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn save_estimate_hands_snapshot_to_sink() {
        let catalog = materials();
        let sink = InMemoryEstimateSink::new();
        let mut estimate = Estimate::new("Office Building");
        EstimateBuilder::new(&catalog)
            .add_line(&mut estimate, "Concrete and Cement", "Portland Cement", dec!(10), "")
            .unwrap();

        let saved = save_estimate(&estimate, &sink).await.unwrap();

        assert_eq!(saved.total, dec!(2800));
        assert_eq!(saved.lines.len(), 1);
        assert_eq!(sink.list().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn save_estimate_does_not_reach_sink_when_invalid() {
        let sink = InMemoryEstimateSink::new();

        let result = save_estimate(&Estimate::new("Office Building"), &sink).await;

        assert_eq!(result, Err(EstimateError::NoLines));
        assert!(sink.list().await.unwrap().is_empty());
    }
}
