//! Overview figures for the dashboard view.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::inventory::{inventory_value, low_stock};
use crate::{InventoryRecord, MonthlySpend, Project, ProjectStatus};

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub inventory_items: usize,
    pub low_stock_items: usize,
    pub inventory_value: Decimal,
    pub total_project_budget: Decimal,
    pub period_budget: Decimal,
    pub period_actual: Decimal,
}

impl DashboardSummary {
    pub fn compute(
        projects: &[Project],
        inventory: &[InventoryRecord],
        spending: &[MonthlySpend],
    ) -> Self {
        Self {
            total_projects: projects.len(),
            active_projects: projects
                .iter()
                .filter(|p| p.status == ProjectStatus::InProgress)
                .count(),
            inventory_items: inventory.len(),
            low_stock_items: low_stock(inventory).len(),
            inventory_value: inventory_value(inventory),
            total_project_budget: saturating_sum(projects.iter().map(|p| p.budget)),
            period_budget: saturating_sum(spending.iter().map(|m| m.budget)),
            period_actual: saturating_sum(spending.iter().map(|m| m.actual)),
        }
    }

    /// Positive when the period ran over budget.
    pub fn period_variance(&self) -> Decimal {
        self.period_actual.saturating_sub(self.period_budget)
    }
}
