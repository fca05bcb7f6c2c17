use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Budgeted against actual spend for one reporting month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySpend {
    pub month: String,
    pub budget: Decimal,
    pub actual: Decimal,
}

impl MonthlySpend {
    /// Positive when the month ran over budget.
    pub fn variance(&self) -> Decimal {
        self.actual.saturating_sub(self.budget)
    }
}
