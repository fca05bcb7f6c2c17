use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn all() -> &'static [ProjectStatus] {
        &[
            ProjectStatus::Planning,
            ProjectStatus::InProgress,
            ProjectStatus::OnHold,
            ProjectStatus::Completed,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
        }
    }

    /// Accepts the display label or a compact form (`in-progress`, `onhold`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "planning" => Some(Self::Planning),
            "inprogress" | "active" => Some(Self::InProgress),
            "onhold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    /// Reported completion, 0 to 100.
    pub completion: u8,
    pub tasks: u32,
    pub completed_tasks: u32,
    pub budget: Decimal,
}

impl Project {
    /// Share of tasks done, as a percentage rounded to two places.
    pub fn progress(&self) -> Decimal {
        if self.tasks == 0 {
            return Decimal::ZERO;
        }
        let done = Decimal::from(self.completed_tasks) * Decimal::ONE_HUNDRED;
        crate::calculations::common::round_half_up(done / Decimal::from(self.tasks))
    }
}
