use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a line inside one [`Estimate`].
///
/// Ids are handed out by the estimate itself and are never reused, even after
/// the line they named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(u64);

impl LineId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A priced line. Unit and rate are copied from the catalog when the line is
/// created, so later catalog changes never reprice it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateLine {
    pub id: LineId,
    pub category: String,
    pub item: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit: String,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// A named, append/remove-only ledger of estimate lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub project_name: String,
    lines: Vec<EstimateLine>,
    next_line_id: u64,
}

impl Estimate {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[EstimateLine] {
        &self.lines
    }

    pub fn line(
        &self,
        id: LineId,
    ) -> Option<&EstimateLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn allocate_id(&mut self) -> LineId {
        self.next_line_id += 1;
        LineId(self.next_line_id)
    }

    pub(crate) fn push(
        &mut self,
        line: EstimateLine,
    ) -> &EstimateLine {
        self.lines.push(line);
        &self.lines[self.lines.len() - 1]
    }

    pub(crate) fn take(
        &mut self,
        id: LineId,
    ) -> Option<EstimateLine> {
        let index = self.lines.iter().position(|line| line.id == id)?;
        Some(self.lines.remove(index))
    }
}

/// The finished estimate handed to an [`crate::EstimateSink`] on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEstimate {
    pub project_name: String,
    pub lines: Vec<EstimateLine>,
    pub total: Decimal,
}
