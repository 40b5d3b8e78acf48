use serde::{Deserialize, Serialize};

use crate::questionnaire::Choice;
use crate::types::Points;

/// A descriptive column carried along for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDetail {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    pub plan: String,
    pub points: Points,
    /// Every column other than `Plan` and `Points`, in file order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<PlanDetail>,
}

impl PlanRow {
    pub fn new(plan: impl Into<String>, points: Points) -> Self {
        PlanRow {
            plan: plan.into(),
            points,
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push(PlanDetail {
            column: column.into(),
            value: value.into(),
        });
        self
    }
}

/// The hypothetical investment plans offered by the last risk-tolerance question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTable {
    rows: Vec<PlanRow>,
}

impl PlanTable {
    pub fn new(rows: Vec<PlanRow>) -> Self {
        PlanTable { rows }
    }

    pub fn rows(&self) -> &[PlanRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact label match, or 1-based position. First matching row wins.
    pub fn select(&self, choice: &Choice) -> Option<&PlanRow> {
        match choice {
            Choice::Index(idx) => idx.checked_sub(1).and_then(|i| self.rows.get(i)),
            Choice::Label(label) => self.rows.iter().find(|r| &r.plan == label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_match_is_exact() {
        let table = PlanTable::new(vec![PlanRow::new("Plan A", 0), PlanRow::new("Plan B", 3)]);
        assert_eq!(table.select(&Choice::from("Plan B")).map(|r| r.points), Some(3));
        assert!(table.select(&Choice::from("plan b")).is_none());
        assert!(table.select(&Choice::from("Plan Q")).is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let table = PlanTable::new(vec![PlanRow::new("Plan A", 2), PlanRow::new("Plan A", 9)]);
        assert_eq!(table.select(&Choice::from("Plan A")).unwrap().points, 2);
        assert_eq!(table.select(&Choice::Index(2)).unwrap().points, 9);
    }
}
