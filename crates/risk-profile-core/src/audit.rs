//! Coverage audit of the reference data against the questionnaire.
//!
//! Enumerates every score pair a session can actually produce and reports
//! pairs that would end in a lookup miss. Read-only: nothing is patched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::questionnaire::{Questionnaire, ScoreTable, Section, RISK_TOLERANCE_CAP};
use crate::reference::{normalize_type_name, ReferenceData, ReferenceTable};
use crate::resolver::SHORT_HORIZON_THRESHOLD;
use crate::types::Points;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub time_horizon: Points,
    pub risk_tolerance: Points,
    pub problem: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatus {
    pub table: ReferenceTable,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Achievable time-horizon scores that go through the matrix.
    pub time_horizon_scores: Vec<Points>,
    /// Achievable risk-tolerance scores after the cap.
    pub risk_tolerance_scores: Vec<Points>,
    /// Highest risk-tolerance sum before the cap.
    pub max_raw_risk_tolerance: Points,
    /// Whether plan points were part of the enumeration.
    pub plans_included: bool,
    pub missing_cells: Vec<ScorePair>,
    /// Matrix types reachable by some session but absent from the catalog.
    pub unknown_portfolio_types: Vec<String>,
    pub unavailable_tables: Vec<TableStatus>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing_cells.is_empty()
            && self.unknown_portfolio_types.is_empty()
            && !self
                .unavailable_tables
                .iter()
                .any(|t| t.table != ReferenceTable::Plans)
    }
}

/// Every sum reachable by picking one option from each table.
pub fn achievable_sums<'a, I>(tables: I) -> BTreeSet<Points>
where
    I: IntoIterator<Item = &'a ScoreTable>,
{
    tables.into_iter().fold(BTreeSet::from([0]), |sums, table| {
        let next: BTreeSet<Points> = sums
            .iter()
            .flat_map(|s| table.options().iter().map(move |o| s.saturating_add(o.points)))
            .collect();
        next
    })
}

pub fn audit(questionnaire: &Questionnaire, reference: &ReferenceData) -> CoverageReport {
    let time_horizon_scores: Vec<Points> = achievable_sums(
        questionnaire
            .section(Section::TimeHorizon)
            .map(|q| &q.options),
    )
    .into_iter()
    .filter(|&s| s >= SHORT_HORIZON_THRESHOLD)
    .collect();

    let plan_points: BTreeSet<Points> = match reference.plans() {
        Ok(table) if !table.is_empty() => table.rows().iter().map(|r| r.points).collect(),
        _ => BTreeSet::from([0]),
    };
    let plans_included = reference.plans().map(|t| !t.is_empty()).unwrap_or(false);

    let raw_sums: BTreeSet<Points> = achievable_sums(
        questionnaire
            .section(Section::RiskTolerance)
            .map(|q| &q.options),
    )
    .iter()
    .flat_map(|s| plan_points.iter().map(move |p| s.saturating_add(*p)))
    .collect();
    let max_raw_risk_tolerance = raw_sums.iter().next_back().copied().unwrap_or(0);
    let risk_tolerance_scores: Vec<Points> = raw_sums
        .iter()
        .map(|&s| s.min(RISK_TOLERANCE_CAP))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let unavailable_tables = reference
        .issues()
        .into_iter()
        .map(|(table, issue)| TableStatus {
            table,
            issue: issue.to_string(),
        })
        .collect();

    let mut missing_cells = Vec::new();
    let mut unknown_types = BTreeSet::new();
    if let Ok(matrix) = reference.matrix() {
        for &th in &time_horizon_scores {
            for &rt in &risk_tolerance_scores {
                match matrix.lookup(th, rt) {
                    Ok(cell) => {
                        if let Ok(catalog) = reference.catalog() {
                            if !catalog.contains(cell) {
                                unknown_types.insert(normalize_type_name(cell));
                            }
                        }
                    }
                    Err(err) => missing_cells.push(ScorePair {
                        time_horizon: th,
                        risk_tolerance: rt,
                        problem: err.to_string(),
                    }),
                }
            }
        }
    }

    CoverageReport {
        time_horizon_scores,
        risk_tolerance_scores,
        max_raw_risk_tolerance,
        plans_included,
        missing_cells,
        unknown_portfolio_types: unknown_types.into_iter().collect(),
        unavailable_tables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievable_time_horizon_sums() {
        let q = Questionnaire::standard();
        let sums = achievable_sums(q.section(Section::TimeHorizon).map(|q| &q.options));
        // q1 {1,3,7,10} x q2 {0,1,4,8}
        assert_eq!(sums.len(), 13);
        assert_eq!(sums.iter().next().copied(), Some(1));
        assert_eq!(sums.iter().next_back().copied(), Some(18));
        assert!(!sums.contains(&16));
    }

    #[test]
    fn test_achievable_sums_of_nothing_is_zero() {
        let sums = achievable_sums(std::iter::empty::<&ScoreTable>());
        assert_eq!(sums, BTreeSet::from([0]));
    }
}
