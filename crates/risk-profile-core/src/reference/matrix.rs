use std::collections::{BTreeMap, BTreeSet};

use crate::error::RiskProfileError;
use crate::types::Points;
use crate::RiskProfileResult;

/// Time-horizon score x risk-tolerance score -> portfolio type name.
///
/// Stored normalized as an integer-pair map. The row and column sets are kept
/// separately so a miss can say which axis failed. Lookups are exact; there is
/// no nearest-score fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioMatrix {
    time_horizons: BTreeSet<Points>,
    risk_columns: BTreeSet<Points>,
    cells: BTreeMap<(Points, Points), String>,
}

impl PortfolioMatrix {
    /// An empty matrix with the given risk-tolerance columns.
    pub fn with_columns<I: IntoIterator<Item = Points>>(risk_columns: I) -> Self {
        PortfolioMatrix {
            risk_columns: risk_columns.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Build from `(time_horizon, risk_tolerance, portfolio_type)` triples.
    /// Rows and columns are whatever the triples mention.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = (Points, Points, S)>,
        S: Into<String>,
    {
        let mut matrix = PortfolioMatrix::default();
        for (th, rt, name) in cells {
            matrix.time_horizons.insert(th);
            matrix.risk_columns.insert(rt);
            matrix.cells.entry((th, rt)).or_insert_with(|| name.into());
        }
        matrix
    }

    /// Add a row. Returns `false` and keeps the existing row when the
    /// time-horizon score is already present. Cells for unknown columns and
    /// blank cells are dropped.
    pub fn insert_row<I>(&mut self, time_horizon: Points, cells: I) -> bool
    where
        I: IntoIterator<Item = (Points, String)>,
    {
        if !self.time_horizons.insert(time_horizon) {
            return false;
        }
        for (rt, name) in cells {
            if self.risk_columns.contains(&rt) && !name.trim().is_empty() {
                self.cells.insert((time_horizon, rt), name);
            }
        }
        true
    }

    pub fn has_row(&self, time_horizon: Points) -> bool {
        self.time_horizons.contains(&time_horizon)
    }

    pub fn has_column(&self, risk_tolerance: Points) -> bool {
        self.risk_columns.contains(&risk_tolerance)
    }

    pub fn time_horizons(&self) -> impl Iterator<Item = Points> + '_ {
        self.time_horizons.iter().copied()
    }

    pub fn risk_columns(&self) -> impl Iterator<Item = Points> + '_ {
        self.risk_columns.iter().copied()
    }

    /// Raw cell text, if any.
    pub fn cell(&self, time_horizon: Points, risk_tolerance: Points) -> Option<&str> {
        self.cells
            .get(&(time_horizon, risk_tolerance))
            .map(String::as_str)
    }

    /// Exact-match lookup: row, then column, then cell.
    pub fn lookup(&self, time_horizon: Points, risk_tolerance: Points) -> RiskProfileResult<&str> {
        if !self.has_row(time_horizon) {
            return Err(RiskProfileError::TimeHorizonNotMapped(time_horizon));
        }
        if !self.has_column(risk_tolerance) {
            return Err(RiskProfileError::RiskToleranceNotMapped(risk_tolerance));
        }
        self.cell(time_horizon, risk_tolerance)
            .ok_or(RiskProfileError::EmptyCell {
                time_horizon,
                risk_tolerance,
            })
    }

    /// Every `(time_horizon, risk_tolerance, cell)` in key order.
    pub fn cells(&self) -> impl Iterator<Item = (Points, Points, &str)> + '_ {
        self.cells
            .iter()
            .map(|(&(th, rt), name)| (th, rt, name.as_str()))
    }
}
