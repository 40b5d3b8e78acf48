//! CSV loading for the reference tables.
//!
//! Column names are the external contract. Headers and cells are trimmed.
//! Short rows are accepted and read as blank cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{
    AssetWeights, PlanDetail, PlanRow, PlanTable, PortfolioCatalog, PortfolioMatrix,
    PortfolioTypeRow, ReferenceData, ReferenceTable, ReturnStats,
};
use crate::error::TableIssue;
use crate::types::{AssetClass, Points};

pub const PLAN_COLUMN: &str = "Plan";
pub const POINTS_COLUMN: &str = "Points";
pub const TIME_HORIZON_COLUMN: &str = "Time_horizon_score";
pub const TYPE_NAME_COLUMN: &str = "type_name";
pub const INVESTOR_TYPE_COLUMN: &str = "investor_type";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct RawTable {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl RawTable {
    fn read<R: Read>(reader: R, table: ReferenceTable) -> Result<Self, TableIssue> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| unreadable(table, e))?
            .clone();
        let records = csv_reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| unreadable(table, e))?;

        debug!(%table, columns = headers.len(), rows = records.len(), "read reference table");
        Ok(RawTable { headers, records })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require(&self, name: &str) -> Result<usize, TableIssue> {
        self.column(name).ok_or_else(|| TableIssue::MissingColumn {
            column: name.to_string(),
        })
    }

    fn rows(&self) -> impl Iterator<Item = (usize, &StringRecord)> + '_ {
        // Line 1 is the header.
        self.records.iter().enumerate().map(|(i, record)| {
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(i + 2);
            (line, record)
        })
    }
}

fn unreadable(table: ReferenceTable, err: csv::Error) -> TableIssue {
    TableIssue::Unreadable {
        file: table.file_name().to_string(),
        reason: err.to_string(),
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn open(path: &Path, table: ReferenceTable) -> Result<File, TableIssue> {
    if !path.exists() {
        return Err(TableIssue::NotFound {
            path: path.display().to_string(),
        });
    }
    File::open(path).map_err(|e| TableIssue::Unreadable {
        file: table.file_name().to_string(),
        reason: e.to_string(),
    })
}

/// Whole numbers, written either as `5` or `5.0`.
pub fn parse_whole(raw: &str) -> Option<Points> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<Points>() {
        return Some(value);
    }
    let value = trimmed.parse::<Decimal>().ok()?;
    if value.fract().is_zero() {
        value.to_i32()
    } else {
        None
    }
}

/// Decimal cell; a trailing `%` is tolerated. Blank or unparsable is `None`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim().trim_end_matches('%').trim_end();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Decimal>().ok()
}

/// A header names a risk-tolerance column only when it is the canonical
/// decimal text of an integer.
fn risk_column(header: &str) -> Option<Points> {
    header
        .parse::<Points>()
        .ok()
        .filter(|score| score.to_string() == header)
}

fn invalid(line: usize, column: &str, value: &str) -> TableIssue {
    TableIssue::InvalidValue {
        row: line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

impl PlanTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableIssue> {
        let raw = RawTable::read(reader, ReferenceTable::Plans)?;
        let plan_idx = raw.require(PLAN_COLUMN)?;
        let points_idx = raw.require(POINTS_COLUMN)?;

        let mut rows = Vec::with_capacity(raw.records.len());
        for (line, record) in raw.rows() {
            let points_raw = cell(record, points_idx);
            let points =
                parse_whole(points_raw).ok_or_else(|| invalid(line, POINTS_COLUMN, points_raw))?;

            let details = raw
                .headers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != plan_idx && *i != points_idx)
                .map(|(i, column)| PlanDetail {
                    column: column.to_string(),
                    value: cell(record, i).to_string(),
                })
                .collect();

            rows.push(PlanRow {
                plan: cell(record, plan_idx).to_string(),
                points,
                details,
            });
        }

        Ok(PlanTable::new(rows))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableIssue> {
        let file = open(path.as_ref(), ReferenceTable::Plans)?;
        Self::from_reader(file)
    }
}

// ---------------------------------------------------------------------------
// Risk profile matrix
// ---------------------------------------------------------------------------

impl PortfolioMatrix {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableIssue> {
        let raw = RawTable::read(reader, ReferenceTable::RiskMatrix)?;
        let th_idx = raw.require(TIME_HORIZON_COLUMN)?;

        let mut columns = Vec::new();
        for (i, header) in raw.headers.iter().enumerate() {
            if i == th_idx {
                continue;
            }
            match risk_column(header) {
                Some(score) => columns.push((i, score)),
                None => warn!(column = header, "ignoring non-score column in risk profile matrix"),
            }
        }

        let mut matrix = PortfolioMatrix::with_columns(columns.iter().map(|&(_, score)| score));
        for (line, record) in raw.rows() {
            let th_raw = cell(record, th_idx);
            let time_horizon =
                parse_whole(th_raw).ok_or_else(|| invalid(line, TIME_HORIZON_COLUMN, th_raw))?;
            let cells = columns
                .iter()
                .map(|&(i, score)| (score, cell(record, i).to_string()));
            if !matrix.insert_row(time_horizon, cells) {
                warn!(time_horizon, line, "duplicate time horizon row ignored");
            }
        }

        Ok(matrix)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableIssue> {
        let file = open(path.as_ref(), ReferenceTable::RiskMatrix)?;
        Self::from_reader(file)
    }
}

// ---------------------------------------------------------------------------
// Portfolio catalog
// ---------------------------------------------------------------------------

impl PortfolioCatalog {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableIssue> {
        let raw = RawTable::read(reader, ReferenceTable::PortfolioCatalog)?;
        let name_idx = raw.require(TYPE_NAME_COLUMN)?;
        let desc_idx = raw.column(INVESTOR_TYPE_COLUMN);

        let return_idx: Option<Vec<usize>> = ReturnStats::COLUMNS
            .iter()
            .map(|c| raw.column(c))
            .collect();
        let weight_idx: Option<Vec<usize>> = AssetClass::ALL
            .iter()
            .map(|c| raw.column(c.column()))
            .collect();

        let mut rows = Vec::with_capacity(raw.records.len());
        for (line, record) in raw.rows() {
            let type_name = cell(record, name_idx);
            if type_name.is_empty() {
                warn!(line, "skipping portfolio type row without a name");
                continue;
            }

            let investor_type = desc_idx
                .map(|i| cell(record, i))
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            let returns = return_idx.as_ref().map(|idx| ReturnStats {
                average_annual_return: parse_decimal(cell(record, idx[0])),
                best_year: parse_decimal(cell(record, idx[1])),
                worst_year: parse_decimal(cell(record, idx[2])),
            });

            let weights = weight_idx.as_ref().map(|idx| {
                let mut weights = AssetWeights::default();
                for (class, &i) in AssetClass::ALL.iter().zip(idx) {
                    weights.set(*class, parse_decimal(cell(record, i)));
                }
                weights
            });

            rows.push(PortfolioTypeRow {
                type_name: type_name.to_string(),
                investor_type,
                returns,
                weights,
            });
        }

        Ok(PortfolioCatalog::new(rows))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableIssue> {
        let file = open(path.as_ref(), ReferenceTable::PortfolioCatalog)?;
        Self::from_reader(file)
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

impl ReferenceData {
    /// Load all three tables from a directory. Never fails; problems are
    /// recorded per table.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let path = |table: ReferenceTable| dir.join(table.file_name());

        let data = ReferenceData::new(
            PlanTable::from_path(path(ReferenceTable::Plans)),
            PortfolioMatrix::from_path(path(ReferenceTable::RiskMatrix)),
            PortfolioCatalog::from_path(path(ReferenceTable::PortfolioCatalog)),
        );

        for (table, issue) in data.issues() {
            warn!(%table, %issue, "reference table unavailable");
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_accepts_integral_decimals() {
        assert_eq!(parse_whole("5"), Some(5));
        assert_eq!(parse_whole(" 5.0 "), Some(5));
        assert_eq!(parse_whole("5.5"), None);
        assert_eq!(parse_whole("five"), None);
        assert_eq!(parse_whole(""), None);
    }

    #[test]
    fn test_risk_column_requires_canonical_text() {
        assert_eq!(risk_column("20"), Some(20));
        assert_eq!(risk_column("0"), Some(0));
        assert_eq!(risk_column("020"), None);
        assert_eq!(risk_column("+20"), None);
        assert_eq!(risk_column("Notes"), None);
    }

    #[test]
    fn test_parse_decimal_tolerates_percent_sign() {
        assert_eq!(parse_decimal("6.2"), Some(Decimal::new(62, 1)));
        assert_eq!(parse_decimal("-17.5 %"), Some(Decimal::new(-175, 1)));
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal(""), None);
    }
}
