use std::fs;

use pretty_assertions::assert_eq;
use risk_profile_core::error::{RiskProfileError, TableIssue};
use risk_profile_core::questionnaire::Choice;
use risk_profile_core::reference::{
    PlanDetail, PlanTable, PortfolioCatalog, PortfolioMatrix, ReferenceData, ReferenceTable,
};
use risk_profile_core::AssetClass;
use rust_decimal_macros::dec;

const PLANS_CSV: &str = "\
Plan,Best-case annual return,Worst-case annual return,Points
Plan A,7.3%,-2.3%,0
Plan B,15.4%,-5.6%,3
Plan C,22.6%,-11.3%,6.0
";

const MATRIX_CSV: &str = "\
Time_horizon_score,19,20,21,Notes
5,Moderate, growth ,Growth,x
6,Growth,Growth,,y
5,Aggressive,Aggressive,Aggressive,dup
";

const CATALOG_CSV: &str = "\
type_name,investor_type,average_annual_return,best_year,worst_year,large_cap_equity,small_cap_equity,international_equity,fixed_income,cash_investments
Growth,For long-term investors.,8.5,31.2,-14.7,35,10,15,35,5
Moderate,Balanced.,7.6,,-7.9,25,abc,10,50,10
";

// ---------------------------------------------------------------------------
// Plan table
// ---------------------------------------------------------------------------

#[test]
fn test_plan_table_keeps_descriptive_columns_in_order() {
    let table = PlanTable::from_reader(PLANS_CSV.as_bytes()).unwrap();
    assert_eq!(table.rows().len(), 3);
    let b = table.select(&Choice::from("Plan B")).unwrap();
    assert_eq!(b.points, 3);
    assert_eq!(
        b.details,
        vec![
            PlanDetail {
                column: "Best-case annual return".into(),
                value: "15.4%".into()
            },
            PlanDetail {
                column: "Worst-case annual return".into(),
                value: "-5.6%".into()
            },
        ]
    );
    assert_eq!(table.select(&Choice::from("Plan C")).map(|r| r.points), Some(6));
}

#[test]
fn test_plan_table_without_points_is_malformed() {
    let err = PlanTable::from_reader("Plan,Risk\nPlan A,low\n".as_bytes()).unwrap_err();
    assert_eq!(
        err,
        TableIssue::MissingColumn {
            column: "Points".into()
        }
    );
}

#[test]
fn test_plan_table_with_non_integer_points_is_malformed() {
    let err = PlanTable::from_reader("Plan,Points\nPlan A,lots\n".as_bytes()).unwrap_err();
    assert!(matches!(err, TableIssue::InvalidValue { row: 2, .. }), "{:?}", err);
}

// ---------------------------------------------------------------------------
// Risk profile matrix
// ---------------------------------------------------------------------------

#[test]
fn test_matrix_reads_score_columns_and_ignores_others() {
    let matrix = PortfolioMatrix::from_reader(MATRIX_CSV.as_bytes()).unwrap();
    assert_eq!(matrix.risk_columns().collect::<Vec<_>>(), vec![19, 20, 21]);
    assert_eq!(matrix.time_horizons().collect::<Vec<_>>(), vec![5, 6]);
    // Cells are trimmed by the reader; case is left alone.
    assert_eq!(matrix.lookup(5, 20).unwrap(), "growth");
    assert_eq!(matrix.lookup(5, 19).unwrap(), "Moderate");
}

#[test]
fn test_matrix_duplicate_rows_keep_first() {
    let matrix = PortfolioMatrix::from_reader(MATRIX_CSV.as_bytes()).unwrap();
    assert_eq!(matrix.lookup(5, 21).unwrap(), "Growth");
}

#[test]
fn test_matrix_blank_cell_is_empty() {
    let matrix = PortfolioMatrix::from_reader(MATRIX_CSV.as_bytes()).unwrap();
    assert!(matches!(
        matrix.lookup(6, 21),
        Err(RiskProfileError::EmptyCell { .. })
    ));
}

#[test]
fn test_matrix_without_time_horizon_column_is_malformed() {
    let err = PortfolioMatrix::from_reader("score,20\n5,Growth\n".as_bytes()).unwrap_err();
    assert_eq!(
        err,
        TableIssue::MissingColumn {
            column: "Time_horizon_score".into()
        }
    );
}

#[test]
fn test_matrix_accepts_whole_decimal_time_horizon() {
    let matrix = PortfolioMatrix::from_reader("Time_horizon_score,20\n5.0,Growth\n".as_bytes())
        .unwrap();
    assert_eq!(matrix.lookup(5, 20).unwrap(), "Growth");
}

#[test]
fn test_matrix_padded_header_is_not_a_score_column() {
    let matrix =
        PortfolioMatrix::from_reader("Time_horizon_score,020\n5,Growth\n".as_bytes()).unwrap();
    assert!(matches!(
        matrix.lookup(5, 20),
        Err(RiskProfileError::RiskToleranceNotMapped(20))
    ));
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[test]
fn test_catalog_row_fields() {
    let catalog = PortfolioCatalog::from_reader(CATALOG_CSV.as_bytes()).unwrap();
    let growth = catalog.get("GROWTH").unwrap();
    assert_eq!(growth.type_name, "Growth");
    assert_eq!(growth.investor_type.as_deref(), Some("For long-term investors."));

    let returns = growth.returns.as_ref().unwrap();
    assert_eq!(returns.average_annual_return, Some(dec!(8.5)));
    assert_eq!(returns.worst_year, Some(dec!(-14.7)));

    let weights = growth.weights.as_ref().unwrap();
    assert_eq!(weights.get(AssetClass::LargeCapEquity), Some(dec!(35)));
    assert_eq!(weights.get(AssetClass::CashInvestments), Some(dec!(5)));
}

#[test]
fn test_catalog_invalid_cells_become_none() {
    let catalog = PortfolioCatalog::from_reader(CATALOG_CSV.as_bytes()).unwrap();
    let moderate = catalog.get("moderate").unwrap();
    assert_eq!(moderate.returns.as_ref().unwrap().best_year, None);
    assert_eq!(
        moderate.weights.as_ref().unwrap().get(AssetClass::SmallCapEquity),
        None
    );
}

#[test]
fn test_catalog_optional_blocks_need_every_column() {
    let csv = "type_name,average_annual_return,best_year,large_cap_equity\nGrowth,8.5,31.2,35\n";
    let catalog = PortfolioCatalog::from_reader(csv.as_bytes()).unwrap();
    let growth = catalog.get("growth").unwrap();
    assert!(growth.returns.is_none());
    assert!(growth.weights.is_none());
    assert!(growth.investor_type.is_none());
}

#[test]
fn test_catalog_without_type_name_is_malformed() {
    let err = PortfolioCatalog::from_reader("name,cash_investments\nGrowth,5\n".as_bytes())
        .unwrap_err();
    assert_eq!(
        err,
        TableIssue::MissingColumn {
            column: "type_name".into()
        }
    );
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_dir_reads_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("question_7.csv"), PLANS_CSV).unwrap();
    fs::write(dir.path().join("Risk_profile_matrix.csv"), MATRIX_CSV).unwrap();
    fs::write(dir.path().join("Portfolio_type.csv"), CATALOG_CSV).unwrap();

    let data = ReferenceData::load_dir(dir.path());
    assert!(data.issues().is_empty());
    assert_eq!(data.plans().unwrap().rows().len(), 3);
}

#[test]
fn test_load_dir_missing_files_are_recorded_per_table() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Portfolio_type.csv"), CATALOG_CSV).unwrap();

    let data = ReferenceData::load_dir(dir.path());
    let tables: Vec<ReferenceTable> = data.issues().iter().map(|(t, _)| *t).collect();
    assert_eq!(tables, vec![ReferenceTable::Plans, ReferenceTable::RiskMatrix]);
    assert!(matches!(data.plans, Err(TableIssue::NotFound { .. })));
    assert!(data.catalog().is_ok());

    match data.matrix() {
        Err(RiskProfileError::Unavailable { table, issue }) => {
            assert_eq!(table, ReferenceTable::RiskMatrix);
            assert!(matches!(issue, TableIssue::NotFound { .. }));
        }
        other => panic!("expected Unavailable, got {:?}", other),
    }
}

#[test]
fn test_load_dir_bad_csv_is_unreadable_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("question_7.csv"), b"Plan,Points\n\"Plan A,0\n").unwrap();

    let data = ReferenceData::load_dir(dir.path());
    assert!(data.plans().is_err());
}
