use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use napi::Result as NapiResult;
use napi_derive::napi;

use risk_profile_core::questionnaire::{AnswerSet, Questionnaire};
use risk_profile_core::reference::ReferenceData;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Reference data cache
// ---------------------------------------------------------------------------

type Cache = Mutex<HashMap<PathBuf, Arc<ReferenceData>>>;

fn cache() -> &'static Cache {
    static CACHE: OnceLock<Cache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Tables for a data directory, read from disk on first use only.
fn reference_data(data_dir: &str) -> NapiResult<Arc<ReferenceData>> {
    let key = PathBuf::from(data_dir);
    let mut tables = cache().lock().map_err(to_napi_error)?;
    let data = tables
        .entry(key)
        .or_insert_with_key(|dir| Arc::new(ReferenceData::load_dir(dir)));
    Ok(Arc::clone(data))
}

// ---------------------------------------------------------------------------
// Questionnaire
// ---------------------------------------------------------------------------

#[napi]
pub fn list_questions() -> NapiResult<String> {
    serde_json::to_string(&Questionnaire::standard()).map_err(to_napi_error)
}

/// Full assessment. Lookup misses and unavailable tables are reported in the
/// result's outcome, not thrown.
#[napi]
pub fn assess(answers_json: String, data_dir: String) -> NapiResult<String> {
    let answers: AnswerSet = serde_json::from_str(&answers_json).map_err(to_napi_error)?;
    let reference = reference_data(&data_dir)?;
    let output = risk_profile_core::assess(&Questionnaire::standard(), &answers, &reference);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[napi]
pub fn resolve_portfolio(
    time_horizon: i32,
    risk_tolerance: i32,
    data_dir: String,
) -> NapiResult<String> {
    let reference = reference_data(&data_dir)?;
    let recommendation = reference
        .resolve(time_horizon, risk_tolerance)
        .map_err(to_napi_error)?;
    serde_json::to_string(&recommendation).map_err(to_napi_error)
}

#[napi]
pub fn audit_reference_data(data_dir: String) -> NapiResult<String> {
    let reference = reference_data(&data_dir)?;
    let report = risk_profile_core::audit::audit(&Questionnaire::standard(), &reference);
    serde_json::to_string(&report).map_err(to_napi_error)
}
