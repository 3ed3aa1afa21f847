use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use time::Date;

use crate::progress::{Progress, compute_progress};
use crate::schema::SurveySchema;
use crate::state::SurveyState;

pub const JSON_FILENAME: &str = "sre-readiness.json";

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-zA-Z0-9]").expect("static filename pattern"));

/// Reasons an export is refused. The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Please fill in both Application name and PO Name before exporting.")]
    MissingNames,
    #[error("Please complete all questions before exporting. Current progress: {percent}% answered")]
    Incomplete { percent: u8 },
}

/// Checks both export preconditions and returns the progress that satisfied them.
pub fn check_export_ready(
    state: &SurveyState,
    schema: &SurveySchema,
) -> Result<Progress, ExportError> {
    if state.app_name.trim().is_empty() || state.po_name.trim().is_empty() {
        return Err(ExportError::MissingNames);
    }
    let progress = compute_progress(state, schema);
    if !progress.is_complete() {
        return Err(ExportError::Incomplete {
            percent: progress.percent(),
        });
    }
    Ok(progress)
}

/// `sre-readiness-{app}-{YYYY-MM-DD}.csv` with every non-alphanumeric character replaced by `-`.
pub fn csv_filename(app_name: &str, date: Date) -> String {
    let sanitized = UNSAFE_FILENAME_CHARS.replace_all(app_name.trim(), "-");
    format!("sre-readiness-{sanitized}-{date}.csv")
}
