use axum::extract::{Query, State};
use scheduler_core::dates::parse_date;
use scheduler_core::recurrence::next_date as compute_next_date;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NextDateParams {
    pub now: Option<String>,
    pub date: Option<String>,
    pub repeat: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `GET /api/nextdate?now=&date=&repeat=`, answers with the bare `YYYYMMDD` date.
pub async fn next_date(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NextDateParams>,
) -> Result<String, ApiError> {
    let today = match non_empty(params.now) {
        Some(now) => parse_date(&now)?,
        None => state.today(),
    };
    let date = non_empty(params.date)
        .ok_or_else(|| ApiError::BadRequest("date is required".to_string()))?;
    let repeat = non_empty(params.repeat)
        .ok_or_else(|| ApiError::BadRequest("repeat is required".to_string()))?;

    Ok(compute_next_date(today, &date, &repeat)?)
}
