use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::business_date::{BusinessDateQuery, BusinessDateResponse},
    services::business_time::resolve_business_date,
    state::AppState,
    utils::time::{format_utc_seconds, now_in_timezone},
    validation::rules::{parse_positive_count, parse_utc_instant},
};

/// Validated form of [`BusinessDateQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessDateParams {
    pub days: Option<u32>,
    pub hours: Option<u32>,
    pub date: Option<DateTime<Utc>>,
}

impl TryFrom<&BusinessDateQuery> for BusinessDateParams {
    type Error = AppError;

    fn try_from(query: &BusinessDateQuery) -> Result<Self, Self::Error> {
        if query.days.is_none() && query.hours.is_none() {
            return Err(AppError::InvalidParameters(
                "At least one of 'days' or 'hours' must be provided.".into(),
            ));
        }

        let days = query
            .days
            .as_deref()
            .map(|raw| parse_positive_count("days", raw))
            .transpose()?;
        let hours = query
            .hours
            .as_deref()
            .map(|raw| parse_positive_count("hours", raw))
            .transpose()?;
        let date = query.date.as_deref().map(parse_utc_instant).transpose()?;

        Ok(Self { days, hours, date })
    }
}

pub async fn get_business_date(
    State(state): State<AppState>,
    query: Result<Query<BusinessDateQuery>, QueryRejection>,
) -> Result<Json<BusinessDateResponse>, AppError> {
    let Query(query) = query?;
    let params = BusinessDateParams::try_from(&query)?;

    let calendar = state.calendar();
    let base = match params.date {
        Some(instant) => instant.with_timezone(&calendar.time_zone),
        None => now_in_timezone(&calendar.time_zone),
    };

    let holidays = state.holidays.fetch().await;
    let result = resolve_business_date(base, params.days, params.hours, &holidays, calendar);

    tracing::info!(
        base = %base,
        days = ?params.days,
        hours = ?params.hours,
        holidays = holidays.len(),
        result = %result,
        "Computed business date"
    );

    Ok(Json(BusinessDateResponse {
        date: format_utc_seconds(&result),
    }))
}
