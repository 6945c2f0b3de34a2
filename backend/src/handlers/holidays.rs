use axum::{extract::State, Json};

use crate::{models::business_date::HolidayListResponse, state::AppState};

/// Holidays as currently seen by the provider. An empty list after a failed
/// fetch is expected (the provider fails open).
pub async fn list_holidays(State(state): State<AppState>) -> Json<HolidayListResponse> {
    let holidays = state.holidays.fetch().await;
    Json(HolidayListResponse {
        time_zone: state.calendar().time_zone.to_string(),
        holidays: holidays.iter().copied().collect(),
    })
}
