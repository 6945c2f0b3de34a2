use axum::{extract::State, Json};

use crate::{models::business_date::CalendarResponse, state::AppState};

pub async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    Json(CalendarResponse::from(state.calendar()))
}
