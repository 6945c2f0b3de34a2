use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::calendar::WorkingCalendar;

/// Raw query of the business-date endpoint. Values stay as strings so the
/// handler can report precise parameter errors.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BusinessDateQuery {
    /// Whole business days to add (positive integer).
    pub days: Option<String>,
    /// Business hours to add (positive integer).
    pub hours: Option<String>,
    /// Base instant, ISO-8601 in UTC with a trailing `Z`. Defaults to now.
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BusinessDateResponse {
    /// Resulting instant in UTC, seconds precision.
    #[schema(example = "2025-04-21T20:00:00Z")]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    pub ok: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HolidayListResponse {
    pub time_zone: String,
    #[schema(value_type = Vec<String>)]
    pub holidays: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalendarResponse {
    pub time_zone: String,
    pub morning_start_hour: u32,
    pub lunch_start_hour: u32,
    pub lunch_end_hour: u32,
    pub day_end_hour: u32,
}

impl From<&WorkingCalendar> for CalendarResponse {
    fn from(value: &WorkingCalendar) -> Self {
        Self {
            time_zone: value.time_zone.to_string(),
            morning_start_hour: value.morning_start_hour,
            lunch_start_hour: value.lunch_start_hour,
            lunch_end_hour: value.lunch_end_hour,
            day_end_hour: value.day_end_hour,
        }
    }
}
