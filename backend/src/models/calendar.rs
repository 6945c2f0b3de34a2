//! Working calendar configuration and normalization result types.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Zone used by the default calendar.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Bogota;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("working hours must satisfy 0 <= morning < lunch start < lunch end < day end <= 24 (got {morning}/{lunch_start}/{lunch_end}/{day_end})")]
    InvalidHours {
        morning: u32,
        lunch_start: u32,
        lunch_end: u32,
        day_end: u32,
    },
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
}

/// Fixed parameters of a working day: a morning window and an afternoon
/// window separated by lunch, evaluated on the wall clock of `time_zone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_hour_order"))]
pub struct WorkingCalendar {
    pub time_zone: Tz,
    #[validate(range(max = 23))]
    pub morning_start_hour: u32,
    #[validate(range(min = 1, max = 23))]
    pub lunch_start_hour: u32,
    #[validate(range(min = 1, max = 23))]
    pub lunch_end_hour: u32,
    #[validate(range(min = 1, max = 24))]
    pub day_end_hour: u32,
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            morning_start_hour: 8,
            lunch_start_hour: 12,
            lunch_end_hour: 13,
            day_end_hour: 17,
        }
    }
}

impl WorkingCalendar {
    pub fn new(
        time_zone: Tz,
        morning_start_hour: u32,
        lunch_start_hour: u32,
        lunch_end_hour: u32,
        day_end_hour: u32,
    ) -> Result<Self, CalendarError> {
        let calendar = Self {
            time_zone,
            morning_start_hour,
            lunch_start_hour,
            lunch_end_hour,
            day_end_hour,
        };
        calendar.validate().map_err(|_| CalendarError::InvalidHours {
            morning: morning_start_hour,
            lunch_start: lunch_start_hour,
            lunch_end: lunch_end_hour,
            day_end: day_end_hour,
        })?;
        Ok(calendar)
    }

    /// Same hours as `self`, evaluated in the zone named by `name`.
    pub fn with_time_zone_name(self, name: &str) -> Result<Self, CalendarError> {
        let time_zone: Tz = name
            .parse()
            .map_err(|_| CalendarError::UnknownTimeZone(name.to_string()))?;
        Ok(Self { time_zone, ..self })
    }
}

fn validate_hour_order(calendar: &WorkingCalendar) -> Result<(), ValidationError> {
    let ordered = calendar.morning_start_hour < calendar.lunch_start_hour
        && calendar.lunch_start_hour < calendar.lunch_end_hour
        && calendar.lunch_end_hour < calendar.day_end_hour;
    if ordered {
        Ok(())
    } else {
        Err(ValidationError::new("working_hours_out_of_order"))
    }
}

/// Why a timestamp had to move during normalization. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationReason {
    Weekend,
    Holiday,
    BeforeHours,
    AfterHours,
    LunchBreak,
    WithinHours,
}

impl NormalizationReason {
    pub fn label(&self) -> &'static str {
        match self {
            NormalizationReason::Weekend => "weekend",
            NormalizationReason::Holiday => "holiday",
            NormalizationReason::BeforeHours => "before hours",
            NormalizationReason::AfterHours => "after hours",
            NormalizationReason::LunchBreak => "lunch break",
            NormalizationReason::WithinHours => "within hours",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalization {
    pub normalized: DateTime<Tz>,
    pub reason: NormalizationReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calendar_matches_documented_hours() {
        let calendar = WorkingCalendar::default();
        assert_eq!(calendar.time_zone, chrono_tz::America::Bogota);
        assert_eq!(calendar.morning_start_hour, 8);
        assert_eq!(calendar.lunch_start_hour, 12);
        assert_eq!(calendar.lunch_end_hour, 13);
        assert_eq!(calendar.day_end_hour, 17);
        assert!(calendar.validate().is_ok());
    }

    #[test]
    fn new_accepts_ordered_hours() {
        let calendar = WorkingCalendar::new(chrono_tz::UTC, 9, 13, 14, 18).unwrap();
        assert_eq!(calendar.lunch_end_hour, 14);
    }

    #[test]
    fn new_accepts_day_ending_at_midnight() {
        assert!(WorkingCalendar::new(chrono_tz::UTC, 0, 12, 13, 24).is_ok());
    }

    #[test]
    fn new_rejects_unordered_hours() {
        let err = WorkingCalendar::new(chrono_tz::UTC, 8, 13, 12, 17).unwrap_err();
        assert_eq!(
            err,
            CalendarError::InvalidHours {
                morning: 8,
                lunch_start: 13,
                lunch_end: 12,
                day_end: 17,
            }
        );
    }

    #[test]
    fn new_rejects_empty_lunch() {
        assert!(WorkingCalendar::new(chrono_tz::UTC, 8, 12, 12, 17).is_err());
    }

    #[test]
    fn new_rejects_day_end_past_midnight() {
        assert!(WorkingCalendar::new(chrono_tz::UTC, 8, 12, 13, 25).is_err());
    }

    #[test]
    fn with_time_zone_name_parses_iana_names() {
        let calendar = WorkingCalendar::default()
            .with_time_zone_name("Europe/Madrid")
            .unwrap();
        assert_eq!(calendar.time_zone, chrono_tz::Europe::Madrid);
        assert_eq!(calendar.day_end_hour, 17);
    }

    #[test]
    fn with_time_zone_name_rejects_unknown_zone() {
        let err = WorkingCalendar::default()
            .with_time_zone_name("Mars/Olympus")
            .unwrap_err();
        assert_eq!(err, CalendarError::UnknownTimeZone("Mars/Olympus".into()));
    }

    #[test]
    fn reason_serializes_snake_case() {
        let json = serde_json::to_string(&NormalizationReason::LunchBreak).unwrap();
        assert_eq!(json, "\"lunch_break\"");
        assert_eq!(NormalizationReason::BeforeHours.label(), "before hours");
    }
}
