use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::{btree_set, BTreeSet};
use thiserror::Error;

/// Calendar dates, in the working time zone, on which nobody works.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, NaiveDate> {
        self.dates.iter()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HolidayPayloadError {
    #[error("holiday payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accepted upstream shapes: a bare list or a `holidays` wrapper object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HolidayPayload {
    List(Vec<String>),
    Wrapped { holidays: Vec<String> },
}

/// Builds a [`HolidaySet`] from the remote holiday document.
///
/// Entries may be plain dates, RFC 3339 instants (projected onto `time_zone`
/// before the date is taken) or naive ISO date-times. Entries matching none
/// of those are skipped.
pub fn parse_holiday_payload(body: &str, time_zone: Tz) -> Result<HolidaySet, HolidayPayloadError> {
    let entries = match serde_json::from_str::<HolidayPayload>(body)? {
        HolidayPayload::List(entries) => entries,
        HolidayPayload::Wrapped { holidays } => holidays,
    };

    let dates = entries
        .iter()
        .filter_map(|entry| {
            let parsed = parse_holiday_entry(entry.trim(), time_zone);
            if parsed.is_none() {
                tracing::debug!(entry = %entry, "Skipping unparsable holiday entry");
            }
            parsed
        })
        .collect();

    Ok(dates)
}

fn parse_holiday_entry(entry: &str, time_zone: Tz) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(entry, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(entry) {
        return Some(instant.with_timezone(&time_zone).date_naive());
    }
    NaiveDateTime::parse_from_str(entry, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(entry, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|local| local.date())
}
