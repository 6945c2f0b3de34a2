//! Business-calendar arithmetic.
//!
//! All operations read the wall clock of the calendar's zone, move it, and
//! resolve the result back to an instant. They are pure and never consult
//! the system clock or the network; holidays are always passed in.
//!
//! The advancers expect an already normalized instant. [`normalize`] is not
//! applied implicitly.

use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday,
};
use chrono_tz::Tz;

use crate::{
    models::{
        calendar::{Normalization, NormalizationReason, WorkingCalendar},
        holiday::HolidaySet,
    },
    utils::time::{at_hour, localize},
};

/// Working-day oracle over a holiday set.
struct WorkingDays<'a> {
    holidays: &'a HolidaySet,
}

impl<'a> WorkingDays<'a> {
    fn new(holidays: &'a HolidaySet) -> Self {
        Self { holidays }
    }

    fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn is_working_day(&self, date: NaiveDate) -> bool {
        !Self::is_weekend(date) && !self.holidays.contains(date)
    }

    /// First working day strictly after `date`.
    fn next_after(&self, date: NaiveDate) -> NaiveDate {
        let mut offset = 1;
        loop {
            let candidate = date + Days::new(offset);
            if self.is_working_day(candidate) {
                return candidate;
            }
            offset += 1;
        }
    }

    /// Last working day strictly before `date`.
    fn previous_before(&self, date: NaiveDate) -> NaiveDate {
        let mut offset = 1;
        loop {
            let candidate = date - Days::new(offset);
            if self.is_working_day(candidate) {
                return candidate;
            }
            offset += 1;
        }
    }

    /// Working day a wall-clock reading belongs to. With a day ending at 24,
    /// midnight after a working day is that day's close, not the next date.
    fn owning_date(&self, local: NaiveDateTime, calendar: &WorkingCalendar) -> NaiveDate {
        let date = local.date();
        if calendar.day_end_hour == 24 && local.time() == NaiveTime::MIN {
            let previous = date - Days::new(1);
            if self.is_working_day(previous) {
                return previous;
            }
        }
        date
    }
}

/// Moves `timestamp` backward to the nearest working instant at or before it.
pub fn normalize(
    timestamp: DateTime<Tz>,
    holidays: &HolidaySet,
    calendar: &WorkingCalendar,
) -> Normalization {
    let days = WorkingDays::new(holidays);
    let timestamp = timestamp.with_timezone(&calendar.time_zone);
    let local = timestamp.naive_local();
    let date = local.date();
    let (hour, minute) = (local.hour(), local.minute());

    let (normalized, reason) = if days.owning_date(local, calendar) != date {
        (local, NormalizationReason::WithinHours)
    } else if !days.is_working_day(date) {
        let reason = if WorkingDays::is_weekend(date) {
            NormalizationReason::Weekend
        } else {
            NormalizationReason::Holiday
        };
        let previous = days.previous_before(date);
        (at_hour(previous, calendar.day_end_hour), reason)
    } else if hour < calendar.morning_start_hour {
        let previous = days.previous_before(date);
        (
            at_hour(previous, calendar.day_end_hour),
            NormalizationReason::BeforeHours,
        )
    } else if (hour == calendar.lunch_start_hour && minute > 0)
        || (hour > calendar.lunch_start_hour && hour < calendar.lunch_end_hour)
    {
        (
            at_hour(date, calendar.lunch_start_hour),
            NormalizationReason::LunchBreak,
        )
    } else if hour > calendar.day_end_hour || (hour == calendar.day_end_hour && minute > 0) {
        (
            at_hour(date, calendar.day_end_hour),
            NormalizationReason::AfterHours,
        )
    } else {
        (local, NormalizationReason::WithinHours)
    };

    tracing::trace!(
        input = %local,
        normalized = %normalized,
        reason = reason.label(),
        "Normalized timestamp to working hours"
    );

    let normalized = match reason {
        NormalizationReason::WithinHours => timestamp,
        _ => localize(&calendar.time_zone, normalized),
    };
    Normalization { normalized, reason }
}

/// Advances a normalized instant by `days` whole business days, keeping its
/// wall-clock time.
pub fn add_business_days(
    timestamp: DateTime<Tz>,
    days: u32,
    holidays: &HolidaySet,
    calendar: &WorkingCalendar,
) -> DateTime<Tz> {
    let timestamp = timestamp.with_timezone(&calendar.time_zone);
    if days == 0 {
        return timestamp;
    }
    let local = timestamp.naive_local();

    let working_days = WorkingDays::new(holidays);
    let mut date = working_days.owning_date(local, calendar);
    let clock = local - date.and_time(NaiveTime::MIN);
    for _ in 0..days {
        date = working_days.next_after(date);
    }

    localize(&calendar.time_zone, date.and_time(NaiveTime::MIN) + clock)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Morning,
    Afternoon,
}

/// Advances a normalized instant by `hours` business hours, consuming the
/// morning and afternoon windows of successive working days.
pub fn add_business_hours(
    timestamp: DateTime<Tz>,
    hours: u32,
    holidays: &HolidaySet,
    calendar: &WorkingCalendar,
) -> DateTime<Tz> {
    let timestamp = timestamp.with_timezone(&calendar.time_zone);
    if hours == 0 {
        return timestamp;
    }
    let local = timestamp.naive_local();

    let days = WorkingDays::new(holidays);
    let mut remaining = Duration::minutes(i64::from(hours) * 60);
    let mut cursor = local;

    // Lunch start is the opening of the afternoon, not a resting point.
    if cursor.hour() == calendar.lunch_start_hour && cursor.minute() == 0 {
        cursor = at_hour(cursor.date(), calendar.lunch_end_hour);
    }

    while remaining > Duration::zero() {
        let date = cursor.date();
        if !days.is_working_day(date) {
            cursor = at_hour(days.next_after(date), calendar.morning_start_hour);
            continue;
        }

        let Some((segment, segment_end)) = current_segment(cursor, calendar) else {
            cursor = next_resting_point(cursor, &days, calendar);
            continue;
        };

        let available = segment_end - cursor;
        if remaining <= available {
            cursor += remaining;
            remaining = Duration::zero();
        } else {
            remaining -= available;
            cursor = match segment {
                Segment::Morning => at_hour(date, calendar.lunch_end_hour),
                Segment::Afternoon => at_hour(days.next_after(date), calendar.morning_start_hour),
            };
        }
    }

    localize(&calendar.time_zone, cursor)
}

/// Segment containing `cursor` and the wall-clock instant it closes at.
fn current_segment(
    cursor: NaiveDateTime,
    calendar: &WorkingCalendar,
) -> Option<(Segment, NaiveDateTime)> {
    let hour = cursor.hour();
    let date = cursor.date();
    if hour >= calendar.morning_start_hour && hour < calendar.lunch_start_hour {
        Some((Segment::Morning, at_hour(date, calendar.lunch_start_hour)))
    } else if hour >= calendar.lunch_end_hour && hour < calendar.day_end_hour {
        Some((Segment::Afternoon, at_hour(date, calendar.day_end_hour)))
    } else {
        None
    }
}

/// Where a cursor outside both segments of a working day resumes.
fn next_resting_point(
    cursor: NaiveDateTime,
    days: &WorkingDays<'_>,
    calendar: &WorkingCalendar,
) -> NaiveDateTime {
    let hour = cursor.hour();
    let date = cursor.date();
    if hour < calendar.morning_start_hour {
        at_hour(date, calendar.morning_start_hour)
    } else if hour < calendar.lunch_end_hour {
        at_hour(date, calendar.lunch_end_hour)
    } else {
        at_hour(days.next_after(date), calendar.morning_start_hour)
    }
}

/// Full pipeline of the business-date endpoint: normalize `base`, then add
/// `days` business days, then `hours` business hours.
pub fn resolve_business_date(
    base: DateTime<Tz>,
    days: Option<u32>,
    hours: Option<u32>,
    holidays: &HolidaySet,
    calendar: &WorkingCalendar,
) -> DateTime<Tz> {
    let Normalization { normalized, reason } = normalize(base, holidays, calendar);
    tracing::debug!(reason = reason.label(), ?days, ?hours, "Resolving business date");

    let mut result = normalized;
    if let Some(days) = days {
        result = add_business_days(result, days, holidays, calendar);
    }
    if let Some(hours) = hours {
        result = add_business_hours(result, hours, holidays, calendar);
    }
    result
}
