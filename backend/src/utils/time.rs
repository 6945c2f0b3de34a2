use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Wall-clock reading `hour:00:00` on `date`. Hour 24 is the following midnight.
pub fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour))
}

/// Resolves a wall-clock reading in `tz` to an instant.
///
/// Ambiguous readings (DST fall-back) take the earlier instant. Readings that
/// fall into a DST gap move forward past the gap.
pub fn localize(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => instant,
        LocalResult::None => {
            let mut probe = local;
            for _ in 0..24 * 4 {
                probe += Duration::minutes(15);
                if let Some(instant) = tz.from_local_datetime(&probe).earliest() {
                    return instant;
                }
            }
            tz.from_utc_datetime(&local)
        }
    }
}

/// Formats an instant as UTC ISO-8601 with seconds precision and a `Z` suffix.
pub fn format_utc_seconds<T: TimeZone>(instant: &DateTime<T>) -> String {
    instant
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
