//! Resolves the current calendar date in a canonical timezone.

use time::{Date, OffsetDateTime};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get today's date in `canonical_timezone` (e.g. "Europe/Skopje").
///
/// Transaction generation is driven by calendar dates, so "today" must be
/// evaluated in the user's timezone rather than UTC.
///
/// # Errors
/// This function will return an [Error::InvalidTimezone] if
/// `canonical_timezone` is not a known IANA timezone name.
pub fn local_date(canonical_timezone: &str) -> Result<Date, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|timezone| {
            let now = OffsetDateTime::now_utc();

            now.to_offset(timezone.get_offset_utc(&now).to_utc()).date()
        })
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}
