//! Anchor time zone handling.
//!
//! Every day-granularity comparison in the billing pipeline is made in
//! Colombia local time (UTC-5, no DST). Anchoring both record timestamps and
//! range boundaries to the same zone keeps invoices free of off-by-one-day
//! errors caused by client time zones.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Seconds west of UTC for the anchor zone (Colombia, UTC-5).
const ANCHOR_OFFSET_SECONDS: i32 = 5 * 3600;

/// The fixed reference offset used for all calendar-day normalization.
pub fn anchor_offset() -> FixedOffset {
    FixedOffset::west_opt(ANCHOR_OFFSET_SECONDS).unwrap()
}

/// Calendar day of `timestamp` in the anchor zone.
pub fn anchor_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&anchor_offset()).date_naive()
}

/// Current calendar day in the anchor zone.
pub fn today_in_anchor() -> NaiveDate {
    anchor_date(Utc::now())
}

/// Formats a date the way the business prints them: `dd-mm-yyyy`.
pub fn format_anchor_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_utc_evening_is_previous_anchor_day() {
        // 03:00 UTC is 22:00 the previous day in UTC-5.
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 3, 0, 0).unwrap();
        assert_eq!(
            anchor_date(ts),
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
        );
    }

    #[test]
    fn midday_utc_is_same_anchor_day() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(
            anchor_date(ts),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn anchor_date_formats_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_anchor_date(date), "07-03-2024");
    }
}
