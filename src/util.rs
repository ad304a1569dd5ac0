use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Format a time of day as "HH:MM".
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Format a minute-of-day value (0..1440) as "HH:MM".
pub fn hhmm_from_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

/// Minute of day for a time (e.g. 09:30 → 570).
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Half-open interval overlap: [a_start, a_end) against [b_start, b_end).
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Event duration in whole minutes, floored at zero for malformed input.
pub fn duration_minutes(start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    end.signed_duration_since(start).num_minutes().max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn formats_hhmm() {
        assert_eq!(format_hhmm(t(9, 5)), "09:05");
        assert_eq!(hhmm_from_minutes(570), "09:30");
    }

    #[test]
    fn overlap_is_half_open() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let at = |h: u32| d.and_time(t(h, 0));
        assert!(overlaps(at(9), at(11), at(10), at(12)));
        // Touching endpoints do not overlap.
        assert!(!overlaps(at(9), at(10), at(10), at(11)));
    }

    #[test]
    fn weekend_check() {
        assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap())); // Saturday
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())); // Monday
    }

    #[test]
    fn malformed_duration_floors_at_zero() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(duration_minutes(d.and_time(t(10, 0)), d.and_time(t(9, 0))), 0);
    }
}
