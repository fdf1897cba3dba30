use chrono::{Duration, Local, NaiveDate};
use tracing::error;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Check that a string is a zero-padded 24-hour `HH:MM` time
pub fn is_valid_time(time_str: &str) -> bool {
    let bytes = time_str.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit())
        && parse_time(time_str).is_some()
}

/// Round a value to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format hours the way schedules display them (`8`, `4.5`, `0.33`)
pub fn format_hours(hours: f64) -> String {
    format!("{}", hours)
}

/// Hours elapsed between two `HH:MM` clock times.
///
/// An end earlier than the start is taken to be on the following day, so a
/// shift crossing midnight still yields a positive duration. Unparsable input
/// is logged and counts as zero hours.
pub fn hours_between(start: &str, end: &str) -> f64 {
    let (Some((start_hour, start_minute)), Some((end_hour, end_minute))) =
        (parse_time(start), parse_time(end))
    else {
        error!("Error calculating hours between '{}' and '{}'", start, end);
        return 0.0;
    };

    let start_minutes = i64::from(start_hour * 60 + start_minute);
    let mut end_minutes = i64::from(end_hour * 60 + end_minute);
    if end_minutes < start_minutes {
        end_minutes += MINUTES_PER_DAY;
    }

    round2((end_minutes - start_minutes) as f64 / 60.0)
}

/// Parse a `YYYY-MM-DD` week start, falling back to today
fn week_start_or_today(week_start: &str) -> NaiveDate {
    let well_formed = week_start.len() == 10
        && week_start
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });

    well_formed
        .then(|| NaiveDate::parse_from_str(week_start, "%Y-%m-%d").ok())
        .flatten()
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Check that a string is a `YYYY-MM-DD` calendar date
pub fn is_valid_date(date_str: &str) -> bool {
    date_str.len() == 10 && NaiveDate::parse_from_str(date_str, "%Y-%m-%d").is_ok()
}

/// Get the Monday to Saturday date range starting at `week_start` as
/// `DD/MM/YYYY` strings
pub fn week_date_range(week_start: &str) -> (String, String) {
    let start = week_start_or_today(week_start);
    let end = start
        .checked_add_signed(Duration::days(5))
        .unwrap_or(start);

    (
        start.format("%d/%m/%Y").to_string(),
        end.format("%d/%m/%Y").to_string(),
    )
}

/// Get the `DD/MM` date of the day `day_index` days after `week_start`
pub fn day_date(week_start: &str, day_index: usize) -> String {
    let start = week_start_or_today(week_start);
    start
        .checked_add_signed(Duration::days(day_index as i64))
        .unwrap_or(start)
        .format("%d/%m")
        .to_string()
}

/// Today's date as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        // Valid cases
        assert_eq!(parse_time("00:00"), Some((0, 0)));
        assert_eq!(parse_time("12:30"), Some((12, 30)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));

        // Invalid cases
        assert_eq!(parse_time("24:00"), None); // Hour out of range
        assert_eq!(parse_time("12:60"), None); // Minute out of range
        assert_eq!(parse_time("12:30:45"), None); // Too many parts
        assert_eq!(parse_time("12"), None); // Too few parts
        assert_eq!(parse_time("12:ab"), None); // Invalid minute
        assert_eq!(parse_time("ab:30"), None); // Invalid hour
    }

    #[test]
    fn test_is_valid_time() {
        assert!(is_valid_time("07:45"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("7:45"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("07-45"));
        assert!(!is_valid_time(""));
    }

    #[test]
    fn test_hours_between_same_day() {
        assert_eq!(hours_between("07:45", "12:15"), 4.5);
        assert_eq!(hours_between("13:45", "17:15"), 3.5);
        assert_eq!(hours_between("09:00", "09:00"), 0.0);
        // 20 minutes rounds to two decimals
        assert_eq!(hours_between("10:00", "10:20"), 0.33);
    }

    #[test]
    fn test_hours_between_wraps_past_midnight() {
        assert_eq!(hours_between("22:00", "06:00"), 8.0);
        assert_eq!(hours_between("23:30", "00:15"), 0.75);

        // Wrapped result equals the same-day difference plus 24 hours
        let wrapped = hours_between("18:00", "02:00");
        let unwrapped = (2.0 - 18.0) + 24.0;
        assert_eq!(wrapped, unwrapped);
    }

    #[test]
    fn test_hours_between_never_negative() {
        let samples = ["00:00", "05:30", "07:45", "12:15", "13:45", "23:59"];
        for start in samples {
            for end in samples {
                assert!(hours_between(start, end) >= 0.0, "{} -> {}", start, end);
            }
        }
    }

    #[test]
    fn test_hours_between_invalid_input_is_zero() {
        assert_eq!(hours_between("", "12:00"), 0.0);
        assert_eq!(hours_between("07:45", "noon"), 0.0);
        assert_eq!(hours_between("25:00", "26:00"), 0.0);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.0), "8");
        assert_eq!(format_hours(4.5), "4.5");
        assert_eq!(format_hours(0.0), "0");
        assert_eq!(format_hours(0.33), "0.33");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(8.004), 8.0);
        assert_eq!(round2(7.999), 8.0);
        assert_eq!(round2(1.0 / 3.0), 0.33);
    }

    #[test]
    fn test_week_date_range() {
        let (start, end) = week_date_range("2024-03-04");
        assert_eq!(start, "04/03/2024");
        assert_eq!(end, "09/03/2024");

        // Crosses a month boundary
        let (start, end) = week_date_range("2024-02-26");
        assert_eq!(start, "26/02/2024");
        assert_eq!(end, "02/03/2024");
    }

    #[test]
    fn test_week_date_range_falls_back_to_today() {
        let today = Local::now().date_naive();
        let (start, _) = week_date_range("not-a-date");
        assert_eq!(start, today.format("%d/%m/%Y").to_string());

        let (start, _) = week_date_range("");
        assert_eq!(start, today.format("%d/%m/%Y").to_string());
    }

    #[test]
    fn test_day_date() {
        assert_eq!(day_date("2024-03-04", 0), "04/03");
        assert_eq!(day_date("2024-03-04", 5), "09/03");
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date("2024-03-04"));
        assert!(!is_valid_date("2024-3-4"));
        assert!(!is_valid_date("2024-02-30"));
        assert!(!is_valid_date("04/03/2024"));
    }
}
