use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%d %B, %Y %H:%M:%S",
    "%d %B, %Y %H:%M",
    "%d-%B-%Y %H:%M:%S",
    "%d-%B-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B, %Y",
    "%d-%B-%Y",
    "%Y%m%d",
];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
];

const NUMERIC_SEPARATORS: [char; 3] = ['/', '-', '.'];

/// Parses a timestamp written in any of the common formats found in payment exports.
///
/// Numeric dates are read day first (`05/08/2023` is the 5th of August). The month-first reading
/// is only used when the day-first one is not a real date, e.g. `08/25/2023`. Offsets on RFC 3339
/// values are dropped and the wall-clock time as written is kept.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();

    if value.is_empty() {
        return None;
    }

    // chrono's %Y takes any digit count, so day-first numeric dates never reach the format tables.
    if let Some((fields, time)) = numeric_fields(value) {
        let parsed = parse_numeric(&fields, time);

        if parsed.is_some() || fields[0].len() != 4 {
            return parsed;
        }
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_local());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Splits `dd/mm/yyyy[ time]` shaped values into their three date fields and the time text.
fn numeric_fields(value: &str) -> Option<([&str; 3], Option<&str>)> {
    let (date_part, time_part) = match value.split_once(char::is_whitespace) {
        Some((date, time)) => (date, Some(time.trim())),
        None => (value, None)
    };

    let separator = date_part.chars().find(|c| NUMERIC_SEPARATORS.contains(c))?;
    let fields: Vec<&str> = date_part.split(separator).collect();

    let &[first, second, third] = fields.as_slice() else {
        return None;
    };

    let numeric = |field: &str| !field.is_empty() && field.bytes().all(|byte| byte.is_ascii_digit());

    if numeric(first) && numeric(second) && numeric(third) {
        Some(([first, second, third], time_part))
    } else {
        None
    }
}

fn parse_numeric(fields: &[&str; 3], time_part: Option<&str>) -> Option<NaiveDateTime> {
    let date = if fields[0].len() == 4 {
        NaiveDate::from_ymd_opt(fields[0].parse().ok()?, fields[1].parse().ok()?, fields[2].parse().ok()?)?
    } else {
        let year = parse_year(fields[2])?;
        let first: u32 = fields[0].parse().ok()?;
        let second: u32 = fields[1].parse().ok()?;

        NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second))?
    };

    let time = match time_part {
        Some(time) => parse_time(time)?,
        None => NaiveTime::MIN
    };

    Some(date.and_time(time))
}

fn parse_year(field: &str) -> Option<i32> {
    let year: i32 = field.parse().ok()?;

    match field.len() {
        4 => Some(year),
        2 => Some(expand_two_digit_year(year, Utc::now().year())),
        _ => None
    }
}

/// Places a two-digit year in the century that keeps it within 50 years of `current_year`.
pub(crate) fn expand_two_digit_year(year: i32, current_year: i32) -> i32 {
    let expanded = current_year - current_year % 100 + year;

    if expanded >= current_year + 50 {
        expanded - 100
    } else if expanded < current_year - 50 {
        expanded + 100
    } else {
        expanded
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}
