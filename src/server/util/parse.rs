use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// Display format used for dates in list rows and exports.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Formats a timestamp as `Y-m-d H:i`.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

/// Parses a user-supplied date or datetime string.
///
/// Accepts RFC 3339, `Y-m-d H:i[:s]` (with a space or `T` separator) and a bare
/// `Y-m-d`, which resolves to midnight UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Largest serial a spreadsheet can hold: 9999-12-31.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Converts a spreadsheet serial date (days since 1899-12-30) to UTC.
///
/// Serials outside `0..=9999-12-31` yield `None`.
pub fn excel_serial_to_datetime(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() || !(0.0..MAX_EXCEL_SERIAL + 1.0).contains(&serial) {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;

    let naive = epoch
        .checked_add_signed(TimeDelta::try_days(days)?)?
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)?;

    Some(Utc.from_utc_datetime(&naive))
}

/// Lowercase, hyphen-separated slug of `value`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Capitalises the first letter of every word.
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Interprets common truthy/falsy spellings used by forms and spreadsheets.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
