use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// A successfully parsed date: the UTC instant in milliseconds plus the
/// original text it was parsed from (kept for display and export).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub timestamp_ms: i64,
    pub original: String,
}

/// Parse a heterogeneous date string into a comparable UTC instant.
///
/// Tries, in priority order:
/// 1. `year[-month[-day]]` followed by "BCE"/"BC", converted to an
///    astronomical year via `1 - year`
/// 2. Signed ISO-like `year-month-day`, optional time-of-day and UTC offset,
///    permitting negative or zero years (astronomical year numbering)
/// 3. A fixed list of common formats for ordinary Common-Era dates
///
/// Month and day values are clamped into valid ranges rather than rejected.
/// Returns `None` if no form matches.
#[must_use]
pub fn parse_date(raw: &str) -> Option<ParsedDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let timestamp_ms = parse_bce(trimmed)
        .or_else(|| parse_astronomical(trimmed))
        .or_else(|| parse_common_era(trimmed))?;

    Some(ParsedDate {
        timestamp_ms,
        original: trimmed.to_string(),
    })
}

/// Parse `year[-month[-day]] BCE` (or `BC`), tolerant of separators.
fn parse_bce(text: &str) -> Option<i64> {
    let lower = text.to_lowercase();
    let head = lower
        .strip_suffix("bce")
        .or_else(|| lower.strip_suffix("bc"))?;
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || c == ',' || c == '.');

    let (year, month, day) = split_date_parts(head)?;

    // Astronomical year numbering: 1 BCE is year 0, 44 BCE is year -43
    let astronomical = 1 - year;
    timestamp_from_ymd(astronomical, month.unwrap_or(1), day.unwrap_or(1), NaiveTime::MIN, 0)
}

/// Split an unsigned `year[ sep month[ sep day]]` string into numeric parts.
fn split_date_parts(text: &str) -> Option<(i32, Option<u32>, Option<u32>)> {
    let parts: Vec<&str> = text
        .split(|c: char| c == '-' || c == '/' || c == '.' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    if !parts
        .iter()
        .all(|p| p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let year = parts[0].parse().ok()?;
    let month = parts.get(1).and_then(|p| p.parse().ok());
    let day = parts.get(2).and_then(|p| p.parse().ok());
    Some((year, month, day))
}

/// Parse a signed ISO-like `year-month-day[T| ]HH:MM[:SS][Z|±HH:MM]` form.
///
/// Negative and zero years are accepted (astronomical numbering); an offset
/// shifts the computed instant accordingly.
fn parse_astronomical(text: &str) -> Option<i64> {
    let (date_part, rest) = match text.find(|c| c == 'T' || c == ' ') {
        Some(idx) => (&text[..idx], text[idx + 1..].trim()),
        None => (text, ""),
    };

    let (sign, body) = match date_part.strip_prefix('-') {
        Some(stripped) => (-1, stripped),
        None => (1, date_part.strip_prefix('+').unwrap_or(date_part)),
    };

    let mut pieces = body.split('-');
    let year_digits = pieces.next()?;
    let month_digits = pieces.next()?;
    let day_digits = pieces.next()?;
    if pieces.next().is_some() {
        return None;
    }
    for digits in [year_digits, month_digits, day_digits] {
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    let year = sign * year_digits.parse::<i32>().ok()?;
    let month: u32 = month_digits.parse().ok()?;
    let day: u32 = day_digits.parse().ok()?;

    let (time, offset_seconds) = if rest.is_empty() {
        (NaiveTime::MIN, 0)
    } else {
        parse_time_and_offset(rest)?
    };

    timestamp_from_ymd(year, month, day, time, offset_seconds)
}

/// Split `HH:MM[:SS][.fff][Z|±HH[:MM]]` into a time and an offset in seconds.
fn parse_time_and_offset(text: &str) -> Option<(NaiveTime, i64)> {
    let (time_part, offset_seconds) = if let Some(stripped) =
        text.strip_suffix('Z').or_else(|| text.strip_suffix('z'))
    {
        (stripped, 0)
    } else if let Some(idx) = text.rfind(['+', '-']) {
        let (head, tail) = text.split_at(idx);
        (head, parse_offset(tail)?)
    } else {
        (text, 0)
    };

    Some((parse_hms(time_part)?, offset_seconds))
}

fn parse_offset(text: &str) -> Option<i64> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(stripped) => (-1, stripped),
        None => (1, text.strip_prefix('+')?),
    };

    let (hours_text, minutes_text) = if let Some((h, m)) = body.split_once(':') {
        (h, m)
    } else if body.len() == 4 {
        body.split_at(2)
    } else {
        (body, "0")
    };

    let hours: i64 = hours_text.parse().ok()?;
    let minutes: i64 = minutes_text.parse().ok()?;
    Some(sign * (hours * 3600 + minutes * 60))
}

fn parse_hms(text: &str) -> Option<NaiveTime> {
    // Fractional seconds are accepted but discarded
    let whole = text.split_once('.').map_or(text, |(head, _)| head);

    let mut numbers = whole.split(':');
    let hour: u32 = numbers.next()?.parse().ok()?;
    let minute: u32 = numbers.next()?.parse().ok()?;
    let second: u32 = match numbers.next() {
        Some(digits) => digits.parse().ok()?,
        None => 0,
    };
    if numbers.next().is_some() {
        return None;
    }

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Fallback parsing for ordinary Common-Era date strings.
fn parse_common_era(text: &str) -> Option<i64> {
    if let Ok(instant) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(instant.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    None
}

/// Build a UTC millisecond timestamp, clamping month and day into range.
fn timestamp_from_ymd(
    year: i32,
    month: u32,
    day: u32,
    time: NaiveTime,
    offset_seconds: i64,
) -> Option<i64> {
    let month = month.clamp(1, 12);
    let day = day.clamp(1, days_in_month(year, month));

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let instant = date.and_time(time).and_utc();
    Some(instant.timestamp_millis() - offset_seconds * 1000)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight_ms(year: i32, month: u32, day: u32) -> i64 {
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn test_parse_bce_year_only() {
        let parsed = parse_date("44 BCE").expect("should parse");
        assert_eq!(parsed.timestamp_ms, midnight_ms(-43, 1, 1));
        assert_eq!(parsed.original, "44 BCE");
    }

    #[test]
    fn test_parse_bc_suffix() {
        let parsed = parse_date("44 BC").expect("should parse");
        assert_eq!(parsed.timestamp_ms, midnight_ms(-43, 1, 1));
    }

    #[test]
    fn test_parse_bce_full_date() {
        let parsed = parse_date("0044-03-15 BCE").expect("should parse");
        assert_eq!(parsed.timestamp_ms, midnight_ms(-43, 3, 15));
    }

    #[test]
    fn test_bce_orders_before_common_era() {
        let bce = parse_date("44 BCE").expect("should parse");
        let year_one = parse_date("0001-01-01").expect("should parse");
        assert!(bce.timestamp_ms < year_one.timestamp_ms);
    }

    #[test]
    fn test_signed_negative_year_matches_bce() {
        let signed = parse_date("-0043-03-15").expect("should parse");
        let bce = parse_date("44-03-15 BCE").expect("should parse");
        assert_eq!(signed.timestamp_ms, bce.timestamp_ms);
    }

    #[test]
    fn test_zero_year_is_accepted() {
        let parsed = parse_date("0000-12-31").expect("should parse");
        assert_eq!(parsed.timestamp_ms, midnight_ms(0, 12, 31));
    }

    #[test]
    fn test_offset_shifts_instant() {
        let local = parse_date("2024-01-01T06:00:00+02:00").expect("should parse");
        let utc = parse_date("2024-01-01T04:00:00Z").expect("should parse");
        assert_eq!(local.timestamp_ms, utc.timestamp_ms);
    }

    #[test]
    fn test_negative_offset() {
        let local = parse_date("2024-01-01 20:00:00-05:00").expect("should parse");
        let utc = parse_date("2024-01-02T01:00:00Z").expect("should parse");
        assert_eq!(local.timestamp_ms, utc.timestamp_ms);
    }

    #[test]
    fn test_day_is_clamped_not_rejected() {
        let clamped = parse_date("2001-02-30").expect("should parse");
        assert_eq!(clamped.timestamp_ms, midnight_ms(2001, 2, 28));
    }

    #[test]
    fn test_month_is_clamped_not_rejected() {
        let clamped = parse_date("2000-13-05").expect("should parse");
        assert_eq!(clamped.timestamp_ms, midnight_ms(2000, 12, 5));
    }

    #[test]
    fn test_leap_year_day_clamp() {
        let leap = parse_date("2004-02-31").expect("should parse");
        assert_eq!(leap.timestamp_ms, midnight_ms(2004, 2, 29));
    }

    #[test]
    fn test_common_era_fallback_formats() {
        let long_form = parse_date("January 15, 2020").expect("should parse");
        let slash_form = parse_date("01/15/2020").expect("should parse");
        assert_eq!(long_form.timestamp_ms, midnight_ms(2020, 1, 15));
        assert_eq!(slash_form.timestamp_ms, midnight_ms(2020, 1, 15));
    }

    #[test]
    fn test_datetime_without_zone() {
        let parsed = parse_date("2024-06-01 12:30:00").expect("should parse");
        let expected = midnight_ms(2024, 6, 1) + (12 * 3600 + 30 * 60) * 1000;
        assert_eq!(parsed.timestamp_ms, expected);
    }

    #[test]
    fn test_invalid_inputs_return_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("BCE"), None);
    }

    #[test]
    fn test_original_text_is_trimmed_input() {
        let parsed = parse_date("  44 BCE  ").expect("should parse");
        assert_eq!(parsed.original, "44 BCE");
    }
}
