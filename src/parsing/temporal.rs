//! # Date and Datetime Literals
//!
//! Parsing and rendering for the two temporal scalar encodings:
//!
//! | Dtype | Encoding | Text form |
//! |-------|----------|-----------|
//! | Date | `i32` days since 1970-01-01 | `2024-01-15` |
//! | Datetime | `i64` microseconds since 1970-01-01T00:00:00 | `2024-01-15 13:45:30.250000` |
//!
//! Calendar arithmetic uses the proleptic Gregorian calendar via the
//! days-from-civil / civil-from-days conversions, so both directions are
//! O(1) and exact for every representable date.
//!
//! ## Error Handling
//!
//! All parsing functions return `eyre::Result` with the offending text:
//!
//! ```text
//! "invalid day 30 in date '2023-02-30': month 2 has 28 days"
//! ```

use crate::config::{MICROS_PER_DAY, MICROS_PER_SECOND};
use eyre::{bail, Result, WrapErr};

/// Converts a calendar date to days since the epoch, validating the fields.
pub fn days_from_ymd(year: i32, month: u32, day: u32) -> Result<i32> {
    if !(1..=12).contains(&month) {
        bail!("invalid month {}: must be 1-12", month);
    }
    let max_day = days_in_month(year, month);
    if day < 1 || day > max_day {
        bail!("invalid day {}: month {} has {} days", day, month, max_day);
    }
    let days = days_from_civil(year as i64, month as i64, day as i64);
    i32::try_from(days).wrap_err_with(|| format!("date {}-{}-{} out of range", year, month, day))
}

/// Converts days since the epoch back to `(year, month, day)`.
pub fn ymd_from_days(days: i32) -> (i32, u32, u32) {
    let z = days as i64 + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year as i32, month as u32, day as u32)
}

pub fn parse_date(s: &str) -> Result<i32> {
    let s = s.trim();
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let parts: Vec<&str> = body.split('-').collect();

    if parts.len() != 3 {
        bail!("invalid date format '{}': expected YYYY-MM-DD", s);
    }

    let year: i32 = parts[0]
        .parse()
        .wrap_err_with(|| format!("invalid year in date: '{}'", parts[0]))?;
    let month: u32 = parts[1]
        .parse()
        .wrap_err_with(|| format!("invalid month in date: '{}'", parts[1]))?;
    let day: u32 = parts[2]
        .parse()
        .wrap_err_with(|| format!("invalid day in date: '{}'", parts[2]))?;

    days_from_ymd(sign * year, month, day).wrap_err_with(|| format!("invalid date '{}'", s))
}

/// Parses `HH:MM:SS[.ffffff]` into microseconds since midnight.
///
/// Fractions longer than six digits are truncated to microseconds.
pub fn parse_time(s: &str) -> Result<i64> {
    let s = s.trim();
    let (clock, fraction) = match s.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (s, None),
    };

    let mut fields = clock.split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        bail!("invalid time '{}': expected HH:MM:SS", s);
    };

    let seconds = clock_field(h, "hour", 23)? * 3600
        + clock_field(m, "minute", 59)? * 60
        + clock_field(sec, "second", 59)?;

    let micros = match fraction {
        Some(digits) => fraction_micros(digits)
            .wrap_err_with(|| format!("invalid time '{}'", s))?,
        None => 0,
    };
    Ok(seconds * MICROS_PER_SECOND + micros)
}

fn clock_field(text: &str, unit: &str, max: i64) -> Result<i64> {
    let value: i64 = text
        .parse()
        .wrap_err_with(|| format!("invalid {} '{}'", unit, text))?;
    if !(0..=max).contains(&value) {
        bail!("{} {} out of range 0-{}", unit, value, max);
    }
    Ok(value)
}

fn fraction_micros(digits: &str) -> Result<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("invalid fractional seconds '{}'", digits);
    }
    let scaled = digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(6)
        .fold(0i64, |acc, b| acc * 10 + (b - b'0') as i64);
    Ok(scaled)
}

/// Parses `YYYY-MM-DD[T| ]HH:MM:SS[.ffffff]`, or a bare date as midnight.
pub fn parse_datetime(s: &str) -> Result<i64> {
    let s = s.trim();

    let (date_str, time_str) = match s.find(|c: char| c == 'T' || c == ' ') {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let days = parse_date(date_str)?;
    let time_micros = match time_str {
        Some(t) => parse_time(t)?,
        None => 0,
    };

    date_to_datetime(days)
        .and_then(|m| m.checked_add(time_micros))
        .ok_or_else(|| eyre::eyre!("datetime '{}' out of range", s))
}

pub fn format_date(days: i32) -> String {
    let (year, month, day) = ymd_from_days(days);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

pub fn format_datetime(micros: i64) -> String {
    let days = micros.div_euclid(MICROS_PER_DAY);
    let in_day = micros.rem_euclid(MICROS_PER_DAY);

    let secs = in_day / MICROS_PER_SECOND;
    let frac = in_day % MICROS_PER_SECOND;
    let (hour, minute, second) = (secs / 3600, (secs / 60) % 60, secs % 60);

    let date = match i32::try_from(days) {
        Ok(d) => format_date(d),
        Err(_) => format!("<day {}>", days),
    };

    if frac == 0 {
        format!("{} {:02}:{:02}:{:02}", date, hour, minute, second)
    } else {
        format!(
            "{} {:02}:{:02}:{:02}.{:06}",
            date, hour, minute, second, frac
        )
    }
}

/// Truncates a datetime to the date it falls on.
pub fn datetime_to_date(micros: i64) -> Option<i32> {
    i32::try_from(micros.div_euclid(MICROS_PER_DAY)).ok()
}

/// Widens a date to the datetime at its midnight, or None if it does not fit.
pub fn date_to_datetime(days: i32) -> Option<i64> {
    (days as i64).checked_mul(MICROS_PER_DAY)
}

fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}
