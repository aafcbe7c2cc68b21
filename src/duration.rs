//! Compact duration strings such as `45m`, `1h30m` or `1.5h`
//!
//! A duration is an optional sign followed by one or more `<number><unit>`
//! groups. Numbers may carry a fractional part and units are `ns`, `us`
//! (`µs`, `μs`), `ms`, `s`, `m` and `h`. The bare string `0` needs no unit.

use chrono::Duration;
use thiserror::Error;

const NANOS_PER_MINUTE: f64 = 60.0 * 1e9;
const NANOS_PER_HOUR: f64 = 60.0 * NANOS_PER_MINUTE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

/// Consume leading digits; `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(digit - b'0'))?;
    }
    Some((value, &s[end..]))
}

/// Consume the digits after a decimal point. Precision beyond what fits in
/// a `u64` is dropped, the digits are still consumed.
fn leading_fraction(s: &str) -> (u64, f64, usize, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;
    for digit in s[..end].bytes() {
        if saturated {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => saturated = true,
        }
    }
    (value, scale, end, &s[end..])
}

/// Parse a duration string into a signed [`Duration`].
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(Duration::zero());
    }
    if s.is_empty() {
        return Err(if input.is_empty() { DurationError::Empty } else { invalid() });
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let before = s.len();
        let (mut value, rest) = leading_int(s).ok_or_else(overflow)?;
        let has_int = rest.len() != before;
        s = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (f, sc, consumed, rest) = leading_fraction(rest);
            fraction = f;
            scale = sc;
            has_fraction = consumed > 0;
            s = rest;
        }
        if !has_int && !has_fraction {
            return Err(invalid());
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let unit = &s[..unit_len];
        s = &s[unit_len..];
        let nanos = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        value = value.checked_mul(nanos).ok_or_else(overflow)?;
        if fraction > 0 {
            let extra = (fraction as f64 * (nanos as f64 / scale)) as u64;
            value = value.checked_add(extra).ok_or_else(overflow)?;
        }
        total = total.checked_add(value).ok_or_else(overflow)?;
    }

    if negative {
        if total > i64::MAX as u64 + 1 {
            return Err(overflow());
        }
        Ok(Duration::nanoseconds((total as i64).wrapping_neg()))
    } else {
        let total = i64::try_from(total).map_err(|_| overflow())?;
        Ok(Duration::nanoseconds(total))
    }
}

fn as_nanos_f64(duration: &Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64,
        None => duration.num_milliseconds() as f64 * 1e6,
    }
}

/// Duration as fractional hours.
pub fn hours(duration: &Duration) -> f64 {
    as_nanos_f64(duration) / NANOS_PER_HOUR
}

/// Duration as fractional minutes.
pub fn minutes(duration: &Duration) -> f64 {
    as_nanos_f64(duration) / NANOS_PER_MINUTE
}

/// Compact text for a duration in the grammar [`parse_duration`] reads,
/// e.g. `1h30m`, `-1h` or `250ms`. Zero is `0s`.
pub fn format_duration(duration: &Duration) -> String {
    const UNITS: [(&str, u128); 6] = [
        ("h", 3_600_000_000_000),
        ("m", 60_000_000_000),
        ("s", 1_000_000_000),
        ("ms", 1_000_000),
        ("us", 1_000),
        ("ns", 1),
    ];

    let total = match duration.num_nanoseconds() {
        Some(nanos) => nanos as i128,
        None => duration.num_milliseconds() as i128 * 1_000_000,
    };
    if total == 0 {
        return "0s".to_string();
    }

    let mut text = String::new();
    if total < 0 {
        text.push('-');
    }
    let mut rest = total.unsigned_abs();
    for (unit, size) in UNITS {
        let count = rest / size;
        if count > 0 {
            text.push_str(&format!("{}{}", count, unit));
            rest %= size;
        }
    }
    text
}
