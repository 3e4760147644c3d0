//! Strict casts into time values and durations, plus the date format guesser.
//!
//! Dates are guessed by trying a fixed list of layouts in order; the first
//! layout that accepts the whole input wins. The order is part of the
//! contract since some inputs are accepted by more than one layout.
//!
//! Durations follow the familiar literal grammar of a sign and a sequence of
//! decimal numbers with unit suffixes, e.g. `300ms`, `-1.5h` or `2h45m`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::error::{CastError, Result};
use crate::indirect::indirect;
use crate::value::Value;

pub fn try_to_time<T: Into<Value>>(i: T) -> Result<DateTime<FixedOffset>> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to time");

    match value {
        Value::Time(t) => Ok(t),
        Value::Str(s) => string_to_date(&s).map_err(|e| CastError::DateTime(Box::new(e))),
        other => Err(CastError::unsupported(&other, "Time")),
    }
}

pub fn try_to_duration<T: Into<Value>>(i: T) -> Result<TimeDelta> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to duration");

    match value {
        Value::Duration(d) => Ok(d),
        Value::Str(s) => parse_duration(&s),
        other => Err(CastError::unsupported(&other, "Duration")),
    }
}

impl TryFrom<Value> for DateTime<FixedOffset> {
    type Error = CastError;
    fn try_from(value: Value) -> Result<DateTime<FixedOffset>> {
        try_to_time(value)
    }
}
impl TryFrom<Value> for TimeDelta {
    type Error = CastError;
    fn try_from(value: Value) -> Result<TimeDelta> {
        try_to_duration(value)
    }
}

// ------------- Date layouts --------------

/// How a layout learns the offset of the moment it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    /// A numeric offset is part of the format.
    Numeric,
    /// A numeric offset with colon, or a bare `Z` for UTC.
    Zulu,
    /// A zone abbreviation sits at this whitespace separated position.
    Abbreviation(usize),
    /// A numeric offset in the format, followed by an abbreviation at this position.
    NumericAndAbbreviation(usize),
    /// No zone information, the moment is taken to be UTC.
    Utc,
    /// A calendar date, taken to be midnight UTC.
    Date,
}

#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub name: &'static str,
    format: &'static str,
    zone: Zone,
}

impl Layout {
    fn parse(&self, s: &str) -> Option<DateTime<FixedOffset>> {
        match self.zone {
            Zone::Numeric => self.parse_fixed(s),
            Zone::Zulu => {
                if !TIMESTAMP.is_match(s) {
                    return None;
                }
                match s.strip_suffix('Z') {
                    Some(utc) => self.parse_fixed(&format!("{utc}+00:00")),
                    None => self.parse_fixed(s),
                }
            }
            Zone::Abbreviation(at) => {
                let (rest, zone) = split_zone(s, at)?;
                let offset = zone_offset(&zone)?;
                self.parse_naive(&rest)?.and_local_timezone(offset).single()
            }
            Zone::NumericAndAbbreviation(at) => {
                let (rest, zone) = split_zone(s, at)?;
                zone_offset(&zone)?;
                self.parse_fixed(&rest)
            }
            Zone::Utc => self.parse_naive(s).map(|t| t.and_utc().fixed_offset()),
            Zone::Date => NaiveDate::parse_from_str(s, self.format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|t| t.and_utc().fixed_offset()),
        }
    }

    fn parse_fixed(&self, s: &str) -> Option<DateTime<FixedOffset>> {
        let (format, rest) = self.without_weekday(s)?;
        DateTime::parse_from_str(rest, format).ok()
    }

    fn parse_naive(&self, s: &str) -> Option<NaiveDateTime> {
        let (format, rest) = self.without_weekday(s)?;
        NaiveDateTime::parse_from_str(rest, format).ok()
    }

    // A leading weekday only has to be a valid name, it is not checked against the date.
    fn without_weekday<'a>(&self, s: &'a str) -> Option<(&'static str, &'a str)> {
        match self.format.strip_prefix("%a") {
            Some(format) => {
                let name = s.get(..3)?;
                WEEKDAYS
                    .iter()
                    .any(|day| day.eq_ignore_ascii_case(name))
                    .then_some((format, &s[3..]))
            }
            None => Some((self.format, s)),
        }
    }
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// The layouts tried by [`string_to_date`], in order.
pub const LAYOUTS: [Layout; 14] = [
    Layout { name: "RFC3339", format: "%Y-%m-%dT%H:%M:%S%.f%:z", zone: Zone::Zulu },
    Layout { name: "ISO8601", format: "%Y-%m-%dT%H:%M:%S%.f", zone: Zone::Utc },
    Layout { name: "RFC1123Z", format: "%a, %d %b %Y %H:%M:%S%.f %z", zone: Zone::Numeric },
    Layout { name: "RFC1123", format: "%a, %d %b %Y %H:%M:%S%.f", zone: Zone::Abbreviation(5) },
    Layout { name: "RFC822Z", format: "%d %b %y %H:%M %z", zone: Zone::Numeric },
    Layout { name: "RFC822", format: "%d %b %y %H:%M", zone: Zone::Abbreviation(4) },
    Layout { name: "ANSIC", format: "%a %b %e %H:%M:%S%.f %Y", zone: Zone::Utc },
    Layout { name: "UnixDate", format: "%a %b %e %H:%M:%S%.f %Y", zone: Zone::Abbreviation(4) },
    Layout { name: "RubyDate", format: "%a %b %d %H:%M:%S%.f %z %Y", zone: Zone::Numeric },
    Layout { name: "Log", format: "%Y-%m-%d %H:%M:%S%.f %z", zone: Zone::NumericAndAbbreviation(3) },
    Layout { name: "ZoneOffset", format: "%Y-%m-%d %H:%M:%S%.f%:z", zone: Zone::Zulu },
    Layout { name: "ShortYearZone", format: "%d %b %y %H:%M", zone: Zone::Abbreviation(4) },
    Layout { name: "Date", format: "%Y-%m-%d", zone: Zone::Date },
    Layout { name: "LongDate", format: "%d %b %Y", zone: Zone::Date },
];

/// Guesses the layout of `s` and parses it, see [`LAYOUTS`].
pub fn string_to_date(s: &str) -> Result<DateTime<FixedOffset>> {
    parse_date_with(s, &LAYOUTS)
}

pub fn parse_date_with(s: &str, layouts: &[Layout]) -> Result<DateTime<FixedOffset>> {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    for layout in layouts {
        if let Some(t) = layout.parse(&collapsed) {
            trace!(layout = layout.name, "date layout matched");
            return Ok(t);
        }
    }
    Err(CastError::Date { input: s.to_string() })
}

/// Renders a time the way it is logged: `2006-01-02 15:04:05.500 +0000 UTC`.
/// Whole seconds carry no fraction.
/// The result parses back through the log layout.
pub fn format_time(t: &DateTime<FixedOffset>) -> String {
    let zone = if t.offset().local_minus_utc() == 0 {
        String::from("UTC")
    } else {
        t.format("%z").to_string()
    };
    format!("{} {}", t.format("%Y-%m-%d %H:%M:%S%.f %z"), zone)
}

lazy_static! {
    static ref ZONE_ABBREVIATION: Regex =
        Regex::new(r"^(?:UTC|GMT(?:[+-]\d{1,2})?|[A-Z]{3}|[A-Z]{2,4}T|ChST|MeST|WITA|[+-]\d{2}(?:\d{2})?)$").unwrap();
    // fixed width fields, then `Z` or an offset with a colon
    static ref TIMESTAMP: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})$").unwrap();
}

// removes the token at position `at`, returning the remaining text and the token
fn split_zone(s: &str, at: usize) -> Option<(String, String)> {
    let mut tokens: Vec<&str> = s.split(' ').collect();
    if at >= tokens.len() {
        return None;
    }
    let zone = tokens.remove(at).to_string();
    Some((tokens.join(" "), zone))
}

// abbreviations other than GMT offsets carry no offset of their own and resolve to UTC
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    if !ZONE_ABBREVIATION.is_match(zone) {
        return None;
    }
    let signed = if let Some(hours) = zone.strip_prefix("GMT") {
        hours
    } else if zone.starts_with(['+', '-']) {
        zone
    } else {
        ""
    };
    if signed.is_empty() {
        return FixedOffset::east_opt(0);
    }
    let negative = signed.starts_with('-');
    let digits = &signed[1..];
    let (hours, minutes) = if digits.len() == 4 {
        (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?)
    } else {
        (digits.parse::<i32>().ok()?, 0)
    };
    let seconds = hours * 3600 + minutes * 60;
    FixedOffset::east_opt(if negative { -seconds } else { seconds })
}

// ------------- Durations --------------

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

// the magnitude of the most negative duration
const LIMIT: u64 = 1 << 63;

fn unit(u: &str) -> Option<u64> {
    match u {
        "ns" => Some(NANOSECOND),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parses a duration literal such as `300ms`, `-1.5h` or `2h45m`.
pub fn parse_duration(input: &str) -> Result<TimeDelta> {
    let invalid = || CastError::duration(input, "invalid duration");
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }
        let (whole, rest, pre) = leading_int(s).ok_or_else(invalid)?;
        s = rest;
        let (mut fraction, mut scale, mut post) = (0u64, 1.0f64, false);
        if let Some(rest) = s.strip_prefix('.') {
            (fraction, scale, s) = leading_fraction(rest);
            post = s.len() != rest.len();
        }
        if !pre && !post {
            return Err(invalid());
        }

        let end = s.find(|c: char| c == '.' || c.is_ascii_digit()).unwrap_or(s.len());
        if end == 0 {
            return Err(CastError::duration(input, "missing unit in duration"));
        }
        let (suffix, rest) = s.split_at(end);
        s = rest;
        let scale_of_unit = unit(suffix)
            .ok_or_else(|| CastError::duration(input, format!("unknown unit {suffix:?} in duration")))?;

        let mut v = whole.checked_mul(scale_of_unit).filter(|v| *v <= LIMIT).ok_or_else(invalid)?;
        if fraction > 0 {
            v += (fraction as f64 * (scale_of_unit as f64 / scale)) as u64;
            if v > LIMIT {
                return Err(invalid());
            }
        }
        total = total.checked_add(v).filter(|t| *t <= LIMIT).ok_or_else(invalid)?;
    }

    let nanos = if negative {
        -i128::from(total)
    } else {
        i128::from(total)
    };
    i64::try_from(nanos).map(TimeDelta::nanoseconds).map_err(|_| invalid())
}

// consumes leading digits; `None` on overflow
fn leading_int(s: &str) -> Option<(u64, &str, bool)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut v: u64 = 0;
    for digit in s[..end].bytes() {
        v = v.checked_mul(10)?.checked_add(u64::from(digit - b'0'))?;
        if v > LIMIT {
            return None;
        }
    }
    Some((v, &s[end..], end > 0))
}

// consumes leading digits as a fraction; digits beyond what fits are dropped
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (mut v, mut scale, mut overflow) = (0u64, 1.0f64, false);
    for digit in s[..end].bytes() {
        if overflow {
            continue;
        }
        match v.checked_mul(10).and_then(|v| v.checked_add(u64::from(digit - b'0'))) {
            Some(next) if next <= LIMIT => {
                v = next;
                scale *= 10.0;
            }
            _ => overflow = true,
        }
    }
    (v, scale, &s[end..])
}

/// Renders a duration in the literal grammar, e.g. `1h30m0s`, `1.5µs` or `0s`.
pub fn format_duration(d: TimeDelta) -> String {
    let nanos = i128::from(d.num_seconds()) * i128::from(SECOND) + i128::from(d.subsec_nanos());
    let negative = nanos < 0;
    let u = nanos.unsigned_abs();
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if u == 0 {
        return String::from("0s");
    }
    if u < u128::from(SECOND) {
        let (name, digits) = if u < u128::from(MICROSECOND) {
            ("ns", 0)
        } else if u < u128::from(MILLISECOND) {
            ("\u{b5}s", 3)
        } else {
            ("ms", 6)
        };
        out.push_str(&with_fraction(u, digits));
        out.push_str(name);
        return out;
    }
    let seconds = u / u128::from(SECOND);
    let (hours, minutes, seconds) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&with_fraction(seconds * u128::from(SECOND) + u % u128::from(SECOND), 9));
    out.push('s');
    out
}

// `v` scaled down by 10^digits, trailing zeros of the fraction omitted
fn with_fraction(v: u128, digits: u32) -> String {
    let scale = 10u128.pow(digits);
    let (whole, fraction) = (v / scale, v % scale);
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:0width$}", fraction, width = digits as usize);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}
