use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::filter::ALL_FILTER;

/// Where a calendar day begins and ends when timestamps are truncated to a
/// date and when "today" is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DayZone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl DayZone {
    pub fn parse(value: &str) -> Result<Self, String> {
        let raw = value.trim();
        match raw.to_ascii_lowercase().as_str() {
            "" => Err("timezone is empty".to_string()),
            "local" => Ok(Self::Local),
            "utc" | "z" | "gmt" => Ok(Self::Utc),
            _ => parse_fixed_offset(raw)
                .map(Self::Fixed)
                .ok_or_else(|| "expected local, utc, or an offset like +05:30".to_string()),
        }
    }

    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Utc => instant.date_naive(),
            Self::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// Minutes east of UTC, or `None` for the viewer's local zone.
    pub fn offset_minutes(&self) -> Option<i32> {
        match self {
            Self::Local => None,
            Self::Utc => Some(0),
            Self::Fixed(offset) => Some(offset.local_minus_utc() / 60),
        }
    }
}

impl fmt::Display for DayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

fn parse_fixed_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return None,
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn today(clock: &dyn Clock, zone: DayZone) -> NaiveDate {
    zone.date_of(clock.now())
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y, %I:%M:%S %p",
];

/// Calendar date of a stored `createdAt` value as seen from `zone`.
///
/// Timestamps with an offset are converted into `zone`; timestamps without
/// one are already wall-clock time there and keep their own date.
pub fn calendar_day(created_at: &str, zone: DayZone) -> Option<NaiveDate> {
    let raw = created_at.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(zone.date_of(ts.with_timezone(&Utc)));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(zone.date_of(ts.with_timezone(&Utc)));
    }
    if let Some(utc) = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        if let Some(naive) = parse_naive_timestamp(utc) {
            return Some(zone.date_of(Utc.from_utc_datetime(&naive)));
        }
    }
    if let Some(naive) = parse_naive_timestamp(raw) {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn parse_naive_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value.trim()))
}

pub fn parse_order_types_csv(value: &str) -> Result<Vec<String>, String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err("order types list is empty".to_string());
    }
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for part in raw.split(',') {
        let item = part.trim();
        if item.is_empty() {
            continue;
        }
        if item.eq_ignore_ascii_case(ALL_FILTER) {
            return Err(format!("'{item}' is reserved for the all-orders tab"));
        }
        if seen.insert(item.to_lowercase()) {
            out.push(item.to_string());
        }
    }
    if out.is_empty() {
        return Err("order types list is empty".to_string());
    }
    Ok(out)
}
