use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::ReelError;

static RE_SECONDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static RE_CLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})$").unwrap());

/// A trim point, either a count of whole seconds or an `HH:MM:SS` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    Seconds(u64),
    Clock(String),
}

impl TimeValue {
    /// Seconds form, used by the graph-level `trim`/`atrim` filters.
    pub fn as_seconds(&self) -> Result<u64, ReelError> {
        match self {
            TimeValue::Seconds(secs) => Ok(*secs),
            TimeValue::Clock(clock) => clock_to_seconds(clock),
        }
    }

    /// Clock form, used by the input-level `-ss`/`-to`/`-t` flags.
    /// A clock string is passed through untouched.
    pub fn as_clock(&self) -> String {
        match self {
            TimeValue::Seconds(secs) => seconds_to_clock(*secs),
            TimeValue::Clock(clock) => clock.clone(),
        }
    }
}

impl From<u64> for TimeValue {
    fn from(secs: u64) -> Self {
        TimeValue::Seconds(secs)
    }
}

impl FromStr for TimeValue {
    type Err = ReelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if RE_SECONDS.is_match(trimmed) {
            return trimmed
                .parse::<u64>()
                .map(TimeValue::Seconds)
                .map_err(|_| ReelError::InvalidTime {
                    value: value.to_string(),
                });
        }
        clock_to_seconds(trimmed)?;
        Ok(TimeValue::Clock(trimmed.to_string()))
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Seconds(secs) => write!(f, "{secs}"),
            TimeValue::Clock(clock) => f.write_str(clock),
        }
    }
}

pub fn clock_to_seconds(clock: &str) -> Result<u64, ReelError> {
    let invalid = || ReelError::InvalidTime {
        value: clock.to_string(),
    };
    let capture = RE_CLOCK.captures(clock.trim()).ok_or_else(invalid)?;
    let field = |idx: usize| -> Result<u64, ReelError> {
        capture
            .get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(invalid)
    };
    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)
}

/// Hours are not capped, so 100h and beyond render wider than two digits.
pub fn seconds_to_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
