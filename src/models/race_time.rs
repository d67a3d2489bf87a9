//! Race time parsing
//!
//! Race times travel as "HH:MM:SS" strings and are stored verbatim, but
//! every comparison goes through the parsed [`RaceTime`].

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::Duration;

/// Errors produced while parsing a race time string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RaceTimeError {
    #[error("expected 8 characters in HH:MM:SS, got {0}")]
    InvalidLength(usize),

    #[error("expected ':' separators in HH:MM:SS")]
    InvalidSeparator,

    #[error("invalid {0} component")]
    InvalidComponent(&'static str),
}

/// A parsed race time, keeping the string it was parsed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceTime {
    raw: String,
    elapsed: Duration,
}

impl RaceTime {
    /// The time exactly as submitted
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Elapsed race duration
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

fn component(raw: &[u8], name: &'static str, max: i64) -> Result<i64, RaceTimeError> {
    match raw {
        [tens, units] if tens.is_ascii_digit() && units.is_ascii_digit() => {
            let value = i64::from(tens - b'0') * 10 + i64::from(units - b'0');
            if value > max {
                return Err(RaceTimeError::InvalidComponent(name));
            }
            Ok(value)
        }
        _ => Err(RaceTimeError::InvalidComponent(name)),
    }
}

impl FromStr for RaceTime {
    type Err = RaceTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 8 {
            return Err(RaceTimeError::InvalidLength(bytes.len()));
        }
        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(RaceTimeError::InvalidSeparator);
        }

        let hours = component(&bytes[0..2], "hours", 99)?;
        let minutes = component(&bytes[3..5], "minutes", 59)?;
        let seconds = component(&bytes[6..8], "seconds", 59)?;

        Ok(Self {
            raw: s.to_string(),
            elapsed: Duration::hours(hours) + Duration::minutes(minutes) + Duration::seconds(seconds),
        })
    }
}

impl Ord for RaceTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.elapsed.cmp(&other.elapsed)
    }
}

impl PartialOrd for RaceTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
