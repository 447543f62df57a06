use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::TimezoneError;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Fixed UTC offset of the practice's wall clock.
///
/// Weekday/hour rules are evaluated in this offset, never in the host locale.
/// Timestamps without an offset are read as practice wall-clock time;
/// timestamps carrying an offset are converted into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeTimezone {
    offset: FixedOffset,
}

impl Default for PracticeTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl PracticeTimezone {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Parses `+HH:MM`, `-HHMM`, `Z` or `UTC`.
    pub fn parse_offset(value: &str) -> Result<Self, TimezoneError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TimezoneError::Empty);
        }
        if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }
        let invalid = || TimezoneError::Invalid(trimmed.to_string());

        let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
            (1, rest)
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (-1, rest)
        } else {
            return Err(invalid());
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Resolves a raw record timestamp into the practice's wall clock.
    pub fn localize(&self, raw: &str) -> Result<DateTime<FixedOffset>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("missing".to_string());
        }
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(with_offset.with_timezone(&self.offset));
        }
        for format in OFFSET_FORMATS {
            if let Ok(with_offset) = DateTime::parse_from_str(trimmed, format) {
                return Ok(with_offset.with_timezone(&self.offset));
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return self
                    .offset
                    .from_local_datetime(&naive)
                    .single()
                    .ok_or_else(|| format!("{:?} does not exist at offset {}", trimmed, self.offset));
            }
        }
        Err(format!("cannot parse {:?} as a date and time", trimmed))
    }
}

impl fmt::Display for PracticeTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike, Weekday};

    use super::*;

    #[test]
    fn parses_offsets() {
        assert_eq!(PracticeTimezone::parse_offset("+00:00").unwrap(), PracticeTimezone::utc());
        assert_eq!(PracticeTimezone::parse_offset("UTC").unwrap(), PracticeTimezone::utc());
        let eastern = PracticeTimezone::parse_offset("-05:00").unwrap();
        assert_eq!(eastern.offset().local_minus_utc(), -5 * 3600);
        let india = PracticeTimezone::parse_offset("+0530").unwrap();
        assert_eq!(india.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn rejects_bad_offsets() {
        assert_eq!(PracticeTimezone::parse_offset(" "), Err(TimezoneError::Empty));
        assert!(PracticeTimezone::parse_offset("05:00").is_err());
        assert!(PracticeTimezone::parse_offset("+24:00").is_err());
        assert!(PracticeTimezone::parse_offset("+05:60").is_err());
        assert!(PracticeTimezone::parse_offset("Europe/Berlin").is_err());
    }

    #[test]
    fn naive_timestamp_is_practice_wall_clock() {
        let eastern = PracticeTimezone::parse_offset("-05:00").unwrap();
        let local = eastern.localize("2023-12-08T16:45:00").unwrap();
        assert_eq!(local.weekday(), Weekday::Fri);
        assert_eq!(local.hour(), 16);
        assert_eq!(local.minute(), 45);
    }

    #[test]
    fn offset_timestamp_is_converted() {
        let eastern = PracticeTimezone::parse_offset("-05:00").unwrap();
        // Saturday 02:00 UTC is still Friday evening in the practice.
        let local = eastern.localize("2023-12-09T02:00:00Z").unwrap();
        assert_eq!(local.weekday(), Weekday::Fri);
        assert_eq!(local.hour(), 21);
    }

    #[test]
    fn offset_without_colon_is_converted() {
        let utc = PracticeTimezone::utc();
        let local = utc.localize("2023-12-08T16:45:00+0500").unwrap();
        assert_eq!(local.hour(), 11);
        let local = utc.localize("2023-12-08 16:45:00.250-0130").unwrap();
        assert_eq!(local.hour(), 18);
        assert_eq!(local.minute(), 15);
    }

    #[test]
    fn accepts_space_separator_and_fraction() {
        let utc = PracticeTimezone::utc();
        assert_eq!(utc.localize("2023-12-08 12:00:00").unwrap().hour(), 12);
        assert_eq!(utc.localize("2023-12-08T11:59:59.999").unwrap().hour(), 11);
        assert_eq!(utc.localize("2023-12-08T12:00").unwrap().hour(), 12);
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        let utc = PracticeTimezone::utc();
        assert_eq!(utc.localize("").unwrap_err(), "missing");
        assert!(utc.localize("Friday afternoon").is_err());
        assert!(utc.localize("2023-13-40T10:00:00").is_err());
    }
}
