use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Timezone used for month buckets. Day buckets are always UTC.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Named(chrono_tz::UTC)
    }
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::default());
        };
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("utc")
            || trimmed.eq_ignore_ascii_case("z")
        {
            return Ok(Timezone::default());
        }
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_none_returns_utc() {
        assert!(matches!(
            Timezone::parse(None).unwrap(),
            Timezone::Named(chrono_tz::UTC)
        ));
    }

    #[test]
    fn parse_empty_returns_utc() {
        assert!(matches!(
            Timezone::parse(Some("  ")).unwrap(),
            Timezone::Named(chrono_tz::UTC)
        ));
    }

    #[test]
    fn parse_local_string_returns_local() {
        assert!(matches!(
            Timezone::parse(Some("local")).unwrap(),
            Timezone::Local
        ));
        assert!(matches!(
            Timezone::parse(Some("LOCAL")).unwrap(),
            Timezone::Local
        ));
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z"] {
            assert!(matches!(
                Timezone::parse(Some(raw)).unwrap(),
                Timezone::Named(chrono_tz::UTC)
            ));
        }
    }

    #[test]
    fn parse_named_timezone() {
        let tz = Timezone::parse(Some("Asia/Kolkata")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::Asia::Kolkata)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn to_fixed_offset_named_shifts_across_month() {
        let utc = "2024-09-30T20:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::parse(Some("Asia/Kolkata")).unwrap();
        let fixed = tz.to_fixed_offset(utc);
        assert_eq!(fixed.offset().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(fixed.format("%Y-%m-%d %H:%M").to_string(), "2024-10-01 01:30");
    }
}
