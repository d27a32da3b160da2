//! Serde helpers for `NaiveTime` fields.
//!
//! The form UI submits times both as `HH:MM` and `HH:MM:SS`; serialization
//! always emits `HH:MM:SS`.

use chrono::NaiveTime;
use serde::{self, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M:%S").to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_time(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid time: {}", s)))
}

/// Parse `HH:MM:SS` or `HH:MM`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_both_formats() {
        assert_eq!(
            parse_time("08:30"),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(
            parse_time("16:45:30"),
            NaiveTime::from_hms_opt(16, 45, 30)
        );
        assert_eq!(parse_time("not a time"), None);
    }
}
