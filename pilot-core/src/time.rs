//! Time utilities: timezone-aware parsing and display of event instants.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Parse a local time like "2026-02-20 18:30" in an IANA tz like "America/Chicago",
/// returning UTC.
pub fn parse_local_to_utc(local: &str, tz: &str) -> Result<DateTime<Utc>> {
    let tz = parse_tz(tz)?;

    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M")
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{local}': {e}"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

/// "HH:MM (YYYY-MM-DD)" in the given zone. The date is kept because
/// milestones can fall on the day before the event.
pub fn format_local(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%H:%M (%Y-%m-%d)").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chicago_time() {
        // Feb is CST (UTC-6)
        let utc = parse_local_to_utc("2026-02-20 23:59", "America/Chicago").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-21T05:59:00+00:00");
    }

    #[test]
    fn test_rejects_unknown_zone() {
        assert!(parse_local_to_utc("2026-02-20 10:00", "Mars/Olympus").is_err());
    }

    #[test]
    fn test_rejects_spring_forward_gap() {
        // 02:30 does not exist on 2026-03-08 in Chicago
        assert!(parse_local_to_utc("2026-03-08 02:30", "America/Chicago").is_err());
    }

    #[test]
    fn test_format_local_shows_date() {
        let utc = parse_local_to_utc("2026-02-20 00:15", "Europe/Berlin").unwrap();
        assert_eq!(format_local(utc, chrono_tz::Europe::Berlin), "00:15 (2026-02-20)");
        assert_eq!(format_local(utc, chrono_tz::UTC), "23:15 (2026-02-19)");
    }
}
