//! Plain-text renderings of the winner history for download and clipboard.

use crate::types::WinnerRecord;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt::Display;

pub const CSV_HEADER: &str = "Round,Winner,Time";

/// 12-hour wall-clock time, e.g. `07:05:09 PM`
pub fn format_time<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%I:%M:%S %p").to_string()
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn history_csv<Tz>(records: &[WinnerRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rows: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "{},{},{}",
                r.round,
                csv_quote(&r.name),
                format_time(&r.timestamp, tz)
            )
        })
        .collect();
    format!("{}\n{}", CSV_HEADER, rows.join("\n"))
}

/// One line per record: `Round 1: Alice (07:05:09 PM)`
pub fn history_text<Tz>(records: &[WinnerRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    records
        .iter()
        .map(|r| {
            format!(
                "Round {}: {} ({})",
                r.round,
                r.name,
                format_time(&r.timestamp, tz)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn csv_filename(date: NaiveDate) -> String {
    format!("lucky-draw-winners-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: u32, name: &str, h: u32, m: u32, s: u32) -> WinnerRecord {
        WinnerRecord {
            entry_id: round - 1,
            name: name.to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 12, 24, h, m, s).unwrap(),
            round,
        }
    }

    #[test]
    fn test_csv_layout() {
        let records = vec![record(1, "Alice", 19, 5, 9), record(2, "Bob", 9, 30, 0)];
        let csv = history_csv(&records, &Utc);
        assert_eq!(
            csv,
            "Round,Winner,Time\n1,\"Alice\",07:05:09 PM\n2,\"Bob\",09:30:00 AM"
        );
    }

    #[test]
    fn test_csv_escapes_quotes() {
        let records = vec![record(1, "The \"Boss\"", 12, 0, 0)];
        let csv = history_csv(&records, &Utc);
        assert!(csv.ends_with("1,\"The \"\"Boss\"\"\",12:00:00 PM"));
    }

    #[test]
    fn test_empty_history_csv_is_header_only() {
        assert_eq!(history_csv(&[], &Utc), "Round,Winner,Time\n");
    }

    #[test]
    fn test_clipboard_text() {
        let records = vec![record(1, "太郎", 0, 1, 2), record(2, "Bob", 13, 0, 0)];
        assert_eq!(
            history_text(&records, &Utc),
            "Round 1: 太郎 (12:01:02 AM)\nRound 2: Bob (01:00:00 PM)"
        );
    }

    #[test]
    fn test_time_in_other_zone() {
        let tokyo = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap();
        assert_eq!(format_time(&ts, &tokyo), "12:00:00 PM");
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(csv_filename(date), "lucky-draw-winners-2026-03-07.csv");
    }
}
