//! Race result records and the run metadata attached at export time.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Column order shared by the CSV header and every CSV row.
pub const CSV_COLUMNS: [&str; 6] = ["date", "grand_prix", "winner", "car", "time", "scraped_at"];

/// One race as read from a results table row.
///
/// `car` and `time` are empty when the table layout has no such columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub date: String,
    pub grand_prix: String,
    pub winner: String,
    #[serde(default)]
    pub car: String,
    #[serde(default)]
    pub time: String,
    pub scraped_at: String,
}

impl RaceResult {
    /// Field values in [`CSV_COLUMNS`] order.
    #[must_use]
    pub fn csv_fields(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.grand_prix.as_str(),
            self.winner.as_str(),
            self.car.as_str(),
            self.time.as_str(),
            self.scraped_at.as_str(),
        ]
    }
}

/// Describes where and when a result set came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub scraped_at: String,
    pub source_url: String,
    pub year: i32,
    pub total_races: usize,
    pub scraper_version: String,
}

impl RunMetadata {
    /// Metadata for `total_races` accepted results, stamped with this crate's version.
    #[must_use]
    pub fn new(
        source_url: impl Into<String>,
        year: i32,
        total_races: usize,
        scraped_at: impl Into<String>,
    ) -> Self {
        Self {
            scraped_at: scraped_at.into(),
            source_url: source_url.into(),
            year,
            total_races,
            scraper_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Formats a timestamp the way every `scraped_at` field is written.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_csv_fields_follow_column_order() {
        let result = RaceResult {
            date: "02 Mar".to_string(),
            grand_prix: "Bahrain".to_string(),
            winner: "Max Verstappen".to_string(),
            car: "Red Bull Racing Honda RBPT".to_string(),
            time: "1:31:44.742".to_string(),
            scraped_at: "2024-03-02T18:00:00.000000+00:00".to_string(),
        };
        let fields = result.csv_fields();
        assert_eq!(fields[0], "02 Mar");
        assert_eq!(fields[2], "Max Verstappen");
        assert_eq!(fields[5], result.scraped_at);
        assert_eq!(CSV_COLUMNS[2], "winner");
    }

    #[test]
    fn test_run_metadata_carries_crate_version() {
        let metadata = RunMetadata::new("https://example.com", 2024, 24, "now");
        assert_eq!(metadata.scraper_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(metadata.total_races, 24);
    }

    #[test]
    fn test_format_timestamp_is_iso8601() {
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 18, 0, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-02T18:00:00.000000+00:00");
    }

    #[test]
    fn test_race_result_deserializes_without_optional_fields() {
        let json = r#"{"date":"02 Mar","grand_prix":"Bahrain","winner":"X","scraped_at":"t"}"#;
        let result: RaceResult = serde_json::from_str(json).unwrap();
        assert!(result.car.is_empty());
        assert!(result.time.is_empty());
    }
}
