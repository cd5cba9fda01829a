//! Cleaning and validation of extracted race results.
//!
//! [`validate`] is pure: it partitions its input into accepted (cleaned)
//! records and rejections without touching anything else.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::record::RaceResult;

/// Symbols stripped from every field.
const TRADEMARK_SYMBOLS: &[char] = &['™', '®', '©'];

/// Year appended to dates that carry none; a leap year so "29 Feb" parses.
const PLACEHOLDER_YEAR: i32 = 2000;

/// A record excluded from the output, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The record as it came out of extraction.
    pub record: RaceResult,
    /// Human-readable reason.
    pub reason: String,
}

/// Result of validating a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Cleaned records that passed every check, in input order.
    pub accepted: Vec<RaceResult>,
    /// Records that failed a check, in input order.
    pub rejections: Vec<Rejection>,
}

/// Cleans every record and keeps those that pass all checks.
///
/// Checks, first failure wins: grand prix present, winner present, date
/// present, date is a short date such as "02 Mar" or "2 March 2024", and no
/// earlier accepted record has the same date and grand prix.
#[must_use]
pub fn validate(results: &[RaceResult]) -> Validation {
    let mut validation = Validation::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for record in results {
        let cleaned = clean_record(record);
        let key = (cleaned.date.clone(), cleaned.grand_prix.to_lowercase());

        let failure = check_fields(&cleaned).or_else(|| {
            seen.contains(&key)
                .then(|| format!("duplicate race: {} on {}", cleaned.grand_prix, cleaned.date))
        });

        match failure {
            Some(reason) => validation.rejections.push(Rejection {
                record: record.clone(),
                reason,
            }),
            None => {
                seen.insert(key);
                validation.accepted.push(cleaned);
            }
        }
    }

    validation
}

fn check_fields(record: &RaceResult) -> Option<String> {
    if record.grand_prix.is_empty() {
        return Some("missing grand prix".to_string());
    }
    if record.winner.is_empty() {
        return Some(format!("missing winner for {}", record.grand_prix));
    }
    if record.date.is_empty() {
        return Some(format!("missing date for {}", record.grand_prix));
    }
    if parse_short_date(&record.date).is_none() {
        return Some(format!(
            "unrecognised date '{}' for {}",
            record.date, record.grand_prix
        ));
    }
    None
}

/// Returns a copy of `record` with every field cleaned.
#[must_use]
pub fn clean_record(record: &RaceResult) -> RaceResult {
    RaceResult {
        date: clean_text(&record.date),
        grand_prix: clean_text(&record.grand_prix),
        winner: clean_driver_name(&record.winner),
        car: clean_text(&record.car),
        time: clean_text(&record.time),
        scraped_at: record.scraped_at.trim().to_string(),
    }
}

/// Strips trademark symbols and collapses runs of whitespace.
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.replace(TRADEMARK_SYMBOLS, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleans a driver name and drops a trailing three-letter code ("Max Verstappen VER").
#[must_use]
pub fn clean_driver_name(name: &str) -> String {
    let cleaned = clean_text(name);
    let tokens: Vec<&str> = cleaned.split(' ').collect();
    match tokens.split_last() {
        Some((last, rest)) if rest.len() >= 2 && is_driver_code(last) => rest.join(" "),
        _ => cleaned,
    }
}

fn is_driver_code(token: &str) -> bool {
    token.len() == 3 && token.chars().all(|c| c.is_ascii_uppercase())
}

/// Parses "02 Mar", "2 March", "02 Mar 2024" and similar.
///
/// Dates without a year are resolved against a placeholder leap year; only
/// day and month are meaningful in that case.
#[must_use]
pub fn parse_short_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    let has_year = date
        .rsplit(' ')
        .next()
        .is_some_and(|last| last.len() == 4 && last.chars().all(|c| c.is_ascii_digit()));

    let candidate = if has_year {
        date.to_string()
    } else {
        format!("{date} {PLACEHOLDER_YEAR}")
    };
    NaiveDate::parse_from_str(&candidate, "%d %b %Y").ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn race(date: &str, grand_prix: &str, winner: &str) -> RaceResult {
        RaceResult {
            date: date.to_string(),
            grand_prix: grand_prix.to_string(),
            winner: winner.to_string(),
            car: String::new(),
            time: String::new(),
            scraped_at: "2024-12-01T00:00:00.000000+00:00".to_string(),
        }
    }

    #[test]
    fn test_clean_text_collapses_whitespace_and_symbols() {
        assert_eq!(clean_text("  Red Bull\u{2122}  Racing\n"), "Red Bull Racing");
        assert_eq!(clean_text("McLaren\u{00AE} Mercedes"), "McLaren Mercedes");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_clean_driver_name_strips_code() {
        assert_eq!(clean_driver_name("Max Verstappen VER"), "Max Verstappen");
        assert_eq!(clean_driver_name(" Lando  Norris NOR "), "Lando Norris");
    }

    #[test]
    fn test_clean_driver_name_keeps_short_names() {
        assert_eq!(clean_driver_name("Verstappen VER"), "Verstappen VER");
        assert_eq!(clean_driver_name("Charles Leclerc"), "Charles Leclerc");
        assert_eq!(clean_driver_name("Carlos Sainz Jr"), "Carlos Sainz Jr");
    }

    #[test]
    fn test_parse_short_date_formats() {
        let d = parse_short_date("02 Mar").unwrap();
        assert_eq!((d.day(), d.month()), (2, 3));
        let d = parse_short_date("2 March").unwrap();
        assert_eq!((d.day(), d.month()), (2, 3));
        let d = parse_short_date("24 Nov 2024").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 11, 24));
        assert!(parse_short_date("29 Feb").is_some());
    }

    #[test]
    fn test_parse_short_date_rejects_garbage() {
        assert!(parse_short_date("Date TBD").is_none());
        assert!(parse_short_date("2024-03-02").is_none());
        assert!(parse_short_date("32 Mar").is_none());
        assert!(parse_short_date("").is_none());
    }

    #[test]
    fn test_validate_accepts_and_cleans() {
        let input = vec![race(" 02 Mar ", "Bahrain  Grand Prix", "Max Verstappen VER")];
        let validation = validate(&input);
        assert!(validation.rejections.is_empty());
        assert_eq!(validation.accepted.len(), 1);
        let accepted = &validation.accepted[0];
        assert_eq!(accepted.date, "02 Mar");
        assert_eq!(accepted.grand_prix, "Bahrain Grand Prix");
        assert_eq!(accepted.winner, "Max Verstappen");
    }

    #[test]
    fn test_validate_rejects_empty_winner_and_grand_prix() {
        let input = vec![
            race("02 Mar", "Bahrain", "   "),
            race("09 Mar", "", "Sergio Perez"),
            race("24 Mar", "Australia", "Carlos Sainz"),
        ];
        let validation = validate(&input);
        assert_eq!(validation.accepted.len(), 1);
        assert_eq!(validation.rejections.len(), 2);
        assert!(validation.rejections[0].reason.contains("missing winner"));
        assert!(validation.rejections[1].reason.contains("missing grand prix"));
        assert!(
            validation
                .accepted
                .iter()
                .all(|r| !r.winner.is_empty() && !r.grand_prix.is_empty())
        );
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let validation = validate(&[race("Date TBD", "Las Vegas", "George Russell")]);
        assert!(validation.accepted.is_empty());
        assert!(validation.rejections[0].reason.contains("unrecognised date"));
    }

    #[test]
    fn test_validate_rejection_keeps_original_record() {
        let original = race("02 Mar", "Bahrain", "");
        let validation = validate(std::slice::from_ref(&original));
        assert_eq!(validation.rejections[0].record, original);
    }

    #[test]
    fn test_validate_rejects_duplicates_after_first() {
        let input = vec![
            race("02 Mar", "Bahrain", "Max Verstappen"),
            race("02 Mar", "bahrain", "Sergio Perez"),
            race("09 Mar", "Bahrain", "Sergio Perez"),
        ];
        let validation = validate(&input);
        assert_eq!(validation.accepted.len(), 2);
        assert_eq!(validation.rejections.len(), 1);
        assert!(validation.rejections[0].reason.contains("duplicate"));
    }

    #[test]
    fn test_validate_is_deterministic() {
        let input = vec![
            race("02 Mar", "Bahrain", "Max Verstappen"),
            race("bad", "Saudi Arabia", "Sergio Perez"),
        ];
        assert_eq!(validate(&input), validate(&input));
    }

    #[test]
    fn test_validate_empty_input() {
        let validation = validate(&[]);
        assert!(validation.accepted.is_empty());
        assert!(validation.rejections.is_empty());
    }
}
