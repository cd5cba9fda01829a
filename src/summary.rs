//! Season summary statistics.

use serde::Serialize;

use crate::record::RaceResult;

/// Count of wins for one name (driver or car).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinCount {
    pub name: String,
    pub wins: usize,
}

/// Aggregate counts over a set of accepted results.
///
/// `winners` and `cars` are ranked by wins, most first; ties keep the order in
/// which the names first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_races: usize,
    pub unique_winners: usize,
    pub winners: Vec<WinCount>,
    pub cars: Vec<WinCount>,
}

impl Summary {
    /// Wins recorded for `driver`, zero if absent.
    #[must_use]
    pub fn wins_for(&self, driver: &str) -> usize {
        lookup(&self.winners, driver)
    }

    /// Wins recorded for `car`, zero if absent.
    #[must_use]
    pub fn wins_for_car(&self, car: &str) -> usize {
        lookup(&self.cars, car)
    }

    /// The `n` drivers with the most wins.
    #[must_use]
    pub fn top_winners(&self, n: usize) -> &[WinCount] {
        &self.winners[..n.min(self.winners.len())]
    }
}

/// Counts races and wins per driver and per car.
#[must_use]
pub fn summarize(results: &[RaceResult]) -> Summary {
    let winners = rank(results.iter().map(|r| r.winner.as_str()));
    let cars = rank(
        results
            .iter()
            .map(|r| r.car.as_str())
            .filter(|car| !car.is_empty()),
    );

    Summary {
        total_races: results.len(),
        unique_winners: winners.len(),
        winners,
        cars,
    }
}

fn rank<'a>(names: impl Iterator<Item = &'a str>) -> Vec<WinCount> {
    let mut counts: Vec<WinCount> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.wins += 1,
            None => counts.push(WinCount {
                name: name.to_string(),
                wins: 1,
            }),
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.wins.cmp(&a.wins));
    counts
}

fn lookup(counts: &[WinCount], name: &str) -> usize {
    counts
        .iter()
        .find(|entry| entry.name == name)
        .map_or(0, |entry| entry.wins)
}
