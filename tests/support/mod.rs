//! Shared fixtures for integration tests: results pages and mock servers.

#![allow(dead_code)]

use std::time::Duration;

use f1_results_core::FetchConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock results page is served from.
pub const RACES_PATH: &str = "/en/results/2024/races";

const GRANDS_PRIX: &[(&str, &str, &str, &str)] = &[
    ("02 Mar", "Bahrain", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("09 Mar", "Saudi Arabia", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("24 Mar", "Australia", "Carlos Sainz SAI", "Ferrari"),
    ("07 Apr", "Japan", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("21 Apr", "China", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("05 May", "Miami", "Lando Norris NOR", "McLaren Mercedes"),
    ("19 May", "Emilia-Romagna", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("26 May", "Monaco", "Charles Leclerc LEC", "Ferrari"),
    ("09 Jun", "Canada", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("23 Jun", "Spain", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("30 Jun", "Austria", "George Russell RUS", "Mercedes"),
    ("07 Jul", "Great Britain", "Lewis Hamilton HAM", "Mercedes"),
    ("21 Jul", "Hungary", "Oscar Piastri PIA", "McLaren Mercedes"),
    ("28 Jul", "Belgium", "Lewis Hamilton HAM", "Mercedes"),
    ("25 Aug", "Netherlands", "Lando Norris NOR", "McLaren Mercedes"),
    ("01 Sep", "Italy", "Charles Leclerc LEC", "Ferrari"),
    ("15 Sep", "Azerbaijan", "Oscar Piastri PIA", "McLaren Mercedes"),
    ("22 Sep", "Singapore", "Lando Norris NOR", "McLaren Mercedes"),
    ("20 Oct", "United States", "Charles Leclerc LEC", "Ferrari"),
    ("27 Oct", "Mexico", "Carlos Sainz SAI", "Ferrari"),
    ("03 Nov", "Brazil", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("23 Nov", "Las Vegas", "George Russell RUS", "Mercedes"),
    ("01 Dec", "Qatar", "Max Verstappen VER", "Red Bull Racing Honda RBPT"),
    ("08 Dec", "Abu Dhabi", "Lando Norris NOR", "McLaren Mercedes"),
];

/// Number of well-formed rows in [`season_page`].
pub const SEASON_RACES: usize = 24;

/// A results page with the full 2024 season.
///
/// With `malformed_row`, one extra row missing its winner cell is inserted
/// after the fifth race.
pub fn season_page(malformed_row: bool) -> String {
    let mut rows = String::new();
    for (index, (date, grand_prix, winner, car)) in GRANDS_PRIX.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><td>{date}</td><td>{grand_prix}</td><td><span>{winner}</span></td>\
             <td>{car}</td><td>1:3{}:00.000</td></tr>\n",
            index % 10
        ));
        if malformed_row && index == 4 {
            rows.push_str(
                "<tr><td>14 Apr</td><td>Broken</td><td>Nobody Racing</td><td>1:30:00.000</td></tr>\n",
            );
        }
    }
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>2024 RACE RESULTS</title></head>
<body>
<table class="resultsarchive-table">
<thead><tr><th>Date</th><th>Grand Prix</th><th>Winner</th><th>Car</th><th>Time</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
</body>
</html>
"#
    )
}

/// A page with no table at all.
pub fn page_without_table() -> String {
    "<html><body><p>Results are not available.</p></body></html>".to_string()
}

/// Mounts `body` as a 200 HTML response at [`RACES_PATH`].
pub async fn serve_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(RACES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Fast fetch settings for tests: short delays and timeout.
pub fn fast_fetch_config(max_retries: u32) -> FetchConfig {
    FetchConfig {
        timeout: Duration::from_secs(5),
        max_retries,
        rate_limit: Duration::from_millis(20),
        ..FetchConfig::default()
    }
}
