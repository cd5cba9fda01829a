//! Extraction of race results from results-page markup.
//!
//! The results table is located by trying a list of CSS selectors in order.
//! Its rows are mapped to [`RaceResult`]s through a [`ColumnLayout`] chosen
//! once for the table. A row that cannot be mapped is recorded as a
//! [`RowSkip`] and extraction carries on with the next row.
//!
//! Not finding a table at all is not an error: the returned [`Extraction`]
//! has `table_found == false` and no results, and the caller decides how
//! loudly to report it.

mod layout;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

pub use layout::{ColumnLayout, RawFields, is_header_row};

use crate::record::RaceResult;

/// Selectors tried, in order, to find the results table.
pub const TABLE_SELECTORS: &[&str] = &[
    "table.resultsarchive-table",
    r#"table[class*="results"]"#,
    r#"table[class*="archive"]"#,
    ".results-table table",
    "table",
];

/// A table row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSkip {
    /// 1-based position among the table's candidate rows.
    pub row_index: usize,
    /// Number of cells the row had.
    pub cell_count: usize,
    /// Human-readable reason.
    pub reason: String,
}

/// Everything one pass over the markup produced.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Records in document order.
    pub results: Vec<RaceResult>,
    /// Rows that were skipped, in document order.
    pub skipped: Vec<RowSkip>,
    /// Whether any results table was found.
    pub table_found: bool,
    /// The selector that matched the table.
    pub selector: Option<&'static str>,
    /// The layout used to map cells to fields.
    pub layout: Option<ColumnLayout>,
}

impl Extraction {
    /// Number of records extracted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when no records were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Turns results-page markup into [`RaceResult`]s.
///
/// Every record produced by one extractor carries the same `scraped_at`
/// value, so re-running on identical markup yields identical records.
#[derive(Debug, Clone)]
pub struct Extractor {
    scraped_at: String,
}

struct Selectors {
    body_row: Selector,
    thead_row: Selector,
    row: Selector,
    cell: Selector,
}

impl Selectors {
    fn new() -> Option<Self> {
        Some(Self {
            body_row: Selector::parse("tbody > tr").ok()?,
            thead_row: Selector::parse("thead tr").ok()?,
            row: Selector::parse("tr").ok()?,
            cell: Selector::parse("td, th").ok()?,
        })
    }
}

impl Extractor {
    /// Creates an extractor stamping records with `scraped_at`.
    pub fn new(scraped_at: impl Into<String>) -> Self {
        Self {
            scraped_at: scraped_at.into(),
        }
    }

    /// Extracts all race results from `markup`.
    #[must_use]
    pub fn extract(&self, markup: &str) -> Extraction {
        let document = Html::parse_document(markup);
        let mut extraction = Extraction::default();

        let Some(selectors) = Selectors::new() else {
            warn!("row selectors failed to parse");
            return extraction;
        };

        let Some((table, selector)) = find_table(&document) else {
            warn!("no results table found");
            return extraction;
        };
        info!(selector, "found results table");
        extraction.table_found = true;
        extraction.selector = Some(selector);

        let header = header_cells(table, &selectors);
        // The HTML parser wraps bare rows in a tbody, so this sees every body row.
        let rows: Vec<ElementRef<'_>> = table.select(&selectors.body_row).collect();
        info!(rows = rows.len(), "found candidate race rows");

        let row_cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| cell_texts(*row, &selectors.cell))
            .collect();

        let layout = header
            .as_deref()
            .and_then(ColumnLayout::from_header)
            .or_else(|| {
                let widest = row_cells
                    .iter()
                    .filter(|cells| !is_header_row(cells.as_slice()))
                    .map(Vec::len)
                    .max()
                    .unwrap_or(0);
                ColumnLayout::positional(widest)
            });
        debug!(?layout, from_header = header.is_some(), "column layout chosen");
        extraction.layout = layout;

        for (index, cells) in row_cells.iter().enumerate() {
            let row_index = index + 1;

            if cells.is_empty() || is_header_row(cells.as_slice()) {
                debug!(row_index, "ignoring header or empty row");
                continue;
            }

            let mapped = layout.and_then(|layout| layout.map(cells));
            let Some(fields) = mapped else {
                let expected = layout.map_or(ColumnLayout::BASIC.width(), |l| l.width());
                let skip = RowSkip {
                    row_index,
                    cell_count: cells.len(),
                    reason: format!("expected at least {expected} cells, found {}", cells.len()),
                };
                warn!(row_index, cells = cells.len(), reason = %skip.reason, "skipping row");
                extraction.skipped.push(skip);
                continue;
            };

            let result = self.record_from(fields);
            debug!(
                row_index,
                grand_prix = %result.grand_prix,
                winner = %result.winner,
                "extracted race"
            );
            extraction.results.push(result);
        }

        info!(
            extracted = extraction.results.len(),
            skipped = extraction.skipped.len(),
            "extraction complete"
        );
        extraction
    }

    fn record_from(&self, fields: RawFields<'_>) -> RaceResult {
        RaceResult {
            date: fields.date.to_string(),
            grand_prix: fields.grand_prix.to_string(),
            winner: fields.winner.to_string(),
            car: fields.car.to_string(),
            time: fields.time.to_string(),
            scraped_at: self.scraped_at.clone(),
        }
    }
}

fn find_table(document: &Html) -> Option<(ElementRef<'_>, &'static str)> {
    TABLE_SELECTORS.iter().find_map(|&selector| {
        let parsed = Selector::parse(selector).ok()?;
        document.select(&parsed).next().map(|table| (table, selector))
    })
}

/// Column labels from `thead`, or from a leading row of column titles.
fn header_cells(table: ElementRef<'_>, selectors: &Selectors) -> Option<Vec<String>> {
    if let Some(row) = table.select(&selectors.thead_row).next() {
        return Some(cell_texts(row, &selectors.cell));
    }
    let first = table.select(&selectors.row).next()?;
    let cells = cell_texts(first, &selectors.cell);
    is_header_row(cells.as_slice()).then_some(cells)
}

fn cell_texts(row: ElementRef<'_>, cell: &Selector) -> Vec<String> {
    row.select(cell).map(element_text).collect()
}

/// Text nodes joined by single spaces, so `<span>Max</span><span>Verstappen</span>`
/// reads as "Max Verstappen".
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SCRAPED_AT: &str = "2024-12-01T12:00:00.000000+00:00";

    const SAMPLE_HTML: &str = r#"
        <html>
        <head><title>F1 Results 2024</title></head>
        <body>
            <table class="resultsarchive-table">
                <thead>
                    <tr><th>Date</th><th>Grand Prix</th><th>Winner</th><th>Car</th><th>Time</th></tr>
                </thead>
                <tbody>
                    <tr><td>02 Mar</td><td>Bahrain Grand Prix</td><td>Max Verstappen VER</td><td>Red Bull Racing Honda RBPT</td><td>1:31:44.742</td></tr>
                    <tr><td>09 Mar</td><td>Saudi Arabian Grand Prix</td><td>Sergio Perez PER</td><td>Red Bull Racing Honda RBPT</td><td>1:20:43.273</td></tr>
                    <tr><td>24 Mar</td><td>Australian Grand Prix</td><td>Carlos Sainz SAI</td><td>Ferrari</td><td>1:20:26.843</td></tr>
                </tbody>
            </table>
        </body>
        </html>
    "#;

    fn extractor() -> Extractor {
        Extractor::new(SCRAPED_AT)
    }

    #[test]
    fn test_extract_sample_rows_in_document_order() {
        let extraction = extractor().extract(SAMPLE_HTML);
        assert!(extraction.table_found);
        assert_eq!(extraction.selector, Some("table.resultsarchive-table"));
        assert_eq!(extraction.len(), 3);
        assert!(extraction.skipped.is_empty());

        let names: Vec<&str> = extraction
            .results
            .iter()
            .map(|r| r.grand_prix.as_str())
            .collect();
        assert_eq!(
            names,
            ["Bahrain Grand Prix", "Saudi Arabian Grand Prix", "Australian Grand Prix"]
        );

        let first = &extraction.results[0];
        assert_eq!(first.date, "02 Mar");
        assert_eq!(first.winner, "Max Verstappen VER");
        assert_eq!(first.car, "Red Bull Racing Honda RBPT");
        assert_eq!(first.time, "1:31:44.742");
        assert_eq!(first.scraped_at, SCRAPED_AT);
    }

    #[test]
    fn test_extract_no_table() {
        let extraction = extractor().extract("<html><body><p>Nothing here</p></body></html>");
        assert!(!extraction.table_found);
        assert!(extraction.is_empty());
        assert!(extraction.skipped.is_empty());
    }

    #[test]
    fn test_extract_empty_table_yields_no_results() {
        let extraction = extractor().extract("<table class=\"results\"><tbody></tbody></table>");
        assert!(extraction.table_found);
        assert_eq!(extraction.selector, Some(r#"table[class*="results"]"#));
        assert!(extraction.is_empty());
    }

    #[test]
    fn test_extract_short_row_is_skipped_not_fatal() {
        let html = r#"<table><tbody>
            <tr><td>02 Mar</td><td>Bahrain</td><td>Max Verstappen</td><td>Red Bull</td><td>1:31:44</td></tr>
            <tr><td>09 Mar</td><td>Saudi Arabia</td><td>Red Bull</td><td>1:20:43</td></tr>
            <tr><td>24 Mar</td><td>Australia</td><td>Carlos Sainz</td><td>Ferrari</td><td>1:20:26</td></tr>
        </tbody></table>"#;
        let extraction = extractor().extract(html);
        assert_eq!(extraction.len(), 2);
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].row_index, 2);
        assert_eq!(extraction.skipped[0].cell_count, 4);
        assert_eq!(extraction.results[1].grand_prix, "Australia");
    }

    #[test]
    fn test_extract_without_tbody_ignores_header_row() {
        let html = r#"<table>
            <tr><td>Grand Prix</td><td>Date</td><td>Winner</td></tr>
            <tr><td>Bahrain</td><td>02 Mar</td><td>Max Verstappen</td></tr>
            <tr><td>Monaco</td><td>26 May</td><td>Charles Leclerc</td></tr>
        </table>"#;
        let extraction = extractor().extract(html);
        assert_eq!(extraction.layout, Some(ColumnLayout::BASIC));
        assert_eq!(extraction.len(), 2);
        assert_eq!(extraction.results[1].grand_prix, "Monaco");
        assert_eq!(extraction.results[1].date, "26 May");
        assert!(extraction.results[1].car.is_empty());
    }

    #[test]
    fn test_extract_without_tbody_or_header_keeps_first_row() {
        let html = r#"<table>
            <tr><td>Bahrain</td><td>02 Mar</td><td>Max Verstappen</td></tr>
            <tr><td>Monaco</td><td>26 May</td><td>Charles Leclerc</td></tr>
        </table>"#;
        let extraction = extractor().extract(html);
        assert!(extraction.skipped.is_empty());
        assert_eq!(extraction.len(), 2);
        assert_eq!(extraction.results[0].grand_prix, "Bahrain");
        assert_eq!(extraction.results[0].winner, "Max Verstappen");
    }

    #[test]
    fn test_extract_uses_header_names_for_site_column_order() {
        let html = r#"<table class="f1-table">
            <thead><tr><th>Grand Prix</th><th>Date</th><th>Winner</th><th>Car</th><th>Laps</th><th>Time</th></tr></thead>
            <tbody>
              <tr><td><a href="/bahrain">Bahrain</a></td><td>02 Mar 2024</td>
                  <td><span>Max</span><span>Verstappen</span><span>VER</span></td>
                  <td>Red Bull Racing Honda RBPT</td><td>57</td><td>1:31:44.742</td></tr>
            </tbody></table>"#;
        let extraction = extractor().extract(html);
        assert_eq!(extraction.len(), 1);
        let race = &extraction.results[0];
        assert_eq!(race.grand_prix, "Bahrain");
        assert_eq!(race.date, "02 Mar 2024");
        assert_eq!(race.winner, "Max Verstappen VER");
        assert_eq!(race.time, "1:31:44.742");
    }

    #[test]
    fn test_extract_repeated_header_rows_are_not_skips() {
        let html = r#"<table><tbody>
            <tr><th>Date</th><th>Grand Prix</th><th>Winner</th><th>Car</th><th>Time</th></tr>
            <tr><td>02 Mar</td><td>Bahrain</td><td>Max Verstappen</td><td>Red Bull</td><td>1:31:44</td></tr>
        </tbody></table>"#;
        let extraction = extractor().extract(html);
        assert_eq!(extraction.len(), 1);
        assert!(extraction.skipped.is_empty());
    }

    #[test]
    fn test_extract_rows_too_narrow_for_any_layout() {
        let html = r#"<table><tbody>
            <tr><td>Bahrain</td><td>Max Verstappen</td></tr>
        </tbody></table>"#;
        let extraction = extractor().extract(html);
        assert!(extraction.table_found);
        assert!(extraction.is_empty());
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].cell_count, 2);
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let html = "<table><tbody><tr><td>  Emilia \n Romagna </td><td>19 May</td><td>Max\tVerstappen</td></tr></tbody></table>";
        let extraction = extractor().extract(html);
        assert_eq!(extraction.results[0].grand_prix, "Emilia Romagna");
        assert_eq!(extraction.results[0].winner, "Max Verstappen");
    }
}
