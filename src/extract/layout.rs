//! Mapping from table cell positions to record fields.
//!
//! A layout is chosen once per table, either from the header row's column
//! names or, when no usable header exists, from the widest data row. Each row
//! is then checked against [`ColumnLayout::width`]; rows with fewer cells are
//! skipped rather than guessed at.

/// Cell positions for each record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub grand_prix: usize,
    pub winner: usize,
    pub car: Option<usize>,
    pub time: Option<usize>,
}

/// Which record field a header cell names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    GrandPrix,
    Winner,
    Car,
    Time,
}

/// Header labels recognised for each field (compared case-insensitively).
const HEADER_NAMES: &[(&str, Field)] = &[
    ("date", Field::Date),
    ("grand prix", Field::GrandPrix),
    ("gp", Field::GrandPrix),
    ("race", Field::GrandPrix),
    ("winner", Field::Winner),
    ("driver", Field::Winner),
    ("car", Field::Car),
    ("team", Field::Car),
    ("constructor", Field::Car),
    ("time", Field::Time),
];

impl ColumnLayout {
    /// Date, Grand Prix, Winner, Car, Time.
    pub const FULL: Self = Self {
        date: 0,
        grand_prix: 1,
        winner: 2,
        car: Some(3),
        time: Some(4),
    };

    /// Grand Prix, Date, Winner.
    pub const BASIC: Self = Self {
        date: 1,
        grand_prix: 0,
        winner: 2,
        car: None,
        time: None,
    };

    /// Minimum number of cells a row needs to be mapped with this layout.
    #[must_use]
    pub fn width(&self) -> usize {
        [
            Some(self.date),
            Some(self.grand_prix),
            Some(self.winner),
            self.car,
            self.time,
        ]
        .into_iter()
        .flatten()
        .max()
        .map_or(0, |last| last + 1)
    }

    /// Builds a layout from header labels.
    ///
    /// Returns `None` unless date, grand prix and winner columns are all
    /// present. Unrecognised columns (e.g. "Laps") are ignored; the first
    /// column matching a field wins.
    #[must_use]
    pub fn from_header<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
        let mut date = None;
        let mut grand_prix = None;
        let mut winner = None;
        let mut car = None;
        let mut time = None;

        for (index, label) in labels.iter().enumerate() {
            let Some(field) = field_for_label(label.as_ref()) else {
                continue;
            };
            let slot = match field {
                Field::Date => &mut date,
                Field::GrandPrix => &mut grand_prix,
                Field::Winner => &mut winner,
                Field::Car => &mut car,
                Field::Time => &mut time,
            };
            slot.get_or_insert(index);
        }

        Some(Self {
            date: date?,
            grand_prix: grand_prix?,
            winner: winner?,
            car,
            time,
        })
    }

    /// Picks a positional layout for rows up to `widest` cells wide.
    #[must_use]
    pub fn positional(widest: usize) -> Option<Self> {
        match widest {
            w if w >= Self::FULL.width() => Some(Self::FULL),
            w if w >= Self::BASIC.width() => Some(Self::BASIC),
            _ => None,
        }
    }

    /// Maps a row's cells to raw field values, or `None` if the row is too short.
    #[must_use]
    pub fn map<'a>(&self, cells: &'a [String]) -> Option<RawFields<'a>> {
        if cells.len() < self.width() {
            return None;
        }
        let optional = |index: Option<usize>| index.map_or("", |i| cells[i].as_str());
        Some(RawFields {
            date: &cells[self.date],
            grand_prix: &cells[self.grand_prix],
            winner: &cells[self.winner],
            car: optional(self.car),
            time: optional(self.time),
        })
    }
}

/// Field values borrowed from one row's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub date: &'a str,
    pub grand_prix: &'a str,
    pub winner: &'a str,
    pub car: &'a str,
    pub time: &'a str,
}

fn field_for_label(label: &str) -> Option<Field> {
    let label = label.trim();
    HEADER_NAMES
        .iter()
        .find(|(name, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, field)| *field)
}

/// True when a row's leading cells are column titles rather than data.
#[must_use]
pub fn is_header_row<S: AsRef<str>>(cells: &[S]) -> bool {
    cells.iter().take(3).any(|cell| {
        let cell = cell.as_ref().trim();
        ["date", "grand prix", "winner"]
            .iter()
            .any(|title| cell.eq_ignore_ascii_case(title))
    })
}
