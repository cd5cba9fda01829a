//! Minimal CSV writing with standard quoting.

use std::io::{self, Write};

/// Separator used in every exported file.
pub const SEPARATOR: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEPARATOR)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
}

/// Writes one row followed by `\n`, quoting fields that need it.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (index, cell) in row.iter().enumerate() {
        if index > 0 {
            write!(w, "{SEPARATOR}")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}
