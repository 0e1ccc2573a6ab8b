//! RFC 4180 reading and writing of [`MenuRecord`] rows.

use std::io::{self, Write};
use std::mem::take;

use crate::normalize::parse_plain_decimal;
use crate::record::{COLUMNS, MenuRecord, Price};

const SEP: char = ',';

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("missing header row")]
    MissingHeader,

    #[error("unexpected header: {found}")]
    HeaderMismatch { found: String },

    #[error("row {row}: expected {expected} fields, found {found}")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unterminated quoted field")]
    UnterminatedQuote,
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{SEP}")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// Writes the header followed by one row per record.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_records<W: Write>(mut w: W, records: &[MenuRecord]) -> io::Result<()> {
    write_row(&mut w, &COLUMNS)?;
    for record in records {
        write_row(&mut w, &record.cells())?;
    }
    w.flush()
}

#[must_use]
pub fn to_csv_string(records: &[MenuRecord]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_records(&mut buf, records);
    String::from_utf8_lossy(&buf).into_owned()
}

/* ---------------- Parsing ---------------- */

fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            c if c == SEP && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                end_row(&mut rows, &mut row);
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote);
    }
    row.push(field);
    end_row(&mut rows, &mut row);
    Ok(rows)
}

// A row holding one empty field is a blank line.
fn end_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    if row.len() == 1 && row[0].is_empty() {
        row.clear();
    } else {
        rows.push(take(row));
    }
}

fn record_from(row: Vec<String>) -> MenuRecord {
    let mut cells = row.into_iter();
    let mut next = || cells.next().unwrap_or_default();
    let restaurant = next();
    let category = next();
    let sub_category = next();
    let item_name = next();
    let price = next();
    let desc = next();
    let dietary_slugs = next()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    let price = parse_plain_decimal(&price).map_or(Price::Text(price), Price::Amount);
    MenuRecord {
        restaurant,
        category,
        sub_category,
        item_name,
        price,
        desc,
        dietary_slugs,
    }
}

/// Parses text produced by [`write_records`].
///
/// A price cell holding a plain decimal is read back as [`Price::Amount`];
/// anything else stays text.
///
/// # Errors
///
/// Returns [`CsvError`] when the header is missing or differs from
/// [`COLUMNS`], a row has the wrong number of fields, or a quoted field is
/// never closed.
pub fn read_records(text: &str) -> Result<Vec<MenuRecord>, CsvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = parse_rows(text)?.into_iter();
    let header = rows.next().ok_or(CsvError::MissingHeader)?;
    if header != COLUMNS {
        return Err(CsvError::HeaderMismatch {
            found: header.join(","),
        });
    }

    rows.enumerate()
        .map(|(i, row)| {
            if row.len() == COLUMNS.len() {
                Ok(record_from(row))
            } else {
                Err(CsvError::FieldCount {
                    row: i + 1,
                    expected: COLUMNS.len(),
                    found: row.len(),
                })
            }
        })
        .collect()
}
