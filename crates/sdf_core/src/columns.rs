//! Fixed-width column access for connection-table lines.
//!
//! Every structural line of a V2000 record is laid out in fixed character
//! columns, so fields are addressed by 0-based half-open ranges instead of
//! whitespace splitting. [`Field`] names one such range together with the
//! type it decodes to, which keeps the column layout declarative:
//!
//! ```
//! use sdf_core::columns::{Columns, Field};
//! use sdf_core::ParseErrorKind;
//!
//! const BOND_TYPE: Field<i32> = Field::new("bond type", 6, 9);
//!
//! let line = Columns::new("  5  9  1  0");
//! assert_eq!(BOND_TYPE.read(&line, ParseErrorKind::InvalidNumber).unwrap(), 1);
//! ```

use std::marker::PhantomData;

use crate::error::{ParseError, ParseErrorKind};

/// A value that can be decoded from the trimmed contents of a column range.
pub trait FieldValue: Sized {
    fn decode(raw: &str) -> Option<Self>;
}

impl FieldValue for i32 {
    fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FieldValue for usize {
    fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FieldValue for f64 {
    fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

/// One line viewed as fixed-width columns.
///
/// Ranges past the end of the line are clamped, so a short line yields a
/// short (possibly empty) slice rather than a panic.
#[derive(Clone, Copy, Debug)]
pub struct Columns<'a> {
    line: &'a str,
}

impl<'a> Columns<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line }
    }

    pub fn width(&self) -> usize {
        self.line.len()
    }

    pub fn as_str(&self) -> &'a str {
        self.line
    }

    /// Raw text of `[start, end)`, clamped to the line. `None` when the range
    /// would split a multi-byte character.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        let end = end.min(self.line.len());
        let start = start.min(end);
        self.line.get(start..end)
    }

    /// Consecutive `width`-character chunks from `start` to the end of the
    /// line. The final chunk may be shorter than `width`.
    pub fn chunks_from(&self, start: usize, width: usize) -> Chunks<'a> {
        Chunks {
            columns: *self,
            cursor: start,
            width: width.max(1),
        }
    }

    /// Decode every `width`-character chunk from `start` onwards as an
    /// integer. `field` names the chunks in error messages.
    pub fn ints_from(&self, start: usize, width: usize, field: &str) -> Result<Vec<i32>, ParseError> {
        let mut values = Vec::new();
        for (offset, chunk) in self.chunks_from(start, width).enumerate() {
            let column = start + offset * width;
            let raw = chunk.ok_or_else(|| split_char(field, column, column + width))?;
            let value = i32::decode(raw.trim()).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber,
                    format!(
                        "invalid {field} value '{raw}' in columns [{column}, {})",
                        column + raw.len()
                    ),
                )
            })?;
            values.push(value);
        }
        Ok(values)
    }
}

/// Iterator returned by [`Columns::chunks_from`].
#[derive(Clone, Debug)]
pub struct Chunks<'a> {
    columns: Columns<'a>,
    cursor: usize,
    width: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Option<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.columns.width() {
            return None;
        }
        let start = self.cursor;
        self.cursor += self.width;
        Some(self.columns.slice(start, self.cursor))
    }
}

/// A named, typed column range.
#[derive(Debug)]
pub struct Field<T> {
    name: &'static str,
    start: usize,
    end: usize,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T: FieldValue> Field<T> {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self {
            name,
            start,
            end,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Decode this field from `columns`, reporting failures as `kind`.
    /// Surrounding blanks inside the range are ignored.
    pub fn read(&self, columns: &Columns<'_>, kind: ParseErrorKind) -> Result<T, ParseError> {
        let raw = columns
            .slice(self.start, self.end)
            .ok_or_else(|| split_char(self.name, self.start, self.end))?;
        T::decode(raw.trim()).ok_or_else(|| {
            ParseError::new(
                kind,
                format!(
                    "invalid {} '{}' in columns [{}, {})",
                    self.name, raw, self.start, self.end
                ),
            )
        })
    }
}

fn split_char(field: &str, start: usize, end: usize) -> ParseError {
    ParseError::new(
        ParseErrorKind::InvalidNumber,
        format!("columns [{start}, {end}) for {field} split a multi-byte character"),
    )
}
