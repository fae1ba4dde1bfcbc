use std::{fs::File, io::Read, path::Path};

use flate2::read::GzDecoder;
use futures::io::{AsyncRead, AsyncReadExt};
use rayon::prelude::*;

use crate::{
    atom::Atom,
    bond::Bond,
    columns::{Columns, Field},
    error::{ParseError, ParseErrorKind},
    model::{Header, Record, SdfFile},
    segment::segment_records,
};

/// Line separating the connection table from the trailing data items.
pub const END_MARKER: &str = "M  END";

const HEADER_SIZE: usize = 3;
const ATOM_COUNT: Field<usize> = Field::new("atom count", 0, 3);
const BOND_COUNT: Field<usize> = Field::new("bond count", 3, 6);

/// What a whole-file parse does with a record that fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort on the first malformed record, in file order.
    #[default]
    Strict,
    /// Drop malformed records and report them in [`SdfFile::skipped`].
    Lenient,
}

#[derive(Clone, Copy, Debug)]
pub struct ParserOptions {
    /// Keep only the first `limit` records. Records past the limit are
    /// never decoded.
    pub limit: Option<usize>,
    pub error_policy: ErrorPolicy,
    /// Reject bonds whose endpoints fall outside the atom block. Off by
    /// default: V2000 readers traditionally leave this to the consumer.
    pub check_bond_indices: bool,
    /// Decode records on the rayon thread pool. Output order is file order
    /// either way.
    pub parallel: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            limit: None,
            error_policy: ErrorPolicy::Strict,
            check_bond_indices: false,
            parallel: true,
        }
    }
}

/// Decode every record in `text`, keeping at most `limit` of them.
///
/// Fails on the first malformed record.
pub fn parse(text: &str, limit: Option<usize>) -> Result<Vec<Record>, ParseError> {
    let options = ParserOptions {
        limit,
        ..ParserOptions::default()
    };
    parse_with_options(text, &options).map(SdfFile::into_records)
}

pub fn parse_with_options(text: &str, options: &ParserOptions) -> Result<SdfFile, ParseError> {
    let blocks = segment_records(text).take(options.limit.unwrap_or(usize::MAX));

    let file = if options.parallel {
        let blocks: Vec<&str> = blocks.collect();
        let results: Vec<Result<Record, ParseError>> = blocks
            .par_iter()
            .enumerate()
            .map(|(ordinal, block)| parse_block(block, ordinal, options))
            .collect();
        gather(results.into_iter(), options.error_policy)?
    } else {
        let results = blocks
            .enumerate()
            .map(|(ordinal, block)| parse_block(block, ordinal, options));
        gather(results, options.error_policy)?
    };

    log::debug!(
        "parsed {} SDF records ({} skipped, parallel: {})",
        file.len(),
        file.skipped().len(),
        options.parallel
    );
    Ok(file)
}

/// Decode a single record block (terminator already removed).
pub fn parse_record(block: &str) -> Result<Record, ParseError> {
    parse_block(block, 0, &ParserOptions::default())
}

/// Read `path` and decode it. Files ending in `.gz` are decompressed on the
/// fly.
pub fn parse_file(path: impl AsRef<Path>, options: &ParserOptions) -> Result<SdfFile, ParseError> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|err| ParseError::from(err).with_path(path_ref))?;
    let reader: Box<dyn Read> = if path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
    {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    parse_reader(reader, options).map_err(|err| err.with_path(path_ref))
}

pub fn parse_reader<R: Read>(mut reader: R, options: &ParserOptions) -> Result<SdfFile, ParseError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let text = String::from_utf8(buf)?;
    parse_with_options(&text, options)
}

pub async fn parse_async_reader<R>(
    mut reader: R,
    options: &ParserOptions,
) -> Result<SdfFile, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .await
        .map_err(ParseError::from)?;
    let text = String::from_utf8(buf)?;
    parse_with_options(&text, options)
}

fn parse_block(block: &str, ordinal: usize, options: &ParserOptions) -> Result<Record, ParseError> {
    RecordParser::new(block, ordinal, options).run()
}

/// Applies the error policy to per-record results, which must arrive in
/// file order. Under the strict policy the iterator is not polled past the
/// first failure.
fn gather<I>(results: I, policy: ErrorPolicy) -> Result<SdfFile, ParseError>
where
    I: Iterator<Item = Result<Record, ParseError>>,
{
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (ordinal, result) in results.enumerate() {
        match (result, policy) {
            (Ok(record), _) => records.push(record),
            (Err(err), ErrorPolicy::Strict) => return Err(err),
            (Err(err), ErrorPolicy::Lenient) => {
                log::warn!("skipping SDF record {ordinal}: {err}");
                skipped.push((ordinal, err));
            }
        }
    }
    Ok(SdfFile::new(records, skipped))
}

/// Walks the lines of one record block. Each stage advances `cursor` past
/// the lines it consumed, so the bond block starts where the atom block
/// ended and the tail starts where the bond block ended.
struct RecordParser<'a> {
    block: &'a str,
    lines: Vec<&'a str>,
    cursor: usize,
    ordinal: usize,
    options: &'a ParserOptions,
}

impl<'a> RecordParser<'a> {
    fn new(block: &'a str, ordinal: usize, options: &'a ParserOptions) -> Self {
        Self {
            block,
            lines: block.lines().collect(),
            cursor: 0,
            ordinal,
            options,
        }
    }

    fn run(mut self) -> Result<Record, ParseError> {
        let ordinal = self.ordinal;
        self.decode().map_err(|err| err.with_record(ordinal))
    }

    fn decode(&mut self) -> Result<Record, ParseError> {
        let header = self.parse_header()?;
        let (atom_count, bond_count) = self.parse_counts()?;
        let atoms = self.parse_atoms(atom_count)?;
        let bonds = self.parse_bonds(bond_count, atom_count)?;
        let (properties, data_fields) = self.parse_tail()?;

        log::trace!(
            "decoded SDF record {} '{}': {atom_count} atoms, {bond_count} bonds",
            self.ordinal,
            header.name
        );
        Ok(Record::new(header, atoms, bonds, properties, data_fields))
    }

    fn parse_header(&mut self) -> Result<Header, ParseError> {
        if self.lines.len() < HEADER_SIZE {
            return Err(ParseError::new(
                ParseErrorKind::MalformedRecord,
                format!(
                    "expected {HEADER_SIZE} header lines, found {}: {:?}",
                    self.lines.len(),
                    self.block
                ),
            ));
        }
        let header = Header {
            name: self.lines[0].trim().to_string(),
            details: self.lines[1].trim().to_string(),
            comment: self.lines[2].trim().to_string(),
        };
        self.cursor = HEADER_SIZE;
        Ok(header)
    }

    fn parse_counts(&mut self) -> Result<(usize, usize), ParseError> {
        let (line_no, line) = self.next_line().ok_or_else(|| {
            ParseError::new(ParseErrorKind::MalformedRecord, "record has no counts line")
        })?;
        let columns = Columns::new(line);
        let counts = ATOM_COUNT
            .read(&columns, ParseErrorKind::MalformedCounts)
            .and_then(|atoms| {
                let bonds = BOND_COUNT.read(&columns, ParseErrorKind::MalformedCounts)?;
                Ok((atoms, bonds))
            });
        counts.map_err(|err| err.with_line(line_no))
    }

    fn parse_atoms(&mut self, count: usize) -> Result<Vec<Atom>, ParseError> {
        let mut atoms = Vec::with_capacity(count);
        for index in 0..count {
            let (line_no, line) = self.next_line().ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::MalformedRecord,
                    format!("atom block ends after {index} of {count} lines"),
                )
            })?;
            atoms.push(Atom::parse(line, index).map_err(|err| err.with_line(line_no))?);
        }
        Ok(atoms)
    }

    fn parse_bonds(&mut self, count: usize, atom_count: usize) -> Result<Vec<Bond>, ParseError> {
        let mut bonds = Vec::with_capacity(count);
        for index in 0..count {
            let (line_no, line) = self.next_line().ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::MalformedRecord,
                    format!("bond block ends after {index} of {count} lines"),
                )
            })?;
            let bond = Bond::parse(line).map_err(|err| err.with_line(line_no))?;
            if self.options.check_bond_indices {
                bond.check_range(atom_count)
                    .map_err(|err| err.with_line(line_no))?;
            }
            bonds.push(bond);
        }
        Ok(bonds)
    }

    fn parse_tail(&mut self) -> Result<(Vec<String>, Vec<String>), ParseError> {
        let rest = &self.lines[self.cursor..];
        let marker = rest
            .iter()
            .position(|line| line.trim_end() == END_MARKER)
            .ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::MissingEndMarker,
                    format!("no `{END_MARKER}` line after the bond block"),
                )
            })?;
        let properties = rest[..marker].iter().map(|line| line.to_string()).collect();
        let data_fields = rest[marker + 1..]
            .iter()
            .map(|line| line.to_string())
            .collect();
        self.cursor = self.lines.len();
        Ok((properties, data_fields))
    }

    /// Next unread line with its 1-based number inside the record.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = *self.lines.get(self.cursor)?;
        self.cursor += 1;
        Some((self.cursor, line))
    }
}
