use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::{io, result};

use thiserror::Error;

pub type Result<T, E = ParseError> = result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("I/O error")]
    Io,
    #[error("input was not valid UTF-8")]
    Utf8,
    #[error("malformed record")]
    MalformedRecord,
    #[error("malformed counts line")]
    MalformedCounts,
    #[error("truncated atom line")]
    TruncatedAtomLine,
    #[error("truncated bond line")]
    TruncatedBondLine,
    #[error("unknown element symbol")]
    UnknownElement,
    #[error("missing `M  END` marker")]
    MissingEndMarker,
    #[error("invalid numeric field")]
    InvalidNumber,
    #[error("bond index out of range")]
    BondIndexOutOfRange,
}

/// Error raised while reading or decoding SDF text.
///
/// `record` is the 0-based position of the offending record in the file and
/// `line` the 1-based line number inside that record.
#[derive(Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
    message: Cow<'static, str>,
    record: Option<usize>,
    line: Option<usize>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            record: None,
            line: None,
            path: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn record(&self) -> Option<usize> {
        self.record
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn with_record(mut self, ordinal: usize) -> Self {
        self.record = Some(ordinal);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        match (self.record, self.line) {
            (Some(record), Some(line)) => write!(f, " (record {record}, line {line})")?,
            (Some(record), None) => write!(f, " (record {record})")?,
            (None, Some(line)) => write!(f, " (line {line})")?,
            (None, None) => {}
        }
        if let Some(path) = &self.path {
            write!(f, " in {}", path.display())?;
        }
        Ok(())
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|boxed| boxed.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::new(ParseErrorKind::Io, err.to_string()).with_source(err)
    }
}

impl From<std::string::FromUtf8Error> for ParseError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ParseError::new(ParseErrorKind::Utf8, err.to_string()).with_source(err)
    }
}
