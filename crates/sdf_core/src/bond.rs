use serde::Serialize;

use crate::columns::{Columns, Field};
use crate::error::{ParseError, ParseErrorKind};

/// Narrowest bond line that still carries every mandatory field.
pub const MIN_BOND_LINE_WIDTH: usize = 12;

const FIRST_ATOM: Field<i32> = Field::new("first atom number", 0, 3);
const SECOND_ATOM: Field<i32> = Field::new("second atom number", 3, 6);
const BOND_TYPE: Field<i32> = Field::new("bond type", 6, 9);
const STEREO: Field<i32> = Field::new("bond stereo", 9, 12);
const INFO_START: usize = 12;
const INFO_WIDTH: usize = 3;

/// Bond orders defined for the V2000 bond type field, including the query
/// types used in substructure files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
    SingleOrDouble,
    SingleOrAromatic,
    DoubleOrAromatic,
    Any,
}

impl BondOrder {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            4 => Some(BondOrder::Aromatic),
            5 => Some(BondOrder::SingleOrDouble),
            6 => Some(BondOrder::SingleOrAromatic),
            7 => Some(BondOrder::DoubleOrAromatic),
            8 => Some(BondOrder::Any),
            _ => None,
        }
    }
}

/// One line of the bond block.
///
/// Endpoints are stored 0-based. They are not checked against the atom
/// count unless the parser is configured with `check_bond_indices`, so a
/// file index of `0` shows up here as `-1`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bond {
    start_atom: i32,
    end_atom: i32,
    bond_type: i32,
    stereo: i32,
    info: Vec<i32>,
}

impl Bond {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let columns = Columns::new(line);
        if columns.width() < MIN_BOND_LINE_WIDTH {
            return Err(ParseError::new(
                ParseErrorKind::TruncatedBondLine,
                format!(
                    "bond line is {} characters, expected at least {MIN_BOND_LINE_WIDTH}",
                    columns.width()
                ),
            ));
        }

        Ok(Self {
            start_atom: FIRST_ATOM.read(&columns, ParseErrorKind::InvalidNumber)? - 1,
            end_atom: SECOND_ATOM.read(&columns, ParseErrorKind::InvalidNumber)? - 1,
            bond_type: BOND_TYPE.read(&columns, ParseErrorKind::InvalidNumber)?,
            stereo: STEREO.read(&columns, ParseErrorKind::InvalidNumber)?,
            info: columns.ints_from(INFO_START, INFO_WIDTH, "bond info")?,
        })
    }

    pub fn start_atom(&self) -> i32 {
        self.start_atom
    }

    pub fn end_atom(&self) -> i32 {
        self.end_atom
    }

    /// Both endpoints as slice indices, or `None` if either is negative.
    pub fn atom_indices(&self) -> Option<(usize, usize)> {
        let start = usize::try_from(self.start_atom).ok()?;
        let end = usize::try_from(self.end_atom).ok()?;
        Some((start, end))
    }

    pub fn bond_type(&self) -> i32 {
        self.bond_type
    }

    pub fn order(&self) -> Option<BondOrder> {
        BondOrder::from_code(self.bond_type)
    }

    pub fn stereo(&self) -> i32 {
        self.stereo
    }

    pub fn info(&self) -> &[i32] {
        &self.info
    }

    pub(crate) fn check_range(&self, atom_count: usize) -> Result<(), ParseError> {
        let in_range = |index: i32| usize::try_from(index).map_or(false, |i| i < atom_count);
        if in_range(self.start_atom) && in_range(self.end_atom) {
            return Ok(());
        }
        Err(ParseError::new(
            ParseErrorKind::BondIndexOutOfRange,
            format!(
                "bond {}-{} references an atom outside 1..={atom_count}",
                self.start_atom + 1,
                self.end_atom + 1
            ),
        ))
    }
}
