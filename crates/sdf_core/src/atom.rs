use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::columns::{Columns, Field};
use crate::error::{ParseError, ParseErrorKind};

/// Narrowest atom line that still carries every mandatory field.
pub const MIN_ATOM_LINE_WIDTH: usize = 39;

const X: Field<f64> = Field::new("x coordinate", 0, 10);
const Y: Field<f64> = Field::new("y coordinate", 10, 20);
const Z: Field<f64> = Field::new("z coordinate", 20, 30);
const SYMBOL: (usize, usize) = (31, 34);
const ISO: Field<i32> = Field::new("mass difference", 34, 36);
const CHARGE: Field<i32> = Field::new("charge", 36, 39);
const INFO_START: usize = 39;
const INFO_WIDTH: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AtomPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AtomPosition {
    pub fn distance(self, other: Self) -> f64 {
        self.squared_distance(other).sqrt()
    }

    pub fn squared_distance(self, other: Self) -> f64 {
        (other.z - self.z).mul_add(
            other.z - self.z,
            (other.y - self.y).mul_add(other.y - self.y, (other.x - self.x).powi(2)),
        )
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// One line of the atom block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Atom {
    index: usize,
    coords: AtomPosition,
    atomic_num: u8,
    iso: i32,
    charge: i32,
    info: Vec<i32>,
}

impl Atom {
    /// Decode one atom line. `index` is the 0-based position of the line in
    /// the atom block.
    pub fn parse(line: &str, index: usize) -> Result<Self, ParseError> {
        let columns = Columns::new(line);
        if columns.width() < MIN_ATOM_LINE_WIDTH {
            return Err(ParseError::new(
                ParseErrorKind::TruncatedAtomLine,
                format!(
                    "atom line is {} characters, expected at least {MIN_ATOM_LINE_WIDTH}",
                    columns.width()
                ),
            ));
        }

        let coords = AtomPosition {
            x: X.read(&columns, ParseErrorKind::InvalidNumber)?,
            y: Y.read(&columns, ParseErrorKind::InvalidNumber)?,
            z: Z.read(&columns, ParseErrorKind::InvalidNumber)?,
        };
        let symbol = columns.slice(SYMBOL.0, SYMBOL.1).unwrap_or_default();
        let atomic_num = atomic_number(symbol).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnknownElement,
                format!("unknown element symbol '{}'", symbol.trim()),
            )
        })?;

        Ok(Self {
            index,
            coords,
            atomic_num,
            iso: ISO.read(&columns, ParseErrorKind::InvalidNumber)?,
            charge: CHARGE.read(&columns, ParseErrorKind::InvalidNumber)?,
            info: columns.ints_from(INFO_START, INFO_WIDTH, "atom info")?,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn coords(&self) -> AtomPosition {
        self.coords
    }

    pub fn atomic_num(&self) -> u8 {
        self.atomic_num
    }

    pub fn symbol(&self) -> &'static str {
        ELEMENT_TABLE[usize::from(self.atomic_num) - 1].symbol
    }

    /// Mass difference from the most abundant isotope, as written.
    pub fn iso(&self) -> i32 {
        self.iso
    }

    /// The raw MDL charge code. See [`Atom::formal_charge`] for the decoded value.
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Formal charge decoded from the MDL charge code. A doublet radical
    /// (code 4) carries no charge. Unknown codes yield `None`.
    pub fn formal_charge(&self) -> Option<i32> {
        match self.charge {
            0 | 4 => Some(0),
            1 => Some(3),
            2 => Some(2),
            3 => Some(1),
            5 => Some(-1),
            6 => Some(-2),
            7 => Some(-3),
            _ => None,
        }
    }

    /// Remaining 3-character fields after the charge column.
    pub fn info(&self) -> &[i32] {
        &self.info
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementData {
    pub symbol: &'static str,
    pub atomic_number: u8,
}

impl ElementData {
    pub const fn new(symbol: &'static str, atomic_number: u8) -> Self {
        Self {
            symbol,
            atomic_number,
        }
    }

    /// Case-insensitive lookup, blanks around the symbol are ignored.
    pub fn from_symbol(symbol: &str) -> Option<&'static Self> {
        let number = atomic_number(symbol)?;
        Self::from_atomic_number(number)
    }

    pub fn from_atomic_number(number: u8) -> Option<&'static Self> {
        usize::from(number)
            .checked_sub(1)
            .and_then(|slot| ELEMENT_TABLE.get(slot))
    }
}

/// Resolve an element symbol to its atomic number. Deuterium (`D`) and
/// tritium (`T`) resolve to hydrogen.
pub fn atomic_number(symbol: &str) -> Option<u8> {
    SYMBOL_INDEX
        .get(symbol.trim().to_ascii_uppercase().as_str())
        .copied()
}

static SYMBOL_INDEX: Lazy<HashMap<String, u8>> = Lazy::new(|| {
    let mut index: HashMap<String, u8> = ELEMENT_TABLE
        .iter()
        .map(|element| (element.symbol.to_ascii_uppercase(), element.atomic_number))
        .collect();
    index.insert("D".to_string(), 1);
    index.insert("T".to_string(), 1);
    index
});

static ELEMENT_TABLE: [ElementData; 118] = [
    ElementData::new("H", 1),
    ElementData::new("He", 2),
    ElementData::new("Li", 3),
    ElementData::new("Be", 4),
    ElementData::new("B", 5),
    ElementData::new("C", 6),
    ElementData::new("N", 7),
    ElementData::new("O", 8),
    ElementData::new("F", 9),
    ElementData::new("Ne", 10),
    ElementData::new("Na", 11),
    ElementData::new("Mg", 12),
    ElementData::new("Al", 13),
    ElementData::new("Si", 14),
    ElementData::new("P", 15),
    ElementData::new("S", 16),
    ElementData::new("Cl", 17),
    ElementData::new("Ar", 18),
    ElementData::new("K", 19),
    ElementData::new("Ca", 20),
    ElementData::new("Sc", 21),
    ElementData::new("Ti", 22),
    ElementData::new("V", 23),
    ElementData::new("Cr", 24),
    ElementData::new("Mn", 25),
    ElementData::new("Fe", 26),
    ElementData::new("Co", 27),
    ElementData::new("Ni", 28),
    ElementData::new("Cu", 29),
    ElementData::new("Zn", 30),
    ElementData::new("Ga", 31),
    ElementData::new("Ge", 32),
    ElementData::new("As", 33),
    ElementData::new("Se", 34),
    ElementData::new("Br", 35),
    ElementData::new("Kr", 36),
    ElementData::new("Rb", 37),
    ElementData::new("Sr", 38),
    ElementData::new("Y", 39),
    ElementData::new("Zr", 40),
    ElementData::new("Nb", 41),
    ElementData::new("Mo", 42),
    ElementData::new("Tc", 43),
    ElementData::new("Ru", 44),
    ElementData::new("Rh", 45),
    ElementData::new("Pd", 46),
    ElementData::new("Ag", 47),
    ElementData::new("Cd", 48),
    ElementData::new("In", 49),
    ElementData::new("Sn", 50),
    ElementData::new("Sb", 51),
    ElementData::new("Te", 52),
    ElementData::new("I", 53),
    ElementData::new("Xe", 54),
    ElementData::new("Cs", 55),
    ElementData::new("Ba", 56),
    ElementData::new("La", 57),
    ElementData::new("Ce", 58),
    ElementData::new("Pr", 59),
    ElementData::new("Nd", 60),
    ElementData::new("Pm", 61),
    ElementData::new("Sm", 62),
    ElementData::new("Eu", 63),
    ElementData::new("Gd", 64),
    ElementData::new("Tb", 65),
    ElementData::new("Dy", 66),
    ElementData::new("Ho", 67),
    ElementData::new("Er", 68),
    ElementData::new("Tm", 69),
    ElementData::new("Yb", 70),
    ElementData::new("Lu", 71),
    ElementData::new("Hf", 72),
    ElementData::new("Ta", 73),
    ElementData::new("W", 74),
    ElementData::new("Re", 75),
    ElementData::new("Os", 76),
    ElementData::new("Ir", 77),
    ElementData::new("Pt", 78),
    ElementData::new("Au", 79),
    ElementData::new("Hg", 80),
    ElementData::new("Tl", 81),
    ElementData::new("Pb", 82),
    ElementData::new("Bi", 83),
    ElementData::new("Po", 84),
    ElementData::new("At", 85),
    ElementData::new("Rn", 86),
    ElementData::new("Fr", 87),
    ElementData::new("Ra", 88),
    ElementData::new("Ac", 89),
    ElementData::new("Th", 90),
    ElementData::new("Pa", 91),
    ElementData::new("U", 92),
    ElementData::new("Np", 93),
    ElementData::new("Pu", 94),
    ElementData::new("Am", 95),
    ElementData::new("Cm", 96),
    ElementData::new("Bk", 97),
    ElementData::new("Cf", 98),
    ElementData::new("Es", 99),
    ElementData::new("Fm", 100),
    ElementData::new("Md", 101),
    ElementData::new("No", 102),
    ElementData::new("Lr", 103),
    ElementData::new("Rf", 104),
    ElementData::new("Db", 105),
    ElementData::new("Sg", 106),
    ElementData::new("Bh", 107),
    ElementData::new("Hs", 108),
    ElementData::new("Mt", 109),
    ElementData::new("Ds", 110),
    ElementData::new("Rg", 111),
    ElementData::new("Cn", 112),
    ElementData::new("Nh", 113),
    ElementData::new("Fl", 114),
    ElementData::new("Mc", 115),
    ElementData::new("Lv", 116),
    ElementData::new("Ts", 117),
    ElementData::new("Og", 118),
];
