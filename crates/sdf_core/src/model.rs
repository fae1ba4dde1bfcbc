use serde::Serialize;

use crate::atom::{Atom, AtomPosition};
use crate::bond::Bond;
use crate::error::ParseError;

/// One decoded molecule.
///
/// A record is built in a single pass by the parser and never changes
/// afterwards; `atoms().len() == atom_count()` and
/// `bonds().len() == bond_count()` always hold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    name: String,
    details: String,
    comment: String,
    atom_count: usize,
    bond_count: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    properties: Vec<String>,
    data_fields: Vec<String>,
}

impl Record {
    pub(crate) fn new(
        header: Header,
        atoms: Vec<Atom>,
        bonds: Vec<Bond>,
        properties: Vec<String>,
        data_fields: Vec<String>,
    ) -> Self {
        Self {
            name: header.name,
            details: header.details,
            comment: header.comment,
            atom_count: atoms.len(),
            bond_count: bonds.len(),
            atoms,
            bonds,
            properties,
            data_fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Second header line: program, timestamp and dimensionality.
    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    pub fn bond_count(&self) -> usize {
        self.bond_count
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Lines between the bond block and `M  END`, verbatim.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Lines after `M  END`, verbatim.
    pub fn data_fields(&self) -> &[String] {
        &self.data_fields
    }

    pub fn positions(&self) -> impl Iterator<Item = AtomPosition> + '_ {
        self.atoms.iter().map(Atom::coords)
    }
}

/// The three free-text lines that open every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Header {
    pub name: String,
    pub details: String,
    pub comment: String,
}

/// Result of decoding a whole file.
///
/// `skipped` is only ever populated under the lenient error policy; it holds
/// the ordinal of each dropped record with the error that dropped it, in
/// file order.
#[derive(Debug, Default)]
pub struct SdfFile {
    records: Vec<Record>,
    skipped: Vec<(usize, ParseError)>,
}

impl SdfFile {
    pub(crate) fn new(records: Vec<Record>, skipped: Vec<(usize, ParseError)>) -> Self {
        Self { records, skipped }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn skipped(&self) -> &[(usize, ParseError)] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl IntoIterator for SdfFile {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn water() -> Record {
        let atoms = vec![
            Atom::parse("   -0.0344    0.9775    0.0076 O   0  0", 0).unwrap(),
            Atom::parse("    0.0647    0.0205    0.0015 H   0  0", 1).unwrap(),
            Atom::parse("    0.8717    1.3008    0.0007 H   0  0", 2).unwrap(),
        ];
        let bonds = vec![
            Bond::parse("  1  2  1  0").unwrap(),
            Bond::parse("  1  3  1  0").unwrap(),
        ];
        let header = Header {
            name: "gdb_3".into(),
            details: "-OEChem-03231823233D".into(),
            comment: String::new(),
        };
        Record::new(header, atoms, bonds, Vec::new(), Vec::new())
    }

    #[test]
    fn counts_follow_blocks() {
        let record = water();
        assert_eq!(record.atom_count(), 3);
        assert_eq!(record.bond_count(), 2);
        assert_eq!(record.name(), "gdb_3");
        let oh = record.positions().next().unwrap().distance(record.atoms()[1].coords());
        assert!((oh - 0.9620).abs() < 1e-3);
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(water()).unwrap();
        assert_eq!(json["name"], "gdb_3");
        assert_eq!(json["atom_count"], 3);
        assert_eq!(json["atoms"][2]["atomic_num"], 1);
        assert_eq!(json["atoms"][0]["coords"]["x"], -0.0344);
        assert_eq!(json["bonds"][1]["end_atom"], 2);
        assert_eq!(json["data_fields"], serde_json::json!([]));
    }
}
