use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use sdf_core::{BondOrder, ErrorPolicy, ParseErrorKind, ParserOptions, Record, parse_file};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/qm9_sample.sdf")
}

fn load(options: &ParserOptions) -> Vec<Record> {
    parse_file(fixture_path(), options)
        .expect("fixture parses")
        .into_records()
}

#[test]
fn reads_every_record_in_order() {
    let records = load(&ParserOptions::default());
    let names: Vec<_> = records.iter().map(Record::name).collect();
    assert_eq!(
        names,
        vec!["gdb_1", "gdb_2", "gdb_3", "gdb_4", "gdb_5", "ammonium"]
    );
    for record in &records {
        assert_eq!(record.atoms().len(), record.atom_count());
        assert_eq!(record.bonds().len(), record.bond_count());
        assert_eq!(record.details(), "-OEChem-03231823253D");
        assert_eq!(record.comment(), "");
        for (slot, atom) in record.atoms().iter().enumerate() {
            assert_eq!(atom.index(), slot);
            assert_eq!(atom.info().len(), 10);
        }
    }
}

#[test]
fn methane_matches_reference_values() {
    let records = load(&ParserOptions::default());
    let methane = &records[0];
    assert_eq!(methane.atom_count(), 5);
    assert_eq!(methane.bond_count(), 4);
    let elements: Vec<_> = methane.atoms().iter().map(|a| a.atomic_num()).collect();
    assert_eq!(elements, vec![6, 1, 1, 1, 1]);
    assert_eq!(methane.atoms()[3].coords().to_array(), [-0.5408, 1.4475, -0.8766]);
    for bond in methane.bonds() {
        assert_eq!(bond.start_atom(), 0);
        assert_eq!(bond.info(), &[0, 0, 0]);
        let (a, b) = bond.atom_indices().expect("in range");
        let length = methane.atoms()[a]
            .coords()
            .distance(methane.atoms()[b].coords());
        assert!((1.08..1.10).contains(&length), "C-H length {length}");
    }
    assert!(methane.properties().is_empty());
    assert!(methane.data_fields().is_empty());
}

#[test]
fn triple_bonds_and_orders() {
    let records = load(&ParserOptions::default());
    let acetylene = &records[3];
    assert_eq!(acetylene.bonds()[0].order(), Some(BondOrder::Triple));
    let hcn = &records[4];
    assert_eq!(hcn.atoms()[1].symbol(), "N");
    assert_eq!(hcn.bonds()[0].bond_type(), 3);
}

#[test]
fn properties_and_data_fields_are_kept_verbatim() {
    let records = load(&ParserOptions::default());
    let ammonium = &records[5];
    assert_eq!(ammonium.atoms()[0].charge(), 3);
    assert_eq!(ammonium.atoms()[0].formal_charge(), Some(1));
    assert_eq!(ammonium.properties(), &["M  CHG  1   1   1".to_string()]);
    assert_eq!(
        ammonium.data_fields(),
        &["> <source>", "synthetic", "", "> <charge>", "1", ""]
            .map(String::from)
    );
}

#[test]
fn limit_returns_a_prefix() {
    let all = load(&ParserOptions::default());
    for limit in 0..=all.len() + 1 {
        let options = ParserOptions {
            limit: Some(limit),
            ..ParserOptions::default()
        };
        let prefix = load(&options);
        assert_eq!(prefix.len(), limit.min(all.len()));
        assert_eq!(prefix[..], all[..prefix.len()]);
    }
}

#[test]
fn serial_and_parallel_agree() {
    let serial = load(&ParserOptions {
        parallel: false,
        ..ParserOptions::default()
    });
    assert_eq!(serial, load(&ParserOptions::default()));
}

#[test]
fn gzip_input_is_decompressed() {
    let raw = fs::read(fixture_path()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let gz_path = dir.path().join("qm9.sdf.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path).unwrap(), Compression::default());
    encoder.write_all(&raw).unwrap();
    encoder.finish().unwrap();

    let compressed = parse_file(&gz_path, &ParserOptions::default())
        .unwrap()
        .into_records();
    assert_eq!(compressed, load(&ParserOptions::default()));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sdf");
    let err = parse_file(&path, &ParserOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::Io);
    assert_eq!(err.path(), Some(path.as_path()));
}

#[test]
fn corrupt_record_in_file() {
    let text = fs::read_to_string(fixture_path()).unwrap();
    let corrupt = text.replacen("M  END\n$$$$\ngdb_3", "$$$$\ngdb_3", 1);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.sdf");
    fs::write(&path, corrupt).unwrap();

    let err = parse_file(&path, &ParserOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::MissingEndMarker);
    assert_eq!(err.record(), Some(1));
    assert_eq!(err.path(), Some(path.as_path()));

    let lenient = ParserOptions {
        error_policy: ErrorPolicy::Lenient,
        ..ParserOptions::default()
    };
    let file = parse_file(&path, &lenient).unwrap();
    assert_eq!(file.len(), 5);
    assert_eq!(file.skipped()[0].0, 1);
    assert_eq!(file.records()[1].name(), "gdb_3");
}

#[test]
fn records_serialize_as_json() {
    let records = load(&ParserOptions {
        limit: Some(1),
        ..ParserOptions::default()
    });
    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["name"], "gdb_1");
    assert_eq!(json["bonds"][0]["start_atom"], 0);
    assert_eq!(json["bonds"][0]["end_atom"], 1);
    assert_eq!(json["atoms"][0]["info"].as_array().map(Vec::len), Some(10));
}
