use std::fmt::Write;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sdf_core::{ParserOptions, parse_with_options};

/// 2 000 copies of a 15-atom ring, roughly the shape of a QM9 shard.
fn synthetic_file() -> String {
    let mut text = String::new();
    for record in 0..2_000 {
        let _ = writeln!(text, "ring_{record}\n  bench\n");
        text.push_str(" 15 15  0  0  0  0  0  0  0  0999 V2000\n");
        for atom in 0..15 {
            let angle = atom as f64 * std::f64::consts::TAU / 15.0;
            let _ = writeln!(
                text,
                "{:>10.4}{:>10.4}{:>10.4} C   0  0  0  0  0  0  0  0  0  0  0  0",
                1.5 * angle.cos(),
                1.5 * angle.sin(),
                0.0
            );
        }
        for atom in 1..=15 {
            let next = atom % 15 + 1;
            let _ = writeln!(text, "{atom:>3}{next:>3}  1  0  0  0  0");
        }
        text.push_str("M  END\n$$$$\n");
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = synthetic_file();
    let serial = ParserOptions {
        parallel: false,
        ..ParserOptions::default()
    };
    c.bench_function("sdf_core parse 2000 records serial", |b| {
        b.iter(|| {
            let file = parse_with_options(black_box(&text), &serial).expect("parse sdf");
            black_box(file.len());
        });
    });
    c.bench_function("sdf_core parse 2000 records parallel", |b| {
        b.iter(|| {
            let file =
                parse_with_options(black_box(&text), &ParserOptions::default()).expect("parse sdf");
            black_box(file.len());
        });
    });
}

criterion_group!(core_benches, bench_parse);
criterion_main!(core_benches);
