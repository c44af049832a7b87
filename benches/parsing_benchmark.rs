use std::fs;

use fastg::parser::{BcalmParser, FastgParser};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn parse_fastg_text(text: &str) {
    FastgParser::new().parse_str(text).unwrap();
}

fn parse_bcalm_text(text: &str) {
    BcalmParser::new().parse_str(text).unwrap();
}

macro_rules! bench_parse {
    ($parser:ident, $id:literal, $name:ident, $file:literal) => {
        fn $name(c: &mut Criterion) {
            let text = fs::read_to_string($file).unwrap();
            c.bench_with_input(BenchmarkId::new($id, $file), &text, |b, t| {
                b.iter(|| $parser(t));
            });
        }
    };
}

bench_parse!(parse_fastg_text, "fastg", lil_fastg, "./lil.fastg");
bench_parse!(parse_bcalm_text, "bcalm", lil_bcalm, "./lil_bcalm.fa");

criterion_group!(
    name = parse_benches;
    config = Criterion::default().sample_size(25);
    targets = lil_fastg, lil_bcalm
);

criterion_main!(parse_benches);
