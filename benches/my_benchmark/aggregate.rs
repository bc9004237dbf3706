use crate::sweep_data::generate_figure1_lines;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use sweep_stats::prelude::*;

pub fn bench_ingest(c: &mut Criterion) {
    let schema = ExperimentVariant::Figure1.schema().unwrap();
    let mut group = c.benchmark_group("ingest");

    for runs in [10, 100, 1000] {
        let lines = generate_figure1_lines(11, runs);
        group.throughput(Throughput::Elements(lines.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(runs), &lines, |b, lines| {
            b.iter(|| ingest(black_box(lines.iter().map(String::as_str)), &schema).unwrap())
        });
    }

    group.finish();
}

pub fn bench_summarize(c: &mut Criterion) {
    let schema = ExperimentVariant::Figure1.schema().unwrap();
    let groups = ingest(generate_figure1_lines(11, 1000), &schema).unwrap();
    let mut group = c.benchmark_group("summarize");

    for method in [ConfidenceMethod::NormalApproximation, ConfidenceMethod::StudentT] {
        group.bench_function(format!("{:?}", method), |b| {
            b.iter(|| summarize(black_box(&groups), method, TrialCount::Observed).unwrap())
        });
    }

    group.finish();
}
