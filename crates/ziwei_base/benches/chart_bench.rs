use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ziwei_base::{
    ChartInput, FiveElement, Gender, Locale, StarAnchors, build_chart, layout_major, star_anchors,
};
use ziwei_time::NormalizedDate;

fn placement_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    group.bench_function("star_anchors", |b| {
        b.iter(|| star_anchors(black_box(17), FiveElement::Fire))
    });
    group.bench_function("layout_major", |b| {
        let anchors = StarAnchors { ziwei: 4, tianfu: 8 };
        b.iter(|| layout_major(black_box(&anchors)))
    });
    group.finish();
}

fn chart_bench(c: &mut Criterion) {
    let birth = NormalizedDate::from_indices(1990, 1, 1, 0).unwrap_or_else(|e| panic!("{e}"));

    let mut group = c.benchmark_group("chart");
    group.bench_function("build_chart", |b| {
        b.iter(|| {
            build_chart(ChartInput::new(
                "bench",
                Gender::Female,
                black_box(birth),
                Locale::ZhCn,
            ))
        })
    });
    let chart = build_chart(ChartInput::new("bench", Gender::Female, birth, Locale::ZhCn))
        .unwrap_or_else(|e| panic!("{e}"));
    group.bench_function("horoscope_for_age", |b| {
        b.iter(|| chart.horoscope_for_age(black_box(42)))
    });
    group.finish();
}

criterion_group!(benches, placement_bench, chart_bench);
criterion_main!(benches);
