use chrono::Datelike;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use teamgrass::calendar::{bucket_by_day, YearMonth};
use teamgrass::color::{rgb_to_oklab, BaseColor, ColorMapper, Normalization, Rgb};
use teamgrass::grass::build_calendar;

fn bench_map(c: &mut Criterion) {
    let mapper = ColorMapper::default();
    let base = BaseColor::Rgb(Rgb::new(0x21, 0x6e, 0x39));

    c.bench_function("map 101 intensities", |b| {
        b.iter(|| {
            for step in 0..=100 {
                let _ = mapper.map(black_box(&base), step as f64 / 100.0);
            }
        })
    });

    c.bench_function("rgb_to_oklab", |b| {
        b.iter(|| rgb_to_oklab(black_box(0x21), black_box(0x6e), black_box(0x39)))
    });
}

fn bench_calendar(c: &mut Criterion) {
    let month = YearMonth::new(2025, 1).unwrap();
    let dates: Vec<_> = month.dates().flat_map(|d| std::iter::repeat(d).take(d.ordinal() as usize % 5)).collect();
    let series = bucket_by_day(month, dates);
    let mapper = ColorMapper::default();
    let base = BaseColor::Hue(140.0);

    c.bench_function("build month calendar", |b| {
        b.iter(|| build_calendar("k", "K", &base, black_box(&series), &mapper, Normalization::Relative))
    });
}

criterion_group!(benches, bench_map, bench_calendar);
criterion_main!(benches);
