use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::{
    AspectCalculator, BirthData, CdoAssembler, Ephemeris, JulianDay, NatalChartBuilder,
    ObserverLocation, SiderealStandard, TransitEngine, ZodiacFrame,
};

fn bench_aspects(c: &mut Criterion) {
    let ephemeris = Ephemeris::analytic(SiderealStandard::Lahiri);
    let location = ObserverLocation::new(28.6139, 77.2090).unwrap();
    let natal = NatalChartBuilder::new(&ephemeris)
        .build(JulianDay(2_449_827.958_333), &location, ZodiacFrame::Tropical)
        .unwrap();
    let transits = TransitEngine::new(&ephemeris)
        .current_positions(JulianDay(2_460_827.5), None, ZodiacFrame::Tropical)
        .unwrap();
    let targets = natal.aspect_targets();
    let calculator = AspectCalculator::default();

    c.bench_function("aspects_between", |b| {
        b.iter(|| calculator.aspects_between(black_box(&transits), black_box(&targets)))
    });

    let birth = BirthData::new("1995-04-20", 28.6139, 77.2090)
        .with_time("16:30")
        .with_offset(5.5);
    let query = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let assembler = CdoAssembler::new(&ephemeris, AspectCalculator::default());

    c.bench_function("assemble_cdo", |b| {
        b.iter(|| assembler.assemble(black_box(&birth), black_box(query)))
    });
}

criterion_group!(benches, bench_aspects);
criterion_main!(benches);
