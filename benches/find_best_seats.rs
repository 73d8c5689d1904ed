use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use seatmap::models::VenueLayout;
use seatmap::services::{find_best_seats, SeatAllocator};

fn bench_find_best_seats(c: &mut Criterion) {
    let layout = VenueLayout::default();
    let mut rng = StdRng::seed_from_u64(2025);
    let seats = SeatAllocator::default().generate_seats(&layout.sections, &mut rng);
    let available: Vec<_> = seats.into_iter().filter(|s| s.is_available()).collect();

    let mut group = c.benchmark_group("find_best_seats");
    for needed in [1usize, 4, 8, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(needed), &needed, |b, &needed| {
            b.iter(|| find_best_seats(black_box(&available), black_box(needed)))
        });
    }
    group.finish();
}

fn bench_generate_seats(c: &mut Criterion) {
    let layout = VenueLayout::default();
    let allocator = SeatAllocator::default();

    c.bench_function("generate_seats/default_venue", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| allocator.generate_seats(black_box(&layout.sections), &mut rng))
    });
}

criterion_group!(benches, bench_find_best_seats, bench_generate_seats);
criterion_main!(benches);
