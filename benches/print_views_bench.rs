use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use travelbook_editor::core::{ItineraryPoint, LatLng, Route};
use travelbook_editor::PrintViewsFactory;

/// Synthetische Route als langgezogene Schlangenlinie.
fn build_synthetic_route(point_count: usize) -> Route {
    let mut route = Route::new();

    for index in 0..point_count {
        let step = index as f64;
        let lat = 50.0 + (step * 0.07).sin() * 0.02;
        let lng = 4.0 + step * 0.000_8;
        route
            .itinerary
            .itinerary_points
            .push(ItineraryPoint::new(lat, lng));
    }

    route
}

fn bench_views_for_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("print_views");
    for point_count in [1_000usize, 10_000, 50_000] {
        let route = build_synthetic_route(point_count);
        let factory = PrintViewsFactory::new(LatLng::new(0.05, 0.08));
        group.bench_with_input(
            BenchmarkId::from_parameter(point_count),
            &route,
            |b, route| {
                b.iter(|| {
                    let views = factory
                        .views_for_route(black_box(route))
                        .expect("Ansichten erwartet");
                    black_box(views.len())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_views_for_route);
criterion_main!(benches);
