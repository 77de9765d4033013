use criterion::{Criterion, criterion_group, criterion_main};
use std::{hint::black_box, time::Duration};
use thor_routing::{
    engine::Engine,
    network::{Commune, Edge, Network, ServiceClass, Station, StationIndex, WeightMode},
    router::find_shortest_path,
    shared::geo::Coordinate,
};

const SIDE: usize = 60;

fn code(row: usize, col: usize) -> String {
    format!("87{row:03}{col:03}")
}

/// A `SIDE x SIDE` grid of stations, alternating high-speed and regional
/// lines, roughly the size of the national network.
fn grid_network() -> Network {
    let mut stations = Vec::with_capacity(SIDE * SIDE);
    let mut edges = Vec::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let name = format!("Ville {row} Gare {col}");
            stations.push(Station::new(
                [code(row, col)],
                &name,
                Commune::new(format!("{row:05}"), &format!("Ville {row}")),
                Coordinate::new(42.0 + row as f64 * 0.1, -1.0 + col as f64 * 0.12),
            ));
            let class = if row % 5 == 0 {
                ServiceClass::HighSpeed
            } else {
                ServiceClass::Regional
            };
            let mut link = |to: String| {
                for (from, to) in [(code(row, col), to.clone()), (to, code(row, col))] {
                    edges.push(
                        Edge::new(from, to)
                            .with_mean_minutes(8.0 + ((row * 7 + col * 3) % 11) as f64)
                            .with_service_class(class),
                    );
                }
            };
            if col + 1 < SIDE {
                link(code(row, col + 1));
            }
            if row + 1 < SIDE {
                link(code(row + 1, col));
            }
        }
    }
    Network::build(StationIndex::new(stations), edges, WeightMode::Time)
}

fn criterion_benchmark(c: &mut Criterion) {
    let network = grid_network();
    let from = code(0, 0);
    let to = code(SIDE - 1, SIDE - 1);
    let engine = Engine::with_network(network.clone());

    let mut group = c.benchmark_group("Routing");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Shortest path corner to corner", |b| {
        b.iter(|| black_box(find_shortest_path(network.graph(), &from, &to)))
    });

    group.bench_function("Resolve city", |b| {
        b.iter(|| black_box(engine.resolve("Ville 30")))
    });

    group.bench_function("Find route", |b| {
        b.iter(|| black_box(engine.find_route("Ville 0 Gare 0", "Ville 59 Gare 59")))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
