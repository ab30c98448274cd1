//! Bounding-circle tree construction and query benchmarks

use circletree::{build_tree, contains, distance, DistanceQuery, Spheroid};
use circletree_bench::data_gen::{
    generate_collection, generate_line, generate_polygon, generate_query_points,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tree/Build");

    for size in [100, 1_000, 10_000].iter() {
        let polygon = generate_polygon(*size);
        group.bench_with_input(BenchmarkId::new("polygon", size), &polygon, |b, geometry| {
            b.iter(|| black_box(build_tree(geometry)));
        });

        let line = generate_line(*size);
        group.bench_with_input(BenchmarkId::new("line", size), &line, |b, geometry| {
            b.iter(|| black_box(build_tree(geometry)));
        });
    }

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query/Contains");

    for size in [100, 1_000, 10_000].iter() {
        let polygon = generate_polygon(*size);
        let tree = build_tree(&polygon).unwrap();
        let queries = generate_query_points(1_000);

        group.bench_with_input(BenchmarkId::new("polygon", size), &queries, |b, queries| {
            b.iter(|| {
                let mut hits = 0usize;
                for point in queries {
                    if contains(&tree, point) {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query/Distance");

    for size in [100, 1_000].iter() {
        let a = generate_polygon(*size);
        let b_geom = generate_line(*size);
        let tree_a = build_tree(&a).unwrap();
        let tree_b = build_tree(&b_geom).unwrap();

        group.bench_with_input(
            BenchmarkId::new("polygon_vs_line", size),
            &(&tree_a, &tree_b),
            |bench, (tree_a, tree_b)| {
                bench.iter(|| black_box(distance(tree_a, tree_b, None, 0.0)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("polygon_vs_line_wgs84", size),
            &(&tree_a, &tree_b),
            |bench, (tree_a, tree_b)| {
                bench.iter(|| {
                    black_box(
                        DistanceQuery::new()
                            .on_spheroid(Spheroid::WGS84)
                            .between(tree_a, tree_b),
                    )
                });
            },
        );
    }

    let collections = (generate_collection(50), generate_collection(50));
    let tree_a = build_tree(&collections.0).unwrap();
    let tree_b = build_tree(&collections.1).unwrap();
    group.bench_function("collection_vs_collection", |bench| {
        bench.iter(|| black_box(distance(&tree_a, &tree_b, None, 0.0)));
    });

    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_contains, bench_distance);
criterion_main!(benches);
