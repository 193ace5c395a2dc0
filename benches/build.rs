//! Benchmarks for half-edge construction and traversal.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hullmesh::prelude::*;
use hullmesh::primitives;
use nalgebra::Vector3;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_prism");
    let options = BuildOptions::default().with_validation(false);

    for &sides in &[8usize, 64, 512] {
        let (points, faces) = primitives::prism(sides);
        group.bench_with_input(BenchmarkId::from_parameter(sides), &faces, |b, faces| {
            b.iter(|| {
                let s: HalfEdgeStructure =
                    build_with_options(black_box(faces), points.len(), &options).unwrap();
                s
            });
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let (points, faces) = primitives::prism(512);
    let s: HalfEdgeStructure = build(&faces, points.len()).unwrap();

    c.bench_function("check_invariants_prism_512", |b| {
        b.iter(|| black_box(&s).check_invariants().unwrap());
    });
}

fn bench_traversal(c: &mut Criterion) {
    let (points, faces) = primitives::prism(512);
    let s: HalfEdgeStructure = build(&faces, points.len()).unwrap();

    c.bench_function("vertex_stars_prism_512", |b| {
        b.iter(|| {
            let total: usize = s.vertex_ids().map(|v| s.vertex_degree(v)).sum();
            black_box(total)
        });
    });

    c.bench_function("face_walks_prism_512", |b| {
        b.iter(|| {
            let total: usize = s.face_ids().map(|f| s.face_edges(f).count()).sum();
            black_box(total)
        });
    });
}

fn bench_support(c: &mut Criterion) {
    let hull: ConvexPolyhedron =
        ConvexPolyhedron::from_table(primitives::prism(256)).unwrap();
    let dir = Vector3::new(0.3, -0.8, 0.5);

    c.bench_function("support_vertex_prism_256", |b| {
        b.iter(|| hull.support_vertex(black_box(&dir)));
    });

    let hint = hull.support_vertex(&dir);
    c.bench_function("support_vertex_hinted_prism_256", |b| {
        b.iter(|| hull.support_vertex_from(black_box(&dir), hint));
    });
}

criterion_group!(benches, bench_build, bench_validate, bench_traversal, bench_support);
criterion_main!(benches);
