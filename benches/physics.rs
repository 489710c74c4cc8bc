//! Benchmarks for clothy physics simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use clothy::*;

fn bench_topology_build(c: &mut Criterion) {
    let mesh: SurfaceMesh<f32> = SurfaceMesh::grid(64, 64, 0.05, 0.0);
    c.bench_function("topology_64x64_grid", |b| {
        b.iter(|| Topology::build(&mesh).map(|t| t.diagonals().len()))
    });
}

fn bench_scene_step(c: &mut Criterion) {
    c.bench_function("scene_32x32_cloth_60_steps", |b| {
        b.iter(|| {
            let config = SimulationConfig::<f32>::new()
                .with_corners(0, 31)
                .with_corner_pinning(true)
                .with_friction_enabled(true)
                .with_sphere_collision(true);
            let meshes = [SurfaceMesh::grid(32, 32, 0.05, -8.0)];
            let mut scene = Scene::from_meshes(&meshes, &config).ok()?;
            for _ in 0..60 {
                scene.step_fixed(&config, &mut NoOpStepObserver).ok()?;
            }
            Some(scene.positions())
        });
    });
}

fn bench_export(c: &mut Criterion) {
    let config = SimulationConfig::<f32>::new();
    let meshes = [SurfaceMesh::grid(32, 32, 0.05, 0.0), SurfaceMesh::grid(16, 16, 0.05, 1.0)];
    let Ok(scene) = Scene::from_meshes(&meshes, &config) else { return };
    c.bench_function("export_two_sub_meshes", |b| {
        b.iter(|| {
            let mut out = String::new();
            export::write_scene(&scene, &mut out).map(|_| out.len())
        })
    });
}

criterion_group!(benches, bench_topology_build, bench_scene_step, bench_export);
criterion_main!(benches);
