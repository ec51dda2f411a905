use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rasterkin::assembler::assemble;
use rasterkin::config::{LightingModel, RenderConfig, ShadingMode};
use rasterkin::engine::Engine;
use rasterkin::input::InputState;
use rasterkin::scene::Scene;

const BUFFER_WIDTH: u32 = 320;
const BUFFER_HEIGHT: u32 = 240;

fn config(shading: ShadingMode, lighting: LightingModel, shadows: bool) -> RenderConfig {
    RenderConfig {
        width: BUFFER_WIDTH,
        height: BUFFER_HEIGHT,
        shading,
        lighting,
        raycast_shadows: shadows,
        ..RenderConfig::default()
    }
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");

    for shading in [ShadingMode::Flat, ShadingMode::Smooth] {
        for shadows in [false, true] {
            let name = format!("{shading}_shadows_{}", if shadows { "on" } else { "off" });
            let config = config(shading, LightingModel::BlinnPhong, shadows);
            let mut engine = match Engine::new(config, Scene::demo()) {
                Ok(engine) => engine,
                Err(err) => panic!("bench config rejected: {err}"),
            };

            group.bench_function(BenchmarkId::new("demo", name), |b| {
                b.iter(|| {
                    engine.render();
                    black_box(engine.frame_buffer());
                });
            });
        }
    }

    group.finish();
}

fn benchmark_lighting_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("lighting_model");

    for lighting in [LightingModel::Flat, LightingModel::BlinnPhong, LightingModel::Ggx] {
        let config = config(ShadingMode::Smooth, lighting, false);
        let mut engine = match Engine::new(config, Scene::demo()) {
            Ok(engine) => engine,
            Err(err) => panic!("bench config rejected: {err}"),
        };

        group.bench_function(BenchmarkId::new("smooth", lighting.to_string()), |b| {
            b.iter(|| {
                engine.render();
                black_box(engine.frame_buffer());
            });
        });
    }

    group.finish();
}

fn benchmark_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    let config = config(ShadingMode::Smooth, LightingModel::BlinnPhong, false);
    let mut scene = Scene::demo();
    scene.camera.aspect_ratio = config.aspect_ratio();
    scene
        .camera
        .update(&mut scene.graph, &InputState::default(), 0.0);
    let view = scene.camera.view_matrix();
    let projection = scene.camera.projection(config.near_clip, config.far_clip);

    group.bench_function("demo_scene", |b| {
        let mut triangles = Vec::new();
        b.iter(|| {
            triangles.clear();
            assemble(black_box(&scene.graph), &view, &projection, &config, &mut triangles);
            black_box(triangles.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_full_frame,
    benchmark_lighting_models,
    benchmark_assembly
);
criterion_main!(benches);
