//! Demo viewer.
//!
//! With no arguments the built-in demo scene is shown. Given a path to an
//! OBJ file, its meshes are placed on a floor under one shadow-casting light.

use std::error::Error;
use std::sync::Arc;

use rasterkin::prelude::*;
use rasterkin::window::{FrameLimiter, Window, WindowEvent};

const WINDOW_SCALE: u32 = 3;

fn load_scene(path: &str) -> Result<Scene, Box<dyn Error>> {
    let meshes = Mesh::load_obj(path)?;

    let mut scene = Scene::new();
    let camera = scene.camera.node();
    if let Some(node) = scene.graph.get_mut(camera) {
        node.transform.set_position_xyz(0.0, 1.5, 6.0);
    }

    scene.graph.add(
        Node::new("model")
            .with_meshes(meshes.into_iter().map(Arc::new))
            .with_shadows(true, true)
            .with_behavior(Behavior::Rotor { speed: 0.5 }),
    );

    let mut floor = Node::new("floor")
        .with_position(Vec3::new(0.0, -1.0, 0.0))
        .with_mesh(Arc::new(Mesh::quad(12.0, 12.0, Material::default())))
        .with_shadows(false, true);
    floor
        .transform
        .set_euler(Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0), EulerOrder::Xyz);
    scene.graph.add(floor);

    let sun = scene
        .graph
        .add(Node::new("sun").with_position(Vec3::new(4.0, 8.0, 3.0)));
    scene.add_light(Light::directional(sun).with_shadows(true));
    Ok(scene)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = match std::env::args().nth(1) {
        Some(path) => load_scene(&path)?,
        None => Scene::demo(),
    };

    let config = RenderConfig::default();
    let mut window = Window::new("rasterkin", config.width, config.height, WINDOW_SCALE)?;
    let mut limiter = FrameLimiter::new(&window, config.frame_interval());
    let mut engine = Engine::new(config, scene)?;

    'running: loop {
        for event in window.poll_events() {
            let mut config = engine.config().clone();
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::CycleShading => config.shading = config.shading.next(),
                WindowEvent::CycleLighting => config.lighting = config.lighting.next(),
                WindowEvent::CycleTextureFilter => {
                    config.texture_filter = config.texture_filter.next()
                }
                WindowEvent::ToggleShadows => config.raycast_shadows = !config.raycast_shadows,
            }
            log::info!(
                "{} shading, {} lighting, {} filtering, shadows {}",
                config.shading,
                config.lighting,
                config.texture_filter,
                config.raycast_shadows
            );
            engine.set_config(config)?;
        }

        let input = window.input();
        let dt = limiter.wait_and_get_delta(&window);
        engine.tick(&input, dt);
        window.present(engine.frame_buffer())?;
    }

    Ok(())
}
