//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns
//! the render configuration, the frame buffers and the [`Scene`], and runs
//! one frame per [`Engine::tick`]:
//!
//! 1. Scene update: node behaviors, then the camera
//! 2. Assembly of the whole triangle list
//! 3. Rasterization of every triangle against that list

use crate::assembler::assemble;
use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::input::InputState;
use crate::render::{EdgeFunctionRasterizer, Renderer, ShadingContext};
use crate::scene::Scene;

pub struct Engine {
    config: RenderConfig,
    renderer: Renderer,
    scene: Scene,
    triangle_count: usize,
}

impl Engine {
    pub fn new(config: RenderConfig, scene: Scene) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "engine {}x{} @ {} Hz, {} shading, {} lighting, {} filtering, shadows {}",
            config.width,
            config.height,
            config.refresh_rate,
            config.shading,
            config.lighting,
            config.texture_filter,
            if config.raycast_shadows { "on" } else { "off" }
        );

        let mut engine = Self {
            renderer: Renderer::new(config.width, config.height),
            config,
            scene,
            triangle_count: 0,
        };
        engine.scene.camera.aspect_ratio = engine.config.aspect_ratio();
        // Build the first view matrix so a render before any update is valid.
        let scene = &mut engine.scene;
        scene
            .camera
            .update(&mut scene.graph, &InputState::default(), 0.0);
        Ok(engine)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the configuration, resizing the frame buffers if needed.
    pub fn set_config(&mut self, config: RenderConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.width != self.config.width || config.height != self.config.height {
            self.renderer.resize(config.width, config.height);
            self.scene.camera.aspect_ratio = config.aspect_ratio();
        }
        self.config = config;
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    /// Triangles that survived assembly in the last rendered frame.
    pub fn last_triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Advance behaviors, then the camera.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let scene = &mut self.scene;
        scene.graph.update(input, dt);
        scene.camera.update(&mut scene.graph, input, dt);
    }

    /// Draw the current scene state into the frame buffer.
    pub fn render(&mut self) {
        self.renderer.clear(self.scene.background.to_argb());

        let scene = &self.scene;
        let view = scene.camera.view_matrix();
        let projection = scene
            .camera
            .projection(self.config.near_clip, self.config.far_clip);

        let mut triangles = Vec::with_capacity(self.triangle_count);
        assemble(&scene.graph, &view, &projection, &self.config, &mut triangles);

        let lights = scene.resolve_lights();
        let ctx = ShadingContext {
            config: &self.config,
            lights: &lights,
            camera_position: scene.camera.world_position(&scene.graph),
            triangles: &triangles,
        };

        let mut fb = self.renderer.as_framebuffer();
        for triangle in &triangles {
            EdgeFunctionRasterizer::draw_triangle(triangle, &mut fb, &ctx);
        }

        log::trace!("frame: {} triangles, {} lights", triangles.len(), lights.len());
        self.triangle_count = triangles.len();
    }

    /// One frame: update with `input` over `dt` seconds, then render.
    pub fn tick(&mut self, input: &InputState, dt: f32) {
        self.update(input, dt);
        self.render();
    }
}
