//! A CPU-based software-rendered 3D graphics engine.
//!
//! Scenes are node trees carrying meshes, lights and a camera. Every frame
//! the whole tree is assembled into a triangle list, then each triangle is
//! rasterized with a depth buffer, perspective-correct texturing, flat,
//! Blinn-Phong or GGX lighting and optional raycast shadows. SDL2 is only
//! used by the optional `window` feature for display and input.
//!
//! # Quick Start
//!
//! ```no_run
//! use rasterkin::prelude::*;
//!
//! let mut engine = Engine::new(RenderConfig::default(), Scene::demo())?;
//! engine.tick(&InputState::default(), 1.0 / 60.0);
//! let argb: &[u8] = engine.frame_buffer();
//! # Ok::<(), rasterkin::ConfigError>(())
//! ```

// Public API - exposed to library consumers
pub mod assembler;
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod light;
pub mod lighting;
pub mod material;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod scene;
pub mod shadow;
pub mod texture;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, CameraMode};
pub use config::{LightingModel, RenderConfig, ShadingMode, TextureFilter};
pub use engine::Engine;
pub use error::{ConfigError, LoadError, SceneError};
pub use light::{Light, LightKind};
pub use material::Material;
pub use mesh::Mesh;
pub use scene::{Node, NodeKey, Scene, SceneGraph};
pub use texture::Texture;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rasterkin::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraMode};

    // Engine & configuration
    pub use crate::config::{LightingModel, RenderConfig, ShadingMode, TextureFilter};
    pub use crate::engine::Engine;
    pub use crate::input::InputState;

    // Scene
    pub use crate::light::{Light, LightKind};
    pub use crate::material::Material;
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::scene::{Behavior, HelicopterControls, Node, NodeBehavior, NodeKey, Scene, SceneGraph};
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Math
    pub use crate::colors::Color;
    pub use crate::math::{EulerOrder, Mat4, Quat, Vec2, Vec3, Vec4};
}
