//! Surface material shared by the triangles of a mesh.

use std::sync::Arc;

use crate::colors::Color;
use crate::config::TextureFilter;
use crate::math::Vec3;
use crate::texture::Texture;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Reflectance factors in [0, 1], as read from MTL files. These and
    /// the extra maps below are carried from the loader for callers; the
    /// rasterizer only samples `texture`, and lighting takes its colors and
    /// shininess from the lights.
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    /// Base color texture. `None` or an empty image samples as white.
    pub texture: Option<Arc<Texture>>,
    pub normal_map: Option<Arc<Texture>>,
    pub specular_map: Option<Arc<Texture>>,
    pub alpha_map: Option<Arc<Texture>>,
    /// Overrides the session's texture filter for this material.
    pub filter: Option<TextureFilter>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
            shininess: 32.0,
            texture: None,
            normal_map: None,
            specular_map: None,
            alpha_map: None,
            filter: None,
        }
    }
}

impl Material {
    pub fn with_texture(texture: Arc<Texture>) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }

    /// Sample the base texture, falling back to white when there is none.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, default_filter: TextureFilter) -> Color {
        match self.texture.as_deref() {
            Some(texture) => texture.sample(u, v, self.filter.unwrap_or(default_filter)),
            None => Color::WHITE,
        }
    }
}
