//! Textures and filtered sampling.
//!
//! UV (0,0) is the top-left texel. Coordinates outside [0,1] clamp to the
//! edge. An empty texture samples as opaque white.

use std::path::Path;

use crate::colors::Color;
use crate::config::TextureFilter;
use crate::error::LoadError;

/// Represents a 2D texture for texture mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Texture {
    // Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture from tightly packed RGB bytes, row-major from the top.
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(LoadError::TextureSize {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(3)
            .map(|p| 0xFF00_0000 | ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | (p[2] as u32))
            .collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A texture filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            data: vec![color.to_argb(); width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Sample with the given filter.
    #[inline]
    pub fn sample(&self, u: f32, v: f32, filter: TextureFilter) -> Color {
        match filter {
            TextureFilter::Nearest => self.sample_nearest(u, v),
            TextureFilter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    /// Nearest-neighbor lookup: the texel containing `(u, v)`, clamped.
    #[inline]
    pub fn sample_nearest(&self, u: f32, v: f32) -> Color {
        if self.is_empty() {
            return Color::WHITE;
        }
        let x = Self::clamp_index((u * self.width as f32).floor(), self.width);
        let y = Self::clamp_index((v * self.height as f32).floor(), self.height);
        self.texel(x, y)
    }

    /// Bilinear lookup over the 2x2 texel neighborhood around `(u, v)`.
    ///
    /// Texel centers sit at half-integer positions, so sampling exactly at a
    /// center returns that texel unchanged.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        if self.is_empty() {
            return Color::WHITE;
        }
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;

        let x1 = Self::clamp_index(x0 + 1.0, self.width);
        let y1 = Self::clamp_index(y0 + 1.0, self.height);
        let x0 = Self::clamp_index(x0, self.width);
        let y0 = Self::clamp_index(y0, self.height);

        let top = self.texel(x0, y0).lerp(self.texel(x1, y0), tx);
        let bottom = self.texel(x0, y1).lerp(self.texel(x1, y1), tx);
        top.lerp(bottom, ty)
    }

    #[inline]
    fn clamp_index(coord: f32, size: u32) -> u32 {
        (coord.max(0.0) as u32).min(size - 1)
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> Color {
        Color::from_argb(self.data[(y * self.width + x) as usize])
    }
}
