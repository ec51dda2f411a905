//! Render configuration.
//!
//! A [`RenderConfig`] is fixed for a render session and passed by reference
//! to the assembler and rasterizer.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// How lighting is evaluated across a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Light once per triangle at its centroid with the averaged normal.
    Flat,
    /// Light every covered pixel with the interpolated normal.
    #[default]
    Smooth,
}

impl ShadingMode {
    pub fn next(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Smooth,
            ShadingMode::Smooth => ShadingMode::Flat,
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Smooth => write!(f, "Smooth"),
        }
    }
}

/// Reflectance model used for every light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightingModel {
    /// Ambient plus Lambertian diffuse.
    Flat,
    /// Flat plus a Blinn-Phong specular highlight.
    #[default]
    BlinnPhong,
    /// Lambertian diffuse plus a GGX microfacet specular term.
    Ggx,
}

impl LightingModel {
    pub fn next(self) -> Self {
        match self {
            LightingModel::Flat => LightingModel::BlinnPhong,
            LightingModel::BlinnPhong => LightingModel::Ggx,
            LightingModel::Ggx => LightingModel::Flat,
        }
    }
}

impl fmt::Display for LightingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightingModel::Flat => write!(f, "Flat"),
            LightingModel::BlinnPhong => write!(f, "Blinn-Phong"),
            LightingModel::Ggx => write!(f, "GGX"),
        }
    }
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    Nearest,
    #[default]
    Bilinear,
}

impl TextureFilter {
    pub fn next(self) -> Self {
        match self {
            TextureFilter::Nearest => TextureFilter::Bilinear,
            TextureFilter::Bilinear => TextureFilter::Nearest,
        }
    }
}

impl fmt::Display for TextureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureFilter::Nearest => write!(f, "Nearest"),
            TextureFilter::Bilinear => write!(f, "Bilinear"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Framebuffer width in pixels.
    pub width: u32,
    /// Framebuffer height in pixels.
    pub height: u32,
    /// Frame ticks per second.
    pub refresh_rate: f32,
    pub shading: ShadingMode,
    pub lighting: LightingModel,
    pub texture_filter: TextureFilter,
    /// Cast shadow rays against the frame's triangle list.
    pub raycast_shadows: bool,
    /// Upper bound on the squared centroid distance between a receiver and
    /// a candidate occluder.
    pub shadow_draw_distance: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            refresh_rate: 60.0,
            shading: ShadingMode::default(),
            lighting: LightingModel::default(),
            texture_filter: TextureFilter::default(),
            raycast_shadows: false,
            shadow_draw_distance: 50.0,
            near_clip: 0.1,
            far_clip: 300.0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self
            .width
            .checked_mul(self.height)
            .and_then(|pixels| pixels.checked_mul(4))
            .is_none()
        {
            return Err(ConfigError::ResolutionTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.near_clip > 0.0 && self.near_clip < self.far_clip) {
            return Err(ConfigError::InvalidClipPlanes {
                near: self.near_clip,
                far: self.far_clip,
            });
        }
        if !(self.refresh_rate > 0.0)
            || Duration::try_from_secs_f32(1.0 / self.refresh_rate).is_err()
        {
            return Err(ConfigError::InvalidRefreshRate(self.refresh_rate));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Time budget of one frame tick.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.refresh_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        let config = RenderConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_relative_eq!(config.aspect_ratio(), 4.0 / 3.0);
        assert_eq!(config.lighting, LightingModel::BlinnPhong);
        assert!(!config.raycast_shadows);
    }

    #[test]
    fn test_rejects_inverted_clip_planes() {
        let config = RenderConfig {
            near_clip: 10.0,
            far_clip: 1.0,
            ..RenderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidClipPlanes {
                near: 10.0,
                far: 1.0
            })
        );
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_rejects_resolution_overflowing_frame_size() {
        let config = RenderConfig {
            width: 70_000,
            height: 70_000,
            ..RenderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ResolutionTooLarge {
                width: 70_000,
                height: 70_000
            })
        );
    }

    #[test]
    fn test_rejects_refresh_rate_without_finite_interval() {
        for refresh_rate in [0.0, -30.0, f32::NAN, f32::MIN_POSITIVE / 4.0] {
            let config = RenderConfig {
                refresh_rate,
                ..RenderConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidRefreshRate(_))),
                "accepted refresh rate {refresh_rate}"
            );
        }
    }

    #[test]
    fn test_frame_interval() {
        let config = RenderConfig::default();
        assert_relative_eq!(config.frame_interval().as_secs_f32(), 1.0 / 60.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mode_cycling_wraps() {
        assert_eq!(LightingModel::Ggx.next(), LightingModel::Flat);
        assert_eq!(ShadingMode::Smooth.next().next(), ShadingMode::Smooth);
    }
}
