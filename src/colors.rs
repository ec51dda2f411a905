//! Color types and packing helpers.
//!
//! Light is accumulated as [`Color`], a floating point RGB triple on the
//! 0..255 scale. It is converted to a packed ARGB8888 `u32` exactly once,
//! when a pixel is written: [`modulate`] multiplies light by the texel,
//! divides by 256, rounds to nearest and clamps to 255.

use std::ops::{Add, AddAssign, Mul};

/// Linear RGB color, each channel on the 0..255 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(255.0, 255.0, 255.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32)
    }

    /// Unpacks an ARGB8888 value; alpha is dropped.
    pub fn from_argb(argb: u32) -> Self {
        Self::rgb((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Clamps every channel to at most 255.
    pub fn clamp_max(self) -> Self {
        Self::new(self.r.min(255.0), self.g.min(255.0), self.b.min(255.0))
    }

    pub fn halved(self) -> Self {
        self * 0.5
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Packs into ARGB8888 with opaque alpha, rounding and saturating.
    pub fn to_argb(self) -> u32 {
        pack_rgb(to_channel(self.r), to_channel(self.g), to_channel(self.b))
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits an ARGB8888 value into its `(r, g, b)` bytes.
#[inline]
pub fn unpack_rgb(argb: u32) -> (u8, u8, u8) {
    ((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
}

/// Modulates accumulated light by a texel: `round(light * texel / 256)`
/// per channel, clamped to 255.
#[inline]
pub fn modulate(light: Color, texel: Color) -> u32 {
    Color::new(
        light.r * texel.r / 256.0,
        light.g * texel.g / 256.0,
        light.b * texel.b / 256.0,
    )
    .to_argb()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let packed = pack_rgb(12, 34, 56);
        assert_eq!(packed >> 24, 0xFF);
        assert_eq!(unpack_rgb(packed), (12, 34, 56));
        assert_eq!(Color::from_argb(packed), Color::rgb(12, 34, 56));
    }

    #[test]
    fn test_modulate_with_white_keeps_light() {
        let light = Color::new(16.0, 100.0, 200.0);
        assert_eq!(unpack_rgb(modulate(light, Color::WHITE)), (16, 100, 199));
    }

    #[test]
    fn test_modulate_saturates() {
        let light = Color::new(1000.0, 255.0, 0.0);
        assert_eq!(unpack_rgb(modulate(light, Color::WHITE)), (255, 254, 0));
    }
}
