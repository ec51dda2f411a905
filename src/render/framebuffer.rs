//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into color and depth buffers with bounds-checked access.
//! The depth buffer enables proper hidden surface removal via z-buffer algorithm.

/// Depth value meaning "nothing drawn yet". Any real depth is nearer.
pub const DEPTH_FAR: f32 = f32::MIN;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores NDC z, which is +1 at the near plane and -1 at
/// the far plane. Larger values are closer to the camera, so a fragment is
/// kept when its depth is strictly greater than the stored value.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            (width * height) as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
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

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// True if `depth` would win the depth test at (x, y).
    ///
    /// Out-of-bounds coordinates always fail.
    #[inline]
    pub fn depth_test(&self, x: i32, y: i32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|idx| depth > self.depth_buffer[idx])
    }

    /// Write color and depth at (x, y) without testing.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn write(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greater_depth_wins() {
        let mut color = vec![0u32; 4];
        let mut depth = vec![DEPTH_FAR; 4];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 2, 2);

        assert!(fb.depth_test(1, 1, -0.9));
        fb.write(1, 1, 0.5, 7);
        assert!(!fb.depth_test(1, 1, 0.5));
        assert!(!fb.depth_test(1, 1, 0.2));
        assert!(fb.depth_test(1, 1, 0.6));
        assert_eq!(fb.get_pixel(1, 1), Some(7));
        assert_eq!(fb.get_depth(1, 1), Some(0.5));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut color = vec![0u32; 4];
        let mut depth = vec![DEPTH_FAR; 4];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 2, 2);

        assert!(!fb.depth_test(-1, 0, 1.0));
        assert!(!fb.depth_test(0, 2, 1.0));
        fb.write(5, 5, 1.0, 9);
        assert_eq!(fb.get_pixel(5, 5), None);
        assert!(color.iter().all(|&c| c == 0));
    }
}
