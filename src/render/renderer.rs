//! Frame storage.
//!
//! Provides the [`Renderer`] struct which owns the color and depth buffers
//! for a render session and hands out [`FrameBuffer`] views to draw into.

use super::framebuffer::{FrameBuffer, DEPTH_FAR};

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![0xFF00_0000; size],
            depth_buffer: vec![DEPTH_FAR; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = width as usize * height as usize;
        self.color_buffer = vec![0xFF00_0000; size];
        self.depth_buffer = vec![DEPTH_FAR; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Start a new frame: fill the color buffer with `background` and reset
    /// every depth to [`DEPTH_FAR`].
    pub fn clear(&mut self, background: u32) {
        self.color_buffer.fill(background);
        self.depth_buffer.fill(DEPTH_FAR);
    }

    /// Color at (x, y) in ARGB8888, or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.color_buffer[(y * self.width + x) as usize])
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// The color buffer as raw ARGB8888 bytes, for presentation.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1, so the slice
        // covers exactly len * 4 initialized bytes.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_color_and_depth() {
        let mut renderer = Renderer::new(4, 3);
        {
            let mut fb = renderer.as_framebuffer();
            fb.write(1, 1, 0.5, 0xFF12_3456);
        }
        renderer.clear(0xFF50_5050);

        assert!(renderer.pixels().iter().all(|&c| c == 0xFF50_5050));
        let fb = renderer.as_framebuffer();
        assert_eq!(fb.get_depth(1, 1), Some(DEPTH_FAR));
    }

    #[test]
    fn test_bytes_cover_whole_buffer() {
        let renderer = Renderer::new(8, 2);
        assert_eq!(renderer.as_bytes().len(), 8 * 2 * 4);
        assert_eq!(renderer.pixel(8, 0), None);
    }
}
