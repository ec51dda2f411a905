//! Frame storage and triangle drawing.

pub mod framebuffer;
pub mod rasterizer;
mod renderer;
mod triangle;

pub use framebuffer::{FrameBuffer, DEPTH_FAR};
pub use rasterizer::{EdgeFunctionRasterizer, ShadingContext};
pub use renderer::Renderer;
pub use triangle::Triangle;
