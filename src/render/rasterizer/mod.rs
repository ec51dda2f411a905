//! Triangle rasterization.
//!
//! [`EdgeFunctionRasterizer`] walks a triangle's bounding box and tests each
//! pixel center against the three edge functions. Lighting is delegated to a
//! [`PixelShader`] chosen from the configured [`ShadingMode`](crate::config::ShadingMode).

mod edgefunction;
mod shader;

pub use edgefunction::{edge_function, EdgeFunctionRasterizer};
pub use shader::{FlatShader, PixelShader, ShadingContext, SmoothShader};
