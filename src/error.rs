//! Error types for the fallible parts of the crate.
//!
//! Building a scene, validating configuration and loading assets can fail.
//! The per-frame pipeline cannot: it skips what it cannot draw.

use thiserror::Error;

use crate::scene::NodeKey;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("node {0:?} does not exist in the scene graph")]
    NodeNotFound(NodeKey),

    #[error("cannot attach a node to itself")]
    SelfParent,

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { child: NodeKey, parent: NodeKey },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("resolution {width}x{height} overflows the ARGB frame size")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("refresh rate must be positive with a representable frame interval, got {0}")]
    InvalidRefreshRate(f32),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("texture has {actual} bytes, expected {expected} for {width}x{height} RGB")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
