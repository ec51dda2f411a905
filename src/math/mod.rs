//! Linear algebra for the pipeline: vectors, 4x4 matrices and quaternions.

pub mod mat4;
pub mod quat;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use quat::{EulerOrder, Quat};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
