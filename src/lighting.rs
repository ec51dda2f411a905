//! Light evaluation and reflectance models.
//!
//! Shading a surface point against one light happens in two steps:
//!
//! 1. [`evaluate`] turns the light and the surface position into a
//!    [`LightSample`]: the unit direction toward the light, the distance
//!    attenuation and the spot cone factor.
//! 2. [`shade`] applies the active [`LightingModel`] to that sample and
//!    returns the light's color contribution.
//!
//! All colors are on the 0..255 scale. Each channel of a model's result is
//! clamped to 255 before attenuation and cone factor scale it.

use std::f32::consts::PI;

use crate::colors::Color;
use crate::config::LightingModel;
use crate::light::{LightKind, ResolvedLight};
use crate::math::Vec3;

/// Fraction of a light's ambient color applied everywhere.
pub const AMBIENT_STRENGTH: f32 = 0.2;

/// Fresnel reflectance at normal incidence for dielectrics.
const F0: f32 = 0.04;

const EPSILON: f32 = 1e-6;

/// Geometry of one light as seen from one surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit vector from the surface toward the light.
    pub direction: Vec3,
    pub attenuation: f32,
    /// Spot cone factor; 1 for non-spot lights.
    pub cone: f32,
}

/// Evaluate a light at a world-space surface point.
pub fn evaluate(light: &ResolvedLight, surface: Vec3) -> LightSample {
    let to_light = light.position - surface;
    let direction = to_light.normalize_or_zero();
    let params = light.light;

    match params.kind {
        LightKind::Directional => LightSample {
            direction,
            attenuation: 1.0,
            cone: 1.0,
        },
        LightKind::Point => LightSample {
            direction,
            attenuation: attenuation(params.decay, to_light.magnitude_squared()),
            cone: 1.0,
        },
        LightKind::Spot => {
            let cos_theta = light.axis.dot(-direction);
            LightSample {
                direction,
                attenuation: attenuation(params.decay, to_light.magnitude_squared()),
                cone: spot_cone(cos_theta, params.angle, params.penumbra),
            }
        }
    }
}

/// `1 / (1 + decay * distance²)`, guarded against non-positive denominators.
#[inline]
pub fn attenuation(decay: f32, distance_squared: f32) -> f32 {
    1.0 / (1.0 + decay * distance_squared).max(EPSILON)
}

/// Spot cone factor for a surface at angle `acos(cos_theta)` off the axis.
///
/// Zero outside `angle`, one inside the inner angle `angle * (1 - penumbra)`,
/// and `((cosθ - cosOuter) / (cosInner - cosOuter))^penumbra` in between.
pub fn spot_cone(cos_theta: f32, angle: f32, penumbra: f32) -> f32 {
    let cos_outer = angle.cos();
    let cos_inner = (angle * (1.0 - penumbra)).cos();
    if cos_theta <= cos_outer {
        return 0.0;
    }
    if cos_theta >= cos_inner {
        return 1.0;
    }
    let band = cos_inner - cos_outer;
    if band <= EPSILON {
        return 1.0;
    }
    ((cos_theta - cos_outer) / band).powf(penumbra)
}

/// Color contributed by one light at a surface point.
///
/// # Arguments
/// * `model` - Reflectance model to apply
/// * `light` - The light, resolved for this frame
/// * `sample` - Result of [`evaluate`] for the same surface point
/// * `normal` - Unit surface normal
/// * `view_dir` - Unit vector from the surface toward the camera
pub fn shade(
    model: LightingModel,
    light: &ResolvedLight,
    sample: &LightSample,
    normal: Vec3,
    view_dir: Vec3,
) -> Color {
    let params = light.light;
    let l = sample.direction;
    let n_dot_l = normal.dot(l).max(0.0);

    let ambient = params.ambient * AMBIENT_STRENGTH;
    let diffuse = params.diffuse * (n_dot_l * params.diffuse_power);

    let color = match model {
        LightingModel::Flat => ambient + diffuse,
        LightingModel::BlinnPhong => {
            let half = (l + view_dir).normalize_or_zero();
            let n_dot_h = normal.dot(half).max(0.0);
            let specular = n_dot_h.powf(params.shininess) * params.specular_power;
            ambient + diffuse + params.specular * specular
        }
        LightingModel::Ggx => {
            let specular = ggx_specular(normal, l, view_dir, params.shininess);
            ambient + diffuse + params.specular * (specular * n_dot_l * params.specular_power)
        }
    };

    color.clamp_max() * (sample.attenuation * sample.cone)
}

/// Cook-Torrance specular with a Trowbridge-Reitz (GGX) distribution,
/// Schlick Fresnel and the Smith-Schlick geometry term.
fn ggx_specular(normal: Vec3, l: Vec3, v: Vec3, shininess: f32) -> f32 {
    let n_dot_l = normal.dot(l).max(0.0);
    let n_dot_v = normal.dot(v).max(0.0);
    if n_dot_l <= 0.0 || n_dot_v <= 0.0 {
        return 0.0;
    }
    let h = (l + v).normalize_or_zero();
    let n_dot_h = normal.dot(h).max(0.0);
    let l_dot_h = l.dot(h).max(0.0);

    let roughness = 1.0 / shininess.max(1.0);
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;

    let d_denom = n_dot_h * n_dot_h * (alpha2 - 1.0) + 1.0;
    let distribution = alpha2 / (PI * (d_denom * d_denom).max(EPSILON));

    let fresnel = F0 + (1.0 - F0) * (1.0 - l_dot_h).powi(5);

    let k = alpha * 0.5;
    let g1 = |x: f32| x / (x * (1.0 - k) + k).max(EPSILON);
    let geometry = g1(n_dot_l) * g1(n_dot_v);

    distribution * fresnel * geometry / (4.0 * n_dot_l * n_dot_v).max(EPSILON)
}
