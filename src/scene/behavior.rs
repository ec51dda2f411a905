//! Per-frame node behaviors.
//!
//! A behavior mutates its node's local [`Transform`] once per tick, before
//! the node's children are updated. The built-in kinds cover the stock demo
//! scenes; anything else plugs in through [`NodeBehavior`].

use std::fmt;

use crate::input::InputState;
use crate::math::{EulerOrder, Quat, Vec3};
use crate::transform::Transform;

/// Strategy contract for user-supplied behaviors.
pub trait NodeBehavior {
    fn advance(&mut self, transform: &mut Transform, input: &InputState, dt: f32);
}

pub enum Behavior {
    /// Spins around local Y at `speed` rad/s; twice as fast while ascending,
    /// half as fast while descending.
    Rotor { speed: f32 },
    /// Adds `rate * dt` to the Euler angles every frame.
    Spin { rate: Vec3 },
    /// Keyboard flight controls with banking.
    Helicopter(HelicopterControls),
    Custom(Box<dyn NodeBehavior>),
}

impl Behavior {
    pub fn custom(behavior: impl NodeBehavior + 'static) -> Self {
        Behavior::Custom(Box::new(behavior))
    }

    pub fn advance(&mut self, transform: &mut Transform, input: &InputState, dt: f32) {
        match self {
            Behavior::Rotor { speed } => {
                let speed = if input.ascend {
                    *speed * 2.0
                } else if input.descend {
                    *speed * 0.5
                } else {
                    *speed
                };
                let mut euler = transform.euler();
                euler.y += speed * dt;
                transform.set_euler(euler, EulerOrder::Xyz);
            }
            Behavior::Spin { rate } => {
                transform.rotate_euler(*rate * dt);
            }
            Behavior::Helicopter(controls) => controls.advance(transform, input, dt),
            Behavior::Custom(inner) => inner.advance(transform, input, dt),
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Rotor { speed } => f.debug_struct("Rotor").field("speed", speed).finish(),
            Behavior::Spin { rate } => f.debug_struct("Spin").field("rate", rate).finish(),
            Behavior::Helicopter(controls) => f.debug_tuple("Helicopter").field(controls).finish(),
            Behavior::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Helicopter-style controls.
///
/// Forward/back/left/right move in the horizontal plane of the current
/// heading, ascend/descend change altitude and look-left/right yaw. The body
/// banks toward the direction of travel and eases back when released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelicopterControls {
    pub speed: f32,
    pub lift: f32,
    /// Maximum bank angle in radians.
    pub tilt_amount: f32,
    /// Slerp rate toward the target bank, per second.
    pub tilt_speed: f32,
    /// Yaw rate in radians per second.
    pub turn_speed: f32,
    heading: Quat,
    tilt: Quat,
}

impl HelicopterControls {
    pub fn new(speed: f32, lift: f32) -> Self {
        Self {
            speed,
            lift,
            tilt_amount: 15f32.to_radians(),
            tilt_speed: 5.0,
            turn_speed: 1.0,
            heading: Quat::IDENTITY,
            tilt: Quat::IDENTITY,
        }
    }

    pub fn advance(&mut self, transform: &mut Transform, input: &InputState, dt: f32) {
        let yaw = InputState::axis(input.look_left, input.look_right);
        if yaw != 0.0 {
            self.heading = (Quat::from_axis_angle(Vec3::UP, yaw * self.turn_speed * dt)
                * self.heading)
                .normalize();
        }

        let mut forward = self.heading * Vec3::FORWARD;
        let mut right = self.heading * Vec3::RIGHT;
        forward.y = 0.0;
        right.y = 0.0;

        let step = self.speed * dt;
        let along = InputState::axis(input.forward, input.back);
        let side = InputState::axis(input.right, input.left);
        let mut position = transform.position();
        position += forward.normalize_or_zero() * (along * step);
        position += right.normalize_or_zero() * (side * step);
        position.y += InputState::axis(input.ascend, input.descend) * self.lift * dt;

        // Nose dips when moving forward; the body rolls into strafes.
        let target = Quat::from_euler(
            Vec3::new(-along * self.tilt_amount, 0.0, -side * self.tilt_amount),
            EulerOrder::Xyz,
        );
        self.tilt = self
            .tilt
            .slerp(target, (self.tilt_speed * dt).min(1.0))
            .normalize();

        transform
            .set_position(position)
            .set_rotation(self.heading * self.tilt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotor_speeds() {
        let mut rotor = Behavior::Rotor { speed: 1.0 };
        let mut t = Transform::new();

        rotor.advance(&mut t, &InputState::default(), 0.5);
        assert_relative_eq!(t.euler().y, 0.5, epsilon = 1e-6);

        let boosted = InputState {
            ascend: true,
            ..InputState::default()
        };
        rotor.advance(&mut t, &boosted, 0.1);
        assert_relative_eq!(t.euler().y, 0.7, epsilon = 1e-5);
    }

    #[test]
    fn test_spin_accumulates_rate() {
        let mut spin = Behavior::Spin {
            rate: Vec3::new(0.0, 0.0, -1.0),
        };
        let mut t = Transform::new();
        spin.advance(&mut t, &InputState::default(), 0.25);
        spin.advance(&mut t, &InputState::default(), 0.25);
        assert_relative_eq!(t.euler().z, -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_helicopter_moves_forward_and_banks() {
        let mut heli = HelicopterControls::new(10.0, 2.0);
        let mut t = Transform::new();
        let input = InputState {
            forward: true,
            ascend: true,
            ..InputState::default()
        };
        heli.advance(&mut t, &input, 0.1);

        assert_relative_eq!(t.position().z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(t.position().y, 0.2, epsilon = 1e-5);
        // Nose pitched down a little.
        assert!(t.forward().y < 0.0);
    }

    #[test]
    fn test_custom_behavior_is_called() {
        struct Lift;
        impl NodeBehavior for Lift {
            fn advance(&mut self, transform: &mut Transform, _: &InputState, dt: f32) {
                transform.translate(Vec3::UP * dt);
            }
        }

        let mut behavior = Behavior::custom(Lift);
        let mut t = Transform::new();
        behavior.advance(&mut t, &InputState::default(), 2.0);
        assert_eq!(t.position(), Vec3::new(0.0, 2.0, 0.0));
    }
}
