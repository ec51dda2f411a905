//! Per-frame input snapshot.
//!
//! The window layer fills an [`InputState`] once per tick; the camera and
//! node behaviors read it.

/// Keyboard and mouse state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    // ============ Movement ============
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,

    // ============ Looking ============
    pub look_up: bool,
    pub look_down: bool,
    pub look_left: bool,
    pub look_right: bool,
    /// Snap the free camera back to identity orientation.
    pub reset_view: bool,
    /// Relative mouse motion in pixels since the previous frame.
    pub mouse_delta: (i32, i32),

    // ============ Vehicle ============
    pub ascend: bool,
    pub descend: bool,
}

impl InputState {
    /// -1, 0 or +1 from a pair of opposing keys.
    #[inline]
    pub fn axis(positive: bool, negative: bool) -> f32 {
        (positive as i32 - negative as i32) as f32
    }
}
