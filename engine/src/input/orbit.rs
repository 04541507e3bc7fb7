//! Orbit Drag Input
//!
//! State reported by the external orbit/gesture collaborator: whether a
//! camera drag is in progress and how much yaw it has produced since the
//! camera last consumed it.

/// Orbit drag tracker with yaw-delta accumulation.
///
/// - **Delta accumulation**: yaw deltas accumulate until consumed
/// - **Drag tracking**: `is_dragging()` is the camera's manual-override flag
/// - **Release clears**: ending a drag discards unconsumed delta
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbitInput {
    yaw_delta: f32,
    dragging: bool,
}

impl OrbitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag gesture.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// End the drag gesture, discarding any unconsumed delta.
    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.yaw_delta = 0.0;
    }

    /// Accumulate yaw (radians) produced by the gesture. Ignored when not dragging.
    #[inline]
    pub fn accumulate_yaw(&mut self, delta: f32) {
        if self.dragging {
            self.yaw_delta += delta;
        }
    }

    /// Return the accumulated yaw and reset it to zero.
    #[inline]
    pub fn consume_yaw(&mut self) -> f32 {
        std::mem::take(&mut self.yaw_delta)
    }

    /// Accumulated yaw without consuming it.
    #[inline]
    pub fn peek_yaw(&self) -> f32 {
        self.yaw_delta
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_and_consume() {
        let mut orbit = OrbitInput::new();
        orbit.begin_drag();
        orbit.accumulate_yaw(0.25);
        orbit.accumulate_yaw(-0.05);
        assert!((orbit.peek_yaw() - 0.2).abs() < 1e-6);
        assert!((orbit.consume_yaw() - 0.2).abs() < 1e-6);
        assert_eq!(orbit.consume_yaw(), 0.0);
    }

    #[test]
    fn test_delta_ignored_without_drag() {
        let mut orbit = OrbitInput::new();
        orbit.accumulate_yaw(1.0);
        assert_eq!(orbit.peek_yaw(), 0.0);
    }

    #[test]
    fn test_end_drag_clears_delta() {
        let mut orbit = OrbitInput::new();
        orbit.begin_drag();
        orbit.accumulate_yaw(0.5);
        orbit.end_drag();
        assert!(!orbit.is_dragging());
        assert_eq!(orbit.peek_yaw(), 0.0);
    }
}
