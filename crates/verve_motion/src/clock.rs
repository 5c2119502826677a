//! Frame-delta conditioning
//!
//! The integrators accept whatever `dt` the host's frame loop produces, but
//! raw wall-clock deltas need two corrections before they are safe to feed
//! into physics: a suspended or backgrounded host hands back one enormous
//! delta when it resumes, and even a merely janky frame must not exceed the
//! integration stability ceiling. The policy is a pure function so the
//! tests cover it without a clock; [`FrameTimer`] wires it to `Instant` for
//! hosts that want the plumbing done.

use std::time::Instant;

/// Stability ceiling for a single integration step (~30fps).
pub const MAX_FRAME_DELTA: f32 = 0.033;

/// Deltas above this are treated as a host stall, not a long frame.
pub const LAG_THRESHOLD: f32 = 0.5;

/// Condition one raw frame delta (seconds) for integration.
///
/// Stalls (negative or above [`LAG_THRESHOLD`]) collapse to a single
/// [`MAX_FRAME_DELTA`] step so a resumed animation continues instead of
/// teleporting; ordinary deltas are clamped to the same ceiling.
pub fn condition_frame_delta(raw: f32) -> f32 {
    if !(0.0..=LAG_THRESHOLD).contains(&raw) {
        tracing::trace!(raw, "frame delta collapsed after host stall");
        return MAX_FRAME_DELTA;
    }
    raw.min(MAX_FRAME_DELTA)
}

/// Wall-clock frame timer producing conditioned deltas.
pub struct FrameTimer {
    last: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous tick, conditioned for integration.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        condition_frame_delta(raw)
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_deltas_pass_through() {
        assert_eq!(condition_frame_delta(0.016), 0.016);
        assert_eq!(condition_frame_delta(0.0), 0.0);
    }

    #[test]
    fn long_frames_clamp_to_the_ceiling() {
        assert_eq!(condition_frame_delta(0.1), MAX_FRAME_DELTA);
        assert_eq!(condition_frame_delta(LAG_THRESHOLD), MAX_FRAME_DELTA);
    }

    #[test]
    fn stalls_collapse_to_one_frame() {
        assert_eq!(condition_frame_delta(3.0), MAX_FRAME_DELTA);
        // Clock skew reads as a stall as well.
        assert_eq!(condition_frame_delta(-0.004), MAX_FRAME_DELTA);
    }
}
