//! Damped spring integrator
//!
//! A unit-mass damped harmonic oscillator advanced with semi-implicit
//! Euler: the velocity is updated from the spring force first and the
//! position then advances with the *new* velocity. The ordering is
//! required for stability at the stiffness range this crate targets
//! (roughly 50-1000); the explicit variant visibly overshoots there.

use serde::{Deserialize, Serialize};

use crate::clock::MAX_FRAME_DELTA;
use crate::error::ConfigError;
use crate::integrator::{Integrator, POSITION_THRESHOLD, VELOCITY_THRESHOLD};
use crate::state::MotionState;

/// Follower half of a coupled spring pair.
///
/// `Ratio` scales the leader's stiffness (smaller ratio = lazier chase,
/// stronger ease-in); `Config` supplies explicit constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Follower {
    Ratio(f32),
    Config { stiffness: f32, damping: f32 },
}

/// Spring parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Spring constant. Higher values pull harder toward the target.
    pub stiffness: f32,
    /// Velocity damping. Around `2 * stiffness.sqrt()` is critically damped.
    pub damping: f32,
    /// Settling threshold on `|target - position|`.
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f32,
    /// Settling threshold on `|velocity|`.
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f32,
    /// When present, the effect runs as a leader/follower pair and the
    /// follower's output is what the animation observes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower: Option<Follower>,
}

fn default_rest_delta() -> f32 {
    POSITION_THRESHOLD
}

fn default_rest_speed() -> f32 {
    VELOCITY_THRESHOLD
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
            follower: None,
        }
    }

    /// Soft spring for large, unhurried movement.
    pub fn gentle() -> Self {
        Self::new(120.0, 22.0)
    }

    /// Balanced spring, the default for view transitions.
    pub fn snappy() -> Self {
        Self::new(300.0, 30.0)
    }

    /// Fast spring with no perceptible bounce.
    pub fn stiff() -> Self {
        Self::new(500.0, 45.0)
    }

    /// Couple a follower spring at a fraction of this spring's stiffness.
    pub fn with_follower_ratio(mut self, ratio: f32) -> Self {
        self.follower = Some(Follower::Ratio(ratio));
        self
    }

    /// Couple a follower spring with explicit constants.
    pub fn with_follower(mut self, stiffness: f32, damping: f32) -> Self {
        self.follower = Some(Follower::Config { stiffness, damping });
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.stiffness > 0.0) {
            return Err(ConfigError::Stiffness(self.stiffness));
        }
        if !(self.damping > 0.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        match self.follower {
            Some(Follower::Ratio(ratio)) if !(ratio > 0.0) => {
                Err(ConfigError::FollowerRatio(ratio))
            }
            Some(Follower::Config { stiffness, .. }) if !(stiffness > 0.0) => {
                Err(ConfigError::FollowerStiffness(stiffness))
            }
            Some(Follower::Config { damping, .. }) if !(damping > 0.0) => {
                Err(ConfigError::FollowerDamping(damping))
            }
            _ => Ok(()),
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// Single damped spring.
#[derive(Clone, Debug)]
pub struct SpringIntegrator {
    stiffness: f32,
    damping: f32,
    rest_delta: f32,
    rest_speed: f32,
}

impl SpringIntegrator {
    /// Build from a config, ignoring any follower coupling.
    pub fn new(config: &SpringConfig) -> Self {
        Self {
            stiffness: config.stiffness,
            damping: config.damping,
            rest_delta: config.rest_delta,
            rest_speed: config.rest_speed,
        }
    }

    /// Semi-implicit Euler step over a bare position/velocity pair.
    pub(crate) fn step_raw(&self, position: f32, velocity: f32, target: f32, h: f32) -> (f32, f32) {
        let accel = self.stiffness * (target - position) - self.damping * velocity;
        let velocity = velocity + accel * h;
        let position = position + velocity * h;
        (position, velocity)
    }

    pub(crate) fn settled_raw(&self, position: f32, velocity: f32, target: f32) -> bool {
        (target - position).abs() < self.rest_delta && velocity.abs() < self.rest_speed
    }
}

impl Integrator for SpringIntegrator {
    fn step(&self, state: MotionState, target: f32, dt: f32) -> MotionState {
        let h = dt.min(MAX_FRAME_DELTA);
        let (position, velocity) = self.step_raw(state.position, state.velocity, target, h);
        MotionState::new(position, velocity)
    }

    fn is_settled(&self, state: &MotionState, target: f32) -> bool {
        self.settled_raw(state.position, state.velocity, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle_steps(config: &SpringConfig, target: f32, dt: f32, cap: usize) -> (usize, MotionState) {
        let spring = SpringIntegrator::new(config);
        let mut state = MotionState::at_rest(0.0);
        for i in 0..cap {
            state = spring.step(state, target, dt);
            assert!(state.position.is_finite(), "position diverged at step {i}");
            assert!(state.velocity.is_finite(), "velocity diverged at step {i}");
            if spring.is_settled(&state, target) {
                return (i + 1, state);
            }
        }
        panic!("spring did not settle within {cap} steps");
    }

    #[test]
    fn converges_within_bounded_steps() {
        let (steps, state) = settle_steps(&SpringConfig::new(300.0, 30.0), 1.0, 0.016, 300);
        assert!(steps < 300);
        assert!((state.position - 1.0).abs() < POSITION_THRESHOLD);
        assert!(state.velocity.abs() < VELOCITY_THRESHOLD);
    }

    #[test]
    fn presets_converge() {
        for config in [
            SpringConfig::gentle(),
            SpringConfig::snappy(),
            SpringConfig::stiff(),
        ] {
            settle_steps(&config, 1.0, 0.016, 1000);
        }
    }

    #[test]
    fn stays_finite_with_large_frame_deltas() {
        let spring = SpringIntegrator::new(&SpringConfig::new(1000.0, 10.0));
        let mut state = MotionState::at_rest(0.0);
        // A stalled host handing us half-second deltas must not blow up;
        // the internal clamp caps each step at 33ms.
        for _ in 0..2000 {
            state = spring.step(state, 1.0, 0.5);
            assert!(state.position.is_finite());
            assert!(state.velocity.is_finite());
            assert!(state.position.abs() < 10.0);
        }
    }

    #[test]
    fn not_settled_while_moving_fast_at_target() {
        let spring = SpringIntegrator::new(&SpringConfig::snappy());
        let state = MotionState::new(1.0, 5.0);
        assert!(!spring.is_settled(&state, 1.0));
    }

    #[test]
    fn validate_rejects_non_positive_constants() {
        assert_eq!(
            SpringConfig::new(-1.0, 30.0).validate(),
            Err(ConfigError::Stiffness(-1.0))
        );
        assert_eq!(
            SpringConfig::new(300.0, 0.0).validate(),
            Err(ConfigError::Damping(0.0))
        );
        assert_eq!(
            SpringConfig::new(300.0, 30.0)
                .with_follower_ratio(0.0)
                .validate(),
            Err(ConfigError::FollowerRatio(0.0))
        );
        assert_eq!(
            SpringConfig::new(300.0, 30.0)
                .with_follower(100.0, -2.0)
                .validate(),
            Err(ConfigError::FollowerDamping(-2.0))
        );
        assert!(SpringConfig::snappy().validate().is_ok());
    }
}
