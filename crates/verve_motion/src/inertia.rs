//! Inertial (fling) integrator
//!
//! Launch-then-decay motion for flick-style effects: the configured
//! acceleration fixes the launch velocity when the animation is created and
//! is never re-applied; after that the velocity only decays under
//! resistance. Unlike the springs this motion has no destination:
//! `is_settled` looks at the velocity alone and the `target` argument is
//! deliberately ignored. Callers interpret the raw displacement themselves.
//!
//! Optional `min`/`max` bounds turn overshoot into a damped bounce: while
//! the position is outside the bounds a spring force toward the nearest
//! bound replaces the decay for that step.

use serde::{Deserialize, Serialize};

use crate::clock::MAX_FRAME_DELTA;
use crate::error::ConfigError;
use crate::integrator::{Integrator, VELOCITY_THRESHOLD};
use crate::state::MotionState;

const DEFAULT_BOUNCE_STIFFNESS: f32 = 500.0;
const DEFAULT_BOUNCE_DAMPING: f32 = 10.0;

/// How resistance scales with velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceType {
    /// `dv = -resistance * v * dt`
    Linear,
    /// `dv = -resistance * v * |v| * dt`
    Quadratic,
}

/// Inertial motion parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InertiaConfig {
    /// Launch magnitude. Sign is taken from the motion direction at
    /// creation time; not a per-frame driving force.
    pub acceleration: f32,
    /// Resistance coefficient. Higher drains the launch velocity faster.
    pub resistance: f32,
    #[serde(default = "default_resistance_type")]
    pub resistance_type: ResistanceType,
    /// Lower bound; positions below it are bounced back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f32>,
    /// Upper bound; positions above it are bounced back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f32>,
    #[serde(default = "default_bounce_stiffness")]
    pub bounce_stiffness: f32,
    #[serde(default = "default_bounce_damping")]
    pub bounce_damping: f32,
    /// Settling threshold on `|velocity|`.
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f32,
}

fn default_resistance_type() -> ResistanceType {
    ResistanceType::Quadratic
}

fn default_bounce_stiffness() -> f32 {
    DEFAULT_BOUNCE_STIFFNESS
}

fn default_bounce_damping() -> f32 {
    DEFAULT_BOUNCE_DAMPING
}

fn default_rest_speed() -> f32 {
    VELOCITY_THRESHOLD
}

impl InertiaConfig {
    pub fn new(acceleration: f32, resistance: f32) -> Self {
        Self {
            acceleration,
            resistance,
            resistance_type: default_resistance_type(),
            min: None,
            max: None,
            bounce_stiffness: default_bounce_stiffness(),
            bounce_damping: default_bounce_damping(),
            rest_speed: default_rest_speed(),
        }
    }

    pub fn linear(acceleration: f32, resistance: f32) -> Self {
        Self {
            resistance_type: ResistanceType::Linear,
            ..Self::new(acceleration, resistance)
        }
    }

    /// Bounce the motion back when it leaves `[min, max]`.
    pub fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Launch state for a motion starting at `from` headed toward `target`.
    ///
    /// A degenerate same-point launch gets zero velocity and settles on the
    /// first frame.
    pub fn launch(&self, from: f32, target: f32) -> MotionState {
        let sign = if target > from {
            1.0
        } else if target < from {
            -1.0
        } else {
            0.0
        };
        MotionState::new(from, self.acceleration * sign)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.acceleration > 0.0) {
            return Err(ConfigError::Acceleration(self.acceleration));
        }
        if !(self.resistance > 0.0) {
            return Err(ConfigError::Resistance(self.resistance));
        }
        Ok(())
    }
}

/// Constant-launch motion decaying under resistance.
#[derive(Clone, Debug)]
pub struct InertiaIntegrator {
    config: InertiaConfig,
}

impl InertiaIntegrator {
    pub fn new(config: &InertiaConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Integrator for InertiaIntegrator {
    fn step(&self, state: MotionState, _target: f32, dt: f32) -> MotionState {
        let h = dt.min(MAX_FRAME_DELTA);
        let config = &self.config;

        let below = config.min.is_some_and(|min| state.position < min);
        let above = config.max.is_some_and(|max| state.position > max);

        let accel = if below || above {
            // Outside the bounds a damped spring toward the nearest bound
            // takes over from the decay.
            let bound = if below {
                config.min.unwrap_or(0.0)
            } else {
                config.max.unwrap_or(0.0)
            };
            -config.bounce_stiffness * (state.position - bound)
                - config.bounce_damping * state.velocity
        } else {
            match config.resistance_type {
                ResistanceType::Linear => -config.resistance * state.velocity,
                ResistanceType::Quadratic => {
                    -config.resistance * state.velocity * state.velocity.abs()
                }
            }
        };

        let velocity = state.velocity + accel * h;
        let position = state.position + velocity * h;
        MotionState::new(position, velocity)
    }

    /// Velocity-only: inertial motion is done when it stops moving,
    /// wherever that happens to be.
    fn is_settled(&self, state: &MotionState, _target: f32) -> bool {
        state.velocity.abs() < self.config.rest_speed
    }
}
