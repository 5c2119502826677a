//! Integrator contract and motion-model dispatch
//!
//! All motion models advance a scalar [`MotionState`] toward a target and
//! report when the motion has settled. `step` returns a new state and never
//! mutates its input, so the same integrator can be called from anywhere;
//! the mutable state belongs to whoever drives the animation.

use serde::{Deserialize, Serialize};

use crate::double_spring::DoubleSpringIntegrator;
use crate::error::ConfigError;
use crate::inertia::{InertiaConfig, InertiaIntegrator};
use crate::spring::{SpringConfig, SpringIntegrator};
use crate::state::MotionState;

/// Default settling threshold on `|target - position|`.
pub const POSITION_THRESHOLD: f32 = 0.01;
/// Default settling threshold on `|velocity|`.
pub const VELOCITY_THRESHOLD: f32 = 0.01;

/// One numerical integration step over a motion model.
pub trait Integrator {
    /// Advance `state` toward `target` by `dt` seconds, returning the new
    /// state. Implementations clamp `dt` internally for stability.
    fn step(&self, state: MotionState, target: f32, dt: f32) -> MotionState;

    /// Whether continuing the motion would be visually imperceptible.
    ///
    /// Inertial motion has no destination and ignores `target` here; see
    /// [`InertiaIntegrator`] for the contract of that variant.
    fn is_settled(&self, state: &MotionState, target: f32) -> bool;
}

/// Closed set of motion models a transition effect can request.
///
/// Serialized form carries a `model` discriminant (`"spring"` or
/// `"inertia"`), so rule tables written as JSON/TOML stay explicit about
/// which physics they buy into. Unknown discriminants fail at the parse
/// boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum MotionConfig {
    Spring(SpringConfig),
    Inertia(InertiaConfig),
}

impl MotionConfig {
    /// Check all constants that must be positive for the motion to settle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            MotionConfig::Spring(config) => config.validate(),
            MotionConfig::Inertia(config) => config.validate(),
        }
    }

    /// Validate and construct the matching integrator.
    ///
    /// A spring config with a follower selects the coupled double-spring
    /// variant; everything else maps one-to-one.
    pub fn build(&self) -> Result<Box<dyn Integrator>, ConfigError> {
        self.validate()?;
        Ok(match self {
            MotionConfig::Spring(config) if config.follower.is_some() => {
                Box::new(DoubleSpringIntegrator::new(config))
            }
            MotionConfig::Spring(config) => Box::new(SpringIntegrator::new(config)),
            MotionConfig::Inertia(config) => Box::new(InertiaIntegrator::new(config)),
        })
    }
}
