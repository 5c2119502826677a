//! Verve Motion
//!
//! Physics-based progress drivers for animated transitions.
//!
//! # Features
//!
//! - **Spring**: semi-implicit Euler damped springs with stiffness/damping
//! - **Double Spring**: leader/follower coupling for staggered chase effects
//! - **Inertia**: launch-then-decay motion with linear or quadratic resistance
//! - **Deterministic**: `step`/`is_settled` are pure, so tests drive time directly

pub mod clock;
pub mod curve;
pub mod double_spring;
pub mod error;
pub mod inertia;
pub mod integrator;
pub mod spring;
pub mod state;

pub use clock::{condition_frame_delta, FrameTimer, MAX_FRAME_DELTA};
pub use curve::{sample_curve, REFERENCE_STEP};
pub use double_spring::DoubleSpringIntegrator;
pub use error::ConfigError;
pub use inertia::{InertiaConfig, InertiaIntegrator, ResistanceType};
pub use integrator::{Integrator, MotionConfig};
pub use spring::{Follower, SpringConfig, SpringIntegrator};
pub use state::MotionState;
