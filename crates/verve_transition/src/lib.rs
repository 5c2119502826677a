//! Verve Transition
//!
//! Physics-driven view transitions: declarative navigation rules resolved
//! to animated effects, advanced by the motion integrators from
//! [`verve_motion`].
//!
//! # Overview
//!
//! - **Rules**: ordered `{from, to, effect}` patterns with wildcard paths,
//!   symmetric (bidirectional) matching, a default fallback, and an
//!   optional middleware rewrite
//! - **Controller**: one animation per scope, preemption on re-navigation,
//!   cooperative cancellation, exactly-once terminal callbacks
//! - **Frame-driven**: the host calls `frame(dt)` from its display loop;
//!   tests drive time deterministically
//!
//! # Example
//!
//! ```rust
//! use verve_motion::SpringConfig;
//! use verve_transition::{
//!     EffectConfig, TransitionController, TransitionRule, TransitionTable,
//! };
//!
//! let table = TransitionTable::new()
//!     .rule(TransitionRule::symmetric(
//!         "/posts",
//!         "/posts/*",
//!         EffectConfig::spring(SpringConfig::snappy()).with_kind("drill"),
//!     ))
//!     .default_effect(EffectConfig::spring(SpringConfig::gentle()).with_kind("fade"));
//!
//! let mut controller = TransitionController::new(table);
//! let handle = controller
//!     .begin("page", "/posts", "/posts/42", |progress| {
//!         // apply opacity/transform from progress
//!         let _ = progress;
//!     }, || {})
//!     .unwrap();
//!
//! while !handle.is_finished() {
//!     controller.frame(0.016);
//! }
//! ```

pub mod controller;
pub mod handle;
pub mod pattern;
pub mod resolver;
pub mod rule;

pub use controller::{TransitionController, SETTLE_HOLD_SECS};
pub use handle::{Handle, TransitionStatus};
pub use pattern::match_path;
pub use resolver::RuleResolver;
pub use rule::{Direction, EffectConfig, Middleware, TransitionRule, TransitionTable};

// The motion types a host needs to declare effects.
pub use verve_motion::{
    ConfigError, Follower, InertiaConfig, MotionConfig, MotionState, ResistanceType, SpringConfig,
};
