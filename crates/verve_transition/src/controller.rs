//! Transition orchestration
//!
//! The controller owns every live animation: `begin` resolves a navigation
//! to an effect, validates and builds the integrator, and preempts whatever
//! was already running on the same scope; `frame` advances all live
//! transitions by one host-supplied delta. The controller never schedules
//! itself; hosts call `frame` from their display loop (or a test loop)
//! with whatever `dt` they measured, typically via
//! [`verve_motion::FrameTimer`].

use std::rc::Rc;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use verve_motion::{ConfigError, Integrator, MotionConfig, MotionState, MAX_FRAME_DELTA};

use crate::handle::{Handle, HandleShared, TransitionStatus};
use crate::resolver::RuleResolver;
use crate::rule::TransitionTable;

new_key_type! {
    struct TransitionKey;
}

/// How long the settling condition must hold before a transition completes.
///
/// A single sub-threshold frame can be a zero-crossing rather than genuine
/// rest; holding for a few frames keeps marginal springs from terminating
/// mid-bounce.
pub const SETTLE_HOLD_SECS: f32 = 0.05;

struct ActiveTransition {
    scope: String,
    integrator: Box<dyn Integrator>,
    state: MotionState,
    target: f32,
    settle_hold: f32,
    /// Springs converge onto the target and snap to it on completion;
    /// inertial motion ends wherever it stops.
    snap_to_target: bool,
    tick: Box<dyn FnMut(f32)>,
    done: Option<Box<dyn FnOnce()>>,
    shared: Rc<HandleShared>,
}

enum Completion {
    Settled,
    Cancelled,
}

/// Orchestrates one animation per scope from `begin` to settle or
/// cancellation.
pub struct TransitionController {
    resolver: RuleResolver,
    active: SlotMap<TransitionKey, ActiveTransition>,
    scopes: FxHashMap<String, TransitionKey>,
}

impl TransitionController {
    pub fn new(table: TransitionTable) -> Self {
        Self {
            resolver: RuleResolver::new(table),
            active: SlotMap::with_key(),
            scopes: FxHashMap::default(),
        }
    }

    pub fn resolver(&self) -> &RuleResolver {
        &self.resolver
    }

    /// Number of transitions currently animating.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Start a transition for a navigation on the given scope.
    ///
    /// `tick` receives the progress value once per frame (spring progress
    /// runs between the direction's endpoints; inertial progress is the raw
    /// displacement, interpreted by the caller). `done` fires exactly once
    /// when the transition settles, or immediately if no rule resolves
    /// and the navigation is skipped. Neither fires after a cancellation.
    ///
    /// A transition already running on the scope is preempted first; its
    /// handle reports `Cancelled` and receives no further callbacks. A
    /// rejected configuration leaves the running transition untouched.
    pub fn begin(
        &mut self,
        scope: &str,
        from: &str,
        to: &str,
        tick: impl FnMut(f32) + 'static,
        done: impl FnOnce() + 'static,
    ) -> Result<Handle, ConfigError> {
        self.begin_inner(scope, from, to, None, Box::new(tick), Box::new(done))
    }

    /// Like [`begin`](Self::begin), but seeding the integrator with an
    /// explicit initial state, typically the `last_state` of a handle this
    /// navigation just preempted, to carry position and velocity across.
    pub fn begin_seeded(
        &mut self,
        scope: &str,
        from: &str,
        to: &str,
        initial: MotionState,
        tick: impl FnMut(f32) + 'static,
        done: impl FnOnce() + 'static,
    ) -> Result<Handle, ConfigError> {
        self.begin_inner(scope, from, to, Some(initial), Box::new(tick), Box::new(done))
    }

    fn begin_inner(
        &mut self,
        scope: &str,
        from: &str,
        to: &str,
        seed: Option<MotionState>,
        tick: Box<dyn FnMut(f32)>,
        done: Box<dyn FnOnce()>,
    ) -> Result<Handle, ConfigError> {
        let Some(effect) = self.resolver.resolve(from, to).cloned() else {
            // An unmatched navigation is a normal no-op outcome: the handle
            // is terminal from birth and the host renders instantly.
            self.preempt(scope);
            tracing::debug!(scope, from, to, "no transition resolved, skipping");
            done();
            return Ok(Handle::new(HandleShared::finished(TransitionStatus::Skipped)));
        };

        // Validate before preempting: a bad config must not kill the
        // animation that is already running.
        let integrator = effect.motion.build()?;
        self.preempt(scope);

        let (start, target) = effect.direction.endpoints();
        let initial = seed.unwrap_or_else(|| match &effect.motion {
            MotionConfig::Inertia(config) => config.launch(start, target),
            MotionConfig::Spring(_) => MotionState::at_rest(start),
        });
        let snap_to_target = matches!(effect.motion, MotionConfig::Spring(_));

        let shared = HandleShared::running(initial);
        let key = self.active.insert(ActiveTransition {
            scope: scope.to_owned(),
            integrator,
            state: initial,
            target,
            settle_hold: 0.0,
            snap_to_target,
            tick,
            done: Some(done),
            shared: shared.clone(),
        });
        self.scopes.insert(scope.to_owned(), key);

        tracing::debug!(
            scope,
            from,
            to,
            kind = effect.kind.as_deref().unwrap_or("-"),
            "transition started"
        );
        Ok(Handle::new(shared))
    }

    /// Cancel whatever is running on a scope, if anything.
    pub fn cancel_scope(&mut self, scope: &str) {
        self.preempt(scope);
    }

    /// Advance every live transition by `dt` seconds.
    ///
    /// Each transition is processed atomically (cancel check, step, tick,
    /// settle check); two frames never interleave for the same handle.
    pub fn frame(&mut self, dt: f32) {
        let keys: Vec<TransitionKey> = self.active.keys().collect();
        for key in keys {
            self.advance(key, dt);
        }
    }

    fn advance(&mut self, key: TransitionKey, dt: f32) {
        let Some(active) = self.active.get_mut(key) else {
            return;
        };

        // A cancel requested since the last frame wins before any stepping;
        // the handle keeps the state it had at the cancel point.
        if active.shared.cancel_requested() {
            self.finish(key, Completion::Cancelled);
            return;
        }

        active.state = active.integrator.step(active.state, active.target, dt);
        active.shared.record(active.state);
        (active.tick)(active.state.position);

        // The tick callback itself may have cancelled the handle.
        if active.shared.cancel_requested() {
            self.finish(key, Completion::Cancelled);
            return;
        }

        if active.integrator.is_settled(&active.state, active.target) {
            active.settle_hold += dt.min(MAX_FRAME_DELTA);
            if active.settle_hold >= SETTLE_HOLD_SECS {
                if active.snap_to_target {
                    let snapped = MotionState::at_rest(active.target);
                    active.state = snapped;
                    active.shared.record(snapped);
                    (active.tick)(snapped.position);
                }
                active.shared.finish(TransitionStatus::Settled);
                if let Some(done) = active.done.take() {
                    done();
                }
                self.finish(key, Completion::Settled);
            }
        } else {
            active.settle_hold = 0.0;
        }
    }

    fn finish(&mut self, key: TransitionKey, completion: Completion) {
        if let Some(active) = self.active.remove(key) {
            match completion {
                Completion::Settled => {
                    tracing::debug!(scope = %active.scope, "transition settled")
                }
                Completion::Cancelled => {
                    tracing::debug!(scope = %active.scope, "transition cancelled")
                }
            }
            if self.scopes.get(&active.scope) == Some(&key) {
                self.scopes.remove(&active.scope);
            }
        }
    }

    fn preempt(&mut self, scope: &str) {
        if let Some(key) = self.scopes.remove(scope) {
            if let Some(active) = self.active.remove(key) {
                active.shared.finish(TransitionStatus::Cancelled);
                tracing::debug!(scope, "running transition preempted");
            }
        }
    }
}
