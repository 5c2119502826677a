//! Handles onto running (or already finished) transitions
//!
//! A [`Handle`] shares state with the controller through `Rc` + `Cell`; the
//! whole transition core is single-threaded and frame-driven, so there is
//! nothing to lock. Cancellation is cooperative: `cancel` flips a flag the
//! controller honors no later than the next frame boundary, and neither a
//! tick nor the terminal callback fires for the handle after that.

use std::cell::Cell;
use std::rc::Rc;

use verve_motion::MotionState;

/// Lifecycle of one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Being stepped by the controller each frame.
    Running,
    /// Motion settled; the terminal callback has fired.
    Settled,
    /// No rule resolved; the transition never ticked.
    Skipped,
    /// Cancelled directly or preempted by a newer navigation on the scope.
    Cancelled,
}

pub(crate) struct HandleShared {
    status: Cell<TransitionStatus>,
    last_state: Cell<MotionState>,
    cancel_requested: Cell<bool>,
}

impl HandleShared {
    pub(crate) fn running(initial: MotionState) -> Rc<Self> {
        Rc::new(Self {
            status: Cell::new(TransitionStatus::Running),
            last_state: Cell::new(initial),
            cancel_requested: Cell::new(false),
        })
    }

    pub(crate) fn finished(status: TransitionStatus) -> Rc<Self> {
        Rc::new(Self {
            status: Cell::new(status),
            last_state: Cell::new(MotionState::default()),
            cancel_requested: Cell::new(false),
        })
    }

    pub(crate) fn record(&self, state: MotionState) {
        self.last_state.set(state);
    }

    pub(crate) fn cancel_requested(&self) -> bool {
        self.cancel_requested.get()
    }

    /// Move into a terminal status, unless already terminal.
    pub(crate) fn finish(&self, status: TransitionStatus) {
        if self.status.get() == TransitionStatus::Running {
            self.status.set(status);
        }
    }
}

/// Caller's view of one transition started with `begin`.
///
/// Dropping a handle does not cancel the transition; fire-and-forget hosts
/// can ignore the return value entirely.
#[derive(Clone)]
pub struct Handle {
    shared: Rc<HandleShared>,
}

impl Handle {
    pub(crate) fn new(shared: Rc<HandleShared>) -> Self {
        Self { shared }
    }

    pub fn status(&self) -> TransitionStatus {
        self.shared.status.get()
    }

    pub fn is_finished(&self) -> bool {
        self.status() != TransitionStatus::Running
    }

    /// The most recent motion state the controller recorded.
    ///
    /// After a cancellation this is the state at the cancel point, which a
    /// caller may feed to `begin_seeded` to keep the motion continuous
    /// across a preemption.
    pub fn last_state(&self) -> MotionState {
        self.shared.last_state.get()
    }

    /// Request cooperative cancellation.
    ///
    /// Takes effect no later than the next frame boundary; no tick or
    /// terminal callback fires afterwards. A no-op on finished handles.
    pub fn cancel(&self) {
        if self.status() == TransitionStatus::Running {
            self.shared.cancel_requested.set(true);
            self.shared.status.set(TransitionStatus::Cancelled);
        }
    }
}
