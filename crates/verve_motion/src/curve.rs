//! Fixed-step reference curves for tooling and visualization

use crate::integrator::Integrator;
use crate::state::MotionState;

/// Reference simulation step: 16ms (60Hz).
pub const REFERENCE_STEP: f32 = 0.016;

/// Drive `integrator` from `initial` toward `target` at a fixed 60Hz step
/// and return the position trace, including the initial position.
///
/// Stops once the motion settles or after `max_steps`, whichever comes
/// first; the cap keeps a misconfigured model from spinning forever.
pub fn sample_curve(
    integrator: &dyn Integrator,
    initial: MotionState,
    target: f32,
    max_steps: usize,
) -> Vec<f32> {
    let mut state = initial;
    let mut trace = Vec::with_capacity(max_steps.min(1024) + 1);
    trace.push(state.position);

    for _ in 0..max_steps {
        state = integrator.step(state, target, REFERENCE_STEP);
        trace.push(state.position);
        if integrator.is_settled(&state, target) {
            return trace;
        }
    }

    tracing::warn!(max_steps, "reference curve hit the step cap before settling");
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::{SpringConfig, SpringIntegrator};

    #[test]
    fn spring_curve_ends_settled_at_target() {
        let spring = SpringIntegrator::new(&SpringConfig::snappy());
        let trace = sample_curve(&spring, MotionState::at_rest(0.0), 1.0, 300);
        assert!(trace.len() < 300, "snappy spring should settle well under the cap");
        let last = trace.last().unwrap();
        assert!((last - 1.0).abs() < 0.01);
    }

    #[test]
    fn cap_bounds_a_sluggish_curve() {
        let spring = SpringIntegrator::new(&SpringConfig::new(1.0, 0.1));
        let trace = sample_curve(&spring, MotionState::at_rest(0.0), 1.0, 50);
        assert_eq!(trace.len(), 51);
    }
}
