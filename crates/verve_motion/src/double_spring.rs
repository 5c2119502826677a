//! Coupled leader/follower spring pair
//!
//! The leader spring pursues the real target; the follower spring's target
//! is the leader's current position, and the follower is what the animation
//! observes. The lag between the two produces the trailing "chase" used for
//! staggered multi-element effects. The leader's sub-state travels inside
//! [`MotionState`] so `step` stays pure.

use crate::clock::MAX_FRAME_DELTA;
use crate::integrator::Integrator;
use crate::spring::{Follower, SpringConfig, SpringIntegrator};
use crate::state::{LeaderState, MotionState};

pub struct DoubleSpringIntegrator {
    leader: SpringIntegrator,
    follower: SpringIntegrator,
}

impl DoubleSpringIntegrator {
    pub fn new(config: &SpringConfig) -> Self {
        let follower_config = match config.follower {
            Some(Follower::Ratio(ratio)) => SpringConfig {
                stiffness: config.stiffness * ratio,
                ..config.clone()
            },
            Some(Follower::Config { stiffness, damping }) => SpringConfig {
                stiffness,
                damping,
                ..config.clone()
            },
            // No coupling requested: the follower mirrors the leader.
            None => config.clone(),
        };

        Self {
            leader: SpringIntegrator::new(config),
            follower: SpringIntegrator::new(&follower_config),
        }
    }
}

impl Integrator for DoubleSpringIntegrator {
    fn step(&self, state: MotionState, target: f32, dt: f32) -> MotionState {
        let h = dt.min(MAX_FRAME_DELTA);

        // Before the first step the leader starts where the follower is.
        let prev = state.leader.unwrap_or(LeaderState {
            position: state.position,
            velocity: state.velocity,
        });

        let (leader_pos, leader_vel) = self.leader.step_raw(prev.position, prev.velocity, target, h);
        let (position, velocity) =
            self.follower
                .step_raw(state.position, state.velocity, leader_pos, h);

        MotionState {
            position,
            velocity,
            leader: Some(LeaderState {
                position: leader_pos,
                velocity: leader_vel,
            }),
        }
    }

    /// Settled only when the leader has settled against the real target AND
    /// the follower has settled against the leader's position.
    fn is_settled(&self, state: &MotionState, target: f32) -> bool {
        match state.leader {
            Some(leader) => {
                self.leader
                    .settled_raw(leader.position, leader.velocity, target)
                    && self
                        .follower
                        .settled_raw(state.position, state.velocity, leader.position)
            }
            // Not stepped yet; judge the follower directly.
            None => self.follower.settled_raw(state.position, state.velocity, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: SpringConfig, target: f32, cap: usize) -> Vec<MotionState> {
        let integrator = DoubleSpringIntegrator::new(&config);
        let mut state = MotionState::at_rest(0.0);
        let mut trace = vec![state];
        for _ in 0..cap {
            state = integrator.step(state, target, 0.016);
            trace.push(state);
            if integrator.is_settled(&state, target) {
                break;
            }
        }
        trace
    }

    /// First step index at which a position trace crosses the target.
    fn crossing(values: impl Iterator<Item = f32>, target: f32) -> Option<usize> {
        values.enumerate().find(|(_, p)| *p >= target).map(|(i, _)| i)
    }

    #[test]
    fn follower_never_reaches_target_before_leader() {
        for (stiffness, damping, ratio) in
            [(300.0, 30.0, 0.5), (300.0, 20.0, 0.3), (600.0, 50.0, 0.8), (150.0, 12.0, 1.0)]
        {
            let trace = run(
                SpringConfig::new(stiffness, damping).with_follower_ratio(ratio),
                1.0,
                5000,
            );
            let leader_cross = crossing(
                trace.iter().map(|s| s.leader.map_or(s.position, |l| l.position)),
                1.0,
            );
            let follower_cross = crossing(trace.iter().map(|s| s.position), 1.0);
            if let Some(follower_cross) = follower_cross {
                let leader_cross =
                    leader_cross.expect("follower crossed the target but the leader never did");
                assert!(
                    follower_cross >= leader_cross,
                    "follower crossed at step {follower_cross}, before leader at {leader_cross}"
                );
            }
        }
    }

    #[test]
    fn settles_with_both_springs_at_rest() {
        let config = SpringConfig::new(300.0, 30.0).with_follower_ratio(0.5);
        let trace = run(config.clone(), 1.0, 5000);
        let last = trace.last().unwrap();
        let integrator = DoubleSpringIntegrator::new(&config);
        assert!(integrator.is_settled(last, 1.0));
        assert!((last.position - 1.0).abs() < 0.05);
        let leader = last.leader.unwrap();
        assert!((leader.position - 1.0).abs() < config.rest_delta);
    }

    #[test]
    fn leader_settled_alone_is_not_enough() {
        let integrator = DoubleSpringIntegrator::new(
            &SpringConfig::new(300.0, 30.0).with_follower_ratio(0.2),
        );
        // Leader parked on the target, follower still far away.
        let state = MotionState {
            position: 0.3,
            velocity: 0.0,
            leader: Some(LeaderState {
                position: 1.0,
                velocity: 0.0,
            }),
        };
        assert!(!integrator.is_settled(&state, 1.0));
    }

    #[test]
    fn explicit_follower_config_is_used() {
        let trace_slow = run(
            SpringConfig::new(300.0, 30.0).with_follower(60.0, 30.0),
            1.0,
            5000,
        );
        let trace_fast = run(
            SpringConfig::new(300.0, 30.0).with_follower(300.0, 30.0),
            1.0,
            5000,
        );
        // A lazier follower takes longer to settle.
        assert!(trace_slow.len() > trace_fast.len());
    }
}
