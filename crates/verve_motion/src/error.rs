use thiserror::Error;

/// Configuration errors detected before an animation is started.
///
/// A motion config with non-positive constants would never settle (or would
/// propagate NaN through the simulation), so these are rejected up front
/// instead of guarded at runtime.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("spring stiffness must be positive, got {0}")]
    Stiffness(f32),

    #[error("spring damping must be positive, got {0}")]
    Damping(f32),

    #[error("follower stiffness ratio must be positive, got {0}")]
    FollowerRatio(f32),

    #[error("follower spring stiffness must be positive, got {0}")]
    FollowerStiffness(f32),

    #[error("follower spring damping must be positive, got {0}")]
    FollowerDamping(f32),

    #[error("inertia acceleration must be positive, got {0}")]
    Acceleration(f32),

    #[error("inertia resistance must be positive, got {0}")]
    Resistance(f32),
}
