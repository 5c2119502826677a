//! Transition rules and rule tables
//!
//! A [`TransitionTable`] is the setup-time configuration a host hands the
//! controller: an ordered list of rules, an optional fallback effect, and
//! an optional navigation middleware. Rules and effects are plain data and
//! (de)serialize, so transition tables can ship as JSON or TOML; middleware
//! is code and stays out of the serialized form.

use serde::{Deserialize, Serialize};
use verve_motion::{InertiaConfig, MotionConfig, SpringConfig};

/// Pure rewrite applied to a navigation event before rule matching.
///
/// Canonicalizes families of concrete routes onto a small rule set. The
/// classic use rewrites "any forward step in a tab order" onto a synthetic
/// `/nav/previous` → `/nav/next` pair carrying a single directional rule.
/// The output is matched verbatim; it is never fed back through the
/// middleware.
pub type Middleware = Box<dyn Fn(&str, &str) -> (String, String)>;

/// Which way the progress value runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Progress runs 0 → 1.
    #[default]
    Enter,
    /// Progress runs 1 → 0.
    Exit,
}

impl Direction {
    /// `(start, target)` positions for the progress value.
    pub(crate) fn endpoints(self) -> (f32, f32) {
        match self {
            Direction::Enter => (0.0, 1.0),
            Direction::Exit => (1.0, 0.0),
        }
    }
}

/// Motion an effect plays, plus an opaque label for the host.
///
/// The `kind` is never interpreted here; hosts use it to pick which visual
/// tick function (fade, scale, slide, ...) consumes the progress stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub motion: MotionConfig,
    #[serde(default)]
    pub direction: Direction,
}

impl EffectConfig {
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            kind: None,
            motion: MotionConfig::Spring(config),
            direction: Direction::Enter,
        }
    }

    pub fn inertia(config: InertiaConfig) -> Self {
        Self {
            kind: None,
            motion: MotionConfig::Inertia(config),
            direction: Direction::Enter,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Run the progress value 1 → 0.
    pub fn exiting(mut self) -> Self {
        self.direction = Direction::Exit;
        self
    }
}

/// One declared navigation → effect mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRule {
    /// Pattern for the path being left.
    pub from: String,
    /// Pattern for the path being entered.
    pub to: String,
    pub effect: EffectConfig,
    /// Also match the reverse navigation with `from`/`to` swapped. The
    /// mirrored rule is applied at resolution time, right after this one;
    /// it is never materialized in the table.
    #[serde(default)]
    pub symmetric: bool,
}

impl TransitionRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>, effect: EffectConfig) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            effect,
            symmetric: false,
        }
    }

    /// A rule that matches in both navigation directions.
    pub fn symmetric(from: impl Into<String>, to: impl Into<String>, effect: EffectConfig) -> Self {
        Self {
            symmetric: true,
            ..Self::new(from, to, effect)
        }
    }
}

/// Ordered rule set plus fallback and middleware.
///
/// Declaration order is resolution priority: callers put more specific
/// rules first.
#[derive(Default, Serialize, Deserialize)]
pub struct TransitionTable {
    #[serde(default)]
    pub rules: Vec<TransitionRule>,
    /// Effect used when no rule matches. Without it, an unmatched
    /// navigation simply plays no animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_effect: Option<EffectConfig>,
    #[serde(skip)]
    pub middleware: Option<Middleware>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: TransitionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn default_effect(mut self, effect: EffectConfig) -> Self {
        self.default_effect = Some(effect);
        self
    }

    pub fn middleware(
        mut self,
        middleware: impl Fn(&str, &str) -> (String, String) + 'static,
    ) -> Self {
        self.middleware = Some(Box::new(middleware));
        self
    }
}
