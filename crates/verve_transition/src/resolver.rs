//! Navigation → effect resolution
//!
//! Resolution is deterministic and purely a function of the table and the
//! navigation pair: middleware rewrites the pair once, then the rules are
//! scanned in declaration order (direct orientation first, then the
//! swapped orientation for symmetric rules) and the first hit wins. Ties
//! are broken by declaration order, never by pattern specificity, so
//! callers order specific rules first.

use smallvec::SmallVec;

use crate::pattern::match_path;
use crate::rule::{EffectConfig, TransitionRule, TransitionTable};

fn rule_matches(rule: &TransitionRule, from: &str, to: &str) -> bool {
    if match_path(from, &rule.from) && match_path(to, &rule.to) {
        return true;
    }
    rule.symmetric && match_path(from, &rule.to) && match_path(to, &rule.from)
}

/// Maps a navigation event to at most one effect.
pub struct RuleResolver {
    table: TransitionTable,
}

impl RuleResolver {
    pub fn new(table: TransitionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Resolve a navigation to the effect that should play.
    ///
    /// `None` means "no animation", an expected outcome the caller treats
    /// as an instant transition, never an error. In debug builds, shadowed
    /// rules (more than one match for the same pair) are reported once per
    /// call via `tracing::warn!`; the first declared rule still wins.
    pub fn resolve(&self, from: &str, to: &str) -> Option<&EffectConfig> {
        let rewritten = self
            .table
            .middleware
            .as_ref()
            .map(|middleware| middleware(from, to));
        let (from, to) = match &rewritten {
            Some((from, to)) => (from.as_str(), to.as_str()),
            None => (from, to),
        };

        #[cfg(debug_assertions)]
        {
            let matches = self.matching_rules(from, to);
            if matches.len() > 1 {
                tracing::warn!(
                    from,
                    to,
                    rules = ?matches,
                    "navigation matches multiple rules; the first declared wins"
                );
            }
        }

        self.table
            .rules
            .iter()
            .find(|rule| rule_matches(rule, from, to))
            .map(|rule| &rule.effect)
            .or(self.table.default_effect.as_ref())
    }

    /// Indices of every rule matching the (already rewritten) pair, in
    /// declaration order. A development aid for spotting shadowed rules.
    pub fn matching_rules(&self, from: &str, to: &str) -> SmallVec<[usize; 4]> {
        self.table
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule_matches(rule, from, to))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::TransitionRule;
    use verve_motion::SpringConfig;

    fn effect(kind: &str) -> EffectConfig {
        EffectConfig::spring(SpringConfig::snappy()).with_kind(kind)
    }

    fn kind<'a>(resolved: Option<&'a EffectConfig>) -> Option<&'a str> {
        resolved.and_then(|e| e.kind.as_deref())
    }

    #[test]
    fn first_matching_rule_wins_in_declaration_order() {
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::new("/a", "/a/*", effect("drill-in")))
                .rule(TransitionRule::new("/a/*", "/a", effect("drill-out"))),
        );

        assert_eq!(kind(resolver.resolve("/a", "/a/5")), Some("drill-in"));
        assert_eq!(kind(resolver.resolve("/a/5", "/a")), Some("drill-out"));
        assert!(resolver.resolve("/b", "/c").is_none());
    }

    #[test]
    fn symmetric_rule_matches_both_directions() {
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::symmetric("/home", "/about", effect("cross-fade"))),
        );

        assert_eq!(kind(resolver.resolve("/home", "/about")), Some("cross-fade"));
        assert_eq!(kind(resolver.resolve("/about", "/home")), Some("cross-fade"));
        assert!(resolver.resolve("/home", "/contact").is_none());
    }

    #[test]
    fn symmetric_mirror_sits_right_after_its_source() {
        // The mirror of rule 0 outranks rule 1 even though rule 1 matches
        // the pair directly.
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::symmetric("/a", "/b", effect("first")))
                .rule(TransitionRule::new("/b", "/a", effect("second"))),
        );

        assert_eq!(kind(resolver.resolve("/b", "/a")), Some("first"));
    }

    #[test]
    fn default_effect_covers_unmatched_navigations() {
        let resolver =
            RuleResolver::new(TransitionTable::new().default_effect(effect("fallback")));
        assert_eq!(kind(resolver.resolve("/x", "/y")), Some("fallback"));

        let without_default = RuleResolver::new(TransitionTable::new());
        assert!(without_default.resolve("/x", "/y").is_none());
    }

    #[test]
    fn declared_rule_outranks_the_default() {
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::new("/a", "/b", effect("declared")))
                .default_effect(effect("fallback")),
        );
        assert_eq!(kind(resolver.resolve("/a", "/b")), Some("declared"));
        assert_eq!(kind(resolver.resolve("/a", "/c")), Some("fallback"));
    }

    #[test]
    fn middleware_rewrites_before_matching() {
        // Collapse every list-order navigation onto one canonical pair.
        let order = ["/inbox", "/archive", "/trash"];
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::new("/nav/previous", "/nav/next", effect("advance")))
                .rule(TransitionRule::new("/nav/next", "/nav/previous", effect("retreat")))
                .middleware(move |from, to| {
                    let position = |path: &str| order.iter().position(|p| *p == path);
                    match (position(from), position(to)) {
                        (Some(a), Some(b)) if a < b => {
                            ("/nav/previous".into(), "/nav/next".into())
                        }
                        (Some(a), Some(b)) if a > b => {
                            ("/nav/next".into(), "/nav/previous".into())
                        }
                        _ => (from.into(), to.into()),
                    }
                }),
        );

        assert_eq!(kind(resolver.resolve("/inbox", "/trash")), Some("advance"));
        assert_eq!(kind(resolver.resolve("/archive", "/inbox")), Some("retreat"));
        // Paths outside the order pass through untouched and match nothing.
        assert!(resolver.resolve("/inbox", "/settings").is_none());
    }

    #[test]
    fn resolution_is_referentially_stable() {
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::new("/posts", "/posts/*", effect("expand"))),
        );
        let first = kind(resolver.resolve("/posts", "/posts/42")).map(str::to_owned);
        assert_eq!(first.as_deref(), Some("expand"));
        for _ in 0..10 {
            assert_eq!(
                kind(resolver.resolve("/posts", "/posts/42")).map(str::to_owned),
                first
            );
        }
        assert!(resolver.resolve("/posts", "/products/42").is_none());
    }

    #[test]
    fn matching_rules_reports_shadowing() {
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::new("/posts/*", "/about", effect("specific")))
                .rule(TransitionRule::new("*", "/about", effect("broad"))),
        );
        let matches = resolver.matching_rules("/posts/42", "/about");
        assert_eq!(matches.as_slice(), &[0, 1]);

        assert_eq!(kind(resolver.resolve("/posts/42", "/about")), Some("specific"));
    }

    #[test]
    fn same_path_navigation_is_not_special_cased() {
        let resolver = RuleResolver::new(
            TransitionTable::new()
                .rule(TransitionRule::new("/modal", "/modal", effect("pulse"))),
        );
        assert_eq!(kind(resolver.resolve("/modal", "/modal")), Some("pulse"));
    }
}
