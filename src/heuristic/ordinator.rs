//! Ordering of prerequisite alternatives.
//!
//! Rules are applied in sequence: a later rule only decides between
//! alternatives that tie on every earlier rule. Remaining ties keep the
//! declaration order, so the search stays deterministic.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, AlternativeRule, RuleScore};
use crate::models::RequirementSet;

/// Orders alternatives for exploration.
///
/// Defaults to [`rules::LeadingDigitSum`].
#[derive(Clone)]
pub struct Ordinator {
    rules: Vec<Arc<dyn AlternativeRule>>,
}

impl Ordinator {
    /// Creates an ordinator with no rules (declaration order).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: AlternativeRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a rule consulted only on ties.
    pub fn with_tie_breaker<R: AlternativeRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Scores of an alternative under each rule.
    pub fn evaluate(&self, alternative: &RequirementSet) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(alternative)).collect()
    }

    /// Indices of `alternatives`, most promising first.
    pub fn exploration_order(&self, alternatives: &[RequirementSet]) -> Vec<usize> {
        let scores: Vec<Vec<RuleScore>> = alternatives.iter().map(|a| self.evaluate(a)).collect();
        let mut indices: Vec<usize> = (0..alternatives.len()).collect();
        // Stable: equal scores keep declaration order.
        indices.sort_by(|&a, &b| compare_scores(&scores[a], &scores[b]));
        indices
    }

    /// Rearranges alternatives for a LIFO frontier.
    ///
    /// The most promising alternative comes last, so pushing the result
    /// in order leaves it on top.
    pub fn push_order(&self, alternatives: Vec<RequirementSet>) -> Vec<RequirementSet> {
        let order = self.exploration_order(&alternatives);
        let mut slots: Vec<Option<RequirementSet>> = alternatives.into_iter().map(Some).collect();
        order
            .into_iter()
            .rev()
            .filter_map(|i| slots[i].take())
            .collect()
    }
}

fn compare_scores(a: &[RuleScore], b: &[RuleScore]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl Default for Ordinator {
    fn default() -> Self {
        Self::new().with_rule(rules::LeadingDigitSum)
    }
}

impl std::fmt::Debug for Ordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ordinator")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
