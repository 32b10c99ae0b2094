//! Scheduling operators and operator plans.
//!
//! An operator records one committed decision: the effect course, the
//! prerequisite alternative chosen to justify it, its term, and its credit
//! weight. An [`OperatorPlan`] holds at most one live operator per effect
//! course; inserting an operator for an already planned course replaces
//! the stale one.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{Course, RequirementSet};

/// A committed scheduling decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Chosen prerequisite alternative (PRE).
    pub pre: RequirementSet,
    /// Course being scheduled (EFF).
    pub effect: Course,
    /// Assigned term index.
    pub term: u32,
    /// Credit weight of the effect course.
    pub credits: u32,
}

impl Operator {
    /// Creates an operator.
    pub fn new(pre: RequirementSet, effect: Course, term: u32, credits: u32) -> Self {
        Self {
            pre,
            effect,
            term,
            credits,
        }
    }

    /// Whether this operator's chosen alternative requires `course`.
    #[inline]
    pub fn requires(&self, course: &Course) -> bool {
        self.pre.contains(course)
    }
}

/// Operators keyed by effect course, iterated in insertion order.
///
/// Cloning produces a fully independent copy, so sibling search branches
/// never share operator storage.
#[derive(Debug, Clone, Default)]
pub struct OperatorPlan {
    operators: BTreeMap<u64, Operator>,
    by_effect: HashMap<Course, u64>,
    next_seq: u64,
}

impl OperatorPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operator, replacing any live operator for the same effect.
    ///
    /// Returns the replaced operator.
    pub fn insert(&mut self, operator: Operator) -> Option<Operator> {
        let stale = self.remove(&operator.effect);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_effect.insert(operator.effect.clone(), seq);
        self.operators.insert(seq, operator);
        stale
    }

    /// Removes the live operator for a course.
    pub fn remove(&mut self, effect: &Course) -> Option<Operator> {
        let seq = self.by_effect.remove(effect)?;
        self.operators.remove(&seq)
    }

    /// Live operator for a course.
    pub fn get(&self, effect: &Course) -> Option<&Operator> {
        self.by_effect
            .get(effect)
            .and_then(|seq| self.operators.get(seq))
    }

    /// Whether a course has a live operator.
    pub fn contains(&self, effect: &Course) -> bool {
        self.by_effect.contains_key(effect)
    }

    /// Operators in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.values()
    }

    /// Number of live operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Consumes the plan into operators in insertion order.
    pub fn into_operators(self) -> Vec<Operator> {
        self.operators.into_values().collect()
    }
}

impl Extend<Operator> for OperatorPlan {
    fn extend<I: IntoIterator<Item = Operator>>(&mut self, iter: I) {
        for operator in iter {
            self.insert(operator);
        }
    }
}

impl FromIterator<Operator> for OperatorPlan {
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        let mut plan = Self::new();
        plan.extend(iter);
        plan
    }
}
