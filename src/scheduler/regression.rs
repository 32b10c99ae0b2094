//! Regression (goal-to-prerequisite) search.
//!
//! # Algorithm
//!
//! Depth-first search over an explicit frontier stack. Each node holds the
//! obligations still to justify and the operators committed so far.
//!
//! 1. **Seed**: for each goal not already completed, place it with the
//!    term assigner and push one node per prerequisite alternative.
//! 2. **Step**: pop the top obligation of the top node.
//!    - Completed courses are dropped.
//!    - Otherwise any stale operator for the course is removed and the
//!      course is re-placed. No legal term discards the node (backtrack);
//!      a legal term replaces the node with one child per alternative,
//!      the most promising child on top. Alternatives requiring the
//!      course itself are skipped.
//! 3. The first node with no obligations is the witness. An empty
//!    frontier means the goals are infeasible.
//!
//! Nodes own their state and operators outright; children are deep copies.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::assignment::TermAssigner;
use crate::error::{PlanError, Result};
use crate::heuristic::Ordinator;
use crate::models::{Catalog, Course, CourseInfo, Operator, OperatorPlan, TermCalendar};
use crate::termination::Termination;

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier steps taken.
    pub steps: u64,
    /// Nodes replaced by their children.
    pub expansions: u64,
    /// Nodes discarded for lack of a legal term.
    pub backtracks: u64,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
    /// Wall time since the search started.
    pub elapsed: Duration,
}

/// One frontier branch.
#[derive(Debug, Clone, Default)]
pub struct SearchNode {
    /// Outstanding obligations; the last element is processed next.
    pub state: Vec<Course>,
    /// Operators committed on this branch.
    pub plan: OperatorPlan,
}

/// How a search ended.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// A node with no obligations was reached.
    Witness(OperatorPlan),
    /// Every goal was completed beforehand; nothing to search.
    Satisfied,
    /// The frontier emptied without a witness.
    Exhausted,
}

/// Depth-first regression planner.
#[derive(Debug)]
pub struct RegressionSearch<'a> {
    catalog: &'a Catalog,
    calendar: &'a TermCalendar,
    ordinator: &'a Ordinator,
    completed: &'a HashSet<Course>,
    frontier: Vec<SearchNode>,
    stats: SearchStats,
}

impl<'a> RegressionSearch<'a> {
    /// Creates a search over a catalog and calendar.
    pub fn new(
        catalog: &'a Catalog,
        calendar: &'a TermCalendar,
        ordinator: &'a Ordinator,
        completed: &'a HashSet<Course>,
    ) -> Self {
        Self {
            catalog,
            calendar,
            ordinator,
            completed,
            frontier: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Counters of the last run.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Current frontier, bottom first.
    pub fn frontier(&self) -> &[SearchNode] {
        &self.frontier
    }

    /// Seeds the frontier from the goals.
    ///
    /// Returns `false` when every goal is already completed.
    ///
    /// # Errors
    /// [`PlanError::UnknownCourse`] if a pending goal is not in the catalog.
    pub fn seed(&mut self, goals: &[Course]) -> Result<bool> {
        self.frontier.clear();
        let assigner = TermAssigner::new(self.calendar);
        let empty = OperatorPlan::new();
        let mut pending = false;

        for (position, goal) in goals.iter().enumerate() {
            if self.completed.contains(goal) {
                continue;
            }
            pending = true;
            let catalog = self.catalog;
            let info = catalog.lookup(goal)?;

            let Some(term) = assigner.assign(goal, info, &empty) else {
                debug!(event = "goal_unplaceable", course = %goal);
                continue;
            };

            let mut remaining = goals.to_vec();
            remaining.remove(position);
            let root = SearchNode {
                state: remaining,
                plan: OperatorPlan::new(),
            };
            if self.push_children(&root, goal, info, term) == 0 {
                debug!(event = "goal_self_required", course = %goal);
            }
        }

        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        Ok(pending)
    }

    /// Seeds and runs the search to completion.
    ///
    /// `termination` is polled once per frontier step.
    ///
    /// # Errors
    /// - [`PlanError::UnknownCourse`] on a catalog lookup failure.
    /// - [`PlanError::Cancelled`] when `termination` fires.
    pub fn run(&mut self, goals: &[Course], termination: &dyn Termination) -> Result<SearchOutcome> {
        self.stats = SearchStats::default();
        let started = Instant::now();

        if !self.seed(goals)? {
            return Ok(SearchOutcome::Satisfied);
        }

        loop {
            self.stats.elapsed = started.elapsed();
            if termination.is_terminated(&self.stats) {
                return Err(PlanError::Cancelled {
                    steps: self.stats.steps,
                });
            }
            if let Some(outcome) = self.step()? {
                self.stats.elapsed = started.elapsed();
                return Ok(outcome);
            }
        }
    }

    /// Performs one frontier step.
    ///
    /// Returns `Some` once the search has ended.
    pub fn step(&mut self) -> Result<Option<SearchOutcome>> {
        let Some(mut node) = self.frontier.pop() else {
            return Ok(Some(SearchOutcome::Exhausted));
        };
        self.stats.steps += 1;

        let Some(course) = node.state.pop() else {
            return Ok(Some(SearchOutcome::Witness(node.plan)));
        };

        if self.completed.contains(&course) {
            trace!(event = "step", course = %course, completed = true);
            self.frontier.push(node);
            return Ok(None);
        }

        let catalog = self.catalog;
        let info = catalog.lookup(&course)?;
        node.plan.remove(&course);

        let expanded = match TermAssigner::new(self.calendar).assign(&course, info, &node.plan) {
            Some(term) => {
                trace!(event = "step", course = %course, term = term);
                self.push_children(&node, &course, info, term) > 0
            }
            None => false,
        };

        if expanded {
            self.stats.expansions += 1;
            self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        } else {
            self.stats.backtracks += 1;
            debug!(
                event = "backtrack",
                course = %course,
                frontier = self.frontier.len(),
            );
        }

        Ok(None)
    }

    /// Pushes one child per alternative and returns how many were pushed.
    ///
    /// Alternatives requiring `course` itself can never be satisfied and
    /// are skipped.
    fn push_children(
        &mut self,
        parent: &SearchNode,
        course: &Course,
        info: &CourseInfo,
        term: u32,
    ) -> usize {
        let alternatives: Vec<_> = info
            .prerequisites
            .branches()
            .into_iter()
            .filter(|alt| !alt.contains(course))
            .collect();
        let pushed = alternatives.len();

        for alternative in self.ordinator.push_order(alternatives) {
            let mut child = parent.clone();
            child.state.extend(alternative.iter().cloned());
            child
                .plan
                .insert(Operator::new(alternative, course.clone(), term, info.credits));
            self.frontier.push(child);
        }
        pushed
    }
}
