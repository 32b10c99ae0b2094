//! Planning facade.
//!
//! Runs the full pipeline for one request:
//!
//! 1. Check the prerequisite closure of the goals (unknown courses, cycles).
//! 2. Regression search for a witness plan.
//! 3. Fill under-loaded terms.
//! 4. Check the result's hard rules; breaches are logged and reported.
//! 5. Format the operators into a [`CoursePlan`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::fill::FillPass;
use super::regression::{RegressionSearch, SearchOutcome, SearchStats};
use super::{CoursePlan, PlanOutcome};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::heuristic::Ordinator;
use crate::models::{Catalog, Course, TermCalendar, TermSchedule, Violation};
use crate::termination::{NeverTerminate, Termination};
use crate::validation::check_closure;

/// Input container for planning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Courses (or requirement buckets) to satisfy, in order.
    pub goals: Vec<Course>,
    /// Courses already completed.
    #[serde(default)]
    pub completed: Vec<Course>,
}

impl PlanRequest {
    /// Creates a request for the given goals.
    pub fn new(goals: Vec<Course>) -> Self {
        Self {
            goals,
            completed: Vec::new(),
        }
    }

    /// Appends a goal.
    pub fn with_goal(mut self, goal: Course) -> Self {
        self.goals.push(goal);
        self
    }

    /// Marks a course as already completed.
    pub fn with_completed(mut self, course: Course) -> Self {
        self.completed.push(course);
        self
    }

    /// Marks several courses as already completed.
    pub fn with_completed_courses<I>(mut self, courses: I) -> Self
    where
        I: IntoIterator<Item = Course>,
    {
        self.completed.extend(courses);
        self
    }
}

/// Outcome of [`Planner::solve`] with search diagnostics.
#[derive(Debug, Clone)]
pub struct PlanReport {
    /// The planning result.
    pub outcome: PlanOutcome,
    /// Search counters.
    pub stats: SearchStats,
    /// Courses added by the fill pass, in insertion order.
    pub fillers: Vec<Course>,
    /// Hard-rule breaches found in the final plan.
    pub violations: Vec<Violation>,
}

/// Course planner.
///
/// # Example
///
/// ```
/// use u_courseplan::models::{Catalog, Course, CourseInfo, Prerequisites};
/// use u_courseplan::scheduler::{PlanRequest, Planner};
/// use u_courseplan::PlannerConfig;
///
/// let intro = Course::new("CS", "1101");
/// let data = Course::new("CS", "2201");
/// let catalog = Catalog::new()
///     .with_course(intro.clone(), CourseInfo::new(3).offered_always())
///     .with_course(
///         data.clone(),
///         CourseInfo::new(3)
///             .offered_always()
///             .with_prerequisites(Prerequisites::all_of(vec![intro.clone()])),
///     );
///
/// let planner = Planner::new(PlannerConfig::default()).unwrap();
/// let outcome = planner.plan(&catalog, &PlanRequest::new(vec![data.clone()])).unwrap();
///
/// let plan = outcome.plan().unwrap();
/// assert!(plan.get(&intro).unwrap().term.index < plan.get(&data).unwrap().term.index);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    calendar: TermCalendar,
    ordinator: Ordinator,
}

impl Planner {
    /// Creates a planner.
    ///
    /// # Errors
    /// [`PlanError::Config`](crate::error::PlanError::Config) if the
    /// configuration is invalid.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            calendar: config.calendar(),
            config,
            ordinator: Ordinator::default(),
        })
    }

    /// Replaces the alternative ordering heuristic.
    pub fn with_ordinator(mut self, ordinator: Ordinator) -> Self {
        self.ordinator = ordinator;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Calendar derived from the configuration.
    pub fn calendar(&self) -> &TermCalendar {
        &self.calendar
    }

    /// Plans a request, running the search to completion.
    pub fn plan(&self, catalog: &Catalog, request: &PlanRequest) -> Result<PlanOutcome> {
        self.plan_until(catalog, request, &NeverTerminate)
    }

    /// Plans a request, stopping when `termination` fires.
    pub fn plan_until(
        &self,
        catalog: &Catalog,
        request: &PlanRequest,
        termination: &dyn Termination,
    ) -> Result<PlanOutcome> {
        self.solve(catalog, request, termination)
            .map(|report| report.outcome)
    }

    /// Plans a request and reports search diagnostics.
    ///
    /// # Errors
    /// - [`PlanError::UnknownCourse`](crate::error::PlanError::UnknownCourse)
    ///   if a reachable course is missing from the catalog.
    /// - [`PlanError::CyclicPrerequisite`](crate::error::PlanError::CyclicPrerequisite)
    ///   if the goals' prerequisites form a cycle made only of aggregate
    ///   buckets. Cycles through a real course are left to the search.
    /// - [`PlanError::Cancelled`](crate::error::PlanError::Cancelled) when
    ///   `termination` fires.
    pub fn solve(
        &self,
        catalog: &Catalog,
        request: &PlanRequest,
        termination: &dyn Termination,
    ) -> Result<PlanReport> {
        let completed: HashSet<Course> = request.completed.iter().cloned().collect();
        info!(
            event = "plan_start",
            goals = request.goals.len(),
            completed = completed.len(),
            horizon = self.calendar.horizon(),
            summer = self.calendar.includes_summer(),
        );

        check_closure(catalog, &request.goals, &completed)?;

        let mut search = RegressionSearch::new(catalog, &self.calendar, &self.ordinator, &completed);
        let result = search.run(&request.goals, termination)?;
        let stats = search.stats().clone();

        let mut fillers = Vec::new();
        let mut violations = Vec::new();
        let outcome = match result {
            SearchOutcome::Satisfied => PlanOutcome::AlreadySatisfied,
            SearchOutcome::Exhausted => PlanOutcome::Infeasible,
            SearchOutcome::Witness(mut operators) => {
                let added = FillPass::new(catalog, &self.calendar).fill(&mut operators, &completed);
                fillers.extend(added.into_iter().map(|op| op.effect));

                violations = TermSchedule::build(operators.iter(), self.calendar.horizon())
                    .violations(&self.calendar, catalog);
                for violation in &violations {
                    warn!(
                        event = "violation",
                        kind = ?violation.violation_type,
                        term = violation.term,
                        message = %violation.message,
                    );
                }

                PlanOutcome::Scheduled(CoursePlan::from_operators(
                    operators.into_operators(),
                    &self.calendar,
                    &completed,
                )?)
            }
        };

        info!(
            event = "plan_end",
            outcome = outcome.label(),
            steps = stats.steps,
            expansions = stats.expansions,
            backtracks = stats.backtracks,
            peak_frontier = stats.peak_frontier,
            fillers = fillers.len(),
            elapsed_ms = stats.elapsed.as_millis() as u64,
        );

        Ok(PlanReport {
            outcome,
            stats,
            fillers,
            violations,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        let config = PlannerConfig::default();
        Self {
            calendar: config.calendar(),
            config,
            ordinator: Ordinator::default(),
        }
    }
}
