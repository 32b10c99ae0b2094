//! Plan output.
//!
//! Turns a finished operator list into a [`CoursePlan`]: terms in
//! chronological order, courses inside a term sorted by (program,
//! designation). Ordering is presentational; lookups go through
//! [`CoursePlan::get`].

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{Course, Operator, RequirementSet, Term, TermCalendar};

/// Result of a planning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    /// A plan satisfying every goal.
    Scheduled(CoursePlan),
    /// Every goal was completed beforehand (or there were no goals).
    AlreadySatisfied,
    /// No plan fits within the horizon.
    Infeasible,
}

impl PlanOutcome {
    /// Whether a plan was produced.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled(_))
    }

    /// The plan, if one was produced.
    pub fn plan(&self) -> Option<&CoursePlan> {
        match self {
            Self::Scheduled(plan) => Some(plan),
            _ => None,
        }
    }

    /// Consumes the outcome into its plan.
    pub fn into_plan(self) -> Option<CoursePlan> {
        match self {
            Self::Scheduled(plan) => Some(plan),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled(_) => "scheduled",
            Self::AlreadySatisfied => "already_satisfied",
            Self::Infeasible => "infeasible",
        }
    }
}

/// One scheduled course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// The course.
    pub course: Course,
    /// Credit weight.
    pub credits: u32,
    /// Assigned term.
    pub term: Term,
    /// Prerequisite alternative chosen for it.
    pub prerequisites: RequirementSet,
    /// Chosen prerequisites that were completed before planning.
    pub satisfied_by_initial: Vec<Course>,
}

impl PlannedCourse {
    /// (semester name, year name) of the assigned term.
    pub fn term_label(&self) -> (&'static str, &'static str) {
        self.term.label()
    }
}

/// Courses of one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTerm {
    /// The term.
    pub term: Term,
    /// Total credits.
    pub credits: u32,
    /// Courses, sorted by (program, designation).
    pub courses: Vec<PlannedCourse>,
}

/// A complete course plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePlan {
    terms: Vec<PlannedTerm>,
}

impl CoursePlan {
    /// Formats operators into a plan.
    ///
    /// # Errors
    /// [`PlanError::Config`] if an operator lies outside the calendar.
    pub fn from_operators(
        operators: Vec<Operator>,
        calendar: &TermCalendar,
        completed: &HashSet<Course>,
    ) -> Result<Self> {
        let mut grouped: BTreeMap<u32, Vec<Operator>> = BTreeMap::new();
        for operator in operators {
            grouped.entry(operator.term).or_default().push(operator);
        }

        let mut terms = Vec::with_capacity(grouped.len());
        for (index, mut ops) in grouped {
            let term = calendar.term(index).ok_or_else(|| {
                PlanError::Config(format!("term {index} is outside the calendar"))
            })?;
            ops.sort_by(|a, b| a.effect.cmp(&b.effect));

            let courses: Vec<PlannedCourse> = ops
                .into_iter()
                .map(|op| PlannedCourse {
                    satisfied_by_initial: op
                        .pre
                        .iter()
                        .filter(|c| completed.contains(*c))
                        .cloned()
                        .collect(),
                    course: op.effect,
                    credits: op.credits,
                    term,
                    prerequisites: op.pre,
                })
                .collect();

            terms.push(PlannedTerm {
                term,
                credits: courses.iter().map(|c| c.credits).sum(),
                courses,
            });
        }

        Ok(Self { terms })
    }

    /// Terms holding at least one course, chronologically.
    pub fn terms(&self) -> &[PlannedTerm] {
        &self.terms
    }

    /// All planned courses, term by term.
    pub fn courses(&self) -> impl Iterator<Item = &PlannedCourse> {
        self.terms.iter().flat_map(|t| t.courses.iter())
    }

    /// Entry for a course.
    pub fn get(&self, course: &Course) -> Option<&PlannedCourse> {
        self.courses().find(|c| &c.course == course)
    }

    /// Whether the plan schedules a course.
    pub fn contains(&self, course: &Course) -> bool {
        self.get(course).is_some()
    }

    /// Number of planned courses.
    pub fn len(&self) -> usize {
        self.terms.iter().map(|t| t.courses.len()).sum()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Course → entry mapping.
    pub fn to_map(&self) -> BTreeMap<Course, PlannedCourse> {
        self.courses().map(|c| (c.course.clone(), c.clone())).collect()
    }
}
