//! Per-term schedule view.
//!
//! A [`TermSchedule`] groups the operators of a plan by term and tracks
//! each term's credit load. It is rebuilt on demand from an operator
//! list and never owns the operators.
//!
//! It also checks the hard rules of a finished plan (precedence, credit
//! ceilings, offerings) and reports breaches as [`Violation`]s.

use serde::{Deserialize, Serialize};

use super::{Catalog, Operator, TermCalendar};

/// Operators grouped by term index.
#[derive(Debug, Clone)]
pub struct TermSchedule<'a> {
    // Slot 0 holds term 1.
    terms: Vec<Vec<&'a Operator>>,
    loads: Vec<u32>,
}

impl<'a> TermSchedule<'a> {
    /// Groups operators by term over `1..=horizon`.
    ///
    /// Operators outside the horizon are ignored.
    pub fn build<I>(operators: I, horizon: u32) -> Self
    where
        I: IntoIterator<Item = &'a Operator>,
    {
        let slots = horizon as usize;
        let mut terms: Vec<Vec<&'a Operator>> = vec![Vec::new(); slots];
        let mut loads = vec![0u32; slots];
        for operator in operators {
            if operator.term == 0 || operator.term > horizon {
                continue;
            }
            let slot = (operator.term - 1) as usize;
            loads[slot] += operator.credits;
            terms[slot].push(operator);
        }
        Self { terms, loads }
    }

    /// Number of terms covered.
    pub fn horizon(&self) -> u32 {
        self.terms.len() as u32
    }

    /// Operators scheduled in a term, in insertion order.
    pub fn operators(&self, index: u32) -> &[&'a Operator] {
        match slot(index, self.terms.len()) {
            Some(s) => &self.terms[s],
            None => &[],
        }
    }

    /// Credit load of a term.
    pub fn load(&self, index: u32) -> u32 {
        slot(index, self.loads.len()).map_or(0, |s| self.loads[s])
    }

    /// Credit loads, slot 0 holding term 1.
    pub fn loads(&self) -> &[u32] {
        &self.loads
    }

    /// (term index, operators) pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[&'a Operator])> {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, ops)| (i as u32 + 1, ops.as_slice()))
    }

    /// Term of the live operator for a course.
    pub fn term_of(&self, course: &super::Course) -> Option<u32> {
        self.iter()
            .find(|(_, ops)| ops.iter().any(|o| &o.effect == course))
            .map(|(index, _)| index)
    }

    /// Checks the plan's hard rules.
    ///
    /// Reports precedence breaches (a prerequisite not strictly before a
    /// real course, or after an aggregate bucket), credit ceilings
    /// exceeded, and courses placed in a semester they are not offered.
    /// Prerequisites without an operator (completed beforehand) are skipped.
    pub fn violations(&self, calendar: &TermCalendar, catalog: &Catalog) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, ops) in self.iter() {
            let load = self.load(index);
            let ceiling = calendar.ceiling(index);
            if load > ceiling {
                violations.push(Violation::capacity_exceeded(
                    index,
                    format!("Term {index} holds {load} credits (ceiling {ceiling})"),
                ));
            }

            let semester = calendar.term(index).map(|t| t.semester);
            for op in ops {
                if let (Some(semester), Some(info)) = (semester, catalog.get(&op.effect)) {
                    if !info.is_offered_in(semester) {
                        violations.push(Violation::not_offered(
                            index,
                            format!("{} is not offered in {}", op.effect, semester.name()),
                        ));
                    }
                }

                for prerequisite in &op.pre {
                    let Some(pre_term) = self.term_of(prerequisite) else {
                        continue;
                    };
                    let ordered = if op.effect.is_aggregate() {
                        pre_term <= index
                    } else {
                        pre_term < index
                    };
                    if !ordered {
                        violations.push(Violation::precedence_violation(
                            index,
                            format!(
                                "{} (term {pre_term}) does not precede {} (term {index})",
                                prerequisite, op.effect
                            ),
                        ));
                    }
                }
            }
        }

        violations
    }
}

fn slot(index: u32, len: usize) -> Option<usize> {
    let s = (index as usize).checked_sub(1)?;
    (s < len).then_some(s)
}

/// A breach of a plan's hard rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Term index where it occurs.
    pub term: u32,
    /// Human-readable description.
    pub message: String,
}

/// Classification of plan violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Term credits above the ceiling.
    CapacityExceeded,
    /// Prerequisite not scheduled early enough.
    PrecedenceViolation,
    /// Course placed in a semester it does not run.
    NotOffered,
}

impl Violation {
    /// Creates a capacity exceeded violation.
    pub fn capacity_exceeded(term: u32, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::CapacityExceeded,
            term,
            message: message.into(),
        }
    }

    /// Creates a precedence violation.
    pub fn precedence_violation(term: u32, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::PrecedenceViolation,
            term,
            message: message.into(),
        }
    }

    /// Creates a not-offered violation.
    pub fn not_offered(term: u32, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::NotOffered,
            term,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, CourseInfo, RequirementSet};

    fn op(designation: &str, term: u32, credits: u32, pre: &[&str]) -> Operator {
        Operator::new(
            pre.iter().map(|d| Course::new("CS", *d)).collect(),
            Course::new("CS", designation),
            term,
            credits,
        )
    }

    fn catalog() -> Catalog {
        ["1101", "2201", "3251", "major"]
            .into_iter()
            .map(|d| (Course::new("CS", d), CourseInfo::new(3).offered_always()))
            .collect()
    }

    #[test]
    fn test_grouping_and_loads() {
        let ops = vec![op("1101", 1, 3, &[]), op("2201", 2, 3, &["1101"]), op("3251", 2, 4, &[])];
        let schedule = TermSchedule::build(&ops, 11);
        assert_eq!(schedule.horizon(), 11);
        assert_eq!(schedule.load(1), 3);
        assert_eq!(schedule.load(2), 7);
        assert_eq!(schedule.operators(2).len(), 2);
        assert_eq!(schedule.load(0), 0);
        assert_eq!(schedule.load(12), 0);
        assert_eq!(schedule.term_of(&Course::new("CS", "3251")), Some(2));
    }

    #[test]
    fn test_valid_plan_has_no_violations() {
        let ops = vec![op("1101", 1, 3, &[]), op("2201", 2, 3, &["1101"])];
        let schedule = TermSchedule::build(&ops, 11);
        assert!(schedule
            .violations(&TermCalendar::default(), &catalog())
            .is_empty());
    }

    #[test]
    fn test_precedence_violation() {
        let ops = vec![op("1101", 2, 3, &[]), op("2201", 2, 3, &["1101"])];
        let schedule = TermSchedule::build(&ops, 11);
        let v = schedule.violations(&TermCalendar::default(), &catalog());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::PrecedenceViolation);
    }

    #[test]
    fn test_aggregate_may_share_term() {
        let ops = vec![
            op("1101", 4, 3, &[]),
            Operator::new(
                RequirementSet::new(vec![Course::new("CS", "1101")]),
                Course::new("CS", "major"),
                4,
                0,
            ),
        ];
        let schedule = TermSchedule::build(&ops, 11);
        assert!(schedule
            .violations(&TermCalendar::default(), &catalog())
            .is_empty());
    }

    #[test]
    fn test_capacity_and_offering_violations() {
        let cal = TermCalendar::default();
        let ops = vec![op("1101", 3, 4, &[]), op("2201", 3, 4, &[])];
        let mut cat = catalog();
        cat.insert(
            Course::new("CS", "2201"),
            CourseInfo::new(4).offered_in(crate::models::Semester::Fall),
        );
        let schedule = TermSchedule::build(&ops, 11);
        let v = schedule.violations(&cal, &cat);
        assert!(v
            .iter()
            .any(|x| x.violation_type == ViolationType::CapacityExceeded));
        assert!(v.iter().any(|x| x.violation_type == ViolationType::NotOffered));
    }
}
