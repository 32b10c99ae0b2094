//! Credit-floor fill pass.
//!
//! Tops up every non-empty term whose credits fall below its floor with
//! prerequisite-free filler courses, scanning the catalog in order.
//! Empty terms are left alone and under-fill is tolerated once no
//! eligible filler remains.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{
    Catalog, Course, CourseInfo, Operator, OperatorPlan, RequirementSet, Semester, TermCalendar,
    TermSchedule,
};

/// Adds filler courses to under-filled terms.
#[derive(Debug, Clone, Copy)]
pub struct FillPass<'a> {
    catalog: &'a Catalog,
    calendar: &'a TermCalendar,
}

impl<'a> FillPass<'a> {
    /// Creates a fill pass.
    pub fn new(catalog: &'a Catalog, calendar: &'a TermCalendar) -> Self {
        Self { catalog, calendar }
    }

    /// Fills `plan` in place and returns the operators added.
    ///
    /// Courses already planned or completed are never used as filler.
    pub fn fill(&self, plan: &mut OperatorPlan, completed: &HashSet<Course>) -> Vec<Operator> {
        let horizon = self.calendar.horizon();
        let mut loads = TermSchedule::build(plan.iter(), horizon).loads().to_vec();
        let mut used: HashSet<Course> = plan.iter().map(|op| op.effect.clone()).collect();
        used.extend(completed.iter().cloned());

        let mut added = Vec::new();
        for index in 1..=horizon {
            let Some(term) = self.calendar.term(index) else {
                continue;
            };
            let slot = (index - 1) as usize;
            let bounds = self.calendar.bounds(self.calendar.kind(index));
            if loads[slot] == 0 {
                continue;
            }

            while loads[slot] < bounds.floor {
                let load = loads[slot];
                let Some((course, info)) = self.next_filler(&used, term.semester, |credits| {
                    bounds.admits(load, credits)
                }) else {
                    debug!(
                        event = "fill_exhausted",
                        term = index,
                        credits = load,
                        floor = bounds.floor,
                    );
                    break;
                };

                let operator =
                    Operator::new(RequirementSet::empty(), course.clone(), index, info.credits);
                debug!(event = "fill", term = index, course = %course, credits = info.credits);
                loads[slot] += info.credits;
                used.insert(course.clone());
                plan.insert(operator.clone());
                added.push(operator);
            }
        }
        added
    }

    /// First eligible filler in catalog order.
    ///
    /// Eligible: unused, real (non-aggregate), prerequisite-free, offered
    /// in `semester`, nonzero credits, and admitted by `fits`.
    fn next_filler<F>(
        &self,
        used: &HashSet<Course>,
        semester: Semester,
        fits: F,
    ) -> Option<(&'a Course, &'a CourseInfo)>
    where
        F: Fn(u32) -> bool,
    {
        self.catalog.iter().find(|(course, info)| {
            !used.contains(*course)
                && !course.is_aggregate()
                && info.prerequisites.is_none()
                && info.credits > 0
                && info.is_offered_in(semester)
                && fits(info.credits)
        })
    }
}
