//! Latest-fit term assignment.
//!
//! # Algorithm
//!
//! 1. Find the earliest term holding a committed operator whose chosen
//!    alternative requires the course. The scan starts one term earlier
//!    when any such dependent in that term is a real course, or at that
//!    term when all of them are aggregate buckets.
//! 2. Without such a dependent, the scan starts at the horizon.
//! 3. Scanning backward, return the first term whose semester offers the
//!    course and whose credit load stays within the ceiling.
//!
//! Placing courses as late as possible leaves early terms free for the
//! prerequisite chains that must precede them.

use crate::models::{Course, CourseInfo, OperatorPlan, TermCalendar, TermSchedule};

/// Finds the latest legal term for a course against a committed plan.
#[derive(Debug, Clone, Copy)]
pub struct TermAssigner<'a> {
    calendar: &'a TermCalendar,
}

impl<'a> TermAssigner<'a> {
    /// Creates an assigner over a calendar.
    pub fn new(calendar: &'a TermCalendar) -> Self {
        Self { calendar }
    }

    /// Latest term that fits `course`, or `None` if no term does.
    ///
    /// `plan` must not hold an operator for `course` itself; the search
    /// removes stale operators before calling this.
    pub fn assign(&self, course: &Course, info: &CourseInfo, plan: &OperatorPlan) -> Option<u32> {
        let schedule = TermSchedule::build(plan.iter(), self.calendar.horizon());
        let start = self.scan_start(course, &schedule)?;
        self.latest_fit(info, &schedule, start)
    }

    /// First term to try, derived from the earliest dependent term.
    ///
    /// A real dependent bounds tighter than a bucket in the same term.
    /// Returns `None` when a real dependent sits in term 1, leaving no
    /// earlier term.
    pub fn scan_start(&self, course: &Course, schedule: &TermSchedule<'_>) -> Option<u32> {
        let earliest = schedule.iter().find_map(|(index, ops)| {
            let mut dependents = ops.iter().filter(|op| op.requires(course)).peekable();
            dependents.peek()?;
            let strict = dependents.any(|op| !op.effect.is_aggregate());
            Some((index, strict))
        });

        match earliest {
            Some((index, false)) => Some(index),
            Some((index, true)) => index.checked_sub(1).filter(|&i| i > 0),
            None => Some(self.calendar.horizon()),
        }
    }

    /// Scans backward from `start` for a term that fits.
    pub fn latest_fit(
        &self,
        info: &CourseInfo,
        schedule: &TermSchedule<'_>,
        start: u32,
    ) -> Option<u32> {
        (1..=start.min(self.calendar.horizon()))
            .rev()
            .find(|&index| self.fits(info, schedule, index))
    }

    /// Whether the course can be added to a term.
    pub fn fits(&self, info: &CourseInfo, schedule: &TermSchedule<'_>, index: u32) -> bool {
        let Some(term) = self.calendar.term(index) else {
            return false;
        };
        info.is_offered_in(term.semester)
            && self
                .calendar
                .bounds(self.calendar.kind(index))
                .admits(schedule.load(index), info.credits)
    }
}
