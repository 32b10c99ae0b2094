//! Course planning domain models.
//!
//! Provides the core data types for representing a degree-planning
//! problem and its solution.
//!
//! # Domain Mappings
//!
//! | u-courseplan | Meaning |
//! |--------------|---------|
//! | Course | Catalog entry or aggregate requirement bucket |
//! | Prerequisites | Alternatives (DNF) of requirement sets |
//! | Term | One semester slot in the calendar |
//! | Operator | Course + chosen alternative + term |
//! | TermSchedule | Operators grouped by term |

mod calendar;
mod catalog;
mod course;
mod operator;
mod schedule;

pub use calendar::{AcademicYear, CreditBounds, Semester, Term, TermCalendar, TermKind};
pub use catalog::Catalog;
pub use course::{Course, CourseInfo, Prerequisites, RequirementSet};
pub use operator::{Operator, OperatorPlan};
pub use schedule::{TermSchedule, Violation, ViolationType};
