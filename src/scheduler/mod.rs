//! Regression-search course planner and plan KPIs.
//!
//! # Algorithm
//!
//! `Planner` searches backward from the goals: each course is placed in
//! the latest legal term, then its prerequisites become new obligations,
//! one search branch per prerequisite alternative. Branches that cannot
//! place a course are abandoned (backtracking). The first branch with no
//! obligations left is post-processed by the fill pass, which tops up
//! terms below their credit floor.
//!
//! The search is complete but not optimal: it returns the first witness,
//! not the plan with the fewest terms or credits.
//!
//! # KPI
//!
//! `PlanKpi` summarizes a finished plan: terms used, credits per term,
//! and terms left under their floor.
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 11.2 (Regression Planning)
//! - Ghallab, Nau & Traverso (2004), "Automated Planning: Theory and Practice", Ch. 4

mod assignment;
mod fill;
mod kpi;
mod output;
mod planner;
mod regression;

pub use assignment::TermAssigner;
pub use fill::FillPass;
pub use kpi::PlanKpi;
pub use output::{CoursePlan, PlanOutcome, PlannedCourse, PlannedTerm};
pub use planner::{PlanReport, PlanRequest, Planner};
pub use regression::{RegressionSearch, SearchNode, SearchOutcome, SearchStats};
