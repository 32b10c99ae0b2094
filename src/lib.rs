//! Course planning for the U-Engine ecosystem.
//!
//! Builds a term-by-term course schedule that satisfies requirement goals
//! expressed as disjunctive prerequisite trees, within calendar offerings
//! and per-term credit bounds, given the courses already completed.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `CourseInfo`, `Prerequisites`,
//!   `Catalog`, `TermCalendar`, `Operator`, `TermSchedule`
//! - **`scheduler`**: Regression search, term assignment, fill pass,
//!   plan output and KPIs
//! - **`heuristic`**: Alternative ordering rules
//! - **`termination`**: Search cancellation conditions
//! - **`validation`**: Catalog integrity checks (unknown references, cycles)
//! - **`config`**: Horizon and credit-bound configuration
//!
//! # Example
//!
//! ```
//! use u_courseplan::models::{Catalog, Course, CourseInfo};
//! use u_courseplan::scheduler::{PlanRequest, Planner};
//! use u_courseplan::PlanOutcome;
//!
//! let intro = Course::new("CS", "1101");
//! let catalog = Catalog::new().with_course(intro.clone(), CourseInfo::new(3).offered_always());
//!
//! let outcome = Planner::default()
//!     .plan(&catalog, &PlanRequest::new(vec![intro.clone()]))
//!     .unwrap();
//! assert!(matches!(outcome, PlanOutcome::Scheduled(_)));
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 11
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod config;
pub mod error;
pub mod heuristic;
pub mod models;
pub mod scheduler;
pub mod termination;
pub mod validation;

pub use config::{ConfigError, PlannerConfig};
pub use error::{PlanError, Result};
pub use scheduler::{CoursePlan, PlanOutcome, PlanRequest, Planner};
