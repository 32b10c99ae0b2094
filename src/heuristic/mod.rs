//! Branch-ordering heuristics for the regression search.
//!
//! When a course is scheduled, the search branches once per prerequisite
//! alternative. Rules score each alternative and the [`Ordinator`] decides
//! which branch is explored first.
//!
//! # Usage
//!
//! ```
//! use u_courseplan::heuristic::{rules, Ordinator};
//! use u_courseplan::models::{Course, RequirementSet};
//!
//! let ordinator = Ordinator::new()
//!     .with_rule(rules::LeadingDigitSum)
//!     .with_tie_breaker(rules::FewestCourses);
//!
//! let alternatives = vec![
//!     RequirementSet::new(vec![Course::new("CS", "3251")]),
//!     RequirementSet::new(vec![Course::new("CS", "1101")]),
//! ];
//! let order = ordinator.exploration_order(&alternatives);
//! assert_eq!(order, vec![1, 0]);
//! ```

mod ordinator;
pub mod rules;

pub use ordinator::Ordinator;

use crate::models::RequirementSet;
use std::fmt::Debug;

/// Score returned by an alternative rule.
///
/// Lower scores = explored first.
pub type RuleScore = u32;

/// A rule that scores one prerequisite alternative.
///
/// # Score Convention
/// **Lower score = more promising.** The search explores low-scoring
/// alternatives first.
pub trait AlternativeRule: Send + Sync + Debug {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Scores an alternative requirement set.
    fn evaluate(&self, alternative: &RequirementSet) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
