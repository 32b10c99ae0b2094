//! Built-in alternative rules.
//!
//! # Score Convention
//! All rules return lower scores for alternatives that should be tried
//! first.

use super::{AlternativeRule, RuleScore};
use crate::models::RequirementSet;

/// Sum of course levels.
///
/// Adds the leading digit of every numeric designation; aggregate
/// buckets contribute nothing. Low-level courses tend to have short
/// prerequisite chains, so low sums approximate cheap branches.
#[derive(Debug, Clone, Copy)]
pub struct LeadingDigitSum;

impl AlternativeRule for LeadingDigitSum {
    fn name(&self) -> &'static str {
        "LDS"
    }

    fn evaluate(&self, alternative: &RequirementSet) -> RuleScore {
        alternative.iter().filter_map(|c| c.level()).sum()
    }

    fn description(&self) -> &'static str {
        "Leading Digit Sum"
    }
}

/// Number of courses in the alternative.
#[derive(Debug, Clone, Copy)]
pub struct FewestCourses;

impl AlternativeRule for FewestCourses {
    fn name(&self) -> &'static str {
        "FEW"
    }

    fn evaluate(&self, alternative: &RequirementSet) -> RuleScore {
        alternative.len() as RuleScore
    }

    fn description(&self) -> &'static str {
        "Fewest Courses"
    }
}
