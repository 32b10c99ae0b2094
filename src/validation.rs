//! Input validation for planning problems.
//!
//! Checks structural integrity of a catalog before planning. Detects:
//! - Prerequisites referencing courses missing from the catalog
//! - Courses listing themselves as a prerequisite
//! - Courses offered in no semester
//! - Circular prerequisite dependencies (DAG validation)
//!
//! [`check_closure`] runs the subset the planner needs on the courses
//! reachable from a request's goals and fails fast on the first problem.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::HashSet;

use crate::error::{PlanError, Result};
use crate::models::{Catalog, Course};

/// Validation result.
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A prerequisite names a course that isn't in the catalog.
    UnknownPrerequisite,
    /// A course lists itself as a prerequisite.
    SelfPrerequisite,
    /// A course is offered in no semester.
    NeverOffered,
    /// Prerequisite graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a whole catalog.
///
/// Checks:
/// 1. Every prerequisite reference points to a catalog entry
/// 2. No course requires itself
/// 3. Every course is offered in at least one semester
/// 4. No circular prerequisite dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    for (course, info) in catalog.iter() {
        if info.offered.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NeverOffered,
                format!("Course '{course}' is not offered in any semester"),
            ));
        }

        let mut reported = HashSet::new();
        for pre in info.prerequisites.referenced_courses() {
            if pre == course {
                if reported.insert(pre) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::SelfPrerequisite,
                        format!("Course '{course}' lists itself as a prerequisite"),
                    ));
                }
            } else if !catalog.contains(pre) && reported.insert(pre) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPrerequisite,
                    format!("Course '{course}' references unknown prerequisite '{pre}'"),
                ));
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();
    for (course, _) in catalog.iter() {
        if visited.contains(course) {
            continue;
        }
        let any = |_: &Course| true;
        if let Some(node) = find_cycle(catalog, course, &any, &mut visited, &mut in_stack) {
            errors.push(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving course '{node}'"),
            ));
            break;
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks the prerequisite closure reachable from `goals`.
///
/// Completed courses are not expanded: the search drops them without
/// looking at their prerequisites.
///
/// Only cycles made entirely of aggregate buckets are rejected. A bucket
/// may share a term with its prerequisites, so re-placing such a cycle
/// never moves it earlier. Any cycle through a real course moves at least
/// one term earlier per round and ends in backtracking.
///
/// # Errors
/// - [`PlanError::UnknownCourse`] for a reachable course missing from the catalog.
/// - [`PlanError::CyclicPrerequisite`] if reachable buckets form a cycle.
pub fn check_closure(catalog: &Catalog, goals: &[Course], completed: &HashSet<Course>) -> Result<()> {
    let mut reached: HashSet<&Course> = HashSet::new();
    let mut pending: Vec<&Course> = goals
        .iter()
        .rev()
        .filter(|g| !completed.contains(*g))
        .collect();

    while let Some(course) = pending.pop() {
        if !reached.insert(course) {
            continue;
        }
        let info = catalog.lookup(course)?;
        pending.extend(
            info.prerequisites
                .referenced_courses()
                .filter(|c| !completed.contains(*c)),
        );
    }

    let follow = |c: &Course| c.is_aggregate() && !completed.contains(c);
    let mut buckets: Vec<&Course> = reached.into_iter().filter(|c| c.is_aggregate()).collect();
    buckets.sort();

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();
    for bucket in buckets {
        if visited.contains(bucket) {
            continue;
        }
        if let Some(course) = find_cycle(catalog, bucket, &follow, &mut visited, &mut in_stack) {
            return Err(PlanError::CyclicPrerequisite(course.clone()));
        }
    }

    Ok(())
}

/// DFS from `node` along prerequisite edges accepted by `follow`.
///
/// Returns the course closing a back-edge, if any. Self-references are
/// skipped; they are reported separately and pruned by the search.
///
/// # Algorithm
/// Back-edge detection: reaching a node currently on the recursion stack
/// means a cycle.
fn find_cycle<'a, F>(
    catalog: &'a Catalog,
    node: &'a Course,
    follow: &F,
    visited: &mut HashSet<&'a Course>,
    in_stack: &mut HashSet<&'a Course>,
) -> Option<&'a Course>
where
    F: Fn(&Course) -> bool,
{
    visited.insert(node);
    in_stack.insert(node);

    if let Some(info) = catalog.get(node) {
        for next in info.prerequisites.referenced_courses() {
            if next == node || !catalog.contains(next) || !follow(next) {
                continue;
            }
            if in_stack.contains(next) {
                return Some(next); // Back edge → cycle
            }
            if !visited.contains(next) {
                if let Some(found) = find_cycle(catalog, next, follow, visited, in_stack) {
                    return Some(found);
                }
            }
        }
    }

    in_stack.remove(node);
    None
}
