//! Course and prerequisite models.
//!
//! A course is identified by its program code and designation. Courses
//! whose designation is not purely numeric (`"major"`, `"core"`, `"4900W"`)
//! are aggregate requirement buckets: zero-credit pseudo-courses that group
//! other requirements.
//!
//! # Prerequisite Model
//! Prerequisites are kept in disjunctive normal form: an ordered list of
//! alternative requirement sets. Satisfying every course of any one set
//! satisfies the prerequisite.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Semester;

/// A catalog entry or aggregate requirement bucket.
///
/// Ordering is lexicographic by (program, designation), which is the
/// presentation order inside a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Course {
    /// Program code (e.g., "CS").
    pub program: String,
    /// Designation within the program (e.g., "1101" or "major").
    pub designation: String,
}

impl Course {
    /// Creates a new course identifier.
    pub fn new(program: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            designation: designation.into(),
        }
    }

    /// Whether this course is an aggregate requirement bucket.
    ///
    /// A designation that is empty or contains any non-digit character
    /// marks a bucket.
    pub fn is_aggregate(&self) -> bool {
        self.designation.is_empty() || !self.designation.chars().all(|c| c.is_ascii_digit())
    }

    /// Leading digit of a numeric designation (the course level).
    ///
    /// Returns `None` for aggregate buckets.
    pub fn level(&self) -> Option<u32> {
        if self.is_aggregate() {
            return None;
        }
        self.designation.chars().next().and_then(|c| c.to_digit(10))
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.program, self.designation)
    }
}

/// One alternative of a prerequisite: every listed course is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementSet(Vec<Course>);

impl RequirementSet {
    /// Creates an empty requirement set (no prerequisite).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a requirement set from its courses.
    pub fn new(courses: Vec<Course>) -> Self {
        Self(courses)
    }

    /// Courses in this set, in declaration order.
    pub fn courses(&self) -> &[Course] {
        &self.0
    }

    /// Whether the set requires the given course.
    pub fn contains(&self, course: &Course) -> bool {
        self.0.contains(course)
    }

    /// Whether the set requires nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of required courses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over required courses.
    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.0.iter()
    }
}

impl FromIterator<Course> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Prerequisite of a course in disjunctive normal form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prerequisites {
    /// No prerequisite.
    #[default]
    None,
    /// Any one of the listed requirement sets satisfies the prerequisite.
    AnyOf(Vec<RequirementSet>),
}

impl Prerequisites {
    /// Builds a prerequisite from alternatives.
    ///
    /// An empty alternative list normalizes to [`Prerequisites::None`].
    pub fn any_of(alternatives: Vec<RequirementSet>) -> Self {
        if alternatives.is_empty() {
            Self::None
        } else {
            Self::AnyOf(alternatives)
        }
    }

    /// Single alternative requiring all the given courses.
    pub fn all_of(courses: Vec<Course>) -> Self {
        Self::any_of(vec![RequirementSet::new(courses)])
    }

    /// Whether the course can be taken without any prerequisite.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Alternatives to branch on during search.
    ///
    /// A course without prerequisites yields one empty alternative, so
    /// every course produces at least one branch.
    pub fn branches(&self) -> Vec<RequirementSet> {
        match self {
            Self::None => vec![RequirementSet::empty()],
            Self::AnyOf(alternatives) => alternatives.clone(),
        }
    }

    /// Declared alternatives (empty for [`Prerequisites::None`]).
    pub fn alternatives(&self) -> &[RequirementSet] {
        match self {
            Self::None => &[],
            Self::AnyOf(alternatives) => alternatives,
        }
    }

    /// Every course mentioned in any alternative.
    pub fn referenced_courses(&self) -> impl Iterator<Item = &Course> {
        self.alternatives().iter().flat_map(|alt| alt.iter())
    }
}

/// Catalog data for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Credit weight.
    pub credits: u32,
    /// Semesters in which the course is offered.
    pub offered: Vec<Semester>,
    /// Prerequisite DNF.
    #[serde(default)]
    pub prerequisites: Prerequisites,
}

impl CourseInfo {
    /// Creates course info with no prerequisites and no offerings.
    pub fn new(credits: u32) -> Self {
        Self {
            credits,
            offered: Vec::new(),
            prerequisites: Prerequisites::None,
        }
    }

    /// Adds a semester in which the course is offered.
    pub fn offered_in(mut self, semester: Semester) -> Self {
        if !self.offered.contains(&semester) {
            self.offered.push(semester);
        }
        self
    }

    /// Marks the course as offered in every semester kind.
    pub fn offered_always(self) -> Self {
        Semester::ALL
            .into_iter()
            .fold(self, |info, semester| info.offered_in(semester))
    }

    /// Sets the prerequisites.
    pub fn with_prerequisites(mut self, prerequisites: Prerequisites) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    /// Whether the course runs in the given semester.
    #[inline]
    pub fn is_offered_in(&self, semester: Semester) -> bool {
        self.offered.contains(&semester)
    }
}
