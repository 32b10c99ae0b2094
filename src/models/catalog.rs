//! Course catalog.
//!
//! An insertion-ordered map from [`Course`] to [`CourseInfo`]. Iteration
//! order is the deterministic tie-break order used by the fill pass.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Course, CourseInfo};
use crate::error::{PlanError, Result};

/// Insertion-ordered course catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<(Course, CourseInfo)>,
    index: HashMap<Course, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course, builder style.
    pub fn with_course(mut self, course: Course, info: CourseInfo) -> Self {
        self.insert(course, info);
        self
    }

    /// Inserts or replaces a course.
    ///
    /// Replacing keeps the course's original position.
    pub fn insert(&mut self, course: Course, info: CourseInfo) {
        match self.index.get(&course) {
            Some(&pos) => self.entries[pos].1 = info,
            None => {
                self.index.insert(course.clone(), self.entries.len());
                self.entries.push((course, info));
            }
        }
    }

    /// Looks up a course.
    pub fn get(&self, course: &Course) -> Option<&CourseInfo> {
        self.index.get(course).map(|&pos| &self.entries[pos].1)
    }

    /// Looks up a course, failing if the catalog lacks it.
    pub fn lookup(&self, course: &Course) -> Result<&CourseInfo> {
        self.get(course)
            .ok_or_else(|| PlanError::UnknownCourse(course.clone()))
    }

    /// Whether the catalog lists the course.
    pub fn contains(&self, course: &Course) -> bool {
        self.index.contains_key(course)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Course, &CourseInfo)> {
        self.entries.iter().map(|(c, i)| (c, i))
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Course, CourseInfo)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (Course, CourseInfo)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (course, info) in iter {
            catalog.insert(course, info);
        }
        catalog
    }
}

#[derive(Serialize, Deserialize)]
struct CatalogEntry {
    course: Course,
    #[serde(flatten)]
    info: CourseInfo,
}

// Serialized as an entry list so JSON keeps the iteration order.
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries: Vec<CatalogEntry> = self
            .entries
            .iter()
            .map(|(course, info)| CatalogEntry {
                course: course.clone(),
                info: info.clone(),
            })
            .collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<CatalogEntry>::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|e| (e.course, e.info)).collect())
    }
}
