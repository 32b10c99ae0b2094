//! Academic calendar: terms, semesters, and credit bounds.
//!
//! # Term Model
//! Terms are numbered from 1 in chronological order. With `slots`
//! semesters per year (2 without summer, 3 with summer):
//!
//! `index = year * slots + semester`
//!
//! where Fall = 1, Spring = 2, Summer = 3 and Frosh = 0 .. Senior = 3.
//! The mapping is total and invertible over `1..=max_terms`.
//!
//! # Credit Bounds
//! Each term kind (regular or summer) has a credit ceiling that the
//! scheduler never exceeds and a floor that the fill pass tries to reach.

use serde::{Deserialize, Serialize};

/// Semester within an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Semester {
    Fall,
    Spring,
    Summer,
}

impl Semester {
    /// Every semester, in calendar order.
    pub const ALL: [Semester; 3] = [Semester::Fall, Semester::Spring, Semester::Summer];

    /// 1-based position within the year.
    #[inline]
    pub fn ordinal(self) -> u32 {
        match self {
            Self::Fall => 1,
            Self::Spring => 2,
            Self::Summer => 3,
        }
    }

    /// Inverse of [`Semester::ordinal`].
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            1 => Some(Self::Fall),
            2 => Some(Self::Spring),
            3 => Some(Self::Summer),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        }
    }
}

/// Academic year of study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AcademicYear {
    Frosh,
    Sophomore,
    Junior,
    Senior,
}

impl AcademicYear {
    /// Number of academic years in the calendar.
    pub const COUNT: u32 = 4;

    /// 0-based position.
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            Self::Frosh => 0,
            Self::Sophomore => 1,
            Self::Junior => 2,
            Self::Senior => 3,
        }
    }

    /// Inverse of [`AcademicYear::index`].
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Frosh),
            1 => Some(Self::Sophomore),
            2 => Some(Self::Junior),
            3 => Some(Self::Senior),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Frosh => "Frosh",
            Self::Sophomore => "Sophomore",
            Self::Junior => "Junior",
            Self::Senior => "Senior",
        }
    }
}

/// Credit-bound category of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    /// Fall or spring.
    Regular,
    /// Summer.
    Summer,
}

/// Credit ceiling and floor for one term kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBounds {
    /// Minimum credits the fill pass aims for in a non-empty term.
    pub floor: u32,
    /// Maximum credits a term may hold.
    pub ceiling: u32,
}

impl CreditBounds {
    /// Creates credit bounds.
    pub fn new(floor: u32, ceiling: u32) -> Self {
        Self { floor, ceiling }
    }

    /// Whether `load` plus `credits` stays within the ceiling.
    #[inline]
    pub fn admits(&self, load: u32, credits: u32) -> bool {
        load.saturating_add(credits) <= self.ceiling
    }
}

/// One scheduling slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// 1-based chronological index.
    pub index: u32,
    /// Semester of this term.
    pub semester: Semester,
    /// Academic year of this term.
    pub year: AcademicYear,
}

impl Term {
    /// (semester name, year name) pair used in plan output.
    pub fn label(&self) -> (&'static str, &'static str) {
        (self.semester.name(), self.year.name())
    }
}

/// Term numbering and credit bounds for a planning horizon.
///
/// Immutable once built; every scheduler component receives it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCalendar {
    include_summer: bool,
    max_terms: u32,
    regular: CreditBounds,
    summer: CreditBounds,
}

impl TermCalendar {
    /// Creates a calendar.
    ///
    /// Indices beyond the four academic years never resolve to a term,
    /// so `max_terms` is effectively capped at `4 * slots_per_year`.
    pub fn new(
        include_summer: bool,
        max_terms: u32,
        regular: CreditBounds,
        summer: CreditBounds,
    ) -> Self {
        Self {
            include_summer,
            max_terms,
            regular,
            summer,
        }
    }

    /// Semesters per academic year.
    #[inline]
    pub fn slots_per_year(&self) -> u32 {
        if self.include_summer {
            3
        } else {
            2
        }
    }

    /// Whether summer terms are part of the calendar.
    pub fn includes_summer(&self) -> bool {
        self.include_summer
    }

    /// Index of the last schedulable term.
    pub fn horizon(&self) -> u32 {
        self.max_terms.min(AcademicYear::COUNT * self.slots_per_year())
    }

    /// Resolves a term index into its semester and year.
    ///
    /// Returns `None` outside `1..=horizon`.
    pub fn term(&self, index: u32) -> Option<Term> {
        if index == 0 || index > self.horizon() {
            return None;
        }
        let slots = self.slots_per_year();
        let year = AcademicYear::from_index((index - 1) / slots)?;
        let semester = Semester::from_ordinal(index - slots * year.index())?;
        Some(Term {
            index,
            semester,
            year,
        })
    }

    /// Index of the term for a (semester, year) pair.
    ///
    /// Returns `None` for summer when summers are excluded, or when the
    /// pair lies beyond the horizon.
    pub fn index_of(&self, semester: Semester, year: AcademicYear) -> Option<u32> {
        if semester == Semester::Summer && !self.include_summer {
            return None;
        }
        let index = year.index() * self.slots_per_year() + semester.ordinal();
        (index <= self.horizon()).then_some(index)
    }

    /// All terms in chronological order.
    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        (1..=self.horizon()).filter_map(move |i| self.term(i))
    }

    /// Credit-bound category of a term index.
    pub fn kind(&self, index: u32) -> TermKind {
        match self.term(index) {
            Some(term) if term.semester == Semester::Summer => TermKind::Summer,
            _ => TermKind::Regular,
        }
    }

    /// Credit bounds for a term kind.
    pub fn bounds(&self, kind: TermKind) -> CreditBounds {
        match kind {
            TermKind::Regular => self.regular,
            TermKind::Summer => self.summer,
        }
    }

    /// Credit ceiling of a term index.
    #[inline]
    pub fn ceiling(&self, index: u32) -> u32 {
        self.bounds(self.kind(index)).ceiling
    }

    /// Credit floor of a term index.
    #[inline]
    pub fn floor(&self, index: u32) -> u32 {
        self.bounds(self.kind(index)).floor
    }
}

impl Default for TermCalendar {
    fn default() -> Self {
        Self::new(
            true,
            11,
            CreditBounds::new(12, 18),
            CreditBounds::new(0, 6),
        )
    }
}
