//! Plan quality metrics (KPIs).
//!
//! Summarizes a finished course plan against its calendar.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Terms used | Terms holding at least one course |
//! | Total credits | Sum of planned credits |
//! | First / last term | Earliest and latest occupied term index |
//! | Under-filled terms | Non-empty terms below their floor |
//! | Avg load | Mean credits over occupied terms |

use std::collections::BTreeMap;

use crate::models::TermCalendar;

use super::CoursePlan;

/// Course plan indicators.
#[derive(Debug, Clone)]
pub struct PlanKpi {
    /// Number of terms with at least one course.
    pub terms_used: usize,
    /// Sum of credits across the plan.
    pub total_credits: u32,
    /// Credits per occupied term index.
    pub credits_by_term: BTreeMap<u32, u32>,
    /// Earliest occupied term index.
    pub first_term: Option<u32>,
    /// Latest occupied term index.
    pub last_term: Option<u32>,
    /// Non-empty terms whose credits stay below the floor.
    pub underfilled_terms: Vec<u32>,
    /// Mean credits per occupied term.
    pub avg_load: f64,
}

impl PlanKpi {
    /// Computes KPIs for a plan.
    pub fn calculate(plan: &CoursePlan, calendar: &TermCalendar) -> Self {
        let credits_by_term: BTreeMap<u32, u32> = plan
            .terms()
            .iter()
            .map(|t| (t.term.index, t.credits))
            .collect();

        let total_credits: u32 = credits_by_term.values().sum();
        let underfilled_terms = credits_by_term
            .iter()
            .filter(|(&index, &credits)| credits > 0 && credits < calendar.floor(index))
            .map(|(&index, _)| index)
            .collect();

        let terms_used = credits_by_term.len();
        let avg_load = if terms_used == 0 {
            0.0
        } else {
            total_credits as f64 / terms_used as f64
        };

        Self {
            terms_used,
            total_credits,
            first_term: credits_by_term.keys().next().copied(),
            last_term: credits_by_term.keys().next_back().copied(),
            credits_by_term,
            underfilled_terms,
            avg_load,
        }
    }

    /// Whether every occupied term reaches its floor.
    pub fn meets_floors(&self) -> bool {
        self.underfilled_terms.is_empty()
    }
}
