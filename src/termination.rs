//! Termination conditions for the regression search.
//!
//! The search itself never times out. A [`Termination`] is polled once
//! per frontier step; when it fires the planner stops with
//! [`PlanError::Cancelled`](crate::error::PlanError::Cancelled).

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::scheduler::SearchStats;

/// Decides when to abandon a running search.
pub trait Termination: Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, stats: &SearchStats) -> bool;
}

/// Never terminates; the search runs to success or exhaustion.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTerminate;

impl Termination for NeverTerminate {
    fn is_terminated(&self, _stats: &SearchStats) -> bool {
        false
    }
}

/// Terminates after a step count.
///
/// # Example
///
/// ```
/// use u_courseplan::termination::StepCountTermination;
///
/// // Terminate after 10 000 frontier steps
/// let term = StepCountTermination::new(10_000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        stats.steps >= self.limit
    }
}

/// Terminates after a time limit.
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, stats: &SearchStats) -> bool {
        stats.elapsed >= self.limit
    }
}

/// Terminates when an external flag is set.
///
/// # Example
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use u_courseplan::termination::ExternalTermination;
///
/// let flag = AtomicBool::new(false);
/// let term = ExternalTermination::new(&flag);
///
/// // Later, from another thread: flag.store(true, Ordering::SeqCst);
/// ```
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _stats: &SearchStats) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
