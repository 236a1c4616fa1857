//! Accumulation of statistics across repeated runs.

use crate::stats::{mean, OperationCounts, RunStatistics};
use serde::{Deserialize, Serialize};

/// Statistics of every run folded so far, with each run's total duration.
///
/// Grows by exactly one run per fold and never shrinks; folded runs are never
/// mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossRunStatistics {
    runs: Vec<RunStatistics>,
    run_totals_ms: Vec<f64>,
}

/// Derived values over all folded runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub runs: usize,
    pub average_total_duration_ms: f64,
    pub average_read_duration_ms: f64,
    pub average_write_duration_ms: f64,
    pub max_total_duration_ms: f64,
    pub max_read_total_ms: f64,
    pub max_write_total_ms: f64,
    pub total_counts: OperationCounts,
}

impl CrossRunStatistics {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished run and its total duration.
    pub fn fold(mut self, run: RunStatistics, run_total_duration_ms: f64) -> Self {
        self.push(run, run_total_duration_ms);
        self
    }

    /// In-place form of [`fold`](Self::fold).
    pub fn push(&mut self, run: RunStatistics, run_total_duration_ms: f64) {
        self.runs.push(run);
        self.run_totals_ms.push(run_total_duration_ms);
    }

    /// Folded runs, in fold order.
    pub fn runs(&self) -> &[RunStatistics] {
        &self.runs
    }

    /// Total duration of each folded run, in fold order.
    pub fn run_totals_ms(&self) -> &[f64] {
        &self.run_totals_ms
    }

    /// Number of folded runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    fn read_totals(&self) -> Vec<f64> {
        self.runs.iter().map(RunStatistics::read_total_ms).collect()
    }

    fn write_totals(&self) -> Vec<f64> {
        self.runs.iter().map(RunStatistics::write_total_ms).collect()
    }

    /// Mean of the per-run total durations.
    pub fn average_total_duration(&self) -> f64 {
        mean(&self.run_totals_ms)
    }

    /// Mean over runs of each run's summed read time.
    ///
    /// This is a run-level average of totals, not a flat average over
    /// individual samples.
    pub fn average_read_duration(&self) -> f64 {
        mean(&self.read_totals())
    }

    /// Mean over runs of each run's summed write time.
    pub fn average_write_duration(&self) -> f64 {
        mean(&self.write_totals())
    }

    /// Largest per-run total duration.
    pub fn max_total_duration(&self) -> f64 {
        max_or_zero(self.run_totals_ms.iter().copied())
    }

    /// Largest per-run read total.
    pub fn max_read_total(&self) -> f64 {
        max_or_zero(self.runs.iter().map(RunStatistics::read_total_ms))
    }

    /// Largest per-run write total.
    pub fn max_write_total(&self) -> f64 {
        max_or_zero(self.runs.iter().map(RunStatistics::write_total_ms))
    }

    /// Element-wise sum of every run's counters.
    pub fn total_counts(&self) -> OperationCounts {
        self.runs
            .iter()
            .fold(OperationCounts::default(), |mut acc, run| {
                acc.add(&run.counts);
                acc
            })
    }

    /// All derived values at once.
    pub fn summary(&self) -> AggregateSummary {
        AggregateSummary {
            runs: self.len(),
            average_total_duration_ms: self.average_total_duration(),
            average_read_duration_ms: self.average_read_duration(),
            average_write_duration_ms: self.average_write_duration(),
            max_total_duration_ms: self.max_total_duration(),
            max_read_total_ms: self.max_read_total(),
            max_write_total_ms: self.max_write_total(),
            total_counts: self.total_counts(),
        }
    }
}

fn max_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}
