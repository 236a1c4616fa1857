//! Per-run statistics.

use inventory_model::OperationKind;
use serde::{Deserialize, Serialize};

/// Arithmetic mean, defined as zero for an empty slice.
///
/// Every average in the benchmark goes through this function.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Outcome of executing exactly one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSample {
    pub kind: OperationKind,
    pub duration_ms: f64,
}

/// Occurrence count per operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCounts {
    pub query_stock: u64,
    pub update_inventory: u64,
    pub add_store: u64,
    pub add_product: u64,
}

impl OperationCounts {
    /// Count for one kind.
    pub fn get(&self, kind: OperationKind) -> u64 {
        match kind {
            OperationKind::ReadStock => self.query_stock,
            OperationKind::WriteInventory => self.update_inventory,
            OperationKind::AddStore => self.add_store,
            OperationKind::AddProduct => self.add_product,
        }
    }

    /// Count one more occurrence of `kind`.
    pub fn increment(&mut self, kind: OperationKind) {
        let slot = match kind {
            OperationKind::ReadStock => &mut self.query_stock,
            OperationKind::WriteInventory => &mut self.update_inventory,
            OperationKind::AddStore => &mut self.add_store,
            OperationKind::AddProduct => &mut self.add_product,
        };
        *slot += 1;
    }

    /// Element-wise sum.
    pub fn add(&mut self, other: &OperationCounts) {
        self.query_stock += other.query_stock;
        self.update_inventory += other.update_inventory;
        self.add_store += other.add_store;
        self.add_product += other.add_product;
    }

    /// Sum over all kinds.
    pub fn total(&self) -> u64 {
        OperationKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// `(counter name, count)` pairs in reporting order.
    pub fn entries(&self) -> [(&'static str, u64); 4] {
        OperationKind::ALL.map(|k| (k.counter_name(), self.get(k)))
    }
}

/// Timings and counts collected during one run.
///
/// Sequences are in completion order, not selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Zero-based index of the run.
    pub run_index: usize,
    /// Durations of successful reads, in milliseconds.
    pub read_durations_ms: Vec<f64>,
    /// Durations of successful writes, in milliseconds.
    pub write_durations_ms: Vec<f64>,
    /// Successful operations per kind.
    pub counts: OperationCounts,
}

impl RunStatistics {
    /// Empty statistics for a run.
    pub fn new(run_index: usize) -> Self {
        Self {
            run_index,
            ..Default::default()
        }
    }

    /// Route a successful sample into the read or write sequence and count it.
    pub fn record(&mut self, sample: TimingSample) {
        if sample.kind.is_read() {
            self.read_durations_ms.push(sample.duration_ms);
        } else {
            self.write_durations_ms.push(sample.duration_ms);
        }
        self.counts.increment(sample.kind);
    }

    /// Number of recorded samples.
    pub fn sample_count(&self) -> usize {
        self.read_durations_ms.len() + self.write_durations_ms.len()
    }

    /// Sum of read durations.
    pub fn read_total_ms(&self) -> f64 {
        self.read_durations_ms.iter().sum()
    }

    /// Sum of write durations.
    pub fn write_total_ms(&self) -> f64 {
        self.write_durations_ms.iter().sum()
    }

    /// Mean read duration (zero when there were no reads).
    pub fn read_average_ms(&self) -> f64 {
        mean(&self.read_durations_ms)
    }

    /// Mean write duration (zero when there were no writes).
    pub fn write_average_ms(&self) -> f64 {
        mean(&self.write_durations_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn test_record_routes_by_kind() {
        let mut stats = RunStatistics::new(0);
        stats.record(TimingSample {
            kind: OperationKind::ReadStock,
            duration_ms: 2.0,
        });
        for kind in [
            OperationKind::WriteInventory,
            OperationKind::AddStore,
            OperationKind::AddProduct,
        ] {
            stats.record(TimingSample {
                kind,
                duration_ms: 1.0,
            });
        }

        assert_eq!(stats.read_durations_ms, vec![2.0]);
        assert_eq!(stats.write_durations_ms.len(), 3);
        assert_eq!(stats.counts.total(), 4);
        assert_eq!(stats.counts.query_stock, 1);
        assert_eq!(stats.counts.update_inventory, 1);
        assert_eq!(stats.counts.add_store, 1);
        assert_eq!(stats.counts.add_product, 1);
        assert_eq!(stats.sample_count(), 4);
    }

    #[test]
    fn test_empty_run_statistics() {
        let stats = RunStatistics::new(3);

        assert_eq!(stats.run_index, 3);
        assert_eq!(stats.counts, OperationCounts::default());
        assert_eq!(stats.read_total_ms(), 0.0);
        assert_eq!(stats.read_average_ms(), 0.0);
        assert_eq!(stats.write_average_ms(), 0.0);
    }

    #[test]
    fn test_counts_add_and_entries() {
        let mut a = OperationCounts {
            query_stock: 1,
            update_inventory: 2,
            add_store: 3,
            add_product: 4,
        };
        let b = a;
        a.add(&b);

        assert_eq!(a.total(), 20);
        assert_eq!(
            a.entries(),
            [
                ("query_stock", 2),
                ("update_inventory", 4),
                ("add_store", 6),
                ("add_product", 8)
            ]
        );
    }
}
