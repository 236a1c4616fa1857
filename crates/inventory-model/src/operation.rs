//! Operation kinds driven by the workload simulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of simulated database work.
///
/// `ReadStock` is the only read; every other kind is timed as a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationKind {
    ReadStock,
    WriteInventory,
    AddStore,
    AddProduct,
}

impl OperationKind {
    /// All kinds, in the order they are reported.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::ReadStock,
        OperationKind::WriteInventory,
        OperationKind::AddStore,
        OperationKind::AddProduct,
    ];

    /// Counter name used in logs, reports and charts.
    pub fn counter_name(&self) -> &'static str {
        match self {
            OperationKind::ReadStock => "query_stock",
            OperationKind::WriteInventory => "update_inventory",
            OperationKind::AddStore => "add_store",
            OperationKind::AddProduct => "add_product",
        }
    }

    /// Whether samples of this kind land in the read-duration sequence.
    pub fn is_read(&self) -> bool {
        matches!(self, OperationKind::ReadStock)
    }

    /// Whether this kind needs a product picked from the target store.
    pub fn needs_product(&self) -> bool {
        matches!(self, OperationKind::WriteInventory)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.counter_name())
    }
}
