//! Document collection names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The collections that make up the inventory database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Stores,
    Products,
    Sales,
}

impl Collection {
    /// All collections, in creation order.
    pub const ALL: [Collection; 3] = [Collection::Stores, Collection::Products, Collection::Sales];

    /// Collection name as stored in the database.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Stores => "stores",
            Collection::Products => "products",
            Collection::Sales => "sales",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        let names: Vec<&str> = Collection::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["stores", "products", "sales"]);
        assert_eq!(Collection::Sales.to_string(), "sales");
    }
}
