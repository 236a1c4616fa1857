//! Store, product and sale entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Payment methods a sale may record.
pub const PAYMENT_METHODS: [&str; 3] = ["Credit Card", "Cash", "Debit Card"];

/// A product, either embedded in a [`Store`] or stored on its own in the
/// `products` collection.
///
/// `stock_quantity` is only mutated through atomic increments against the
/// persistence layer. The in-memory copy goes stale as soon as the product is
/// inserted and is only used to pick candidate identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub manufacturer: String,
    pub sku: String,
    pub expiry_date: NaiveDate,
    pub supplier: String,
    /// Owning store; absent while the product is embedded in its store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

impl Product {
    /// Tag this product with its owning store.
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }
}

/// A store with its embedded products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: String,
    pub store_name: String,
    pub address: String,
    pub phone: String,
    pub manager_name: String,
    pub email: String,
    pub opening_date: NaiveDate,
    pub number_of_employees: u32,
    pub store_area: f64,
    pub products: Vec<Product>,
}

impl Store {
    /// Embedded products, each tagged with this store's identifier.
    pub fn tagged_products(&self) -> impl Iterator<Item = Product> + '_ {
        self.products
            .iter()
            .cloned()
            .map(|p| p.with_store_id(self.store_id.clone()))
    }
}

/// A completed sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: String,
    pub store_id: String,
    pub product_id: String,
    pub quantity_sold: u32,
    pub sale_date: DateTime<Utc>,
    pub customer_id: String,
    pub customer_name: String,
    pub payment_method: String,
    pub total_amount: f64,
    pub items: Vec<String>,
}

impl Sale {
    /// The stock increment this sale applies to its product.
    pub fn stock_delta(&self) -> i64 {
        -i64::from(self.quantity_sold)
    }
}
