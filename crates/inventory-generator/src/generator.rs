//! Record generator producing stores, products and sales.

use crate::generators::{date, numeric, text, uuid};
use chrono::{DateTime, NaiveDate, Utc};
use inventory_model::{Product, Sale, Store, PAYMENT_METHODS};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Capability that produces well-formed records on demand.
pub trait RecordGenerator: Send {
    /// A store with between `min_products` and `max_products` embedded products.
    fn new_store(&mut self, min_products: usize, max_products: usize) -> Store;

    /// A product not yet tagged with any store.
    fn new_product(&mut self) -> Product;

    /// A sale of `product_id` at `store_id`; the total is derived from `unit_price`.
    fn new_sale(&mut self, store_id: &str, product_id: &str, unit_price: f64) -> Sale;
}

/// Record generator backed by a seeded RNG.
///
/// Generation is deterministic for a given seed and reference clock.
pub struct FakeRecordGenerator {
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Reference clock for date fields
    now: DateTime<Utc>,
    /// Number of records produced so far
    generated: u64,
}

impl FakeRecordGenerator {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now: Utc::now(),
            generated: 0,
        }
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            now: Utc::now(),
            generated: 0,
        }
    }

    /// Pin the reference clock, making date fields reproducible too.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Number of records (stores, products and sales) generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

impl RecordGenerator for FakeRecordGenerator {
    fn new_store(&mut self, min_products: usize, max_products: usize) -> Store {
        let (lo, hi) = if min_products <= max_products {
            (min_products, max_products)
        } else {
            (max_products, min_products)
        };
        let today = self.today();

        let store_id = uuid::generate_uuid_string(&mut self.rng);
        let store_name = text::generate_company(&mut self.rng);
        let email = text::generate_company_email(&mut self.rng, &store_name);
        let store = Store {
            store_id,
            address: text::generate_address(&mut self.rng),
            phone: text::generate_phone_number(&mut self.rng),
            manager_name: text::generate_person_name(&mut self.rng),
            email,
            opening_date: date::generate_date_in_past_years(&mut self.rng, today, 10),
            number_of_employees: self.rng.gen_range(5..=50),
            store_area: numeric::generate_money_range(&mut self.rng, 50.0, 500.0),
            products: Vec::new(),
            store_name,
        };

        let count = self.rng.gen_range(lo..=hi);
        let products = (0..count).map(|_| self.new_product()).collect();

        self.generated += 1;
        Store { products, ..store }
    }

    fn new_product(&mut self) -> Product {
        let today = self.today();
        let product = Product {
            product_id: uuid::generate_uuid_string(&mut self.rng),
            product_name: text::generate_word(&mut self.rng),
            category: text::generate_word(&mut self.rng),
            description: text::generate_text(&mut self.rng, 200),
            price: numeric::generate_money_range(&mut self.rng, 5.0, 500.0),
            stock_quantity: numeric::generate_int_range(&mut self.rng, 0, 1000),
            manufacturer: text::generate_company(&mut self.rng),
            sku: numeric::generate_ean13(&mut self.rng),
            expiry_date: date::generate_date_in_next_years(&mut self.rng, today, 2),
            supplier: text::generate_company(&mut self.rng),
            store_id: None,
        };
        self.generated += 1;
        product
    }

    fn new_sale(&mut self, store_id: &str, product_id: &str, unit_price: f64) -> Sale {
        let quantity_sold: u32 = self.rng.gen_range(1..=10);
        let payment_method = PAYMENT_METHODS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PAYMENT_METHODS[0]);

        let sale = Sale {
            sale_id: uuid::generate_uuid_string(&mut self.rng),
            store_id: store_id.to_string(),
            product_id: product_id.to_string(),
            quantity_sold,
            sale_date: date::generate_datetime_this_year(&mut self.rng, self.now),
            customer_id: uuid::generate_uuid_string(&mut self.rng),
            customer_name: text::generate_person_name(&mut self.rng),
            payment_method: payment_method.to_string(),
            total_amount: numeric::round_cents(f64::from(quantity_sold) * unit_price),
            items: text::generate_words(&mut self.rng, 1, 5),
        };
        self.generated += 1;
        sale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_store_product_count_in_range() {
        let mut generator = FakeRecordGenerator::new(42);

        for _ in 0..20 {
            let store = generator.new_store(5, 20);
            assert!((5..=20).contains(&store.products.len()));
            assert!((5..=50).contains(&store.number_of_employees));
            assert!((50.0..=500.0).contains(&store.store_area));
        }
    }

    #[test]
    fn test_store_inverted_bounds() {
        let mut generator = FakeRecordGenerator::new(42);
        let store = generator.new_store(4, 2);

        assert!((2..=4).contains(&store.products.len()));
    }

    #[test]
    fn test_store_with_no_products() {
        let mut generator = FakeRecordGenerator::new(42);
        let store = generator.new_store(0, 0);

        assert!(store.products.is_empty());
    }

    #[test]
    fn test_product_fields() {
        let mut generator = FakeRecordGenerator::new(42).with_now(fixed_now());
        let product = generator.new_product();

        assert!((5.0..=500.0).contains(&product.price));
        assert!((0..=1000).contains(&product.stock_quantity));
        assert_eq!(product.sku.len(), 13);
        assert!(product.description.len() <= 200);
        assert!(product.expiry_date >= fixed_now().date_naive());
        assert!(product.store_id.is_none());
    }

    #[test]
    fn test_sale_total_is_derived() {
        let mut generator = FakeRecordGenerator::new(42);
        let sale = generator.new_sale("s1", "p1", 12.5);

        assert_eq!(sale.store_id, "s1");
        assert_eq!(sale.product_id, "p1");
        assert!((1..=10).contains(&sale.quantity_sold));
        assert_eq!(
            sale.total_amount,
            numeric::round_cents(f64::from(sale.quantity_sold) * 12.5)
        );
        assert!(PAYMENT_METHODS.contains(&sale.payment_method.as_str()));
        assert!((1..=5).contains(&sale.items.len()));
    }

    #[test]
    fn test_deterministic_generation() {
        let mut gen1 = FakeRecordGenerator::new(42).with_now(fixed_now());
        let mut gen2 = FakeRecordGenerator::new(42).with_now(fixed_now());

        assert_eq!(gen1.new_store(1, 3), gen2.new_store(1, 3));
        assert_eq!(gen1.new_sale("s", "p", 1.0), gen2.new_sale("s", "p", 1.0));
    }

    #[test]
    fn test_unique_identifiers() {
        let mut generator = FakeRecordGenerator::new(42);
        let store = generator.new_store(10, 10);

        let mut ids: Vec<&str> = store.products.iter().map(|p| p.product_id.as_str()).collect();
        ids.push(&store.store_id);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_generated_counter() {
        let mut generator = FakeRecordGenerator::new(42);
        assert_eq!(generator.generated(), 0);

        generator.new_store(2, 2);
        // One store plus its two products
        assert_eq!(generator.generated(), 3);
    }
}
