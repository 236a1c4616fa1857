//! Numeric value generators.

use rand::Rng;

/// Generate a random integer in the given range (inclusive).
///
/// Inverted bounds are swapped rather than rejected.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Generate a monetary amount in the given range, rounded to 2 decimal places.
pub fn generate_money_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    round_cents(rng.gen_range(min..=max))
}

/// Round to 2 decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate a 13-digit EAN barcode with a valid check digit.
pub fn generate_ean13<R: Rng>(rng: &mut R) -> String {
    let mut digits: Vec<u32> = (0..12).map(|_| rng.gen_range(0..10)).collect();
    digits.push(ean13_check_digit(&digits));
    digits
        .into_iter()
        .filter_map(|d| char::from_digit(d, 10))
        .collect()
}

/// Check digit for the first 12 digits of an EAN-13.
fn ean13_check_digit(digits: &[u32]) -> u32 {
    let weighted: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    (10 - weighted % 10) % 10
}
