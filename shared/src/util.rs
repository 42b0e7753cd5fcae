//! Shared helpers

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// Generate a human-readable order number.
///
/// Format: `ORD-<epoch millis>-<9 uppercase alphanumerics>`. Uniqueness is
/// probabilistic (timestamp + random suffix); no collision check is made.
pub fn order_number() -> String {
    format!("ORD-{}-{}", now_millis(), random_suffix(9))
}

/// Generate a human-readable invoice number (`INV-` prefix, 6-char suffix).
pub fn invoice_number() -> String {
    format!("INV-{}-{}", now_millis(), random_suffix(6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn order_number_format() {
        let number = order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!parts[2].chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn invoice_number_format() {
        let number = invoice_number();
        assert!(number.starts_with("INV-"));
        assert_eq!(number.split('-').count(), 3);
        assert_eq!(number.split('-').nth(2).unwrap().len(), 6);
    }

    #[test]
    fn order_numbers_are_distinct_in_practice() {
        // Probabilistic uniqueness, not a formal guarantee: assert over a
        // large sample that no pair collides.
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(order_number()), "order number collided");
        }
    }
}
