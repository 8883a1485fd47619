//! Property-based tests for display formatting
//!
//! Tests invariants:
//! - Rupee amounts keep every digit and use Indian grouping
//! - Truncation never exceeds the requested width

use proptest::prelude::*;

use crate::tui::format::{format_inr, truncate};

proptest! {
    #[test]
    fn prop_inr_keeps_digits(amount in 0u64..10_000_000_000) {
        let formatted = format_inr(amount as f64);
        prop_assert!(formatted.starts_with('₹'));
        let digits: String = formatted.chars().filter(char::is_ascii_digit).collect();
        prop_assert_eq!(digits, amount.to_string());
    }

    #[test]
    fn prop_inr_grouping_shape(amount in 1_000u64..10_000_000_000) {
        let formatted = format_inr(amount as f64);
        let body = formatted.trim_start_matches('₹');
        let groups: Vec<&str> = body.split(',').collect();
        let (last, rest) = groups.split_last().expect("at least one group");
        prop_assert_eq!(last.len(), 3);
        for (i, group) in rest.iter().enumerate() {
            if i == 0 {
                prop_assert!(!group.is_empty() && group.len() <= 2);
            } else {
                prop_assert_eq!(group.len(), 2);
            }
        }
    }

    #[test]
    fn prop_negative_amounts_are_signed(amount in 1u64..1_000_000) {
        let formatted = format_inr(-(amount as f64));
        prop_assert!(formatted.starts_with("-₹"));
    }

    #[test]
    fn prop_truncate_fits(text in "\\PC{0,40}", max in 1usize..30) {
        let cut = truncate(&text, max);
        prop_assert!(cut.chars().count() <= max);
        if text.chars().count() <= max {
            prop_assert_eq!(cut, text);
        } else {
            prop_assert!(cut.ends_with('…'));
        }
    }
}
