//! Property-based tests for the rollup module
//!
//! Tests invariants:
//! - Per-provider totals add up to the overall total
//! - Removing a resource lowers the total by exactly its cost
//! - Top cost drivers are bounded, sorted and costed; ties keep input order
//! - Budgets never fall below the floor and ratios stay in range

use proptest::prelude::*;

use crate::core::models::{Provider, Resource, ResourceStatus, ResourceType};
use crate::core::rollup::{
    self, count_by_provider, group_by_provider, provider_budgets, provider_distribution, top_cost_drivers,
    total_monthly_cost, BUDGET_FLOOR, TOP_N,
};
use crate::tests::common::fixtures::ResourceBuilder;

// ============================================================================
// Strategies
// ============================================================================

fn arb_provider() -> impl Strategy<Value = Provider> {
    prop_oneof![
        Just(Provider::Aws),
        Just(Provider::Azure),
        Just(Provider::Gcp),
        "[A-Z][a-z]{2,6}".prop_map(Provider::Other),
    ]
}

fn arb_status() -> impl Strategy<Value = ResourceStatus> {
    prop_oneof![
        Just(ResourceStatus::Running),
        Just(ResourceStatus::Stopped),
        Just(ResourceStatus::Unknown),
        Just(ResourceStatus::Other("Creating".into())),
    ]
}

fn arb_type() -> impl Strategy<Value = ResourceType> {
    prop::sample::select(ResourceType::KNOWN.to_vec())
}

/// Whole-rupee costs keep float sums exact.
fn arb_resources() -> impl Strategy<Value = Vec<Resource>> {
    prop::collection::vec(
        (
            arb_provider(),
            arb_type(),
            arb_status(),
            prop::option::of(0u32..50_000),
        ),
        0..25,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (provider, kind, status, cost))| {
                let mut builder = ResourceBuilder::new(i as i64 + 1, &format!("r-{i}"))
                    .provider(provider)
                    .kind(kind)
                    .status(status);
                if let Some(cost) = cost {
                    builder = builder.cost(f64::from(cost));
                }
                builder.build()
            })
            .collect()
    })
}

// ============================================================================
// Totals
// ============================================================================

proptest! {
    #[test]
    fn prop_provider_totals_sum_to_total(resources in arb_resources()) {
        let groups = group_by_provider(&resources);
        let count: usize = groups.values().map(|t| t.count).sum();
        let cost: f64 = groups.values().map(|t| t.cost).sum();
        prop_assert_eq!(count, resources.len());
        prop_assert_eq!(cost, total_monthly_cost(&resources));

        let counted: usize = count_by_provider(&resources).iter().map(|(_, n)| n).sum();
        prop_assert_eq!(counted, resources.len());
    }

    #[test]
    fn prop_removal_lowers_total_by_its_cost(
        (resources, index) in arb_resources()
            .prop_filter("needs a resource", |r| !r.is_empty())
            .prop_flat_map(|r| {
                let len = r.len();
                (Just(r), 0..len)
            })
    ) {
        let before = total_monthly_cost(&resources);
        let mut remaining = resources.clone();
        let removed = remaining.remove(index);
        let after = total_monthly_cost(&remaining);
        prop_assert_eq!(before - after, removed.cost_or_zero());
    }

    #[test]
    fn prop_groups_follow_first_seen_order(resources in arb_resources()) {
        let mut seen: Vec<Provider> = Vec::new();
        for r in &resources {
            if !seen.contains(&r.provider) {
                seen.push(r.provider.clone());
            }
        }
        let keys: Vec<Provider> = group_by_provider(&resources).keys().cloned().collect();
        prop_assert_eq!(keys, seen);
    }

    #[test]
    fn prop_status_counts_partition(resources in arb_resources()) {
        let running = rollup::active_count(&resources);
        let idle = rollup::idle_count(&resources);
        let other = resources
            .iter()
            .filter(|r| matches!(r.status, ResourceStatus::Other(_)))
            .count();
        prop_assert_eq!(running + idle + other, resources.len());
        prop_assert!(rollup::stopped_count(&resources) <= idle);
    }

    #[test]
    fn prop_distribution_skips_empty_known_providers(resources in arb_resources()) {
        for (provider, count) in provider_distribution(&resources) {
            prop_assert!(count > 0);
            prop_assert!(!matches!(provider, Provider::Other(_)));
        }
    }
}

// ============================================================================
// Cost drivers & budgets
// ============================================================================

proptest! {
    #[test]
    fn prop_top_drivers_bounded_and_sorted(resources in arb_resources()) {
        let top = top_cost_drivers(&resources);
        prop_assert!(top.len() <= TOP_N);
        prop_assert!(top.iter().all(|r| r.has_cost()));
        for pair in top.windows(2) {
            prop_assert!(pair[0].cost_or_zero() >= pair[1].cost_or_zero());
        }
        let costed = resources.iter().filter(|r| r.has_cost()).count();
        prop_assert_eq!(top.len(), costed.min(TOP_N));
    }

    #[test]
    fn prop_top_driver_ties_keep_input_order(
        costs in prop::collection::vec(prop::option::of(1u32..4), 0..20)
    ) {
        let resources: Vec<Resource> = costs
            .iter()
            .enumerate()
            .map(|(i, cost)| {
                let builder = ResourceBuilder::new(i as i64 + 1, &format!("r-{i}"));
                match cost {
                    Some(cost) => builder.cost(f64::from(*cost)).build(),
                    None => builder.build(),
                }
            })
            .collect();

        let top = top_cost_drivers(&resources);
        for pair in top.windows(2) {
            if pair[0].cost_or_zero() == pair[1].cost_or_zero() {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn prop_highest_cost_is_the_maximum(resources in arb_resources()) {
        let max = resources
            .iter()
            .filter(|r| r.has_cost())
            .map(Resource::cost_or_zero)
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.max(c))));
        prop_assert_eq!(rollup::highest_cost(&resources).map(Resource::cost_or_zero), max);
    }

    #[test]
    fn prop_budgets_respect_floor_and_headroom(resources in arb_resources()) {
        for budget in provider_budgets(&resources) {
            prop_assert!(budget.spend > 0.0);
            prop_assert!(budget.budget >= BUDGET_FLOOR);
            prop_assert!(budget.budget >= budget.spend);
            let ratio = budget.ratio();
            prop_assert!((0.0..=1.0).contains(&ratio));
        }
    }
}
