//! Cost and inventory aggregates derived from the current resource list.
//!
//! Everything here is a pure function over slices; views call these on each
//! render instead of caching derived state.

use indexmap::IndexMap;

use super::models::{Alert, Provider, Resource, ResourceStatus, Severity};

/// Number of entries in the top cost drivers list.
pub const TOP_N: usize = 5;

/// Floor for the synthetic per-provider budget.
pub const BUDGET_FLOOR: f64 = 1000.0;

/// Headroom applied to current spend to derive a budget.
pub const BUDGET_HEADROOM: f64 = 1.5;

/// Provider order used by the inventory distribution.
pub const DISTRIBUTION_ORDER: [Provider; 3] = [Provider::Aws, Provider::Azure, Provider::Gcp];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProviderTotals {
    pub count: usize,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderBudget {
    pub provider: Provider,
    pub spend: f64,
    pub budget: f64,
}

impl ProviderBudget {
    /// Spend as a fraction of budget, clamped to `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.budget <= 0.0 {
            return 0.0;
        }
        (self.spend / self.budget).clamp(0.0, 1.0)
    }
}

/// Sum of monthly cost, missing costs counted as zero.
pub fn total_monthly_cost(resources: &[Resource]) -> f64 {
    resources.iter().map(Resource::cost_or_zero).sum()
}

/// Count and cost per provider, keyed in first-seen order. Includes every
/// resource, costed or not.
pub fn group_by_provider(resources: &[Resource]) -> IndexMap<Provider, ProviderTotals> {
    let mut groups: IndexMap<Provider, ProviderTotals> = IndexMap::new();
    for resource in resources {
        let entry = groups.entry(resource.provider.clone()).or_default();
        entry.count += 1;
        entry.cost += resource.cost_or_zero();
    }
    groups
}

/// Cost per provider in first-seen order.
pub fn cost_by_provider(resources: &[Resource]) -> Vec<(Provider, f64)> {
    group_by_provider(resources)
        .into_iter()
        .map(|(provider, totals)| (provider, totals.cost))
        .collect()
}

/// Resource count per provider in first-seen order.
pub fn count_by_provider(resources: &[Resource]) -> Vec<(Provider, usize)> {
    group_by_provider(resources)
        .into_iter()
        .map(|(provider, totals)| (provider, totals.count))
        .collect()
}

/// Resource counts for AWS, Azure and GCP in that order, omitting providers
/// with no resources.
pub fn provider_distribution(resources: &[Resource]) -> Vec<(Provider, usize)> {
    DISTRIBUTION_ORDER
        .iter()
        .map(|provider| {
            let count = resources.iter().filter(|r| &r.provider == provider).count();
            (provider.clone(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// `max(spend * 1.5, 1000)`.
pub fn synthetic_budget(spend: f64) -> f64 {
    (spend * BUDGET_HEADROOM).max(BUDGET_FLOOR)
}

/// Spend against synthetic budget per provider. Only resources with a
/// non-zero cost contribute, so a provider whose resources are all uncosted
/// does not appear.
pub fn provider_budgets(resources: &[Resource]) -> Vec<ProviderBudget> {
    let mut spend: IndexMap<Provider, f64> = IndexMap::new();
    for resource in resources.iter().filter(|r| r.has_cost()) {
        *spend.entry(resource.provider.clone()).or_default() += resource.cost_or_zero();
    }
    spend
        .into_iter()
        .map(|(provider, spend)| ProviderBudget {
            provider,
            spend,
            budget: synthetic_budget(spend),
        })
        .collect()
}

/// Up to [`TOP_N`] resources with a non-zero cost, most expensive first.
/// Ties keep their input order.
pub fn top_cost_drivers(resources: &[Resource]) -> Vec<&Resource> {
    let mut costed: Vec<&Resource> = resources.iter().filter(|r| r.has_cost()).collect();
    costed.sort_by(|a, b| b.cost_or_zero().total_cmp(&a.cost_or_zero()));
    costed.truncate(TOP_N);
    costed
}

/// Most expensive costed resource, if any.
pub fn highest_cost(resources: &[Resource]) -> Option<&Resource> {
    top_cost_drivers(resources).into_iter().next()
}

pub fn active_count(resources: &[Resource]) -> usize {
    resources
        .iter()
        .filter(|r| r.status == ResourceStatus::Running)
        .count()
}

pub fn stopped_count(resources: &[Resource]) -> usize {
    resources
        .iter()
        .filter(|r| r.status == ResourceStatus::Stopped)
        .count()
}

/// Stopped or Unknown.
pub fn idle_count(resources: &[Resource]) -> usize {
    resources.iter().filter(|r| r.status.is_idle()).count()
}

pub fn critical_alert_count(alerts: &[Alert]) -> usize {
    alerts
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count()
}
