//! The reward rule engine.
//!
//! One generic evaluator interprets the role-keyed rule catalog against a
//! performance metrics bundle. The engine is pure and side-effect-free:
//! same catalog, role, bundle and supplemental salary always produce the
//! same result, and nothing is persisted here.

use rust_decimal::Decimal;

use crate::config::{RewardRule, RuleCatalog};
use crate::models::{BonusCalculationResult, BonusLineItem, Period};

use super::metrics::PerformanceMetricsBundle;

/// Evaluates reward rules for a role against a metrics bundle.
///
/// # Example
///
/// ```no_run
/// use kpi_engine::config::ConfigLoader;
/// use kpi_engine::models::Period;
/// use kpi_engine::reward::{PerformanceMetricsBundle, RewardRuleEngine};
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/kpi").unwrap();
/// let engine = RewardRuleEngine::new(config.catalog().clone());
///
/// let mut bundle = PerformanceMetricsBundle::new();
/// bundle.insert("systemUptime", Decimal::new(996, 1));
/// bundle.insert("backupCompleted", true);
///
/// let result = engine.compute(
///     "IT_STAFF",
///     "Q3-2026".parse::<Period>().unwrap(),
///     &bundle,
///     None,
/// );
/// assert_eq!(result.quarterly_total, Decimal::from(3_000_000));
/// ```
#[derive(Debug, Clone)]
pub struct RewardRuleEngine {
    catalog: RuleCatalog,
}

impl RewardRuleEngine {
    /// Creates an engine over a rule catalog.
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the underlying rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Computes the bonus/penalty result for a role and metrics bundle.
    ///
    /// Unknown role codes fall back to the catalog's default rule set, so
    /// this never fails. Net = quarterly total + annual total - penalty
    /// total + supplemental salary (zero when omitted).
    pub fn compute(
        &self,
        role_code: &str,
        period: Period,
        bundle: &PerformanceMetricsBundle,
        supplemental_salary: Option<Decimal>,
    ) -> BonusCalculationResult {
        let rules = self.catalog.rules_for(role_code);

        let quarterly = evaluate_rules(&rules.quarterly, bundle);
        let annual = evaluate_rules(&rules.annual, bundle);
        let penalties = evaluate_rules(&rules.penalties, bundle);

        let quarterly_total = breakdown_total(&quarterly);
        let annual_total = breakdown_total(&annual);
        let penalty_total = breakdown_total(&penalties);
        let supplemental_salary = supplemental_salary.unwrap_or(Decimal::ZERO);
        let net_amount = quarterly_total + annual_total - penalty_total + supplemental_salary;

        BonusCalculationResult {
            role_code: role_code.to_string(),
            period,
            quarterly,
            annual,
            penalties,
            quarterly_total,
            annual_total,
            penalty_total,
            supplemental_salary,
            net_amount,
        }
    }
}

/// Evaluates one rule list in order, collecting line items for the rules
/// that fired. Rules over missing bundle fields do not fire.
fn evaluate_rules(rules: &[RewardRule], bundle: &PerformanceMetricsBundle) -> Vec<BonusLineItem> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = bundle.get(&rule.metric)?;
            if !rule.comparator.holds(value, rule.threshold) {
                return None;
            }
            Some(BonusLineItem {
                id: rule.id.clone(),
                name: rule.name.clone(),
                amount: rule.amount,
                achieved: true,
                reason: rule
                    .reason
                    .replace("{value}", &value.to_string())
                    .replace("{threshold}", &rule.threshold.to_string()),
            })
        })
        .collect()
}

fn breakdown_total(items: &[BonusLineItem]) -> Decimal {
    items.iter().map(|item| item.amount).sum()
}
