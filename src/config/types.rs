//! Configuration types for the reward rule catalog.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the engine's YAML configuration files. The rule
//! catalog is the data half of the reward engine: role codes map to
//! ordered lists of declarative rules interpreted by one generic
//! evaluator, replacing branch-per-role code.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::reward::MetricValue;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The catalog name (e.g., "clinic-performance").
    pub name: String,
    /// The catalog version or effective date.
    pub version: String,
    /// The currency label for all amounts (e.g., "IDR").
    pub currency: String,
}

/// A comparison operator applied between a bundle field and a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Comparator {
    /// The field is greater than or equal to the threshold.
    #[serde(rename = ">=")]
    GreaterOrEqual,
    /// The field is less than or equal to the threshold.
    #[serde(rename = "<=")]
    LessOrEqual,
    /// The field equals the threshold.
    #[serde(rename = "==")]
    Equal,
    /// The field is strictly greater than the threshold.
    #[serde(rename = ">")]
    Greater,
    /// The field is strictly less than the threshold.
    #[serde(rename = "<")]
    Less,
}

impl Comparator {
    /// Evaluates the comparison between a measured value and a threshold.
    ///
    /// Numbers compare numerically; flags only support equality. A type
    /// mismatch between value and threshold never holds.
    pub fn holds(self, value: MetricValue, threshold: MetricValue) -> bool {
        match (value, threshold) {
            (MetricValue::Number(value), MetricValue::Number(threshold)) => match self {
                Self::GreaterOrEqual => value >= threshold,
                Self::LessOrEqual => value <= threshold,
                Self::Equal => value == threshold,
                Self::Greater => value > threshold,
                Self::Less => value < threshold,
            },
            (MetricValue::Flag(value), MetricValue::Flag(threshold)) => {
                self == Self::Equal && value == threshold
            }
            _ => false,
        }
    }
}

/// One declarative predicate-to-line-item rule.
///
/// A rule fires when `comparator` holds between the bundle field named by
/// `metric` and `threshold`; firing contributes a line item of `amount`
/// with the rendered `reason`. Rules are independent of each other.
#[derive(Debug, Clone, Deserialize)]
pub struct RewardRule {
    /// Identifier for the rule (becomes the line item id).
    pub id: String,
    /// Human-readable name (becomes the line item name).
    pub name: String,
    /// The bundle field the rule reads.
    pub metric: String,
    /// The comparison to apply.
    pub comparator: Comparator,
    /// The threshold to compare against (number or flag).
    pub threshold: MetricValue,
    /// The monetary amount the rule contributes when it fires.
    pub amount: Decimal,
    /// Reason template; `{value}` and `{threshold}` placeholders are
    /// substituted at evaluation time.
    pub reason: String,
}

/// The ordered rule lists for one role: quarterly bonuses, annual bonuses
/// and penalties.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleRuleSet {
    /// Rules contributing to the quarterly bonus breakdown.
    #[serde(default)]
    pub quarterly: Vec<RewardRule>,
    /// Rules contributing to the annual bonus breakdown.
    #[serde(default)]
    pub annual: Vec<RewardRule>,
    /// Rules contributing to the penalties breakdown.
    #[serde(default)]
    pub penalties: Vec<RewardRule>,
}

impl RoleRuleSet {
    /// Iterates over every rule in the set, across all three buckets.
    pub fn all_rules(&self) -> impl Iterator<Item = &RewardRule> {
        self.quarterly
            .iter()
            .chain(&self.annual)
            .chain(&self.penalties)
    }
}

/// The role-keyed table of rule sets, with a default set for any role code
/// not present in the table.
///
/// The default set guarantees the engine never fails outright on an
/// unrecognized role; it simply yields fewer or generic line items.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleCatalog {
    /// The fallback rule set for unknown role codes.
    pub default: RoleRuleSet,
    /// Rule sets keyed by role code.
    #[serde(default)]
    pub roles: HashMap<String, RoleRuleSet>,
}

impl RuleCatalog {
    /// Returns the rule set for a role code, falling back to the default
    /// set for unknown roles.
    pub fn rules_for(&self, role_code: &str) -> &RoleRuleSet {
        self.roles.get(role_code).unwrap_or(&self.default)
    }

    /// Returns true if the role code has a dedicated rule set.
    pub fn has_role(&self, role_code: &str) -> bool {
        self.roles.contains_key(role_code)
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    catalog: RuleCatalog,
}

impl EngineConfig {
    /// Creates a new engine configuration.
    pub fn new(metadata: EngineMetadata, catalog: RuleCatalog) -> Self {
        Self { metadata, catalog }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: i64) -> MetricValue {
        MetricValue::Number(Decimal::from(value))
    }

    #[test]
    fn test_numeric_comparators() {
        assert!(Comparator::GreaterOrEqual.holds(number(5), number(5)));
        assert!(Comparator::GreaterOrEqual.holds(number(6), number(5)));
        assert!(!Comparator::GreaterOrEqual.holds(number(4), number(5)));

        assert!(Comparator::LessOrEqual.holds(number(5), number(5)));
        assert!(!Comparator::LessOrEqual.holds(number(6), number(5)));

        assert!(Comparator::Equal.holds(number(5), number(5)));
        assert!(!Comparator::Equal.holds(number(4), number(5)));

        assert!(Comparator::Greater.holds(number(6), number(5)));
        assert!(!Comparator::Greater.holds(number(5), number(5)));

        assert!(Comparator::Less.holds(number(4), number(5)));
        assert!(!Comparator::Less.holds(number(5), number(5)));
    }

    #[test]
    fn test_flag_comparisons_only_support_equality() {
        let yes = MetricValue::Flag(true);
        let no = MetricValue::Flag(false);

        assert!(Comparator::Equal.holds(yes, yes));
        assert!(Comparator::Equal.holds(no, no));
        assert!(!Comparator::Equal.holds(yes, no));
        assert!(!Comparator::GreaterOrEqual.holds(yes, yes));
        assert!(!Comparator::Less.holds(no, yes));
    }

    #[test]
    fn test_type_mismatch_never_holds() {
        assert!(!Comparator::Equal.holds(number(1), MetricValue::Flag(true)));
        assert!(!Comparator::GreaterOrEqual.holds(MetricValue::Flag(true), number(0)));
    }

    #[test]
    fn test_comparator_deserializes_from_symbols() {
        let comparator: Comparator = serde_yaml::from_str("\">=\"").unwrap();
        assert_eq!(comparator, Comparator::GreaterOrEqual);
        let comparator: Comparator = serde_yaml::from_str("\"==\"").unwrap();
        assert_eq!(comparator, Comparator::Equal);
    }

    #[test]
    fn test_catalog_falls_back_to_default() {
        let catalog: RuleCatalog = serde_yaml::from_str(
            r#"
default:
  quarterly:
    - id: generic_goal
      name: Generic goal attainment
      metric: kpiScore
      comparator: ">="
      threshold: 85
      amount: 750000
      reason: "KPI score {value} reached the {threshold} floor"
roles:
  IT_STAFF:
    quarterly:
      - id: system_uptime
        name: System uptime
        metric: systemUptime
        comparator: ">="
        threshold: 99.5
        amount: 2000000
        reason: "System uptime {value}% met the {threshold}% floor"
"#,
        )
        .unwrap();

        assert!(catalog.has_role("IT_STAFF"));
        assert!(!catalog.has_role("UNKNOWN_ROLE"));
        assert_eq!(catalog.rules_for("IT_STAFF").quarterly[0].id, "system_uptime");
        assert_eq!(
            catalog.rules_for("UNKNOWN_ROLE").quarterly[0].id,
            "generic_goal"
        );
    }

    #[test]
    fn test_rule_set_all_rules_spans_buckets() {
        let set: RoleRuleSet = serde_yaml::from_str(
            r#"
quarterly:
  - { id: a, name: A, metric: x, comparator: ">=", threshold: 1, amount: 10, reason: r }
annual:
  - { id: b, name: B, metric: y, comparator: "<", threshold: 2, amount: 20, reason: r }
penalties:
  - { id: c, name: C, metric: z, comparator: "==", threshold: true, amount: 30, reason: r }
"#,
        )
        .unwrap();

        let ids: Vec<&str> = set.all_rules().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
