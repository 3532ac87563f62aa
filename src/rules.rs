//! Association rule generation over a mined support table.

use crate::config::validate_fraction;
use crate::error::MiningError;
use crate::metrics;
use crate::store::{generate_candidates, Itemset, SupportTable};

/// A mined rule with its derived metrics. Antecedent and consequent are
/// disjoint and their union is the frequent itemset the rule came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

/// Enumerates rules from every frequent itemset of size >= 2.
///
/// Candidate consequents start at size 1 and are merged upward only while
/// confidence holds: shrinking an antecedent can only lower confidence, so a
/// failing consequent is never extended (monotonic pruning).
pub struct RuleGenerator<'a> {
    table: &'a SupportTable,
    min_confidence: f64,
    min_lift: Option<f64>,
}

impl<'a> RuleGenerator<'a> {
    pub fn new(table: &'a SupportTable, min_confidence: f64) -> Self {
        Self {
            table,
            min_confidence,
            min_lift: None,
        }
    }

    /// Additionally drop rules below a lift threshold. Lift filtering does
    /// not participate in pruning; it is applied per rule.
    #[must_use]
    pub fn with_min_lift(mut self, min_lift: f64) -> Self {
        self.min_lift = Some(min_lift);
        self
    }

    /// Rules are produced in no guaranteed order; callers sort by the metric
    /// they care about (see [`sort_rules`]).
    pub fn generate(&self) -> Result<Vec<Rule>, MiningError> {
        validate_fraction("min_confidence", self.min_confidence)?;

        let mut rules = Vec::new();
        for (itemset, count) in self.table.iter() {
            if itemset.len() >= 2 {
                self.rules_for_itemset(itemset, count, &mut rules)?;
            }
        }
        Ok(rules)
    }

    fn rules_for_itemset(
        &self,
        itemset: &Itemset,
        count: u64,
        rules: &mut Vec<Rule>,
    ) -> Result<(), MiningError> {
        let mut consequents: Vec<Itemset> = itemset
            .items()
            .iter()
            .map(|&item| Itemset::single(item))
            .collect();

        let mut size = 1;
        while !consequents.is_empty() && size < itemset.len() {
            let mut surviving = Vec::new();

            for consequent in consequents {
                let antecedent = Itemset::new(itemset.difference(&consequent));
                let rule = self.build_rule(itemset, count, antecedent, consequent)?;

                if rule.confidence >= self.min_confidence {
                    let passes_lift = self.min_lift.map_or(true, |min| rule.lift >= min);
                    surviving.push(rule.consequent.clone());
                    if passes_lift {
                        rules.push(rule);
                    }
                }
            }

            size += 1;
            consequents = if size < itemset.len() {
                generate_candidates(&surviving)
            } else {
                Vec::new()
            };
        }

        Ok(())
    }

    fn build_rule(
        &self,
        itemset: &Itemset,
        count: u64,
        antecedent: Itemset,
        consequent: Itemset,
    ) -> Result<Rule, MiningError> {
        // Both sides are subsets of a frequent itemset, so downward closure
        // guarantees their presence; absence is a logic bug upstream.
        let antecedent_support = self.lookup(&antecedent)?;
        let consequent_support = self.lookup(&consequent)?;
        let support = count as f64 / self.table.num_transactions() as f64;

        let confidence = metrics::confidence(support, antecedent_support);
        debug_assert!(antecedent.is_disjoint(&consequent));
        debug_assert_eq!(antecedent.union(&consequent), *itemset);

        Ok(Rule {
            antecedent,
            consequent,
            support,
            confidence,
            lift: metrics::lift(confidence, consequent_support),
            leverage: metrics::leverage(support, antecedent_support, consequent_support),
            conviction: metrics::conviction(consequent_support, confidence),
        })
    }

    fn lookup(&self, itemset: &Itemset) -> Result<f64, MiningError> {
        self.table.support(itemset).ok_or_else(|| {
            MiningError::invariant(
                "subset of a frequent itemset missing from the support table",
                itemset.items(),
            )
        })
    }
}

/// Orders rules by confidence, then lift, descending. Metric values produced
/// by the generator are never NaN (supports are positive fractions).
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.lift.total_cmp(&a.lift))
            .then_with(|| a.antecedent.canonical_cmp(&b.antecedent))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&[u32], u64)], num_transactions: usize) -> SupportTable {
        let mut table = SupportTable::new(num_transactions);
        for &(items, count) in entries {
            table.insert(Itemset::from(items), count);
        }
        table
    }

    fn grocery_table() -> SupportTable {
        // milk=0, bread=1, butter=2 over 4 transactions
        table(
            &[
                (&[0], 3),
                (&[1], 4),
                (&[2], 2),
                (&[0, 1], 3),
                (&[1, 2], 2),
            ],
            4,
        )
    }

    #[test]
    fn milk_implies_bread_with_full_confidence() {
        let table = grocery_table();
        let rules = RuleGenerator::new(&table, 0.8).generate().unwrap();

        let rule = rules
            .iter()
            .find(|r| r.antecedent.items() == [0] && r.consequent.items() == [1])
            .expect("{milk} => {bread} should be retained");

        assert!((rule.confidence - 1.0).abs() < 1e-12);
        assert!((rule.lift - 1.0).abs() < 1e-12);
        assert!((rule.support - 0.75).abs() < 1e-12);
        assert_eq!(rule.conviction, f64::INFINITY);
    }

    #[test]
    fn partition_law_holds_for_every_rule() {
        let table = grocery_table();
        let rules = RuleGenerator::new(&table, 0.1).generate().unwrap();
        assert!(!rules.is_empty());

        for rule in &rules {
            assert!(rule.antecedent.is_disjoint(&rule.consequent));
            let union = rule.antecedent.union(&rule.consequent);
            assert_eq!(table.support(&union), Some(rule.support));
        }
    }

    #[test]
    fn no_rules_from_single_item_table() {
        let table = table(&[(&[0], 9), (&[1], 9)], 10);
        let rules = RuleGenerator::new(&table, 0.5).generate().unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn confidence_threshold_filters() {
        let table = grocery_table();
        // {bread} => {butter}: 2/4 over 4/4 = 0.5
        let strict = RuleGenerator::new(&table, 0.6).generate().unwrap();
        assert!(!strict
            .iter()
            .any(|r| r.antecedent.items() == [1] && r.consequent.items() == [2]));

        let lax = RuleGenerator::new(&table, 0.5).generate().unwrap();
        assert!(lax
            .iter()
            .any(|r| r.antecedent.items() == [1] && r.consequent.items() == [2]));
    }

    #[test]
    fn min_lift_filters_without_pruning() {
        let table = grocery_table();
        let rules = RuleGenerator::new(&table, 0.1)
            .with_min_lift(1.1)
            .generate()
            .unwrap();

        assert!(rules.iter().all(|r| r.lift >= 1.1));
    }

    #[test]
    fn consequents_merge_upward_through_larger_itemsets() {
        // {0,1,2} in 3 of 4 rows; all subsets at 3 or 4.
        let table = table(
            &[
                (&[0], 3),
                (&[1], 4),
                (&[2], 3),
                (&[0, 1], 3),
                (&[0, 2], 3),
                (&[1, 2], 3),
                (&[0, 1, 2], 3),
            ],
            4,
        );

        let rules = RuleGenerator::new(&table, 0.7).generate().unwrap();
        // {0} => {1,2} requires merging the surviving size-1 consequents.
        assert!(rules
            .iter()
            .any(|r| r.antecedent.items() == [0] && r.consequent.items() == [1, 2]));
    }

    #[test]
    fn missing_subset_is_an_invariant_violation() {
        // {0,1} frequent but {1} absent: broken downward closure.
        let table = table(&[(&[0], 3), (&[0, 1], 2)], 4);
        let result = RuleGenerator::new(&table, 0.1).generate();
        assert!(matches!(
            result,
            Err(MiningError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn invalid_confidence_is_a_config_error() {
        let table = grocery_table();
        assert!(matches!(
            RuleGenerator::new(&table, 0.0).generate(),
            Err(MiningError::Config { param: "min_confidence", .. })
        ));
    }

    #[test]
    fn sorting_is_confidence_then_lift() {
        let table = grocery_table();
        let mut rules = RuleGenerator::new(&table, 0.1).generate().unwrap();
        sort_rules(&mut rules);

        for pair in rules.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
            if (pair[0].confidence - pair[1].confidence).abs() < f64::EPSILON {
                assert!(pair[0].lift >= pair[1].lift);
            }
        }
    }
}
