//! Frequent itemset mining and association rule generation.
//!
//! Two interchangeable miners over a transaction database — level-wise
//! Apriori and FP-Growth over a compressed prefix tree — feed a
//! metrics-driven rule generator. Both miners are specified to produce
//! identical support tables for identical inputs; [`compare`] verifies it.
//!
//! # Example
//!
//! ```
//! use basketmine::{generate_rules, mine, Algorithm};
//!
//! let transactions = vec![
//!     vec!["milk", "bread"],
//!     vec!["milk", "bread", "butter"],
//!     vec!["milk", "bread", "eggs"],
//!     vec!["bread", "butter"],
//! ];
//!
//! let frequent = mine(&transactions, 0.5, Algorithm::FpGrowth).unwrap();
//! assert_eq!(frequent.support_of(&["milk", "bread"]), Some(0.75));
//!
//! let rules = generate_rules(&frequent, 0.8).unwrap();
//! let rule = rules
//!     .iter()
//!     .find(|r| r.antecedent == ["milk"] && r.consequent == ["bread"])
//!     .unwrap();
//! assert_eq!(rule.confidence, 1.0);
//! assert_eq!(rule.lift, 1.0);
//! ```

pub mod apriori;
mod cancel;
pub mod compare;
mod config;
pub mod encode;
mod error;
pub mod fp;
pub mod metrics;
pub mod rules;
pub mod store;


pub use cancel::CancelToken;
pub use compare::ComparisonReport;
pub use config::{Algorithm, MiningConfig};
pub use encode::{TransactionDatabase, TransactionEncoder};
pub use error::MiningError;
pub use rules::{sort_rules, Rule, RuleGenerator};
pub use store::{Item, Itemset, SupportTable};

use serde::{Deserialize, Serialize};

/// Frequent itemsets with their supports, plus the label mapping they were
/// mined under.
#[derive(Debug, Clone)]
pub struct FrequentItemsets {
    table: SupportTable,
    encoder: TransactionEncoder,
}

impl FrequentItemsets {
    pub fn table(&self) -> &SupportTable {
        &self.table
    }

    pub fn encoder(&self) -> &TransactionEncoder {
        &self.encoder
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Fractional support of a labeled itemset, if frequent.
    pub fn support_of(&self, labels: &[&str]) -> Option<f64> {
        if labels.is_empty() {
            return None;
        }
        let items: Option<Vec<Item>> = labels.iter().map(|label| self.encoder.item(label)).collect();
        self.table.support(&Itemset::new(items?))
    }

    /// Entries in canonical order with decoded labels.
    pub fn labeled_entries(&self) -> Vec<(Vec<String>, u64, f64)> {
        let n = self.table.num_transactions() as f64;
        self.table
            .sorted_entries()
            .into_iter()
            .map(|(itemset, count)| (self.encoder.labels(itemset), count, count as f64 / n))
            .collect()
    }
}

/// An association rule with decoded labels and all four derived metrics.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

/// Mines frequent itemsets from labeled transactions.
///
/// `min_support` must lie in (0, 1]. See [`mine_with`] for the full
/// configuration surface.
pub fn mine<S: AsRef<str>>(
    transactions: &[Vec<S>],
    min_support: f64,
    algorithm: Algorithm,
) -> Result<FrequentItemsets, MiningError> {
    mine_with(
        transactions,
        &MiningConfig::new(min_support, algorithm),
        &CancelToken::new(),
    )
}

/// [`mine`] with an explicit configuration and cancellation token.
pub fn mine_with<S: AsRef<str>>(
    transactions: &[Vec<S>],
    config: &MiningConfig,
    cancel: &CancelToken,
) -> Result<FrequentItemsets, MiningError> {
    config.validate()?;
    let (encoder, db) = TransactionEncoder::encode(transactions)?;

    let table = match config.algorithm {
        Algorithm::Apriori => apriori::mine(&db, config, cancel)?,
        Algorithm::FpGrowth => fp::mine(&db, config, cancel)?,
    };

    Ok(FrequentItemsets { table, encoder })
}

/// Generates association rules with labeled antecedents and consequents.
///
/// `min_confidence` must lie in (0, 1]. An empty result is a valid outcome,
/// not an error. Rules come back unsorted; see [`sort_rules`] for the
/// confidence-then-lift ordering, applied here before decoding.
pub fn generate_rules(
    frequent: &FrequentItemsets,
    min_confidence: f64,
) -> Result<Vec<AssociationRule>, MiningError> {
    let mut raw = RuleGenerator::new(frequent.table(), min_confidence).generate()?;
    sort_rules(&mut raw);

    Ok(raw
        .into_iter()
        .map(|rule| AssociationRule {
            antecedent: frequent.encoder.labels(&rule.antecedent),
            consequent: frequent.encoder.labels(&rule.consequent),
            support: rule.support,
            confidence: rule.confidence,
            lift: rule.lift,
            leverage: rule.leverage,
            conviction: rule.conviction,
        })
        .collect())
}

/// Runs both miners on the same input and reports timings and any
/// disagreement between their support tables.
pub fn compare_algorithms<S: AsRef<str>>(
    transactions: &[Vec<S>],
    min_support: f64,
) -> Result<ComparisonReport, MiningError> {
    let config = MiningConfig::new(min_support, Algorithm::Apriori);
    config.validate()?;
    let (_, db) = TransactionEncoder::encode(transactions)?;
    compare::run(&db, &config, &CancelToken::new())
}
