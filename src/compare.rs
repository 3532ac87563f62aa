//! Equivalence and timing harness for the two miners.

use crate::cancel::CancelToken;
use crate::config::MiningConfig;
use crate::encode::TransactionDatabase;
use crate::error::MiningError;
use crate::store::{Itemset, SupportTable};
use std::time::{Duration, Instant};

/// Outcome of running both miners on the same database and threshold.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub apriori_elapsed: Duration,
    pub fpgrowth_elapsed: Duration,
    pub itemsets_match: bool,
    /// Itemsets missing from one table or carrying different supports,
    /// in canonical order.
    pub mismatches: Vec<Itemset>,
    pub table: SupportTable,
}

impl ComparisonReport {
    /// A mismatch means the two algorithms disagreed on specified-identical
    /// output: a logic bug, not a recoverable condition.
    pub fn ensure_equivalent(&self) -> Result<(), MiningError> {
        match self.mismatches.first() {
            None => Ok(()),
            Some(first) => Err(MiningError::invariant(
                format!(
                    "apriori and fp-growth disagree on {} itemset(s)",
                    self.mismatches.len()
                ),
                first.items(),
            )),
        }
    }
}

/// Runs both miners, diffs their support tables, and reports elapsed time
/// for each. The returned table is Apriori's (identical to FP-Growth's
/// whenever `itemsets_match` holds).
pub fn run(
    db: &TransactionDatabase,
    config: &MiningConfig,
    cancel: &CancelToken,
) -> Result<ComparisonReport, MiningError> {
    config.validate()?;

    let started = Instant::now();
    let apriori_table = crate::apriori::mine(db, config, cancel)?;
    let apriori_elapsed = started.elapsed();

    let started = Instant::now();
    let fpgrowth_table = crate::fp::mine(db, config, cancel)?;
    let fpgrowth_elapsed = started.elapsed();

    let mut mismatches = apriori_table.diff(&fpgrowth_table);
    mismatches.extend(
        fpgrowth_table
            .diff(&apriori_table)
            .into_iter()
            .filter(|itemset| !apriori_table.contains(itemset)),
    );
    mismatches.sort_by(Itemset::canonical_cmp);

    tracing::debug!(
        apriori_ms = apriori_elapsed.as_millis() as u64,
        fpgrowth_ms = fpgrowth_elapsed.as_millis() as u64,
        itemsets = apriori_table.len(),
        mismatches = mismatches.len(),
        "algorithm comparison finished"
    );

    Ok(ComparisonReport {
        apriori_elapsed,
        fpgrowth_elapsed,
        itemsets_match: mismatches.is_empty(),
        mismatches,
        table: apriori_table,
    })
}
