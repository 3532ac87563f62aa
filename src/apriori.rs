//! Level-wise frequent itemset mining (Apriori).

use crate::cancel::CancelToken;
use crate::config::MiningConfig;
use crate::encode::TransactionDatabase;
use crate::error::MiningError;
use crate::store::{generate_candidates, Item, Itemset, SupportTable};
use rayon::prelude::*;
use std::collections::HashMap;

const COUNT_CHUNK: usize = 1024;

/// Mines frequent itemsets level by level: join frequent (k-1)-itemsets on a
/// shared (k-2)-prefix, prune candidates with an infrequent subset, count
/// the survivors in one database scan, and keep those at or above the
/// support threshold.
pub fn mine(
    db: &TransactionDatabase,
    config: &MiningConfig,
    cancel: &CancelToken,
) -> Result<SupportTable, MiningError> {
    config.validate()?;

    let min_count = config.min_count(db.len());
    let mut table = SupportTable::new(db.len());

    let singles = frequent_single_items(db, min_count);
    let mut level: Vec<Itemset> = singles
        .into_iter()
        .map(|(itemset, count)| {
            table.insert(itemset.clone(), count);
            itemset
        })
        .collect();

    let mut size = 2usize;
    while !level.is_empty() {
        if let Some(cap) = config.max_itemset_size {
            if size > cap {
                break;
            }
        }
        cancel.check()?;

        let candidates = generate_candidates(&level);
        tracing::debug!(size, candidates = candidates.len(), "apriori level");
        if candidates.is_empty() {
            break;
        }

        let counts = count_candidates(db, &candidates);

        let mut next = Vec::new();
        for (itemset, count) in candidates.into_iter().zip(counts) {
            if count >= min_count {
                table.insert(itemset.clone(), count);
                next.push(itemset);
            }
        }

        tracing::debug!(size, frequent = next.len(), "apriori level complete");
        level = next;
        size += 1;
    }

    Ok(table)
}

/// Single scan over the database; candidate order is fixed by canonical item
/// order so output is reproducible across runs.
fn frequent_single_items(db: &TransactionDatabase, min_count: u64) -> Vec<(Itemset, u64)> {
    let mut counts: HashMap<Item, u64> = HashMap::new();
    for transaction in db.transactions() {
        for &item in transaction {
            *counts.entry(item).or_insert(0) += 1;
        }
    }

    let mut frequent: Vec<(Itemset, u64)> = counts
        .into_iter()
        .filter(|&(_, count)| count >= min_count)
        .map(|(item, count)| (Itemset::single(item), count))
        .collect();
    frequent.sort_by(|(a, _), (b, _)| a.canonical_cmp(b));
    frequent
}

/// Counts each candidate's occurrences with one scan, partitioning the
/// database across rayon workers. Each worker produces partial counts that
/// are merged by integer addition before the threshold is applied.
fn count_candidates(db: &TransactionDatabase, candidates: &[Itemset]) -> Vec<u64> {
    db.transactions()
        .par_chunks(COUNT_CHUNK)
        .map(|chunk| {
            let mut partial = vec![0u64; candidates.len()];
            for transaction in chunk {
                for (slot, candidate) in partial.iter_mut().zip(candidates) {
                    if candidate.is_subset_of(transaction) {
                        *slot += 1;
                    }
                }
            }
            partial
        })
        .reduce(
            || vec![0u64; candidates.len()],
            |mut acc, partial| {
                for (total, add) in acc.iter_mut().zip(partial) {
                    *total += add;
                }
                acc
            },
        )
}
