//! Recursive conditional-pattern mining over the FP-tree.

use super::builder::{build_conditional_tree, build_tree};
use super::combinations::enumerate_path_subsets;
use super::tree::FpTree;
use crate::cancel::CancelToken;
use crate::config::MiningConfig;
use crate::encode::TransactionDatabase;
use crate::error::MiningError;
use crate::store::{Item, Itemset, SupportTable};
use rayon::prelude::*;

/// Mines frequent itemsets by FP-growth. Produces the same table content as
/// [`crate::apriori::mine`] for identical inputs.
pub fn mine(
    db: &TransactionDatabase,
    config: &MiningConfig,
    cancel: &CancelToken,
) -> Result<SupportTable, MiningError> {
    config.validate()?;

    let min_count = config.min_count(db.len());
    let max_size = config.max_itemset_size.unwrap_or(usize::MAX);

    let (tree, order) = build_tree(db, min_count);
    let patterns = fp_growth(&tree, &order, &[], min_count, max_size, cancel)?;

    // Single-writer merge: branch results are only combined here, after
    // every worker has completed.
    let mut table = SupportTable::new(db.len());
    for (itemset, count) in patterns {
        table.insert(itemset, count);
    }
    Ok(table)
}

/// One recursion step. Header items are processed from least to most
/// frequent; each branch emits `suffix ∪ {item}`, collects the item's
/// conditional pattern base, and recurses into the conditional tree.
/// Branches for distinct items are independent and run in parallel, each
/// building and discarding its own conditional tree.
fn fp_growth(
    tree: &FpTree,
    order: &[Item],
    suffix: &[Item],
    min_count: u64,
    max_size: usize,
    cancel: &CancelToken,
) -> Result<Vec<(Itemset, u64)>, MiningError> {
    cancel.check()?;

    if suffix.len() >= max_size {
        return Ok(Vec::new());
    }

    if tree.is_single_path() {
        let path = tree.single_path();
        let mut out = Vec::new();
        enumerate_path_subsets(&path, suffix, max_size - suffix.len(), &mut out);
        return Ok(out);
    }

    let branches: Result<Vec<Vec<(Itemset, u64)>>, MiningError> = order
        .par_iter()
        .rev()
        .map(|&item| {
            let total = tree.item_count(item);
            if total < min_count {
                // No qualifying conditional occurrences: no branch.
                return Ok(Vec::new());
            }

            let mut pattern = suffix.to_vec();
            pattern.push(item);

            let mut out = vec![(Itemset::new(pattern.clone()), total)];

            if pattern.len() < max_size {
                let prefix_paths = tree.prefix_paths(item);
                if !prefix_paths.is_empty() {
                    let (conditional, conditional_order) =
                        build_conditional_tree(&prefix_paths, min_count);

                    if !conditional_order.is_empty() {
                        out.extend(fp_growth(
                            &conditional,
                            &conditional_order,
                            &pattern,
                            min_count,
                            max_size,
                            cancel,
                        )?);
                    }
                }
            }

            Ok(out)
        })
        .collect();

    let mut merged = Vec::new();
    for branch in branches? {
        merged.extend(branch);
    }
    Ok(merged)
}
