use super::tree::FpTree;
use crate::encode::TransactionDatabase;
use crate::store::Item;
use std::collections::HashMap;

/// Two-pass construction. The first pass counts global item frequencies and
/// fixes the header order: descending count, ties broken by ascending item
/// id so runs are reproducible. The second pass inserts each transaction's
/// surviving items in header order.
///
/// Returns the tree together with the header order.
pub(crate) fn build_tree(db: &TransactionDatabase, min_count: u64) -> (FpTree, Vec<Item>) {
    let mut counts: HashMap<Item, u64> = HashMap::new();
    for transaction in db.transactions() {
        for &item in transaction {
            *counts.entry(item).or_insert(0) += 1;
        }
    }

    let order = header_order(&counts, min_count);
    let ranks: HashMap<Item, usize> = order
        .iter()
        .enumerate()
        .map(|(rank, &item)| (item, rank))
        .collect();

    let mut tree = FpTree::new();
    for transaction in db.transactions() {
        let mut surviving: Vec<(usize, Item)> = transaction
            .iter()
            .filter_map(|&item| ranks.get(&item).map(|&rank| (rank, item)))
            .collect();

        if surviving.is_empty() {
            continue;
        }

        surviving.sort_unstable();
        let path: Vec<Item> = surviving.into_iter().map(|(_, item)| item).collect();
        tree.insert_path(&path, 1);
    }

    tracing::debug!(
        nodes = tree.nodes.len(),
        header_items = order.len(),
        "built fp-tree"
    );

    (tree, order)
}

/// Builds the conditional tree for one item from its weighted prefix paths,
/// re-applying the support threshold locally. Paths keep their original
/// order, which is already consistent with the parent tree's header order.
pub(crate) fn build_conditional_tree(
    prefix_paths: &[(Vec<Item>, u64)],
    min_count: u64,
) -> (FpTree, Vec<Item>) {
    let mut counts: HashMap<Item, u64> = HashMap::new();
    for (path, count) in prefix_paths {
        for &item in path {
            *counts.entry(item).or_insert(0) += count;
        }
    }

    let order = header_order(&counts, min_count);

    let mut tree = FpTree::new();
    for (path, count) in prefix_paths {
        let filtered: Vec<Item> = path
            .iter()
            .copied()
            .filter(|item| counts.get(item).is_some_and(|&c| c >= min_count))
            .collect();

        if !filtered.is_empty() {
            tree.insert_path(&filtered, *count);
        }
    }

    (tree, order)
}

fn header_order(counts: &HashMap<Item, u64>, min_count: u64) -> Vec<Item> {
    let mut frequent: Vec<(Item, u64)> = counts
        .iter()
        .filter(|&(_, &count)| count >= min_count)
        .map(|(&item, &count)| (item, count))
        .collect();

    frequent.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequent.into_iter().map(|(item, _)| item).collect()
}
