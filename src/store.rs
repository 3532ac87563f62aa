//! Canonical itemsets and the support table produced by a mining run.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Interned item identifier. The [`crate::encode::TransactionEncoder`] maps
/// labels to items in first-seen order.
pub type Item = u32;

/// An immutable set of items in canonical sorted order.
///
/// Equal sets hash and compare identically regardless of insertion order,
/// and never contain duplicates. Deserialization routes through
/// [`Itemset::new`], so decoded item lists are canonicalized too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Item>")]
pub struct Itemset(Vec<Item>);

impl Itemset {
    /// Canonicalizes on construction: sorts and deduplicates.
    pub fn new(mut items: Vec<Item>) -> Self {
        items.sort_unstable();
        items.dedup();
        debug_assert!(!items.is_empty(), "itemsets have size >= 1");
        Self(items)
    }

    pub fn single(item: Item) -> Self {
        Self(vec![item])
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// Two-pointer subset test against a sorted transaction.
    pub fn is_subset_of(&self, sorted_items: &[Item]) -> bool {
        let mut pos = 0;
        for &item in &self.0 {
            match sorted_items[pos..].binary_search(&item) {
                Ok(offset) => pos += offset + 1,
                Err(_) => return false,
            }
        }
        true
    }

    /// Items of `self` not in `other`. May be empty when `other` covers
    /// `self`; callers guard against constructing empty itemsets.
    pub fn difference(&self, other: &Itemset) -> Vec<Item> {
        self.0
            .iter()
            .copied()
            .filter(|&item| !other.contains(item))
            .collect()
    }

    pub fn is_disjoint(&self, other: &Itemset) -> bool {
        self.0.iter().all(|&item| !other.contains(item))
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        let mut items = self.0.clone();
        items.extend_from_slice(&other.0);
        Itemset::new(items)
    }

    /// Canonical ordering: by size, then lexicographically by item ids.
    /// Used wherever a deterministic itemset order is required.
    pub fn canonical_cmp(&self, other: &Itemset) -> Ordering {
        self.len().cmp(&other.len()).then_with(|| self.0.cmp(&other.0))
    }
}

impl From<&[Item]> for Itemset {
    fn from(items: &[Item]) -> Self {
        Itemset::new(items.to_vec())
    }
}

impl From<Vec<Item>> for Itemset {
    fn from(items: Vec<Item>) -> Self {
        Itemset::new(items)
    }
}

/// Frequent itemsets with their absolute counts, owned by one mining run.
///
/// Entries become immutable once mining completes; both miners produce the
/// same table content for the same input and threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportTable {
    counts: HashMap<Itemset, u64>,
    num_transactions: usize,
}

impl SupportTable {
    pub(crate) fn new(num_transactions: usize) -> Self {
        Self {
            counts: HashMap::new(),
            num_transactions,
        }
    }

    pub(crate) fn insert(&mut self, itemset: Itemset, count: u64) {
        debug_assert!(count as usize <= self.num_transactions);
        self.counts.insert(itemset, count);
    }

    /// Absolute number of transactions containing `itemset`, if frequent.
    pub fn count(&self, itemset: &Itemset) -> Option<u64> {
        self.counts.get(itemset).copied()
    }

    /// Fractional support in [0, 1], if frequent.
    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        self.count(itemset)
            .map(|count| count as f64 / self.num_transactions as f64)
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.counts.contains_key(itemset)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, u64)> {
        self.counts.iter().map(|(itemset, &count)| (itemset, count))
    }

    /// Entries in canonical order (size, then item ids). Equal-support ties
    /// resolve by the same order, so repeated runs list itemsets
    /// identically.
    pub fn sorted_entries(&self) -> Vec<(&Itemset, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.canonical_cmp(b));
        entries
    }

    /// Itemsets present in `self` but absent from `other`, or present in
    /// both with different counts.
    pub(crate) fn diff(&self, other: &SupportTable) -> Vec<Itemset> {
        self.iter()
            .filter(|(itemset, count)| other.count(itemset) != Some(*count))
            .map(|(itemset, _)| itemset.clone())
            .collect()
    }
}

/// Joins frequent k-itemsets sharing a (k-1)-length common prefix into
/// candidate (k+1)-itemsets, then prunes candidates with an infrequent
/// k-subset (anti-monotonicity). `level` must be sorted and its members all
/// the same size. Used by the Apriori level loop and by consequent merging
/// in rule generation.
pub(crate) fn generate_candidates(level: &[Itemset]) -> Vec<Itemset> {
    let members: HashSet<&Itemset> = level.iter().collect();
    let mut candidates = Vec::new();

    for i in 0..level.len() {
        let left = level[i].items();
        let prefix = &left[..left.len() - 1];

        for j in (i + 1)..level.len() {
            let right = level[j].items();
            if &right[..right.len() - 1] != prefix {
                // Level is sorted, so no later entry shares this prefix.
                break;
            }

            let mut joined = left.to_vec();
            joined.push(right[right.len() - 1]);
            let candidate = Itemset::new(joined);

            if all_subsets_frequent(&candidate, &members) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

fn all_subsets_frequent(candidate: &Itemset, members: &HashSet<&Itemset>) -> bool {
    let items = candidate.items();
    (0..items.len()).all(|skip| {
        let subset: Vec<Item> = items
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != skip)
            .map(|(_, &item)| item)
            .collect();
        members.contains(&Itemset::new(subset))
    })
}
