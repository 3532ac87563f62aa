//! Label interning and canonical transaction database construction.

use crate::error::MiningError;
use crate::store::{Item, Itemset};
use std::collections::HashMap;

/// Maps item labels to interned [`Item`] ids and back.
///
/// Ids are assigned in first-seen order, so encoding the same input twice
/// yields the same mapping.
#[derive(Debug, Clone, Default)]
pub struct TransactionEncoder {
    labels: Vec<String>,
    index: HashMap<String, Item>,
}

/// An ordered, immutable sequence of encoded transactions.
///
/// Each transaction is sorted and deduplicated; empty transactions were
/// dropped during encoding.
#[derive(Debug, Clone)]
pub struct TransactionDatabase {
    transactions: Vec<Vec<Item>>,
    dropped_empty: usize,
}

impl TransactionEncoder {
    /// Encodes raw label transactions.
    ///
    /// Labels are trimmed; blanks are ignored and duplicate items within one
    /// transaction collapse to a single occurrence. Transactions left empty
    /// are dropped (the count is retained on the database). Fails with
    /// [`MiningError::Validation`] when nothing remains.
    pub fn encode<S: AsRef<str>>(
        raw: &[Vec<S>],
    ) -> Result<(Self, TransactionDatabase), MiningError> {
        let mut encoder = Self::default();
        let mut transactions = Vec::with_capacity(raw.len());
        let mut dropped_empty = 0;

        for record in raw {
            let mut items: Vec<Item> = record
                .iter()
                .filter_map(|label| {
                    let label = label.as_ref().trim();
                    if label.is_empty() {
                        None
                    } else {
                        Some(encoder.intern(label))
                    }
                })
                .collect();

            items.sort_unstable();
            items.dedup();

            if items.is_empty() {
                dropped_empty += 1;
            } else {
                transactions.push(items);
            }
        }

        if transactions.is_empty() {
            return Err(MiningError::Validation(
                "no non-empty transactions after dropping blanks".into(),
            ));
        }

        tracing::debug!(
            transactions = transactions.len(),
            unique_items = encoder.labels.len(),
            dropped_empty,
            "encoded transaction database"
        );

        Ok((
            encoder,
            TransactionDatabase {
                transactions,
                dropped_empty,
            },
        ))
    }

    fn intern(&mut self, label: &str) -> Item {
        if let Some(&item) = self.index.get(label) {
            return item;
        }
        let item = self.labels.len() as Item;
        self.labels.push(label.to_owned());
        self.index.insert(label.to_owned(), item);
        item
    }

    pub fn item(&self, label: &str) -> Option<Item> {
        self.index.get(label.trim()).copied()
    }

    /// Panics if `item` was not produced by this encoder.
    pub fn label(&self, item: Item) -> &str {
        &self.labels[item as usize]
    }

    /// Decodes every item of `itemset`.
    ///
    /// Panics if any item was not produced by this encoder, like
    /// [`Self::label`].
    pub fn labels(&self, itemset: &Itemset) -> Vec<String> {
        itemset
            .items()
            .iter()
            .map(|&item| self.labels[item as usize].clone())
            .collect()
    }

    pub fn num_items(&self) -> usize {
        self.labels.len()
    }
}

impl TransactionDatabase {
    /// Builds a database directly from item-id transactions, applying the
    /// same normalization as [`TransactionEncoder::encode`].
    pub fn from_items(raw: Vec<Vec<Item>>) -> Result<Self, MiningError> {
        let mut dropped_empty = 0;
        let mut transactions = Vec::with_capacity(raw.len());

        for mut items in raw {
            items.sort_unstable();
            items.dedup();
            if items.is_empty() {
                dropped_empty += 1;
            } else {
                transactions.push(items);
            }
        }

        if transactions.is_empty() {
            return Err(MiningError::Validation(
                "no non-empty transactions after dropping blanks".into(),
            ));
        }

        Ok(Self {
            transactions,
            dropped_empty,
        })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// How many raw transactions were dropped for being empty.
    pub fn dropped_empty(&self) -> usize {
        self.dropped_empty
    }

    /// Sorted, deduplicated item ids per transaction.
    pub fn transactions(&self) -> &[Vec<Item>] {
        &self.transactions
    }
}
