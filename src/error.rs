use crate::store::Item;
use thiserror::Error;

/// Errors raised by the mining engine.
///
/// `Validation` and `Config` are raised at call boundaries before any mining
/// work begins. `InvariantViolation` indicates a logic bug (broken downward
/// closure or a miner disagreement) and is never retried or swallowed.
/// An empty result is not an error.
#[derive(Debug, Error)]
pub enum MiningError {
    /// Transaction input is empty or malformed.
    #[error("invalid transactions: {0}")]
    Validation(String),

    /// A threshold or parameter is outside its accepted range.
    #[error("invalid value for `{param}`: {value} (expected {constraint})")]
    Config {
        param: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// An internal consistency guarantee was broken. Fatal.
    #[error("invariant violation: {detail} (itemset {itemset:?})")]
    InvariantViolation { detail: String, itemset: Vec<Item> },

    /// The cooperative cancellation token was triggered.
    #[error("mining cancelled")]
    Cancelled,
}

impl MiningError {
    pub(crate) fn invariant(detail: impl Into<String>, itemset: &[Item]) -> Self {
        Self::InvariantViolation {
            detail: detail.into(),
            itemset: itemset.to_vec(),
        }
    }
}
