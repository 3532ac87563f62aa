use crate::error::MiningError;
use serde::{Deserialize, Serialize};

/// Frequent-itemset mining algorithm selector.
///
/// Both algorithms are specified to produce identical support tables for
/// identical inputs; see [`crate::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    Apriori,
    FpGrowth,
}

/// Configuration surface recognized by the mining core.
#[derive(Debug, Clone)]
pub struct MiningConfig {
    /// Minimum fractional support in (0, 1].
    pub min_support: f64,
    pub algorithm: Algorithm,
    /// Cap on itemset size; mining stops generating larger itemsets
    /// regardless of support.
    pub max_itemset_size: Option<usize>,
}

impl MiningConfig {
    pub fn new(min_support: f64, algorithm: Algorithm) -> Self {
        Self {
            min_support,
            algorithm,
            max_itemset_size: None,
        }
    }

    #[must_use]
    pub fn with_max_itemset_size(mut self, max: usize) -> Self {
        self.max_itemset_size = Some(max);
        self
    }

    /// Raised at the call boundary, before any mining work begins.
    pub fn validate(&self) -> Result<(), MiningError> {
        validate_fraction("min_support", self.min_support)?;
        if self.max_itemset_size == Some(0) {
            return Err(MiningError::Config {
                param: "max_itemset_size",
                value: 0.0,
                constraint: "at least 1",
            });
        }
        Ok(())
    }

    /// Absolute count threshold for a database of `num_transactions` rows:
    /// the smallest count whose fraction reaches `min_support`.
    ///
    /// Derived from the fraction comparison rather than from
    /// `min_support * n` alone, so an itemset whose support equals
    /// `min_support` exactly is kept even when the float product rounds up
    /// past the integer (e.g. `0.07 * 100.0 == 7.000000000000001`). Both
    /// miners apply the same integer threshold so their outputs stay
    /// comparable.
    pub(crate) fn min_count(&self, num_transactions: usize) -> u64 {
        let n = num_transactions as f64;
        let mut count = (self.min_support * n).ceil() as u64;
        while count > 1 && (count - 1) as f64 / n >= self.min_support {
            count -= 1;
        }
        count.max(1)
    }
}

pub(crate) fn validate_fraction(param: &'static str, value: f64) -> Result<(), MiningError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::Config {
            param,
            value,
            constraint: "a fraction in (0, 1]",
        })
    }
}
