//! Derived rule metrics: pure functions over fractional supports.

/// `support(itemset) / support(antecedent)`. In [0, 1] for supports produced
/// by a single mining run.
pub fn confidence(itemset_support: f64, antecedent_support: f64) -> f64 {
    itemset_support / antecedent_support
}

/// `confidence / support(consequent)`. Non-negative; 1.0 means the
/// antecedent and consequent are independent.
pub fn lift(confidence: f64, consequent_support: f64) -> f64 {
    confidence / consequent_support
}

/// Observed minus expected co-occurrence frequency.
pub fn leverage(itemset_support: f64, antecedent_support: f64, consequent_support: f64) -> f64 {
    itemset_support - antecedent_support * consequent_support
}

/// `(1 - support(consequent)) / (1 - confidence)`.
///
/// Defined as `+inf` when confidence is exactly 1; the division by zero is
/// guarded rather than surfaced.
pub fn conviction(consequent_support: f64, confidence: f64) -> f64 {
    if confidence >= 1.0 {
        f64::INFINITY
    } else {
        (1.0 - consequent_support) / (1.0 - confidence)
    }
}
