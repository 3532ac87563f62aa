use crate::store::{Item, Itemset};

/// Enumerates the frequent itemsets of a single-path tree directly.
///
/// Every non-empty subset of the chain, joined with the suffix, is frequent:
/// chain counts are non-increasing from the root, so a subset's support is
/// the count of its deepest selected node. `max_extra` caps how many chain
/// items a subset may take (itemset size cap minus suffix length).
pub(crate) fn enumerate_path_subsets(
    path: &[(Item, u64)],
    suffix: &[Item],
    max_extra: usize,
    out: &mut Vec<(Itemset, u64)>,
) {
    let limit = max_extra.min(path.len());
    let mut chosen = Vec::with_capacity(limit);
    for k in 1..=limit {
        choose(path, k, 0, &mut chosen, suffix, out);
    }
}

fn choose(
    path: &[(Item, u64)],
    k: usize,
    start: usize,
    chosen: &mut Vec<usize>,
    suffix: &[Item],
    out: &mut Vec<(Itemset, u64)>,
) {
    if chosen.len() == k {
        let deepest = *chosen.last().expect("k >= 1");
        let mut items = suffix.to_vec();
        items.extend(chosen.iter().map(|&idx| path[idx].0));
        out.push((Itemset::new(items), path[deepest].1));
        return;
    }

    for idx in start..path.len() {
        chosen.push(idx);
        choose(path, k, idx + 1, chosen, suffix, out);
        chosen.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsets_carry_deepest_node_count() {
        let path = [(5, 10), (7, 8), (9, 5)];
        let mut out = Vec::new();
        enumerate_path_subsets(&path, &[], usize::MAX, &mut out);

        // 3 singles + 3 pairs + 1 triple
        assert_eq!(out.len(), 7);

        let find = |items: &[Item]| {
            out.iter()
                .find(|(itemset, _)| itemset.items() == items)
                .map(|&(_, count)| count)
        };
        assert_eq!(find(&[5]), Some(10));
        assert_eq!(find(&[9]), Some(5));
        assert_eq!(find(&[5, 7]), Some(8));
        assert_eq!(find(&[5, 9]), Some(5));
        assert_eq!(find(&[5, 7, 9]), Some(5));
    }

    #[test]
    fn suffix_is_prepended_to_every_subset() {
        let path = [(4, 3)];
        let mut out = Vec::new();
        enumerate_path_subsets(&path, &[2], usize::MAX, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0.items(), &[2, 4]);
        assert_eq!(out[0].1, 3);
    }

    #[test]
    fn cap_limits_subset_width() {
        let path = [(1, 5), (2, 4), (3, 3)];
        let mut out = Vec::new();
        enumerate_path_subsets(&path, &[], 1, &mut out);

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|(itemset, _)| itemset.len() == 1));
    }
}
