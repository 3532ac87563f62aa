use crate::store::Item;
use std::collections::HashMap;

/// Arena node. The parent field is a back-reference into the arena, never an
/// owning link; children own their subtrees through the index map.
#[derive(Debug, Clone)]
pub(crate) struct FpNode {
    pub item: Option<Item>,
    pub count: u64,
    pub parent: Option<usize>,
    pub children: HashMap<Item, usize>,
}

impl FpNode {
    fn root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: HashMap::new(),
        }
    }

    fn new(item: Item, count: u64, parent: usize) -> Self {
        Self {
            item: Some(item),
            count,
            parent: Some(parent),
            children: HashMap::new(),
        }
    }
}

/// Shared-prefix tree over frequency-ordered transactions.
///
/// The header table keeps, per item, the node-link chain (arena indices of
/// every node carrying that item). A node's count equals the sum of its
/// children's counts plus the paths terminating at it.
#[derive(Debug, Clone)]
pub(crate) struct FpTree {
    pub nodes: Vec<FpNode>,
    pub header: HashMap<Item, Vec<usize>>,
    root: usize,
}

impl FpTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![FpNode::root()],
            header: HashMap::new(),
            root: 0,
        }
    }

    /// Inserts a frequency-ordered path carrying `count` transactions,
    /// reusing shared prefixes and extending node-link chains for new nodes.
    pub fn insert_path(&mut self, path: &[Item], count: u64) {
        let mut current = self.root;

        for &item in path {
            if let Some(&child) = self.nodes[current].children.get(&item) {
                self.nodes[child].count += count;
                current = child;
            } else {
                let child = self.nodes.len();
                self.nodes.push(FpNode::new(item, count, current));
                self.nodes[current].children.insert(item, child);
                self.header.entry(item).or_default().push(child);
                current = child;
            }
        }
    }

    /// Total count of `item` across its node-link chain.
    pub fn item_count(&self, item: Item) -> u64 {
        self.header.get(&item).map_or(0, |chain| {
            chain.iter().map(|&idx| self.nodes[idx].count).sum()
        })
    }

    /// The conditional pattern base for `item`: every prefix path leading to
    /// one of its nodes, weighted by that node's count.
    pub fn prefix_paths(&self, item: Item) -> Vec<(Vec<Item>, u64)> {
        self.header.get(&item).map_or(Vec::new(), |chain| {
            chain
                .iter()
                .filter_map(|&idx| {
                    let mut path = Vec::new();
                    let mut current = self.nodes[idx].parent;

                    while let Some(i) = current {
                        if let Some(path_item) = self.nodes[i].item {
                            path.push(path_item);
                        }
                        current = self.nodes[i].parent;
                    }

                    path.reverse();
                    (!path.is_empty()).then_some((path, self.nodes[idx].count))
                })
                .collect()
        })
    }

    pub fn is_single_path(&self) -> bool {
        let mut current = self.root;

        loop {
            let node = &self.nodes[current];

            if node.children.len() > 1 {
                return false;
            }

            match node.children.values().next() {
                Some(&child) => current = child,
                None => return true,
            }
        }
    }

    /// The lone root-to-leaf chain of a single-path tree, as (item, count)
    /// pairs with non-increasing counts.
    pub fn single_path(&self) -> Vec<(Item, u64)> {
        let mut path = Vec::new();
        let mut current = self.root;

        while let Some(&child) = self.nodes[current].children.values().next() {
            let node = &self.nodes[child];
            if let Some(item) = node.item {
                path.push((item, node.count));
            }
            current = child;
        }

        path
    }
}
