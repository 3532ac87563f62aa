//! Compressed-trie (FP-tree) frequent itemset mining.

mod builder;
mod combinations;
mod mining;
mod tree;


pub use mining::mine;
