//! 哈希模块 - 乘法哈希策略与乘数来源

pub mod double_hash;
pub mod source;

pub use double_hash::{slot_index, DoubleHashStrategy, TableSide};
pub use source::{FixedMultipliers, MultiplierSource, RandomMultipliers, MULTIPLIER_RANGE};
