//! 映射核心模块 - 实现Cuckoo哈希映射及其组件

pub mod bucket;
pub mod cuckoo_map;
pub mod iter;
mod slots;
mod walk;

pub use bucket::Bucket;
pub use cuckoo_map::{
    CuckooMap, CuckooMapConfig, CuckooMapStats, CLEAR_CAPACITY, DEFAULT_INITIAL_CAPACITY,
    DEFAULT_MAX_KICK_DEPTH, DEFAULT_MAX_REHASH_ATTEMPTS, MAX_LOAD_FACTOR,
};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<CuckooMapConfig> = Lazy::new(CuckooMapConfig::default);
