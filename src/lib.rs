//! Rust Cuckoo哈希映射库
//!
//! 使用两张等长的槽位表和两个独立的乘法哈希函数，通过踢出路径解决冲突。
//! 每个键只可能位于两个候选槽位之一，查询与删除最多探测两次。
//!
//! ## 主要特性
//! - 负载因子上限0.80，超出前自动翻倍扩容
//! - 迭代式踢出路径，路径过长时回滚并重哈希
//! - 重哈希先演练布局再移动条目，失败时映射保持原样
//! - 可注入的乘数来源，便于复现碰撞场景
//! - 操作统计与Prometheus指标导出
//!
//! ## 快速开始
//!
//! ```rust
//! use cuckoo_map::*;
//!
//! fn main() {
//!     // 每张表4个槽位
//!     let mut map = CuckooMap::new(4);
//!
//!     // 插入键值对
//!     map.insert("key1".to_string(), 1).expect("插入失败");
//!
//!     // 获取值
//!     if let Some(value) = map.get("key1") {
//!         println!("key1: {}", value);
//!     }
//!
//!     // 删除键
//!     map.remove("key1");
//!
//!     // 打印统计信息
//!     println!("{:?}", map.stats());
//! }
//! ```

#![warn(clippy::all)]
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}
// 核心模块导出
pub mod error;
pub mod hash;
pub mod map;
pub mod stats;
pub mod types;

// 公共接口导出
pub use crate::{
    error::CuckooError,
    hash::{DoubleHashStrategy, FixedMultipliers, MultiplierSource, RandomMultipliers, TableSide},
    map::{Bucket, CuckooMap, CuckooMapConfig, CuckooMapStats, DEFAULT_CONFIG},
    stats::{OperationStats, OperationType},
    types::{ByteKey, Hashable},
};

// 简化默认类型别名
pub type DefaultMap = CuckooMap<String, String>;
