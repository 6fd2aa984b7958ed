// src/map/bucket.rs
//! 桶实现 - 槽位中保存的键值条目

use crate::types::Hashable;
use std::mem;

/// 键值条目
///
/// 缓存键的哈希码，踢出与重哈希时无需重新计算。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket<K, V> {
    key: K,
    value: V,
    hash: i32,
}

impl<K: Hashable, V> Bucket<K, V> {
    pub fn new(key: K, value: V) -> Self {
        let hash = key.hash_code();
        Self { key, value, hash }
    }
}

impl<K, V> Bucket<K, V> {
    /// 使用已计算的哈希码创建
    pub(crate) fn with_hash(key: K, value: V, hash: i32) -> Self {
        Self { key, value, hash }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn hash_code(&self) -> i32 {
        self.hash
    }

    /// 替换值并返回旧值
    pub fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    pub(crate) fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    pub(crate) fn pair_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_caches_hash() {
        let bucket = Bucket::new("A".to_string(), 1);
        assert_eq!(bucket.hash_code(), 65);
        assert_eq!(bucket.key(), "A");
        assert_eq!(*bucket.value(), 1);
    }

    #[test]
    fn test_set_value() {
        let mut bucket = Bucket::new(7u32, "old");
        assert_eq!(bucket.set_value("new"), "old");
        assert_eq!(*bucket.value(), "new");
        *bucket.value_mut() = "newer";
        assert_eq!(bucket.into_pair(), (7, "newer"));
    }
}
