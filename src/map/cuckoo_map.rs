//! Cuckoo哈希映射核心实现

use crate::{
    error::CuckooError,
    hash::{DoubleHashStrategy, MultiplierSource, RandomMultipliers, TableSide},
    map::{
        bucket::Bucket,
        iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut},
        slots::SlotTables,
        walk::{cuckoo_walk, WalkOutcome},
        DEFAULT_CONFIG,
    },
    stats::{OperationStats, OperationType},
    types::Hashable,
};
use std::{
    borrow::Borrow,
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Write as _},
    mem,
};

/// 默认每张表的初始槽位数
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
/// 负载因子上限，按两张表的总槽位计算
pub const MAX_LOAD_FACTOR: f64 = 0.80;
pub const DEFAULT_MAX_KICK_DEPTH: usize = 32;
pub const DEFAULT_MAX_REHASH_ATTEMPTS: usize = 8;
/// clear() 之后每张表的槽位数
pub const CLEAR_CAPACITY: usize = 10;

/// 映射配置
#[derive(Clone, Debug, PartialEq)]
pub struct CuckooMapConfig {
    /// 每张表的初始槽位数
    pub initial_capacity: usize,
    pub max_load_factor: f64,
    /// 单次插入允许的最大踢出次数，超出即回滚并重哈希
    pub max_kick_depth: usize,
    /// 一次重哈希最多尝试的布局数，每次失败容量再翻倍
    pub max_rehash_attempts: usize,
    /// clear() 之后每张表的槽位数，与初始容量无关
    pub clear_capacity: usize,
}

impl Default for CuckooMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: MAX_LOAD_FACTOR,
            max_kick_depth: DEFAULT_MAX_KICK_DEPTH,
            max_rehash_attempts: DEFAULT_MAX_REHASH_ATTEMPTS,
            clear_capacity: CLEAR_CAPACITY,
        }
    }
}

impl CuckooMapConfig {
    /// 默认配置，仅替换初始容量
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..DEFAULT_CONFIG.clone()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), CuckooError> {
        let reason = if self.initial_capacity == 0 {
            "initial_capacity 必须大于0"
        } else if self.clear_capacity == 0 {
            "clear_capacity 必须大于0"
        } else if !(self.max_load_factor > 0.0 && self.max_load_factor <= 1.0) {
            "max_load_factor 必须位于 (0, 1] 区间"
        } else if self.max_kick_depth == 0 {
            "max_kick_depth 必须大于0"
        } else if self.max_rehash_attempts == 0 {
            "max_rehash_attempts 必须大于0"
        } else {
            return Ok(());
        };
        Err(CuckooError::InvalidConfig {
            reason: reason.to_string(),
        })
    }
}

/// 映射统计信息
#[derive(Debug, Clone, PartialEq)]
pub struct CuckooMapStats {
    pub size: usize,
    pub capacity: usize,
    pub load_factor: f64,
    pub multipliers: (u32, u32),
    pub evictions_since_rehash: usize,
    pub operations: OperationStats,
}

impl CuckooMapStats {
    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();
        let gauges = [
            ("size", "Live entries", self.size as f64),
            ("capacity", "Slots per table", self.capacity as f64),
            ("load_factor", "Live entries over total slots", self.load_factor),
        ];
        for (name, help, value) in gauges {
            let _ = writeln!(output, "# HELP cuckoo_map_{} {}", name, help);
            let _ = writeln!(output, "# TYPE cuckoo_map_{} gauge", name);
            let _ = writeln!(output, "cuckoo_map_{} {}", name, value);
        }
        output.push_str(&self.operations.export_prometheus());
        output
    }
}

/// Cuckoo哈希映射
///
/// 两张等长的槽位表，每张表使用独立的乘法哈希。每个键只可能位于
/// `表1[h1(k)]` 或 `表2[h2(k)]`，查询最多探测两个槽位。
#[derive(Clone)]
pub struct CuckooMap<K, V, S = RandomMultipliers> {
    tables: SlotTables<Bucket<K, V>>,
    strategy: DoubleHashStrategy,
    source: S,
    config: CuckooMapConfig,
    len: usize,
    // 上次重哈希以来的踢出次数
    evictions_since_rehash: usize,
    stats: OperationStats,
}

impl<K: Hashable + Ord, V> CuckooMap<K, V> {
    /// 创建映射，乘数取自系统熵
    ///
    /// 容量为0时按1处理。
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_source(initial_capacity, RandomMultipliers::new())
    }
}

impl<K: Hashable + Ord, V> Default for CuckooMap<K, V> {
    fn default() -> Self {
        Self::build(DEFAULT_CONFIG.clone(), RandomMultipliers::new())
    }
}

impl<K, V, S> CuckooMap<K, V, S> {
    /// 条目数量
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 每张表的槽位数
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tables.capacity()
    }

    /// 当前负载因子，按两张表的总槽位计算
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / (2.0 * self.capacity() as f64)
    }

    /// 当前两表的哈希乘数
    pub fn multipliers(&self) -> (u32, u32) {
        self.strategy.multipliers()
    }

    pub fn config(&self) -> &CuckooMapConfig {
        &self.config
    }

    /// 获取统计快照
    pub fn stats(&self) -> CuckooMapStats {
        CuckooMapStats {
            size: self.len,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            multipliers: self.multipliers(),
            evictions_since_rehash: self.evictions_since_rehash,
            operations: self.stats.clone(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.stats().export_prometheus()
    }

    /// 清零操作计数
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// 按扫描顺序遍历键值对
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.tables.slots(), self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.tables.slots_mut(), self.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// 是否存在等于 `value` 的值，线性扫描两张表
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|candidate| candidate == value)
    }

    /// 清空映射
    ///
    /// 两张表重建为 `clear_capacity` 个槽位，不恢复构造时的容量。乘数保持不变。
    pub fn clear(&mut self) {
        self.tables = SlotTables::new(self.config.clear_capacity);
        self.len = 0;
        self.evictions_since_rehash = 0;
        self.stats.record(OperationType::Clear);
    }
}

impl<K: Hashable + Ord, V, S: MultiplierSource> CuckooMap<K, V, S> {
    /// 使用指定乘数来源创建映射
    pub fn with_source(initial_capacity: usize, source: S) -> Self {
        Self::build(
            CuckooMapConfig::with_initial_capacity(initial_capacity.max(1)),
            source,
        )
    }

    /// 使用自定义配置创建映射
    pub fn with_config(config: CuckooMapConfig, source: S) -> Result<Self, CuckooError> {
        config.validate()?;
        Ok(Self::build(config, source))
    }

    fn build(config: CuckooMapConfig, mut source: S) -> Self {
        let strategy = DoubleHashStrategy::draw(&mut source);
        Self {
            tables: SlotTables::new(config.initial_capacity),
            strategy,
            source,
            config,
            len: 0,
            evictions_since_rehash: 0,
            stats: OperationStats::new(),
        }
    }

    /// 插入键值对
    ///
    /// 键已存在时原地替换值并返回旧值。出错时映射保持调用前的状态，
    /// 传入的键值对被丢弃。
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CuckooError> {
        let hash = key.hash_code();
        if let Some((side, index)) = self.probe(hash, &key) {
            if let Some(bucket) = self.tables.slot_mut(side, index) {
                self.stats.record(OperationType::Update);
                return Ok(Some(bucket.set_value(value)));
            }
        }

        let bucket = Bucket::with_hash(key, value, hash);
        if self.needs_growth() {
            self.grow(bucket)?;
        } else {
            let max_kicks = self.walk_budget();
            match cuckoo_walk(
                &mut self.tables,
                &self.strategy,
                Bucket::hash_code,
                bucket,
                max_kicks,
            ) {
                WalkOutcome::Placed { kicks } => {
                    self.len += 1;
                    self.evictions_since_rehash += kicks;
                    self.stats.record_many(OperationType::Kick, kicks as u64);
                }
                WalkOutcome::Stalled { item, kicks } => {
                    log_debug!(
                        "踢出路径在 {} 次后停止 (上限 {}), 容量 {}, 触发重哈希",
                        kicks,
                        max_kicks,
                        self.capacity()
                    );
                    self.grow(item)?;
                }
            }
        }

        self.stats.record(OperationType::Insert);
        Ok(None)
    }

    /// 逐个插入，遇到第一个错误即停止
    pub fn insert_all<I>(&mut self, entries: I) -> Result<(), CuckooError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.insert(key, value)?;
        }
        Ok(())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        let (side, index) = self.probe(key.hash_code(), key)?;
        self.tables.slot(side, index).as_ref().map(Bucket::pair)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        let (side, index) = self.probe(key.hash_code(), key)?;
        self.tables.slot_mut(side, index).as_mut().map(Bucket::value_mut)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        self.probe(key.hash_code(), key).is_some()
    }

    /// 删除键，返回被删除的值
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hashable + Eq + ?Sized,
    {
        let (side, index) = self.probe(key.hash_code(), key)?;
        let bucket = self.tables.take(side, index)?;
        self.len -= 1;
        self.stats.record(OperationType::Remove);
        Some(bucket.into_pair().1)
    }

    /// 按键的自然顺序收集键
    pub fn key_set(&self) -> BTreeSet<&K> {
        self.keys().collect()
    }

    /// 按键的自然顺序收集键值对
    pub fn entry_set(&self) -> BTreeMap<&K, &V> {
        self.iter().collect()
    }

    /// 在两个候选槽位中查找键
    fn probe<Q>(&self, hash: i32, key: &Q) -> Option<(TableSide, usize)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let (first, second) = self.strategy.locate(hash, self.capacity());
        [(TableSide::First, first), (TableSide::Second, second)]
            .into_iter()
            .find(|&(side, index)| {
                matches!(self.tables.slot(side, index), Some(bucket) if bucket.key().borrow() == key)
            })
    }

    fn needs_growth(&self) -> bool {
        exceeds_load(self.len + 1, self.capacity(), self.config.max_load_factor)
            || self.evictions_since_rehash > self.capacity()
    }

    fn walk_budget(&self) -> usize {
        kick_budget(
            self.config.max_kick_depth,
            self.capacity(),
            self.evictions_since_rehash,
        )
    }

    /// 扩容并重新放置所有条目以及 `pending`
    ///
    /// 先在下标表上演练完整布局，成功后才移动条目。所有尝试都失败时
    /// 映射保持原样，`pending` 被丢弃。
    fn grow(&mut self, pending: Bucket<K, V>) -> Result<(), CuckooError> {
        let mut origins = Vec::with_capacity(self.len);
        let mut hashes = Vec::with_capacity(self.len + 1);
        for (side, index, bucket) in self.tables.occupied() {
            origins.push((side, index));
            hashes.push(bucket.hash_code());
        }
        hashes.push(pending.hash_code());
        let total = hashes.len();

        log_info!(
            "开始重哈希: 条目 {}, 当前容量 {}, 上次重哈希以来踢出 {}",
            total,
            self.capacity(),
            self.evictions_since_rehash
        );

        let mut capacity = self.capacity();
        for attempt in 1..=self.config.max_rehash_attempts {
            capacity = doubled_capacity(capacity, total, self.config.max_load_factor).map_err(|err| {
                log_error!("重哈希中止: {}", err);
                err
            })?;
            let strategy = DoubleHashStrategy::draw(&mut self.source);

            match plan_layout(&hashes, capacity, &strategy, self.config.max_kick_depth) {
                Some((layout, kicks)) => {
                    self.materialize(layout, &origins, pending);
                    self.strategy = strategy;
                    self.len = total;
                    self.evictions_since_rehash = kicks;
                    self.stats.record(OperationType::Rehash);
                    self.stats.record_many(OperationType::Kick, kicks as u64);
                    log_info!(
                        "重哈希完成: 第 {} 次尝试, 新容量 {}, 乘数 {:?}",
                        attempt,
                        capacity,
                        strategy.multipliers()
                    );
                    return Ok(());
                }
                None => {
                    self.stats.record(OperationType::RehashAttempt);
                    log_warn!(
                        "第 {} 次重哈希尝试失败: 容量 {}, 乘数 {:?}",
                        attempt,
                        capacity,
                        strategy.multipliers()
                    );
                }
            }
        }

        let err = CuckooError::RehashFailed {
            attempts: self.config.max_rehash_attempts,
            capacity,
        };
        log_error!("{}", err);
        Err(err)
    }

    /// 按演练出的布局移动条目
    fn materialize(
        &mut self,
        layout: SlotTables<usize>,
        origins: &[(TableSide, usize)],
        pending: Bucket<K, V>,
    ) {
        let mut old = mem::replace(&mut self.tables, SlotTables::new(layout.capacity()));
        let mut pending = Some(pending);
        for (side, index, &entry) in layout.occupied() {
            let bucket = match origins.get(entry) {
                Some(&(from_side, from_index)) => old.take(from_side, from_index),
                None => pending.take(),
            };
            *self.tables.slot_mut(side, index) = bucket;
        }
    }
}

/// 在新容量下为 `hashes` 中的每个条目演练踢出路径
///
/// 返回以条目下标填充的槽位表与累计踢出次数。
fn plan_layout(
    hashes: &[i32],
    capacity: usize,
    strategy: &DoubleHashStrategy,
    max_kick_depth: usize,
) -> Option<(SlotTables<usize>, usize)> {
    let mut layout = SlotTables::new(capacity);
    let mut kicks = 0;
    for entry in 0..hashes.len() {
        let max_kicks = kick_budget(max_kick_depth, capacity, kicks);
        match cuckoo_walk(&mut layout, strategy, |&i: &usize| hashes[i], entry, max_kicks) {
            WalkOutcome::Placed { kicks: walked } => kicks += walked,
            WalkOutcome::Stalled { .. } => return None,
        }
    }
    Some((layout, kicks))
}

/// 单次路径可用的踢出次数
///
/// 上次重哈希以来的踢出累计超过表长时必须重哈希。
fn kick_budget(max_kick_depth: usize, capacity: usize, evictions: usize) -> usize {
    max_kick_depth.min((capacity + 1).saturating_sub(evictions))
}

fn exceeds_load(count: usize, capacity: usize, max_load_factor: f64) -> bool {
    count as f64 > max_load_factor * 2.0 * capacity as f64
}

/// 至少翻倍一次，直到 `count` 个条目满足负载上限
fn doubled_capacity(current: usize, count: usize, max_load_factor: f64) -> Result<usize, CuckooError> {
    let double = |capacity: usize| {
        capacity
            .checked_mul(2)
            .ok_or(CuckooError::CapacityOverflow { capacity })
    };
    let mut capacity = double(current)?;
    while exceeds_load(count, capacity, max_load_factor) {
        capacity = double(capacity)?;
    }
    Ok(capacity)
}

impl<K, V, S> fmt::Debug for CuckooMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooMap")
            .field("size", &self.len)
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor())
            .finish()
    }
}

impl<K, V, S> IntoIterator for CuckooMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tables.into_slots(), self.len)
    }
}

impl<'a, K, V, S> IntoIterator for &'a CuckooMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut CuckooMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
