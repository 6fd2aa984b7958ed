//! 双哈希策略 - 两张表各自使用独立乘数的乘法哈希

use crate::hash::source::MultiplierSource;

/// 槽位所在的表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSide {
    First,
    Second,
}

impl TableSide {
    /// 另一张表
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// 双哈希策略
///
/// 下标为 `|multiplier * hash_code| mod len`，乘积在64位下计算不会溢出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleHashStrategy {
    first: u32,
    second: u32,
}

impl DoubleHashStrategy {
    /// 使用指定乘数创建
    pub fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    /// 从乘数来源依次抽取表1、表2的乘数
    pub fn draw<S: MultiplierSource + ?Sized>(source: &mut S) -> Self {
        let first = source.next_multiplier();
        let second = source.next_multiplier();
        Self { first, second }
    }

    /// 两表乘数
    pub fn multipliers(&self) -> (u32, u32) {
        (self.first, self.second)
    }

    /// 指定表中的槽位下标
    #[inline]
    pub fn index(&self, side: TableSide, code: i32, len: usize) -> usize {
        let multiplier = match side {
            TableSide::First => self.first,
            TableSide::Second => self.second,
        };
        slot_index(multiplier, code, len)
    }

    /// 两表中的候选槽位
    #[inline]
    pub fn locate(&self, code: i32, len: usize) -> (usize, usize) {
        (
            slot_index(self.first, code, len),
            slot_index(self.second, code, len),
        )
    }
}

/// 乘法哈希取模
#[inline]
pub fn slot_index(multiplier: u32, code: i32, len: usize) -> usize {
    debug_assert!(len > 0, "槽位数组长度必须大于0");
    let product = (multiplier as i64 * code as i64).unsigned_abs();
    (product % len as u64) as usize
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::source::{FixedMultipliers, RandomMultipliers, MULTIPLIER_RANGE};

    #[test]
    fn test_slot_index() {
        assert_eq!(slot_index(3, 5, 7), 1);
        assert_eq!(slot_index(3, -5, 7), 1);
        assert_eq!(slot_index(99, i32::MIN, 10), (99u64 * 2_147_483_648 % 10) as usize);
        assert_eq!(slot_index(1, 0, 4), 0);
    }

    #[test]
    fn test_locate_in_range() {
        let strategy = DoubleHashStrategy::new(17, 31);
        for code in [-1000, -1, 0, 1, 65, 1000, i32::MAX, i32::MIN] {
            let (h1, h2) = strategy.locate(code, 13);
            assert!(h1 < 13);
            assert!(h2 < 13);
            assert_eq!(h1, strategy.index(TableSide::First, code, 13));
            assert_eq!(h2, strategy.index(TableSide::Second, code, 13));
        }
    }

    #[test]
    fn test_draw_order() {
        let mut source = FixedMultipliers::new(vec![2, 9]).unwrap();
        let strategy = DoubleHashStrategy::draw(&mut source);
        assert_eq!(strategy.multipliers(), (2, 9));
    }

    #[test]
    fn test_draw_random() {
        let mut source = RandomMultipliers::seeded(7);
        let (a, b) = DoubleHashStrategy::draw(&mut source).multipliers();
        assert!(MULTIPLIER_RANGE.contains(&a));
        assert!(MULTIPLIER_RANGE.contains(&b));
    }

    #[test]
    fn test_side_other() {
        assert_eq!(TableSide::First.other(), TableSide::Second);
        assert_eq!(TableSide::Second.other(), TableSide::First);
    }
}
