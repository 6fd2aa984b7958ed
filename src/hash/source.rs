//! 乘数来源 - 构造与每次重哈希时抽取两表的哈希乘数

use crate::error::CuckooError;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::Range;

/// 乘数取值区间
///
/// 乘数为0会把所有键映射到槽位0，因此下界为1。
pub const MULTIPLIER_RANGE: Range<u32> = 1..100;

/// 乘数来源特征
///
/// 映射在构造和每次重哈希时各调用两次，第一次用于表1，第二次用于表2。
/// 测试可注入确定性的实现来复现特定的碰撞与扩容场景。
pub trait MultiplierSource {
    /// 抽取下一个乘数，必须非零
    fn next_multiplier(&mut self) -> u32;
}

/// 基于 `StdRng` 的随机乘数
#[derive(Clone, Debug)]
pub struct RandomMultipliers {
    rng: StdRng,
}

impl RandomMultipliers {
    /// 使用系统熵初始化
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 使用固定种子初始化，结果可复现
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMultipliers {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplierSource for RandomMultipliers {
    fn next_multiplier(&mut self) -> u32 {
        self.rng.gen_range(MULTIPLIER_RANGE)
    }
}

/// 循环返回预设乘数
#[derive(Clone, Debug)]
pub struct FixedMultipliers {
    values: Vec<u32>,
    cursor: usize,
}

impl FixedMultipliers {
    /// 创建固定乘数序列，序列不能为空也不能含0
    pub fn new(values: Vec<u32>) -> Result<Self, CuckooError> {
        if values.is_empty() {
            return Err(CuckooError::InvalidConfig {
                reason: "乘数序列不能为空".into(),
            });
        }
        if values.contains(&0) {
            return Err(CuckooError::InvalidConfig {
                reason: "乘数不能为0".into(),
            });
        }
        Ok(Self { values, cursor: 0 })
    }

    /// 两表始终使用同一对乘数
    pub fn pair(first: u32, second: u32) -> Result<Self, CuckooError> {
        Self::new(vec![first, second])
    }
}

impl MultiplierSource for FixedMultipliers {
    fn next_multiplier(&mut self) -> u32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

impl<S: MultiplierSource + ?Sized> MultiplierSource for &mut S {
    fn next_multiplier(&mut self) -> u32 {
        (**self).next_multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_multipliers_in_range() {
        let mut source = RandomMultipliers::new();
        for _ in 0..1000 {
            assert!(MULTIPLIER_RANGE.contains(&source.next_multiplier()));
        }
    }

    #[test]
    fn test_seeded_multipliers_repeat() {
        let mut a = RandomMultipliers::seeded(42);
        let mut b = RandomMultipliers::seeded(42);
        let left: Vec<u32> = (0..16).map(|_| a.next_multiplier()).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_multiplier()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_fixed_multipliers_cycle() {
        let mut source = FixedMultipliers::new(vec![3, 5, 7]).unwrap();
        let drawn: Vec<u32> = (0..7).map(|_| source.next_multiplier()).collect();
        assert_eq!(drawn, vec![3, 5, 7, 3, 5, 7, 3]);
    }

    #[test]
    fn test_fixed_multipliers_rejects_invalid() {
        assert!(matches!(
            FixedMultipliers::new(Vec::new()),
            Err(CuckooError::InvalidConfig { .. })
        ));
        assert!(matches!(
            FixedMultipliers::pair(0, 3),
            Err(CuckooError::InvalidConfig { .. })
        ));
    }
}
