// src/stats/operation.rs
//! 操作统计 - 跟踪映射的写操作、踢出与重哈希次数

use std::fmt::Write as _;

/// 被统计的操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 插入新键
    Insert,
    /// 覆盖已有键的值
    Update,
    /// 删除操作
    Remove,
    /// 踢出操作
    Kick,
    /// 成功的重哈希
    Rehash,
    /// 失败后被放弃的一次重哈希布局
    RehashAttempt,
    /// 清空操作
    Clear,
}

impl OperationType {
    /// 全部操作类型
    pub const ALL: [OperationType; 7] = [
        OperationType::Insert,
        OperationType::Update,
        OperationType::Remove,
        OperationType::Kick,
        OperationType::Rehash,
        OperationType::RehashAttempt,
        OperationType::Clear,
    ];

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Update => "update",
            OperationType::Remove => "remove",
            OperationType::Kick => "kick",
            OperationType::Rehash => "rehash",
            OperationType::RehashAttempt => "rehash_attempt_failed",
            OperationType::Clear => "clear",
        }
    }
}

/// 操作计数器
///
/// 映射是单线程结构，写操作本就持有 `&mut self`，这里用普通整数即可。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStats {
    pub insert_count: u64,
    pub update_count: u64,
    pub remove_count: u64,
    pub kick_count: u64,
    pub rehash_count: u64,
    pub failed_rehash_attempts: u64,
    pub clear_count: u64,
}

impl OperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次操作
    pub fn record(&mut self, op_type: OperationType) {
        self.record_many(op_type, 1);
    }

    /// 一次记录多次同类操作
    pub fn record_many(&mut self, op_type: OperationType, count: u64) {
        let counter = self.counter_mut(op_type);
        *counter = counter.saturating_add(count);
    }

    /// 获取计数
    pub fn count(&self, op_type: OperationType) -> u64 {
        match op_type {
            OperationType::Insert => self.insert_count,
            OperationType::Update => self.update_count,
            OperationType::Remove => self.remove_count,
            OperationType::Kick => self.kick_count,
            OperationType::Rehash => self.rehash_count,
            OperationType::RehashAttempt => self.failed_rehash_attempts,
            OperationType::Clear => self.clear_count,
        }
    }

    fn counter_mut(&mut self, op_type: OperationType) -> &mut u64 {
        match op_type {
            OperationType::Insert => &mut self.insert_count,
            OperationType::Update => &mut self.update_count,
            OperationType::Remove => &mut self.remove_count,
            OperationType::Kick => &mut self.kick_count,
            OperationType::Rehash => &mut self.rehash_count,
            OperationType::RehashAttempt => &mut self.failed_rehash_attempts,
            OperationType::Clear => &mut self.clear_count,
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        for op in OperationType::ALL {
            let name = op.as_str();
            // 写入 String 不会失败
            let _ = writeln!(output, "# HELP cuckoo_operation_{}_count Total {} operations", name, name);
            let _ = writeln!(output, "# TYPE cuckoo_operation_{}_count counter", name);
            let _ = writeln!(output, "cuckoo_operation_{}_count {}", name, self.count(op));
        }

        output
    }
}
