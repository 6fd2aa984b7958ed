//! 统一错误处理 - 映射可能返回的错误类型及恢复建议

/// Cuckoo映射可能发生的错误
///
/// 查询不存在的键不是错误，由 `Option::None` 表示。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CuckooError {
    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("容量溢出，无法从 {capacity} 继续翻倍")]
    CapacityOverflow {
        capacity: usize,
    },

    #[error("重哈希失败 (尝试次数: {attempts}, 最后容量: {capacity})")]
    RehashFailed {
        attempts: usize,
        capacity: usize,
    },
}

impl CuckooError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig { .. } => Some("检查配置参数"),
            Self::CapacityOverflow { .. } => Some("减少条目数量或拆分映射"),
            Self::RehashFailed { .. } => Some("检查键的哈希码是否大量重复，或增大 max_rehash_attempts"),
        }
    }

    /// 判断错误是否可恢复
    ///
    /// 出错时映射保持调用前的状态，只有容量溢出无法通过重试解决。
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::CapacityOverflow { .. })
    }

    /// 是否值得重试
    ///
    /// 重哈希每次都会重新抽取乘数，因此换一组乘数有可能成功。
    pub fn should_retry(&self) -> bool {
        matches!(self, Self::RehashFailed { .. })
    }
}
