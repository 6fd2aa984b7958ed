//! 统计模块 - 映射操作计数与指标导出

pub mod operation;

pub use operation::{OperationStats, OperationType};
