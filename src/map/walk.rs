//! 踢出路径 - 迭代式的cuckoo置换
//!
//! 新条目先进入表1；被表1踢出的条目进入表2，被表2踢出的条目回到表1。
//! 路径超出上限时按相反顺序撤销所有交换，槽位表恢复原状。

use crate::{
    hash::{DoubleHashStrategy, TableSide},
    map::slots::SlotTables,
};
use std::mem;

/// 一次踢出路径的结果
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum WalkOutcome<T> {
    /// 条目已全部落位
    Placed { kicks: usize },
    /// 路径过长，已回滚；`item` 是最初传入的条目
    Stalled { item: T, kicks: usize },
}

/// 沿交替的两张表放置 `item`
///
/// `max_kicks` 限制踢出次数，为0时遇到任何占用都会停止。
pub(crate) fn cuckoo_walk<T, F>(
    tables: &mut SlotTables<T>,
    strategy: &DoubleHashStrategy,
    hash_of: F,
    item: T,
    max_kicks: usize,
) -> WalkOutcome<T>
where
    F: Fn(&T) -> i32,
{
    let len = tables.capacity();
    let mut path: Vec<(TableSide, usize)> = Vec::new();
    let mut carried = item;
    let mut side = TableSide::First;

    loop {
        let index = strategy.index(side, hash_of(&carried), len);
        let slot = tables.slot_mut(side, index);
        if slot.is_none() {
            *slot = Some(carried);
            return WalkOutcome::Placed { kicks: path.len() };
        }
        if path.len() >= max_kicks {
            break;
        }
        if let Some(resident) = slot.as_mut() {
            mem::swap(resident, &mut carried);
        }
        path.push((side, index));
        side = side.other();
    }

    let kicks = path.len();
    while let Some((side, index)) = path.pop() {
        if let Some(resident) = tables.slot_mut(side, index).as_mut() {
            mem::swap(resident, &mut carried);
        }
    }
    WalkOutcome::Stalled { item: carried, kicks }
}
