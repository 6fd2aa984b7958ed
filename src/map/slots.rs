//! 槽位表 - 两张等长的可选条目数组

use crate::hash::TableSide;
use std::{iter, slice, vec};

pub(crate) type SlotIter<'a, T> = iter::Chain<slice::Iter<'a, Option<T>>, slice::Iter<'a, Option<T>>>;
pub(crate) type SlotIterMut<'a, T> =
    iter::Chain<slice::IterMut<'a, Option<T>>, slice::IterMut<'a, Option<T>>>;
pub(crate) type SlotIntoIter<T> = iter::Chain<vec::IntoIter<Option<T>>, vec::IntoIter<Option<T>>>;

/// 两张槽位数组，长度始终相同
#[derive(Clone, Debug)]
pub(crate) struct SlotTables<T> {
    first: Vec<Option<T>>,
    second: Vec<Option<T>>,
}

impl<T> SlotTables<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            first: empty_slots(capacity),
            second: empty_slots(capacity),
        }
    }

    /// 每张表的槽位数
    #[inline]
    pub fn capacity(&self) -> usize {
        self.first.len()
    }

    #[inline]
    pub fn slot(&self, side: TableSide, index: usize) -> &Option<T> {
        match side {
            TableSide::First => &self.first[index],
            TableSide::Second => &self.second[index],
        }
    }

    #[inline]
    pub fn slot_mut(&mut self, side: TableSide, index: usize) -> &mut Option<T> {
        match side {
            TableSide::First => &mut self.first[index],
            TableSide::Second => &mut self.second[index],
        }
    }

    pub fn take(&mut self, side: TableSide, index: usize) -> Option<T> {
        self.slot_mut(side, index).take()
    }

    /// 按表1、表2的数组顺序列出占用槽位
    pub fn occupied(&self) -> impl Iterator<Item = (TableSide, usize, &T)> + '_ {
        let first = self
            .first
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (TableSide::First, index, item)));
        let second = self
            .second
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (TableSide::Second, index, item)));
        first.chain(second)
    }

    pub fn slots(&self) -> SlotIter<'_, T> {
        self.first.iter().chain(self.second.iter())
    }

    pub fn slots_mut(&mut self) -> SlotIterMut<'_, T> {
        self.first.iter_mut().chain(self.second.iter_mut())
    }

    pub fn into_slots(self) -> SlotIntoIter<T> {
        self.first.into_iter().chain(self.second)
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    iter::repeat_with(|| None).take(capacity).collect()
}
