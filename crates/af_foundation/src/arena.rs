// crates/af_foundation/src/arena.rs

//! 带代际验证的泛型 Arena
//!
//! 流动模型把自己拥有的场数据放在 Arena 中，对外只暴露 [`Idx`]。
//! 删除后槽位会被复用，但代际号递增，旧索引访问返回 `None`。
//!
//! # 示例
//!
//! ```
//! use af_foundation::arena::Arena;
//! use af_foundation::index::FieldTag;
//!
//! let mut arena: Arena<f64, FieldTag> = Arena::new();
//! let idx = arena.insert(42.0);
//! assert_eq!(arena.get(idx), Some(&42.0));
//!
//! arena.remove(idx);
//! let reused = arena.insert(1.0);
//! assert_eq!(reused.index(), idx.index());
//! assert_eq!(arena.get(idx), None);
//! ```

use crate::error::{AfError, AfResult};
use crate::index::Idx;
use std::marker::PhantomData;

// ============================================================================
// Slot 定义
// ============================================================================

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<u32> },
}

impl<T> Slot<T> {
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation, .. } => *generation,
        }
    }
}

// ============================================================================
// Arena 实现
// ============================================================================

/// 泛型内存池
///
/// - `T`: 存储的元素类型
/// - `Tag`: 标记类型，防止不同 Arena 的索引混用
#[derive(Debug, Clone)]
pub struct Arena<T, Tag> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
    _marker: PhantomData<fn() -> Tag>,
}

impl<T, Tag> Default for Arena<T, Tag> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Tag> Arena<T, Tag> {
    /// 创建空 Arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// 预分配容量
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// 有效元素数量
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 插入元素，返回带代际的索引
    pub fn insert(&mut self, value: T) -> Idx<Tag> {
        self.len += 1;
        match self.free_head {
            Some(slot_index) => {
                let slot = &mut self.slots[slot_index as usize];
                let (generation, next_free) = match slot {
                    Slot::Vacant {
                        generation,
                        next_free,
                    } => (*generation, *next_free),
                    Slot::Occupied { .. } => unreachable!("free list points to occupied slot"),
                };
                let idx = Idx::new(slot_index, generation).next_generation();
                *slot = Slot::Occupied {
                    generation: idx.generation(),
                    value,
                };
                self.free_head = next_free;
                idx
            }
            None => {
                let slot_index = self.slots.len() as u32;
                self.slots.push(Slot::Occupied {
                    generation: 1,
                    value,
                });
                Idx::new(slot_index, 1)
            }
        }
    }

    /// 获取元素引用，索引过期时返回 `None`
    pub fn get(&self, idx: Idx<Tag>) -> Option<&T> {
        match self.slots.get(idx.as_usize())? {
            Slot::Occupied { generation, value } if *generation == idx.generation() => Some(value),
            _ => None,
        }
    }

    /// 获取元素可变引用，索引过期时返回 `None`
    pub fn get_mut(&mut self, idx: Idx<Tag>) -> Option<&mut T> {
        match self.slots.get_mut(idx.as_usize())? {
            Slot::Occupied { generation, value } if *generation == idx.generation() => Some(value),
            _ => None,
        }
    }

    /// 获取元素引用，索引过期时返回 [`AfError::InvalidIndex`]
    pub fn try_get(&self, idx: Idx<Tag>) -> AfResult<&T> {
        self.get(idx).ok_or(AfError::InvalidIndex)
    }

    /// 获取元素可变引用，索引过期时返回 [`AfError::InvalidIndex`]
    pub fn try_get_mut(&mut self, idx: Idx<Tag>) -> AfResult<&mut T> {
        self.get_mut(idx).ok_or(AfError::InvalidIndex)
    }

    /// 是否包含有效索引
    pub fn contains(&self, idx: Idx<Tag>) -> bool {
        self.get(idx).is_some()
    }

    /// 删除元素
    pub fn remove(&mut self, idx: Idx<Tag>) -> Option<T> {
        if !self.contains(idx) {
            return None;
        }
        let slot = &mut self.slots[idx.as_usize()];
        let generation = slot.generation();
        let old = std::mem::replace(
            slot,
            Slot::Vacant {
                generation,
                next_free: self.free_head,
            },
        );
        self.free_head = Some(idx.index());
        self.len -= 1;
        match old {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// 清空所有元素，已有索引全部失效
    pub fn clear(&mut self) {
        let count = self.slots.len();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let generation = slot.generation();
            let next_free = if i + 1 < count { Some(i as u32 + 1) } else { None };
            *slot = Slot::Vacant {
                generation,
                next_free,
            };
        }
        self.free_head = if count > 0 { Some(0) } else { None };
        self.len = 0;
    }

    /// 遍历 (索引, 元素)
    pub fn iter(&self) -> impl Iterator<Item = (Idx<Tag>, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Slot::Occupied { generation, value } => Some((Idx::new(i as u32, *generation), value)),
            Slot::Vacant { .. } => None,
        })
    }

    /// 可变遍历 (索引, 元素)
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Idx<Tag>, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Slot::Occupied { generation, value } => {
                    Some((Idx::new(i as u32, *generation), value))
                }
                Slot::Vacant { .. } => None,
            })
    }
}

impl<T, Tag> std::ops::Index<Idx<Tag>> for Arena<T, Tag> {
    type Output = T;

    fn index(&self, idx: Idx<Tag>) -> &T {
        match self.get(idx) {
            Some(value) => value,
            None => panic!("arena index {:?} is stale or out of range", idx),
        }
    }
}

impl<T, Tag> std::ops::IndexMut<Idx<Tag>> for Arena<T, Tag> {
    fn index_mut(&mut self, idx: Idx<Tag>) -> &mut T {
        match self.get_mut(idx) {
            Some(value) => value,
            None => panic!("arena index {:?} is stale or out of range", idx),
        }
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FieldTag;

    type TestArena = Arena<i32, FieldTag>;

    #[test]
    fn test_new_arena() {
        let arena = TestArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let mut arena = TestArena::with_capacity(4);
        let a = arena.insert(10);
        let b = arena.insert(20);
        assert_eq!(arena.get(a), Some(&10));
        assert_eq!(arena[b], 20);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_remove_invalidates_index() {
        let mut arena = TestArena::new();
        let a = arena.insert(1);
        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.remove(a), None);
        assert!(!arena.contains(a));
        assert_eq!(arena.try_get(a), Err(AfError::InvalidIndex));
    }

    #[test]
    fn test_reuse_slot_bumps_generation() {
        let mut arena = TestArena::new();
        let a = arena.insert(1);
        arena.remove(a);
        let b = arena.insert(2);
        assert_eq!(a.index(), b.index());
        assert_eq!(b.generation(), a.generation() + 1);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), Some(&2));
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TestArena::new();
        let a = arena.insert(1);
        *arena.try_get_mut(a).unwrap() += 5;
        assert_eq!(arena[a], 6);
    }

    #[test]
    fn test_clear() {
        let mut arena = TestArena::new();
        let a = arena.insert(1);
        let _ = arena.insert(2);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
        let c = arena.insert(3);
        assert_eq!(arena.get(c), Some(&3));
    }

    #[test]
    fn test_iter_with_holes() {
        let mut arena = TestArena::new();
        let a = arena.insert(1);
        let _ = arena.insert(2);
        let _ = arena.insert(3);
        arena.remove(a);
        let values: Vec<i32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![2, 3]);

        for (_, v) in arena.iter_mut() {
            *v *= 10;
        }
        let values: Vec<i32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![20, 30]);
    }

    #[test]
    #[should_panic]
    fn test_index_operator_stale() {
        let mut arena = TestArena::new();
        let a = arena.insert(1);
        arena.remove(a);
        let _ = arena[a];
    }
}
