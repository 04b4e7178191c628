// crates/af_physics/src/flux/cache.rs

//! 导数缓存
//!
//! 一个方向块内，同一 (场, 分量, 求导方向) 只求导一次。
//! 缓存属于调用栈帧，方向块结束时清空。

use af_foundation::field::CellField;
use af_foundation::{Direction, FieldId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// 缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivativeKey {
    /// 被求导的场
    pub field: FieldId,
    /// 分量
    pub component: usize,
    /// 求导方向
    pub direction: Direction,
}

impl DerivativeKey {
    /// 创建
    pub const fn new(field: FieldId, component: usize, direction: Direction) -> Self {
        Self {
            field,
            component,
            direction,
        }
    }
}

/// 导数缓存
#[derive(Debug, Default)]
pub struct DerivativeCache {
    entries: HashMap<DerivativeKey, CellField>,
    computed: usize,
    reused: usize,
}

impl DerivativeCache {
    /// 空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 取缓存项；不存在时调用 `compute` 生成
    pub fn get_or_compute<E>(
        &mut self,
        key: DerivativeKey,
        compute: impl FnOnce() -> Result<CellField, E>,
    ) -> Result<&CellField, E> {
        match self.entries.entry(key) {
            Entry::Occupied(e) => {
                self.reused += 1;
                Ok(e.into_mut())
            }
            Entry::Vacant(e) => {
                let field = compute()?;
                self.computed += 1;
                Ok(e.insert(field))
            }
        }
    }

    /// 查询
    pub fn get(&self, key: &DerivativeKey) -> Option<&CellField> {
        self.entries.get(key)
    }

    /// 是否包含
    pub fn contains(&self, key: &DerivativeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// 项数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 实际求导次数（跨清空累计）
    pub fn computed(&self) -> usize {
        self.computed
    }

    /// 命中次数（跨清空累计）
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// 清空缓存项，保留统计
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
