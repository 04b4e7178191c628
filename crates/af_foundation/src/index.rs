// crates/af_foundation/src/index.rs

//! 强类型索引系统
//!
//! 使用泛型 `Idx<T>` 实现带代际验证的类型安全索引。场数据由流动模型保存在
//! [`crate::arena::Arena`] 中，`FieldId` 作为导数缓存的逻辑键。
//!
//! # 示例
//!
//! ```
//! use af_foundation::index::FieldId;
//!
//! let id = FieldId::new(0, 1);
//! assert!(id.is_valid());
//! assert_eq!(id.index(), 0);
//! assert_eq!(id.generation(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// 无效索引标记
pub const INVALID_INDEX: u32 = u32::MAX;

/// 无效代际标记
pub const INVALID_GENERATION: u32 = 0;

// ============================================================================
// 标记类型
// ============================================================================

/// 场数据标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldTag;

/// 场数据索引
pub type FieldId = Idx<FieldTag>;

// ============================================================================
// 泛型索引类型
// ============================================================================

/// 带代际验证的泛型索引
///
/// `generation` 从 1 开始，0 表示无效；槽位被复用时代际递增，
/// 旧索引因此失效。
#[derive(Serialize, Deserialize)]
#[repr(C)]
pub struct Idx<T> {
    index: u32,
    generation: u32,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

// PhantomData<fn() -> T> 不要求 T: Copy
impl<T> Copy for Idx<T> {}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Idx<T> {
    /// 无效索引常量
    pub const INVALID: Self = Self {
        index: INVALID_INDEX,
        generation: INVALID_GENERATION,
        _marker: PhantomData,
    };

    /// 创建新索引
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// 获取索引值
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// 获取索引值（usize）
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.index as usize
    }

    /// 获取代际号
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// 判断索引是否有效
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.index != INVALID_INDEX && self.generation != INVALID_GENERATION
    }

    /// 创建下一代索引（用于重用槽位）
    #[inline]
    pub fn next_generation(self) -> Self {
        let next_gen = self.generation.wrapping_add(1);
        Self::new(self.index, if next_gen == 0 { 1 } else { next_gen })
    }
}

// ============================================================================
// Trait 实现
// ============================================================================

impl<T> Default for Idx<T> {
    fn default() -> Self {
        Self::INVALID
    }
}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Idx<T> {}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index
            .cmp(&other.index)
            .then(self.generation.cmp(&other.generation))
    }
}

impl<T> Hash for Idx<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Idx({}@{})", self.index, self.generation)
        } else {
            write!(f, "Idx(INVALID)")
        }
    }
}

impl<T> fmt::Display for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.index)
        } else {
            write!(f, "INVALID")
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
