// crates/af_foundation/src/index_box.rs

//! 轴对齐整数索引盒
//!
//! `[lower, upper]` 闭区间，形状为 `upper - lower + 1`。索引盒是不可变值类型，
//! `grow`/`shrink` 等操作都返回新盒。
//!
//! 任一轴上 `upper < lower` 的盒为空盒。接受可选区域的操作把空盒解释为
//! “未指定区域”。
//!
//! ```
//! use af_foundation::dimension::Dimension;
//! use af_foundation::index_box::IndexBox;
//! use af_foundation::int_vector::IntVector;
//!
//! let interior = IndexBox::from_shape(Dimension::Two, &[8, 4]);
//! let ghost_box = interior.grow(&IntVector::uniform(Dimension::Two, 2));
//! assert_eq!(ghost_box.shape().as_slice(), &[12, 8]);
//! assert!(ghost_box.contains(&interior));
//! ```

use crate::dimension::Dimension;
use crate::int_vector::IntVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 索引盒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexBox {
    lower: IntVector,
    upper: IntVector,
}

impl IndexBox {
    /// 由上下界创建
    ///
    /// # Panics
    ///
    /// 上下界维度不一致时 panic。
    pub fn new(lower: IntVector, upper: IntVector) -> Self {
        assert_eq!(lower.dim(), upper.dim(), "IndexBox: 上下界维度不一致");
        Self { lower, upper }
    }

    /// 由切片形式的上下界创建
    pub fn from_bounds(dim: Dimension, lower: &[i32], upper: &[i32]) -> Self {
        Self::new(IntVector::new(dim, lower), IntVector::new(dim, upper))
    }

    /// 以原点为下界、给定形状创建
    pub fn from_shape(dim: Dimension, shape: &[i32]) -> Self {
        let lower = IntVector::zero(dim);
        let upper = IntVector::new(dim, shape) - IntVector::uniform(dim, 1);
        Self::new(lower, upper)
    }

    /// 空盒
    pub fn empty(dim: Dimension) -> Self {
        Self::new(IntVector::zero(dim), IntVector::uniform(dim, -1))
    }

    /// 维度
    #[inline]
    pub fn dim(&self) -> Dimension {
        self.lower.dim()
    }

    /// 下界
    #[inline]
    pub fn lower(&self) -> IntVector {
        self.lower
    }

    /// 上界
    #[inline]
    pub fn upper(&self) -> IntVector {
        self.upper
    }

    /// 形状 `upper - lower + 1`
    pub fn shape(&self) -> IntVector {
        self.upper - self.lower + IntVector::uniform(self.dim(), 1)
    }

    /// 任一轴长度 <= 0 即为空
    pub fn is_empty(&self) -> bool {
        (0..self.dim().n()).any(|a| self.upper[a] < self.lower[a])
    }

    /// 单元数，空盒为 0
    pub fn number_cells(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.shape().product() as usize
        }
    }

    /// 同 [`IndexBox::number_cells`]
    #[inline]
    pub fn size(&self) -> usize {
        self.number_cells()
    }

    /// 各轴向外扩展
    pub fn grow(&self, ghosts: &IntVector) -> Self {
        Self::new(self.lower - *ghosts, self.upper + *ghosts)
    }

    /// 各轴向内收缩
    pub fn shrink(&self, ghosts: &IntVector) -> Self {
        self.grow(&-*ghosts)
    }

    /// 仅沿 `axis` 两侧扩展 `n`（`n` 可为负）
    pub fn grow_along(&self, axis: usize, n: i32) -> Self {
        let g = IntVector::unit(self.dim(), axis, n);
        self.grow(&g)
    }

    /// 仅把 `axis` 轴上界加 `n`，用于构造面心/边心数据盒
    pub fn extend_upper(&self, axis: usize, n: i32) -> Self {
        Self::new(self.lower, self.upper.with(axis, self.upper[axis] + n))
    }

    /// 是否包含另一个盒；空盒被任何盒包含
    pub fn contains(&self, other: &IndexBox) -> bool {
        if other.is_empty() {
            return true;
        }
        other.lower.all_ge(&self.lower) && self.upper.all_ge(&other.upper)
    }

    /// 是否包含某点（只看前 `dim` 个分量）
    pub fn contains_point(&self, point: &[i32; 3]) -> bool {
        (0..self.dim().n()).all(|a| point[a] >= self.lower[a] && point[a] <= self.upper[a])
    }

    /// 交集
    pub fn intersect(&self, other: &IndexBox) -> Self {
        let n = self.dim().n();
        let mut lo = [0; 3];
        let mut hi = [0; 3];
        for a in 0..n {
            lo[a] = self.lower[a].max(other.lower[a]);
            hi[a] = self.upper[a].min(other.upper[a]);
        }
        Self::from_bounds(self.dim(), &lo[..n], &hi[..n])
    }

    /// 按 x 最快变化的顺序遍历所有点；未用轴固定为 0
    pub fn for_each_point(&self, mut f: impl FnMut([i32; 3])) {
        if self.is_empty() {
            return;
        }
        let lo = self.lower.to_array();
        let hi = self.upper.to_array();
        for k in lo[2]..=hi[2] {
            for j in lo[1]..=hi[1] {
                for i in lo[0]..=hi[0] {
                    f([i, j, k]);
                }
            }
        }
    }

    /// 按行遍历：回调参数为每行起点和沿 x 的长度
    pub fn for_each_row(&self, mut f: impl FnMut([i32; 3], usize)) {
        if self.is_empty() {
            return;
        }
        let lo = self.lower.to_array();
        let hi = self.upper.to_array();
        let len = (hi[0] - lo[0] + 1) as usize;
        for k in lo[2]..=hi[2] {
            for j in lo[1]..=hi[1] {
                f([lo[0], j, k], len);
            }
        }
    }
}

impl fmt::Display for IndexBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
