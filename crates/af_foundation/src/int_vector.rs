// crates/af_foundation/src/int_vector.rs

//! 带维度标记的整数向量
//!
//! 用于索引盒的上下界、幽灵层宽度和形状。存储固定为 `[i32; 3]`，
//! 只有前 `dim` 个分量有意义，其余保持为 0。

use crate::dimension::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Index, Neg, Sub};

/// 整数向量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntVector {
    dim: Dimension,
    values: [i32; 3],
}

impl IntVector {
    /// 从切片创建，只取前 `dim` 个分量
    ///
    /// # Panics
    ///
    /// 切片长度小于维数时 panic。
    pub fn new(dim: Dimension, values: &[i32]) -> Self {
        assert!(
            values.len() >= dim.n(),
            "IntVector::new: {} 需要 {} 个分量, 实际 {}",
            dim,
            dim.n(),
            values.len()
        );
        let mut v = [0; 3];
        v[..dim.n()].copy_from_slice(&values[..dim.n()]);
        Self { dim, values: v }
    }

    /// 所有分量为 `value`
    pub fn uniform(dim: Dimension, value: i32) -> Self {
        let mut v = [0; 3];
        v[..dim.n()].fill(value);
        Self { dim, values: v }
    }

    /// 零向量
    pub fn zero(dim: Dimension) -> Self {
        Self::uniform(dim, 0)
    }

    /// 第 `axis` 轴为 `value`，其余为 0
    pub fn unit(dim: Dimension, axis: usize, value: i32) -> Self {
        let mut v = Self::zero(dim);
        v.values[axis] = value;
        v
    }

    /// 维度
    #[inline]
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// 有效分量
    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.values[..self.dim.n()]
    }

    /// 三分量存储（未用轴为 0）
    #[inline]
    pub fn to_array(&self) -> [i32; 3] {
        self.values
    }

    /// 设置某一轴
    pub fn with(mut self, axis: usize, value: i32) -> Self {
        self.values[axis] = value;
        self
    }

    /// 有效分量之积
    pub fn product(&self) -> i64 {
        self.as_slice().iter().map(|&v| v as i64).product()
    }

    /// 最小分量
    pub fn min(&self) -> i32 {
        self.as_slice().iter().copied().min().unwrap_or(0)
    }

    /// 每个分量都 >= 对方
    pub fn all_ge(&self, other: &IntVector) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a >= b)
    }

    /// 每个分量都 >= `value`
    pub fn all_ge_scalar(&self, value: i32) -> bool {
        self.as_slice().iter().all(|&a| a >= value)
    }
}

impl Index<usize> for IntVector {
    type Output = i32;

    fn index(&self, axis: usize) -> &i32 {
        &self.values[axis]
    }
}

impl Add for IntVector {
    type Output = IntVector;

    fn add(self, rhs: IntVector) -> IntVector {
        let mut out = self;
        for a in 0..self.dim.n() {
            out.values[a] += rhs.values[a];
        }
        out
    }
}

impl Sub for IntVector {
    type Output = IntVector;

    fn sub(self, rhs: IntVector) -> IntVector {
        self + (-rhs)
    }
}

impl Neg for IntVector {
    type Output = IntVector;

    fn neg(self) -> IntVector {
        let mut out = self;
        for v in out.values.iter_mut() {
            *v = -*v;
        }
        out
    }
}

impl fmt::Display for IntVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (a, v) in self.as_slice().iter().enumerate() {
            if a > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = IntVector::new(Dimension::Two, &[1, 2]);
        let b = IntVector::uniform(Dimension::Two, 3);
        assert_eq!((a + b).as_slice(), &[4, 5]);
        assert_eq!((a - b).as_slice(), &[-2, -1]);
        assert_eq!((-a).as_slice(), &[-1, -2]);
    }

    #[test]
    fn test_unused_axes_stay_zero() {
        let v = IntVector::uniform(Dimension::One, 4);
        assert_eq!(v.to_array(), [4, 0, 0]);
        assert_eq!(v.product(), 4);
    }

    #[test]
    fn test_unit_and_product() {
        let u = IntVector::unit(Dimension::Three, 1, 5);
        assert_eq!(u.to_array(), [0, 5, 0]);
        assert_eq!(IntVector::new(Dimension::Three, &[2, 3, 4]).product(), 24);
    }

    #[test]
    fn test_comparisons() {
        let a = IntVector::new(Dimension::Two, &[3, 4]);
        let b = IntVector::new(Dimension::Two, &[3, 2]);
        assert!(a.all_ge(&b));
        assert!(!b.all_ge(&a));
        assert!(a.all_ge_scalar(3));
        assert_eq!(b.min(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(IntVector::new(Dimension::Three, &[1, -2, 3]).to_string(), "(1,-2,3)");
    }
}
