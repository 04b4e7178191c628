// crates/af_foundation/src/dimension.rs

//! 问题维度与坐标方向
//!
//! 维度在运行时由配置决定（1D/2D/3D），所有核函数以维度为参数，
//! 而不是为每个维度写一份代码。
//!
//! ```
//! use af_foundation::dimension::{Dimension, Direction};
//!
//! let dim = Dimension::Two;
//! assert_eq!(dim.n(), 2);
//! let dirs: Vec<_> = Direction::all(dim).collect();
//! assert_eq!(dirs, vec![Direction::X, Direction::Y]);
//! assert!(!Direction::Z.exists_in(dim));
//! ```

use crate::error::{AfError, AfResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 问题维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Dimension {
    /// 一维
    One,
    /// 二维
    Two,
    /// 三维
    Three,
}

impl Dimension {
    /// 维数
    #[inline]
    pub const fn n(self) -> usize {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// 从维数创建
    pub fn from_n(n: usize) -> AfResult<Self> {
        match n {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            _ => Err(AfError::invalid_config("dim", n, "维度必须为 1、2 或 3")),
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = AfError;

    fn try_from(n: usize) -> AfResult<Self> {
        Self::from_n(n)
    }
}

impl From<Dimension> for usize {
    fn from(dim: Dimension) -> usize {
        dim.n()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.n())
    }
}

/// 坐标方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// x 方向
    X,
    /// y 方向
    Y,
    /// z 方向
    Z,
}

impl Direction {
    /// 轴编号 (x=0, y=1, z=2)
    #[inline]
    pub const fn axis(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }

    /// 从轴编号创建
    pub fn from_axis(axis: usize) -> Option<Self> {
        match axis {
            0 => Some(Direction::X),
            1 => Some(Direction::Y),
            2 => Some(Direction::Z),
            _ => None,
        }
    }

    /// 该方向在给定维度中是否存在
    #[inline]
    pub const fn exists_in(self, dim: Dimension) -> bool {
        self.axis() < dim.n()
    }

    /// 给定维度下的所有方向，按 x, y, z 顺序
    pub fn all(dim: Dimension) -> impl Iterator<Item = Direction> {
        [Direction::X, Direction::Y, Direction::Z]
            .into_iter()
            .take(dim.n())
    }

    /// 小写名称
    pub const fn name(self) -> &'static str {
        match self {
            Direction::X => "x",
            Direction::Y => "y",
            Direction::Z => "z",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
