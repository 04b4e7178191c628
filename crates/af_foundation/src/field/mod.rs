// crates/af_foundation/src/field/mod.rs

//! 结构化网格场数据
//!
//! # 模块说明
//!
//! - [`layout`]: 带幽灵层数组的布局与全局索引视图
//! - [`cell`]: 单元中心场 [`CellField`]
//! - [`staggered`]: 面心场 [`FaceField`]（轮换线性化）与边心场 [`SideField`]（自然线性化）
//! - [`ops`]: 中心位置抽象、区域计算与临时数组
//!
//! 所有数组均为 `f64`，分量主序，索引为全局索引 `[i, j, k]`（未用轴为 0）。

pub mod cell;
pub mod layout;
pub mod ops;
pub mod staggered;

pub use cell::CellField;
pub use layout::{ArrayLayout, ArrayView, ArrayViewMut};
pub use ops::{CenteredData, Centering, ScratchArray};
pub use staggered::{FaceField, SideField, StaggeredField, StaggeredOrdering};
