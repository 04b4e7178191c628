// crates/af_foundation/src/lib.rs

//! AmrFlow Foundation Layer
//!
//! 基础层，提供数值核函数共用的抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 [`AfError`] 与 `ensure!`/`require!` 宏
//! - [`contract`]: 协作方契约检查 `contract!`，按构建模式开关
//! - [`dimension`]: 问题维度与坐标方向
//! - [`int_vector`] / [`index_box`]: 整数向量与索引盒
//! - [`index`] / [`arena`]: 带代际验证的索引与 Arena
//! - [`field`]: 带幽灵层的单元/面心/边心场
//! - [`validation`]: 配置验证报告
//!
//! # 示例
//!
//! ```
//! use af_foundation::prelude::*;
//!
//! let interior = IndexBox::from_shape(Dimension::One, &[10]);
//! let mut u = CellField::new("u", interior, IntVector::uniform(Dimension::One, 4), 1);
//! u.fill_with(0, |p| p[0] as f64);
//!
//! let mut fields: Arena<CellField, FieldTag> = Arena::new();
//! let id = fields.insert(u);
//! assert_eq!(fields[id].get([-4, 0, 0], 0), -4.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod contract;
pub mod dimension;
pub mod error;
pub mod field;
pub mod index;
pub mod index_box;
pub mod int_vector;
pub mod validation;

// 重导出常用类型
pub use arena::Arena;
pub use dimension::{Dimension, Direction};
pub use error::{AfError, AfResult};
pub use index::{FieldId, FieldTag, Idx};
pub use index_box::IndexBox;
pub use int_vector::IntVector;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::arena::Arena;
    pub use crate::dimension::{Dimension, Direction};
    pub use crate::error::{AfError, AfResult};
    pub use crate::field::{
        ArrayLayout, ArrayView, ArrayViewMut, CellField, CenteredData, Centering, FaceField,
        ScratchArray, SideField,
    };
    pub use crate::index::{FieldId, FieldTag, Idx};
    pub use crate::index_box::IndexBox;
    pub use crate::int_vector::IntVector;
    pub use crate::validation::{ValidationIssue, ValidationReport};
    pub use crate::{contract, ensure, require};
}
