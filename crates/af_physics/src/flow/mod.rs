// crates/af_physics/src/flow/mod.rs

//! 流动模型
//!
//! - [`model`]: 协作接口 [`FlowModel`]、网格块与注册守卫
//! - [`tabulated`]: 表驱动的参考实现

pub mod model;
pub mod tabulated;

pub use model::{DataContext, FieldComponent, FlowModel, Patch, PatchRegistration, PerEquation};
pub use tabulated::{DiffusiveTerm, TabulatedFlowModel};
