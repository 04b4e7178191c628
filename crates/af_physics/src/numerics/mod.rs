// crates/af_physics/src/numerics/mod.rs

//! 数值方法
//!
//! - [`stencil`]: 中心差分系数与扩散通量的通量形式系数
//! - [`derivative`]: 一阶导数算子

pub mod derivative;
pub mod stencil;

pub use derivative::DerivativeOperator;
pub use stencil::{central_first_derivative, flux_stencil, FluxStencil, MAX_HALF_WIDTH};
