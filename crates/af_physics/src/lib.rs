// crates/af_physics/src/lib.rs

//! AmrFlow Physics Layer
//!
//! 可压缩流动求解器的数值核函数层：
//!
//! - [`numerics`]: 中心差分系数与一阶导数算子 [`DerivativeOperator`]
//! - [`flow`]: 流动模型协作接口 [`FlowModel`] 与注册守卫
//! - [`flux`]: 扩散通量重构器 [`DiffusiveFluxReconstructor`] 与导数缓存
//! - [`eos`]: 理想气体状态方程与多物种混合规则
//!
//! # 层级架构
//!
//! ```text
//! Layer 3: af_physics    ─> DerivativeOperator, DiffusiveFluxReconstructor, EOS (本层)
//! Layer 2: af_config     ─> KernelConfig, RestartDatabase
//! Layer 1: af_foundation ─> IndexBox, CellField, FaceField, AfError
//! ```
//!
//! # 示例
//!
//! ```
//! use af_config::KernelConfig;
//! use af_physics::eos::EquationOfStateMixingRulesIdealGas;
//!
//! let eos = EquationOfStateMixingRulesIdealGas::from_config("air", &KernelConfig::default()).unwrap();
//! let t = eos.get_temperature(1.2, 101325.0, &[1.0]);
//! assert!((t - 101325.0 / (1.2 * 287.0)).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eos;
pub mod flow;
pub mod flux;
pub mod numerics;

/// 层级标识
pub const LAYER: u8 = 3;

// 重导出核心类型
pub use eos::{EquationOfStateIdealGas, EquationOfStateMixingRulesIdealGas};
pub use flow::{DataContext, FieldComponent, FlowModel, Patch, PatchRegistration, TabulatedFlowModel};
pub use flux::{DiffusiveFluxReconstructor, ReconstructionStats};
pub use numerics::DerivativeOperator;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::eos::{EquationOfStateIdealGas, EquationOfStateMixingRulesIdealGas};
    pub use crate::flow::{
        DataContext, FieldComponent, FlowModel, Patch, PatchRegistration, PerEquation,
        TabulatedFlowModel,
    };
    pub use crate::flux::{DiffusiveFluxReconstructor, ReconstructionStats};
    pub use crate::numerics::DerivativeOperator;
    pub use af_config::{DiffusiveFluxScheme, KernelConfig, MixingClosureModel, SpeciesProperties};
}
