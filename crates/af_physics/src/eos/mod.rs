// crates/af_physics/src/eos/mod.rs

//! 状态方程
//!
//! - [`ideal_gas`]: 单一物种理想气体公式
//! - [`mixing_rules`]: 多物种混合规则（等温等压 / 等压闭合）

pub mod ideal_gas;
pub mod mixing_rules;

pub use ideal_gas::EquationOfStateIdealGas;
pub use mixing_rules::{EquationOfStateMixingRulesIdealGas, NUM_SPECIES_THERMODYNAMIC_PROPERTIES};
