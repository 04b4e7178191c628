// crates/af_config/src/lib.rs

//! AmrFlow Config Layer (Layer 2)
//!
//! 配置层，提供数值核函数的配置和重启数据库。
//!
//! # 模块概览
//!
//! - [`kernel_config`]: KernelConfig（维度、物种表、闭合模型、扩散通量格式）
//! - [`restart`]: RestartDatabase 键值存储
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 3: af_physics    ─> uses KernelConfig, RestartDatabase
//! Layer 2: af_config     ─> KernelConfig, RestartDatabase (本层)
//! Layer 1: af_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod kernel_config;
pub mod restart;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use error::ConfigError;
pub use kernel_config::{
    DiffusiveFluxConfig, DiffusiveFluxScheme, KernelConfig, MixingClosureModel, MixingRulesConfig,
    SpeciesProperties,
};
pub use restart::{RestartDatabase, RestartValue};
