// crates/af_physics/src/flux/mod.rs

//! 通量重构
//!
//! - [`diffusive`]: 高阶中心格式扩散通量重构器
//! - [`cache`]: 方向块内的导数缓存

pub mod cache;
pub mod diffusive;

pub use cache::{DerivativeCache, DerivativeKey};
pub use diffusive::{DiffusiveFluxReconstructor, ReconstructionStats, RESTART_KEY};
