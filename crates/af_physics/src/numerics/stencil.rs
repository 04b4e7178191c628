// crates/af_physics/src/numerics/stencil.rs

//! 有限差分模板系数
//!
//! # 一阶导数（中心差分）
//!
//! ```text
//! ∂u/∂x ≈ (1/h) Σ_{m=1..w} a_m (u[+m] - u[-m])
//! ```
//!
//! | 半宽 w | 精度 | a_1 | a_2 | a_3 | a_4 |
//! |---|---|---|---|---|---|
//! | 1 | 2 | 1/2 | | | |
//! | 2 | 4 | 2/3 | -1/12 | | |
//! | 3 | 6 | 3/4 | -3/20 | 1/60 | |
//! | 4 | 8 | 4/5 | -1/5 | 4/105 | -1/280 |
//!
//! # 通量形式系数
//!
//! 面 `i` 位于单元 `i-1` 与 `i` 之间：
//!
//! ```text
//! F(i) = Σ_{m=0..w-1} b_m (D[i-1-m] + D[i+m])
//! ```
//!
//! `b_m` 是守恒通量形式的系数，不是逐点插值：单个面值 `F(i)` 只以二阶逼近
//! 面上的 D，而差分 `(F(i+1) - F(i)) / h` 以 `2w` 阶逼近 `∂D/∂x`。
//! D 为一阶导数时，该差分即 `2w` 阶的二阶导数。

use af_config::DiffusiveFluxScheme;

/// 支持的最大半宽
pub const MAX_HALF_WIDTH: usize = 4;

const CENTRAL_W1: [f64; 1] = [1.0 / 2.0];
const CENTRAL_W2: [f64; 2] = [2.0 / 3.0, -1.0 / 12.0];
const CENTRAL_W3: [f64; 3] = [3.0 / 4.0, -3.0 / 20.0, 1.0 / 60.0];
const CENTRAL_W4: [f64; 4] = [4.0 / 5.0, -1.0 / 5.0, 4.0 / 105.0, -1.0 / 280.0];

const FACE_SECOND: [f64; 1] = [1.0 / 2.0];
const FACE_FOURTH: [f64; 2] = [7.0 / 12.0, -1.0 / 12.0];
const FACE_SIXTH: [f64; 3] = [37.0 / 60.0, -2.0 / 15.0, 1.0 / 60.0];

/// 半宽为 `half_width` 的中心一阶导数系数，超出 1..=4 返回 `None`
pub fn central_first_derivative(half_width: usize) -> Option<&'static [f64]> {
    match half_width {
        1 => Some(&CENTRAL_W1),
        2 => Some(&CENTRAL_W2),
        3 => Some(&CENTRAL_W3),
        4 => Some(&CENTRAL_W4),
        _ => None,
    }
}

/// 扩散通量格式的模板参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxStencil {
    /// 导数与通量系数共同的半宽
    pub half_width: usize,
    /// 通量形式系数 `b_0..b_{w-1}`
    pub face_weights: &'static [f64],
    /// 导数输入所需幽灵层（导数半宽 + 通量系数半宽）
    pub num_ghosts: usize,
}

/// 扩散通量格式对应的模板
pub fn flux_stencil(scheme: DiffusiveFluxScheme) -> FluxStencil {
    let face_weights: &'static [f64] = match scheme {
        DiffusiveFluxScheme::SecondOrder => &FACE_SECOND,
        DiffusiveFluxScheme::FourthOrder => &FACE_FOURTH,
        DiffusiveFluxScheme::SixthOrder => &FACE_SIXTH,
    };
    let half_width = face_weights.len();
    FluxStencil {
        half_width,
        face_weights,
        num_ghosts: 2 * half_width,
    }
}
