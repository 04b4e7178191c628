// crates/af_physics/src/numerics/derivative.rs

//! 一阶导数算子
//!
//! # 模块说明
//!
//! [`DerivativeOperator`] 对单元中心场的一个分量沿固定方向做中心差分，
//! 写入另一单元中心场的一个分量。算子只保存方向、半宽和系数，
//! 按 (方向, 精度) 各创建一次，反复使用。
//!
//! 1D/2D/3D 与 x/y/z 共用同一个模板例程：沿导数轴的偏移只是该轴的步长。
//!
//! # 前置条件
//!
//! 协作方违约由 `contract!` 检查（见 `af_foundation::contract`）：
//!
//! - 分量下标在深度范围内，两场内部盒相同
//! - 未指定区域时：沿导数方向 `ghost(data) - ghost(derivative) >= w`
//! - 指定区域时：数据幽灵盒沿导数方向收缩 `w` 后、导数幽灵盒都包含该区域

use af_foundation::field::{ArrayView, ArrayViewMut, CellField};
use af_foundation::{contract, AfError, AfResult, Dimension, Direction, IndexBox, IntVector};

use super::stencil::central_first_derivative;

/// 一阶导数算子
#[derive(Debug, Clone)]
pub struct DerivativeOperator {
    object_name: String,
    dim: Dimension,
    direction: Direction,
    half_width: usize,
    coefficients: &'static [f64],
}

impl DerivativeOperator {
    /// 创建算子
    ///
    /// # 错误
    ///
    /// - 半宽不在 1..=4
    /// - 方向不存在于问题维度
    pub fn new(
        object_name: impl Into<String>,
        dim: Dimension,
        direction: Direction,
        num_ghosts: usize,
    ) -> AfResult<Self> {
        let object_name = object_name.into();
        let coefficients = central_first_derivative(num_ghosts).ok_or_else(|| {
            AfError::invalid_config(
                format!("{}: num_derivative_ghosts", object_name),
                num_ghosts,
                "一阶导数模板半宽必须在 1..=4",
            )
        })?;
        if !direction.exists_in(dim) {
            return Err(AfError::config(format!(
                "{}: {} 方向导数不适用于 {} 问题",
                object_name, direction, dim
            )));
        }
        log::debug!(
            "{}: 创建 {} 方向 {} 阶导数算子",
            object_name,
            direction,
            2 * num_ghosts
        );
        Ok(Self {
            object_name,
            dim,
            direction,
            half_width: num_ghosts,
            coefficients,
        })
    }

    /// 对象名称
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// 维度
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// 导数方向
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 模板半宽
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// 精度阶数 `2w`
    pub fn order_of_accuracy(&self) -> usize {
        2 * self.half_width
    }

    /// 模板系数 `a_1..a_w`
    pub fn coefficients(&self) -> &'static [f64] {
        self.coefficients
    }

    /// 数据场相对导数区域所需的幽灵层（仅导数方向非零）
    pub fn required_ghosts(&self) -> IntVector {
        IntVector::unit(self.dim, self.direction.axis(), self.half_width as i32)
    }

    /// 计算 `∂u/∂x_d`
    ///
    /// - `derivative`: 输出场，写入分量 `depth_derivative`
    /// - `data`: 输入场，读取分量 `depth_data`
    /// - `dx`: 导数方向网格间距
    /// - `domain`: 计算区域；空盒表示输出场整个幽灵盒
    ///
    /// 只写入区域内的点。NaN/Inf 原样传播。
    pub fn compute_derivative(
        &self,
        derivative: &mut CellField,
        data: &CellField,
        dx: f64,
        domain: &IndexBox,
        depth_derivative: usize,
        depth_data: usize,
    ) {
        let axis = self.direction.axis();
        let w = self.half_width as i32;

        contract!(
            data.interior_box().dim() == self.dim && derivative.interior_box().dim() == self.dim,
            "{}: 场维度与算子维度 {} 不符",
            self.object_name,
            self.dim
        );
        contract!(
            depth_derivative < derivative.depth(),
            "{}: 导数分量 {} 超出 '{}' 的深度 {}",
            self.object_name,
            depth_derivative,
            derivative.name(),
            derivative.depth()
        );
        contract!(
            depth_data < data.depth(),
            "{}: 数据分量 {} 超出 '{}' 的深度 {}",
            self.object_name,
            depth_data,
            data.name(),
            data.depth()
        );
        contract!(
            data.interior_box() == derivative.interior_box(),
            "{}: '{}' 与 '{}' 内部盒不同",
            self.object_name,
            data.name(),
            derivative.name()
        );

        let region = if domain.is_empty() {
            contract!(
                data.ghosts()[axis] - derivative.ghosts()[axis] >= w,
                "{}: '{}' 沿 {} 的幽灵层 {} 比 '{}' 的 {} 至少多 {}",
                self.object_name,
                data.name(),
                self.direction,
                data.ghosts()[axis],
                derivative.name(),
                derivative.ghosts()[axis],
                w
            );
            contract!(
                data.ghosts().all_ge(&derivative.ghosts()),
                "{}: '{}' 的幽灵层 {} 小于 '{}' 的 {}",
                self.object_name,
                data.name(),
                data.ghosts(),
                derivative.name(),
                derivative.ghosts()
            );
            derivative.ghost_box()
        } else {
            contract!(
                data.ghost_box().grow_along(axis, -w).contains(domain),
                "{}: '{}' 的幽灵盒 {} 不足以在区域 {} 上使用半宽 {} 的模板",
                self.object_name,
                data.name(),
                data.ghost_box(),
                domain,
                w
            );
            contract!(
                derivative.ghost_box().contains(domain),
                "{}: '{}' 的幽灵盒 {} 不包含区域 {}",
                self.object_name,
                derivative.name(),
                derivative.ghost_box(),
                domain
            );
            *domain
        };

        log::trace!(
            "{}: d({}[{}])/d{} 区域 {}",
            self.object_name,
            data.name(),
            depth_data,
            self.direction,
            region
        );

        let src = data.view(depth_data);
        let mut dst = derivative.view_mut(depth_derivative);
        apply_central_stencil(&mut dst, &src, &region, axis, self.coefficients, dx);
    }
}

/// 沿 `axis` 的中心差分模板，逐行遍历区域
///
/// 同一例程覆盖所有维度与方向：模板偏移为 `m * stride(axis)`。
pub(crate) fn apply_central_stencil(
    dst: &mut ArrayViewMut<'_>,
    src: &ArrayView<'_>,
    region: &IndexBox,
    axis: usize,
    coefficients: &[f64],
    dx: f64,
) {
    let src_layout = src.layout();
    let dst_layout = dst.layout();
    let s = src_layout.stride(axis);
    let src_step = src_layout.stride(0);
    let dst_step = dst_layout.stride(0);
    let u = src.as_slice();

    region.for_each_row(|start, len| {
        let mut i_src = src_layout.offset(start);
        let mut i_dst = dst_layout.offset(start);
        for _ in 0..len {
            let mut acc = 0.0;
            for (m, &c) in coefficients.iter().enumerate() {
                let off = (m + 1) * s;
                acc += c * (u[i_src + off] - u[i_src - off]);
            }
            *dst.at_mut(i_dst) = acc / dx;
            i_src += src_step;
            i_dst += dst_step;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_1d(n: i32, ghosts: i32) -> CellField {
        let b = IndexBox::from_shape(Dimension::One, &[n]);
        CellField::new("u", b, IntVector::uniform(Dimension::One, ghosts), 1)
    }

    #[test]
    fn test_construction_errors() {
        assert!(DerivativeOperator::new("d", Dimension::Two, Direction::X, 0).is_err());
        assert!(DerivativeOperator::new("d", Dimension::Two, Direction::X, 5).is_err());
        let err = DerivativeOperator::new("d", Dimension::Two, Direction::Z, 2).unwrap_err();
        assert!(err.is_config());
        let op = DerivativeOperator::new("d", Dimension::Three, Direction::Z, 3).unwrap();
        assert_eq!(op.order_of_accuracy(), 6);
        assert_eq!(op.required_ghosts().to_array(), [0, 0, 3]);
    }

    #[test]
    fn test_linear_function_second_order() {
        let op = DerivativeOperator::new("d", Dimension::One, Direction::X, 1).unwrap();
        let mut u = field_1d(5, 1);
        u.fill_with(0, |p| 3.0 * p[0] as f64 * 0.5);
        let mut du = field_1d(5, 0);
        op.compute_derivative(&mut du, &u, 0.5, &IndexBox::empty(Dimension::One), 0, 0);
        for i in 0..5 {
            assert!((du.get([i, 0, 0], 0) - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_writes_only_inside_domain() {
        let op = DerivativeOperator::new("d", Dimension::One, Direction::X, 2).unwrap();
        let mut u = field_1d(6, 2);
        u.fill_with(0, |p| p[0] as f64);
        let mut du = field_1d(6, 0);
        du.fill(-7.0);
        let domain = IndexBox::from_bounds(Dimension::One, &[2], &[3]);
        op.compute_derivative(&mut du, &u, 1.0, &domain, 0, 0);
        assert_eq!(du.get([1, 0, 0], 0), -7.0);
        assert!((du.get([2, 0, 0], 0) - 1.0).abs() < 1e-14);
        assert!((du.get([3, 0, 0], 0) - 1.0).abs() < 1e-14);
        assert_eq!(du.get([4, 0, 0], 0), -7.0);
    }

    #[test]
    fn test_nan_propagates() {
        let op = DerivativeOperator::new("d", Dimension::One, Direction::X, 1).unwrap();
        let mut u = field_1d(3, 1);
        u.set([1, 0, 0], 0, f64::NAN);
        let mut du = field_1d(3, 0);
        op.compute_derivative(&mut du, &u, 1.0, &IndexBox::empty(Dimension::One), 0, 0);
        assert!(du.get([0, 0, 0], 0).is_nan());
        assert!(du.get([2, 0, 0], 0).is_nan());
        assert_eq!(du.get([1, 0, 0], 0), 0.0);
    }

    #[test]
    fn test_y_direction_in_2d() {
        let b = IndexBox::from_shape(Dimension::Two, &[3, 4]);
        let op = DerivativeOperator::new("d", Dimension::Two, Direction::Y, 2).unwrap();
        let mut u = CellField::new("u", b, IntVector::new(Dimension::Two, &[0, 2]), 1);
        u.fill_with(0, |p| (p[0] * p[0]) as f64 + 2.0 * p[1] as f64);
        let mut du = CellField::new("du", b, IntVector::zero(Dimension::Two), 1);
        op.compute_derivative(&mut du, &u, 1.0, &IndexBox::empty(Dimension::Two), 0, 0);
        b.for_each_point(|p| assert!((du.get(p, 0) - 2.0).abs() < 1e-12));
    }

    #[test]
    #[cfg_attr(not(any(debug_assertions, feature = "checked")), ignore)]
    #[should_panic(expected = "契约违反")]
    fn test_insufficient_ghosts_is_contract_violation() {
        let op = DerivativeOperator::new("d", Dimension::One, Direction::X, 3).unwrap();
        let u = field_1d(8, 2);
        let mut du = field_1d(8, 0);
        op.compute_derivative(&mut du, &u, 1.0, &IndexBox::empty(Dimension::One), 0, 0);
    }
}
