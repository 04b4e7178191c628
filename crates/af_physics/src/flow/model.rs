// crates/af_physics/src/flow/model.rs

//! 流动模型协作接口
//!
//! 扩散通量重构器通过 [`FlowModel`] 向流动模型索取场数据。调用顺序固定：
//!
//! ```text
//! register_patch_with_data_context
//!   register_diffusive_flux(ghosts)
//!   compute_global_derived_cell_data
//!   diffusive_flux_variables_for_derivative / diffusive_flux_diffusivities / cell_data ...
//! unregister_patch
//! ```
//!
//! 注册与注销由 [`PatchRegistration`] 守卫配对，任何退出路径（包括错误返回
//! 和 panic 展开）都会注销。

use af_foundation::field::CellField;
use af_foundation::{ensure, AfError, AfResult, Dimension, Direction, FieldId, IndexBox, IntVector};
use std::ops::{Deref, DerefMut};

/// 网格块：单元盒与网格间距
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    cell_box: IndexBox,
    dx: [f64; 3],
}

impl Patch {
    /// 创建网格块，`dx` 长度必须等于维数
    pub fn new(cell_box: IndexBox, dx: &[f64]) -> AfResult<Self> {
        let n = cell_box.dim().n();
        AfError::check_size("dx", n, dx.len())?;
        ensure!(
            !cell_box.is_empty(),
            AfError::invalid_input(format!("网格块 {} 为空", cell_box))
        );
        let mut spacing = [0.0; 3];
        spacing[..n].copy_from_slice(dx);
        Ok(Self {
            cell_box,
            dx: spacing,
        })
    }

    /// 单元盒
    #[inline]
    pub fn cell_box(&self) -> IndexBox {
        self.cell_box
    }

    /// 维度
    #[inline]
    pub fn dim(&self) -> Dimension {
        self.cell_box.dim()
    }

    /// 某方向网格间距
    #[inline]
    pub fn dx(&self, direction: Direction) -> f64 {
        self.dx[direction.axis()]
    }
}

/// 数据上下文（当前时间层或 Runge-Kutta 中间层）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataContext {
    /// 当前时间层
    #[default]
    Current,
    /// 中间层
    Scratch,
}

/// 场的某个分量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldComponent {
    /// 场
    pub field: FieldId,
    /// 分量
    pub component: usize,
}

impl FieldComponent {
    /// 创建
    pub const fn new(field: FieldId, component: usize) -> Self {
        Self { field, component }
    }
}

/// 每个方程一个列表
pub type PerEquation = Vec<Vec<FieldComponent>>;

/// 流动模型协作接口
pub trait FlowModel {
    /// 方程数
    fn num_eqn(&self) -> usize;

    /// 注册网格块；失败时模型不得处于已注册状态
    fn register_patch_with_data_context(
        &mut self,
        patch: &Patch,
        context: DataContext,
    ) -> AfResult<()>;

    /// 声明扩散通量需要的派生量及其幽灵层宽度
    fn register_diffusive_flux(&mut self, num_ghosts: &IntVector) -> AfResult<()>;

    /// 计算已注册的派生量
    fn compute_global_derived_cell_data(&mut self) -> AfResult<()>;

    /// 每个方程在 `flux_direction` 通量中需要沿 `derivative_direction` 求导的 (场, 分量)
    fn diffusive_flux_variables_for_derivative(
        &self,
        flux_direction: Direction,
        derivative_direction: Direction,
    ) -> AfResult<PerEquation>;

    /// 与变量列表一一对应的扩散系数 (场, 分量)
    fn diffusive_flux_diffusivities(
        &self,
        flux_direction: Direction,
        derivative_direction: Direction,
    ) -> AfResult<PerEquation>;

    /// 取单元中心场
    fn cell_data(&self, id: FieldId) -> AfResult<&CellField>;

    /// 注销网格块，释放派生量
    fn unregister_patch(&mut self);
}

/// 网格块注册守卫，析构时注销
pub struct PatchRegistration<'a, M: FlowModel + ?Sized> {
    model: &'a mut M,
}

impl<'a, M: FlowModel + ?Sized> PatchRegistration<'a, M> {
    /// 注册网格块；注册失败则不产生守卫
    pub fn register(model: &'a mut M, patch: &Patch, context: DataContext) -> AfResult<Self> {
        model.register_patch_with_data_context(patch, context)?;
        Ok(Self { model })
    }
}

impl<M: FlowModel + ?Sized> Deref for PatchRegistration<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        &*self.model
    }
}

impl<M: FlowModel + ?Sized> DerefMut for PatchRegistration<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut *self.model
    }
}

impl<M: FlowModel + ?Sized> Drop for PatchRegistration<'_, M> {
    fn drop(&mut self) {
        self.model.unregister_patch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_new() {
        let b = IndexBox::from_shape(Dimension::Two, &[4, 4]);
        let patch = Patch::new(b, &[0.1, 0.2]).unwrap();
        assert_eq!(patch.dx(Direction::Y), 0.2);
        assert_eq!(patch.dim(), Dimension::Two);
        assert!(Patch::new(b, &[0.1]).is_err());
        assert!(Patch::new(IndexBox::empty(Dimension::Two), &[0.1, 0.1]).is_err());
    }
}
