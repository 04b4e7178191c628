// crates/af_physics/tests/common/mod.rs

//! 集成测试共用的构造函数与测试替身

#![allow(dead_code)]

use af_foundation::prelude::*;
use af_physics::flow::{
    DataContext, FieldComponent, FlowModel, Patch, PerEquation, TabulatedFlowModel,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 以固定种子生成的随机单元场（含幽灵层）
pub fn random_field(
    name: &str,
    interior: IndexBox,
    ghosts: IntVector,
    depth: usize,
    seed: u64,
) -> CellField {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut field = CellField::new(name, interior, ghosts, depth);
    for c in 0..depth {
        field.fill_with(c, |_| rng.gen_range(0.5..1.5));
    }
    field
}

/// 两方程 2D 模型的字段索引
#[derive(Debug, Clone, Copy)]
pub struct TwoEquationIds {
    /// 速度类变量，深度 2
    pub velocity: FieldId,
    /// 扩散系数，深度 2
    pub mu: FieldId,
}

/// 两方程模型的扩散项：(方程, 通量方向, 求导方向, vel 分量, mu 分量)
///
/// 方程 1 的 x 通量与方程 0 共用 d(vel[0])/dx。
pub const TWO_EQUATION_TERMS: [(usize, Direction, Direction, usize, usize); 6] = [
    (0, Direction::X, Direction::X, 0, 0),
    (0, Direction::X, Direction::Y, 1, 1),
    (1, Direction::X, Direction::X, 0, 1),
    (0, Direction::Y, Direction::Y, 0, 0),
    (1, Direction::Y, Direction::X, 1, 0),
    (1, Direction::Y, Direction::Y, 1, 1),
];

/// 2D 两方程随机模型，扩散项见 [`TWO_EQUATION_TERMS`]
pub fn two_equation_model_2d(
    nx: i32,
    ny: i32,
    ghosts: i32,
    seed: u64,
) -> (TabulatedFlowModel, Patch, TwoEquationIds) {
    let dim = Dimension::Two;
    let interior = IndexBox::from_shape(dim, &[nx, ny]);
    let g = IntVector::uniform(dim, ghosts);
    let mut model = TabulatedFlowModel::new("two-equation", dim, 2).unwrap();
    let velocity = model.add_field(random_field("vel", interior, g, 2, seed));
    let mu = model.add_field(random_field("mu", interior, g, 2, seed + 1));

    for (eqn, d, a, var, diff) in TWO_EQUATION_TERMS {
        model
            .add_diffusive_term(
                eqn,
                d,
                a,
                FieldComponent::new(velocity, var),
                FieldComponent::new(mu, diff),
            )
            .unwrap();
    }

    let patch = Patch::new(interior, &[0.1, 0.2]).unwrap();
    (model, patch, TwoEquationIds { velocity, mu })
}

/// 故障注入位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// 不注入
    None,
    /// `register_diffusive_flux` 返回错误
    RegisterDiffusiveFlux,
    /// 查询扩散系数时返回错误
    Diffusivities,
    /// 查询变量时 panic
    PanicOnVariables,
}

/// 在指定位置失败的模型包装，记录注销次数
pub struct FaultyModel {
    /// 被包装的模型
    pub inner: TabulatedFlowModel,
    /// 故障位置
    pub fault: Fault,
    /// 注销次数
    pub unregistered: usize,
}

impl FaultyModel {
    pub fn new(inner: TabulatedFlowModel, fault: Fault) -> Self {
        Self {
            inner,
            fault,
            unregistered: 0,
        }
    }
}

impl FlowModel for FaultyModel {
    fn num_eqn(&self) -> usize {
        self.inner.num_eqn()
    }

    fn register_patch_with_data_context(
        &mut self,
        patch: &Patch,
        context: DataContext,
    ) -> AfResult<()> {
        self.inner.register_patch_with_data_context(patch, context)
    }

    fn register_diffusive_flux(&mut self, num_ghosts: &IntVector) -> AfResult<()> {
        if self.fault == Fault::RegisterDiffusiveFlux {
            return Err(AfError::internal("injected: register_diffusive_flux"));
        }
        self.inner.register_diffusive_flux(num_ghosts)
    }

    fn compute_global_derived_cell_data(&mut self) -> AfResult<()> {
        self.inner.compute_global_derived_cell_data()
    }

    fn diffusive_flux_variables_for_derivative(
        &self,
        flux_direction: Direction,
        derivative_direction: Direction,
    ) -> AfResult<PerEquation> {
        if self.fault == Fault::PanicOnVariables {
            panic!("injected panic");
        }
        self.inner
            .diffusive_flux_variables_for_derivative(flux_direction, derivative_direction)
    }

    fn diffusive_flux_diffusivities(
        &self,
        flux_direction: Direction,
        derivative_direction: Direction,
    ) -> AfResult<PerEquation> {
        if self.fault == Fault::Diffusivities {
            return Err(AfError::not_found("diffusivities"));
        }
        self.inner
            .diffusive_flux_diffusivities(flux_direction, derivative_direction)
    }

    fn cell_data(&self, id: FieldId) -> AfResult<&CellField> {
        self.inner.cell_data(id)
    }

    fn unregister_patch(&mut self) {
        self.unregistered += 1;
        self.inner.unregister_patch();
    }
}

/// 两数组的最大绝对差
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// 相邻分辨率误差比给出的观测阶
pub fn observed_orders(errors: &[f64]) -> Vec<f64> {
    errors.windows(2).map(|w| (w[0] / w[1]).log2()).collect()
}
