// crates/af_physics/src/flux/diffusive.rs

//! 扩散通量重构器
//!
//! # 算法
//!
//! 对每个通量方向 d：
//!
//! 1. 对每个求导方向 a，向流动模型索取各方程的 (变量, 扩散系数) 列表；
//! 2. 每个不同的 (场, 分量) 沿 a 求导一次，区域为内部盒沿 d 扩展 w 层；
//! 3. 用通量形式系数累加到面通量：
//!
//! ```text
//! F_d[eqn](i) += dt · μ(i) · Σ_{m=0..w-1} b_m (D[i-1-m] + D[i+m])
//! ```
//!
//! 面 `i` 位于单元 `i-1` 与 `i` 之间，μ 取单元 `i` 的值。`b_m` 使通量差分
//! `(F(i+1) - F(i)) / h` 具有 `2w` 阶精度；单个面值本身只有二阶精度。
//!
//! 网格块的注册由 [`PatchRegistration`] 守卫，错误返回或 panic 时同样注销。

use af_config::{DiffusiveFluxScheme, KernelConfig, RestartDatabase};
use af_foundation::field::{ArrayView, ArrayViewMut, CellField, FaceField};
use af_foundation::{contract, AfError, AfResult, Dimension, Direction, IndexBox, IntVector};
use std::io::{self, Write};

use super::cache::{DerivativeCache, DerivativeKey};
use crate::flow::{DataContext, FlowModel, Patch, PatchRegistration, PerEquation};
use crate::numerics::{flux_stencil, DerivativeOperator, FluxStencil};

/// 重启数据库中的格式键
pub const RESTART_KEY: &str = "d_diffusive_flux_reconstructor";

/// 一次重构的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionStats {
    /// 实际求导次数
    pub derivatives_computed: usize,
    /// 缓存命中次数
    pub derivatives_reused: usize,
}

/// 扩散通量重构器
#[derive(Debug, Clone)]
pub struct DiffusiveFluxReconstructor {
    object_name: String,
    dim: Dimension,
    num_eqn: usize,
    scheme: DiffusiveFluxScheme,
    stencil: FluxStencil,
    derivatives: Vec<DerivativeOperator>,
}

impl DiffusiveFluxReconstructor {
    /// 创建重构器
    pub fn new(
        object_name: impl Into<String>,
        dim: Dimension,
        num_eqn: usize,
        scheme: DiffusiveFluxScheme,
    ) -> AfResult<Self> {
        let object_name = object_name.into();
        if num_eqn == 0 {
            return Err(AfError::invalid_config(
                format!("{}: num_eqn", object_name),
                num_eqn,
                "方程数必须至少为 1",
            ));
        }
        let stencil = flux_stencil(scheme);
        let derivatives = Direction::all(dim)
            .map(|d| {
                DerivativeOperator::new(
                    format!("{}::first derivative {}", object_name, d),
                    dim,
                    d,
                    stencil.half_width,
                )
            })
            .collect::<AfResult<Vec<_>>>()?;
        log::debug!(
            "{}: 创建 {} 扩散通量重构器 ({}, {} 个方程, 幽灵层 {})",
            object_name,
            scheme,
            dim,
            num_eqn,
            stencil.num_ghosts
        );
        Ok(Self {
            object_name,
            dim,
            num_eqn,
            scheme,
            stencil,
            derivatives,
        })
    }

    /// 从配置创建
    pub fn from_config(
        object_name: impl Into<String>,
        config: &KernelConfig,
        num_eqn: usize,
    ) -> AfResult<Self> {
        config.validate()?;
        Self::new(object_name, config.dim, num_eqn, config.diffusive_flux.scheme)
    }

    /// 对象名称
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// 维度
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// 方程数
    pub fn num_eqn(&self) -> usize {
        self.num_eqn
    }

    /// 格式
    pub fn scheme(&self) -> DiffusiveFluxScheme {
        self.scheme
    }

    /// 输入数据所需的幽灵层宽度
    pub fn num_diffusive_ghosts(&self) -> IntVector {
        IntVector::uniform(self.dim, self.stencil.num_ghosts as i32)
    }

    /// 输出可读的对象摘要
    pub fn print_class_data<W: Write>(&self, os: &mut W) -> io::Result<()> {
        writeln!(os)?;
        writeln!(os, "Print DiffusiveFluxReconstructor object...")?;
        writeln!(os)?;
        writeln!(os, "d_object_name = {}", self.object_name)?;
        writeln!(os, "d_dim = {}", self.dim)?;
        writeln!(os, "d_num_eqn = {}", self.num_eqn)?;
        writeln!(os, "d_scheme = {}", self.scheme)?;
        writeln!(os, "d_num_diff_ghosts = {}", self.num_diffusive_ghosts())?;
        writeln!(os, "d_face_weights = {:?}", self.stencil.face_weights)
    }

    /// 把格式标签写入重启数据库
    pub fn put_to_restart(&self, restart_db: &mut RestartDatabase) {
        restart_db.put_string(RESTART_KEY, self.scheme.tag());
    }

    /// 计算扩散通量，覆盖 `flux` 的全部内容
    #[allow(clippy::too_many_arguments)]
    pub fn compute_diffusive_fluxes<M: FlowModel + ?Sized>(
        &self,
        patch: &Patch,
        time: f64,
        dt: f64,
        stage: usize,
        flux: &mut FaceField,
        model: &mut M,
        context: DataContext,
    ) -> AfResult<()> {
        self.compute_diffusive_fluxes_with_stats(patch, time, dt, stage, flux, model, context)
            .map(|_| ())
    }

    /// 同 [`compute_diffusive_fluxes`](Self::compute_diffusive_fluxes)，并返回求导统计
    #[allow(clippy::too_many_arguments)]
    pub fn compute_diffusive_fluxes_with_stats<M: FlowModel + ?Sized>(
        &self,
        patch: &Patch,
        time: f64,
        dt: f64,
        stage: usize,
        flux: &mut FaceField,
        model: &mut M,
        context: DataContext,
    ) -> AfResult<ReconstructionStats> {
        let interior = patch.cell_box();

        contract!(
            patch.dim() == self.dim,
            "{}: 网格块维度 {} 与重构器维度 {} 不符",
            self.object_name,
            patch.dim(),
            self.dim
        );
        contract!(
            flux.ghosts() == IntVector::zero(self.dim),
            "{}: 通量 '{}' 不应有幽灵层, 实际 {}",
            self.object_name,
            flux.name(),
            flux.ghosts()
        );
        contract!(
            flux.depth() == self.num_eqn,
            "{}: 通量 '{}' 深度 {} 与方程数 {} 不符",
            self.object_name,
            flux.name(),
            flux.depth(),
            self.num_eqn
        );
        contract!(
            flux.cell_box() == interior,
            "{}: 通量 '{}' 的单元盒 {} 与网格块 {} 不符",
            self.object_name,
            flux.name(),
            flux.cell_box(),
            interior
        );

        flux.fill(0.0);

        let mut registration = PatchRegistration::register(model, patch, context)?;
        if registration.num_eqn() != self.num_eqn {
            return Err(AfError::dimension_mismatch(
                format!("{}: 流动模型方程数", self.object_name),
                self.num_eqn,
                registration.num_eqn(),
            ));
        }
        registration.register_diffusive_flux(&self.num_diffusive_ghosts())?;
        registration.compute_global_derived_cell_data()?;
        let model: &M = &registration;

        log::trace!(
            "{}: 网格块 {} t={} dt={} stage={}",
            self.object_name,
            interior,
            time,
            dt,
            stage
        );

        let w = self.stencil.half_width as i32;
        let mut cache = DerivativeCache::new();

        for d in Direction::all(self.dim) {
            let axis_d = d.axis();
            let domain = interior.grow_along(axis_d, w);
            let derivative_ghosts = IntVector::unit(self.dim, axis_d, w);
            let face_box = interior.extend_upper(axis_d, 1);

            // (变量, 扩散系数) 列表，按求导方向
            let mut terms: Vec<(Direction, PerEquation, PerEquation)> = Vec::new();
            for a in Direction::all(self.dim) {
                let variables = model.diffusive_flux_variables_for_derivative(d, a)?;
                let diffusivities = model.diffusive_flux_diffusivities(d, a)?;
                self.check_term_lists(d, a, &variables, &diffusivities);

                let operator = &self.derivatives[a.axis()];
                let dx = patch.dx(a);
                for var in variables.iter().flatten() {
                    let key = DerivativeKey::new(var.field, var.component, a);
                    cache.get_or_compute(key, || {
                        let data = model.cell_data(var.field)?;
                        let mut derivative = CellField::new(
                            format!("d({}[{}])/d{}", data.name(), var.component, a),
                            interior,
                            derivative_ghosts,
                            1,
                        );
                        operator.compute_derivative(
                            &mut derivative,
                            data,
                            dx,
                            &domain,
                            0,
                            var.component,
                        );
                        Ok::<_, AfError>(derivative)
                    })?;
                }
                terms.push((a, variables, diffusivities));
            }

            for eqn in 0..self.num_eqn {
                let mut out = flux.view_mut(d, eqn);
                for (a, variables, diffusivities) in &terms {
                    for (var, diff) in variables[eqn].iter().zip(&diffusivities[eqn]) {
                        let key = DerivativeKey::new(var.field, var.component, *a);
                        let derivative = cache.get(&key).ok_or_else(|| {
                            AfError::internal(format!(
                                "{}: 缺少导数 {:?}",
                                self.object_name, key
                            ))
                        })?;
                        let mu = model.cell_data(diff.field)?;
                        contract!(
                            diff.component < mu.depth(),
                            "{}: 扩散系数分量 {} 超出 '{}' 的深度 {}",
                            self.object_name,
                            diff.component,
                            mu.name(),
                            mu.depth()
                        );
                        contract!(
                            mu.ghost_box().contains(&face_box),
                            "{}: 扩散系数 '{}' 的幽灵盒 {} 不覆盖 {} 面 {}",
                            self.object_name,
                            mu.name(),
                            mu.ghost_box(),
                            d,
                            face_box
                        );
                        accumulate_face_flux(
                            &mut out,
                            &derivative.view(0),
                            &mu.view(diff.component),
                            &face_box,
                            axis_d,
                            self.stencil.face_weights,
                            dt,
                        );
                    }
                }
            }

            log::debug!(
                "{}: {} 方向通量完成, 缓存 {} 个导数",
                self.object_name,
                d,
                cache.len()
            );
            cache.clear();
        }

        Ok(ReconstructionStats {
            derivatives_computed: cache.computed(),
            derivatives_reused: cache.reused(),
        })
    }

    fn check_term_lists(
        &self,
        d: Direction,
        a: Direction,
        variables: &PerEquation,
        diffusivities: &PerEquation,
    ) {
        contract!(
            variables.len() == self.num_eqn && diffusivities.len() == self.num_eqn,
            "{}: ({}, {}) 的变量/扩散系数列表长度 {}/{} 与方程数 {} 不符",
            self.object_name,
            d,
            a,
            variables.len(),
            diffusivities.len(),
            self.num_eqn
        );
        for (eqn, (v, mu)) in variables.iter().zip(diffusivities).enumerate() {
            contract!(
                v.len() == mu.len(),
                "{}: 方程 {} 在 ({}, {}) 的变量数 {} 与扩散系数数 {} 不符",
                self.object_name,
                eqn,
                d,
                a,
                v.len(),
                mu.len()
            );
        }
    }
}

/// 按通量形式系数累加面通量，逐行遍历面盒
///
/// `out` 是法向 `axis` 的面数组，`derivative` 与 `mu` 是单元中心数组。
fn accumulate_face_flux(
    out: &mut ArrayViewMut<'_>,
    derivative: &ArrayView<'_>,
    mu: &ArrayView<'_>,
    face_box: &IndexBox,
    axis: usize,
    weights: &[f64],
    dt: f64,
) {
    let out_layout = out.layout();
    let d_layout = derivative.layout();
    let mu_layout = mu.layout();
    let s = d_layout.stride(axis);
    let (out_step, d_step, mu_step) = (
        out_layout.stride(0),
        d_layout.stride(0),
        mu_layout.stride(0),
    );
    let dd = derivative.as_slice();
    let mm = mu.as_slice();

    face_box.for_each_row(|start, len| {
        let mut i_out = out_layout.offset(start);
        let mut i_d = d_layout.offset(start);
        let mut i_mu = mu_layout.offset(start);
        for _ in 0..len {
            let mut face = 0.0;
            for (m, &b) in weights.iter().enumerate() {
                face += b * (dd[i_d - (m + 1) * s] + dd[i_d + m * s]);
            }
            *out.at_mut(i_out) += dt * mm[i_mu] * face;
            i_out += out_step;
            i_d += d_step;
            i_mu += mu_step;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FieldComponent, TabulatedFlowModel};

    fn setup_1d(
        scheme: DiffusiveFluxScheme,
        n: i32,
    ) -> (DiffusiveFluxReconstructor, TabulatedFlowModel, Patch, FaceField) {
        let dim = Dimension::One;
        let cells = IndexBox::from_shape(dim, &[n]);
        let rec = DiffusiveFluxReconstructor::new("rec", dim, 1, scheme).unwrap();
        let ghosts = rec.num_diffusive_ghosts();
        let mut model = TabulatedFlowModel::new("model", dim, 1).unwrap();
        let mut u = CellField::new("u", cells, ghosts, 1);
        u.fill_with(0, |p| 2.0 * p[0] as f64);
        let mut mu = CellField::new("mu", cells, ghosts, 1);
        mu.fill(0.5);
        let u = model.add_field(u);
        let mu = model.add_field(mu);
        model
            .add_diffusive_term(
                0,
                Direction::X,
                Direction::X,
                FieldComponent::new(u, 0),
                FieldComponent::new(mu, 0),
            )
            .unwrap();
        let patch = Patch::new(cells, &[1.0]).unwrap();
        let flux = FaceField::new("flux", cells, IntVector::zero(dim), 1);
        (rec, model, patch, flux)
    }

    #[test]
    fn test_ghosts_per_scheme() {
        for (scheme, g) in [
            (DiffusiveFluxScheme::SecondOrder, 2),
            (DiffusiveFluxScheme::FourthOrder, 4),
            (DiffusiveFluxScheme::SixthOrder, 6),
        ] {
            let rec = DiffusiveFluxReconstructor::new("r", Dimension::Two, 3, scheme).unwrap();
            assert_eq!(rec.num_diffusive_ghosts().to_array(), [g, g, 0]);
        }
        assert!(DiffusiveFluxReconstructor::new("r", Dimension::One, 0, Default::default()).is_err());
    }

    #[test]
    fn test_linear_profile_constant_flux() {
        for scheme in DiffusiveFluxScheme::ALL {
            let (rec, mut model, patch, mut flux) = setup_1d(scheme, 8);
            rec.compute_diffusive_fluxes(&patch, 0.0, 0.1, 0, &mut flux, &mut model, DataContext::Current)
                .unwrap();
            // dt · μ · du/dx = 0.1 · 0.5 · 2
            for i in 0..=8 {
                let f = flux.get(Direction::X, [i, 0, 0], 0);
                assert!((f - 0.1).abs() < 1e-12, "{} face {}: {}", scheme, i, f);
            }
            assert!(!model.is_registered());
        }
    }

    #[test]
    fn test_flux_is_overwritten() {
        let (rec, mut model, patch, mut flux) = setup_1d(DiffusiveFluxScheme::SecondOrder, 4);
        flux.fill(99.0);
        rec.compute_diffusive_fluxes(&patch, 0.0, 1.0, 0, &mut flux, &mut model, DataContext::Current)
            .unwrap();
        assert!((flux.get(Direction::X, [0, 0, 0], 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_restart_and_print() {
        let rec =
            DiffusiveFluxReconstructor::new("rec", Dimension::Two, 4, DiffusiveFluxScheme::SixthOrder)
                .unwrap();
        let mut db = RestartDatabase::new();
        rec.put_to_restart(&mut db);
        assert_eq!(db.get_string(RESTART_KEY).unwrap(), "SIXTH_ORDER");

        let mut out = Vec::new();
        rec.print_class_data(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("d_object_name = rec"));
        assert!(text.contains("SIXTH_ORDER"));
    }

    #[test]
    fn test_from_config() {
        let mut config = KernelConfig {
            dim: Dimension::Three,
            diffusive_flux: af_config::DiffusiveFluxConfig {
                scheme: DiffusiveFluxScheme::FourthOrder,
            },
            ..Default::default()
        };
        let rec = DiffusiveFluxReconstructor::from_config("rec", &config, 5).unwrap();
        assert_eq!(rec.scheme(), DiffusiveFluxScheme::FourthOrder);
        assert_eq!(rec.num_diffusive_ghosts().to_array(), [4, 4, 4]);

        config.num_species = 0;
        assert!(DiffusiveFluxReconstructor::from_config("rec", &config, 5).is_err());
    }
}
