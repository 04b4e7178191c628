// crates/af_physics/src/flow/tabulated.rs

//! 表驱动流动模型
//!
//! 由扩散项表驱动的 [`FlowModel`] 实现。每一项描述
//! “方程 `eqn` 在 `flux_direction` 通量中含 μ ∂v/∂x_a”，其中 v 与 μ 都是
//! Arena 中某个单元中心场的分量。派生量由调用方预先填好，
//! `compute_global_derived_cell_data` 只检查注册状态。
//!
//! ```
//! use af_foundation::prelude::*;
//! use af_physics::flow::{FieldComponent, TabulatedFlowModel};
//!
//! let cells = IndexBox::from_shape(Dimension::One, &[8]);
//! let ghosts = IntVector::uniform(Dimension::One, 6);
//! let mut model = TabulatedFlowModel::new("heat", Dimension::One, 1).unwrap();
//! let t = model.add_field(CellField::new("T", cells, ghosts, 1));
//! let kappa = model.add_field(CellField::new("kappa", cells, ghosts, 1));
//! model
//!     .add_diffusive_term(0, Direction::X, Direction::X,
//!         FieldComponent::new(t, 0), FieldComponent::new(kappa, 0))
//!     .unwrap();
//! assert_eq!(model.num_terms(), 1);
//! ```

use af_foundation::field::CellField;
use af_foundation::{contract, require, AfError, AfResult, Arena, Dimension, Direction, FieldId, FieldTag, IntVector};

use super::model::{DataContext, FieldComponent, FlowModel, Patch, PerEquation};

/// 扩散项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusiveTerm {
    /// 方程
    pub equation: usize,
    /// 通量方向
    pub flux_direction: Direction,
    /// 求导方向
    pub derivative_direction: Direction,
    /// 被求导的量
    pub variable: FieldComponent,
    /// 扩散系数
    pub diffusivity: FieldComponent,
}

#[derive(Debug, Clone)]
struct Registration {
    patch: Patch,
    context: DataContext,
    diffusive_ghosts: Option<IntVector>,
    derived_computed: bool,
}

/// 表驱动流动模型
#[derive(Debug)]
pub struct TabulatedFlowModel {
    name: String,
    dim: Dimension,
    num_eqn: usize,
    fields: Arena<CellField, FieldTag>,
    terms: Vec<DiffusiveTerm>,
    registration: Option<Registration>,
    registrations: usize,
}

impl TabulatedFlowModel {
    /// 创建空模型
    pub fn new(name: impl Into<String>, dim: Dimension, num_eqn: usize) -> AfResult<Self> {
        let name = name.into();
        if num_eqn == 0 {
            return Err(AfError::invalid_config(
                format!("{}: num_eqn", name),
                0,
                "方程数必须至少为 1",
            ));
        }
        Ok(Self {
            name,
            dim,
            num_eqn,
            fields: Arena::new(),
            terms: Vec::new(),
            registration: None,
            registrations: 0,
        })
    }

    /// 模型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 加入场，返回其索引
    pub fn add_field(&mut self, field: CellField) -> FieldId {
        self.fields.insert(field)
    }

    /// 可变访问场（用于填充数据）
    pub fn field_mut(&mut self, id: FieldId) -> AfResult<&mut CellField> {
        self.fields.try_get_mut(id)
    }

    /// 移除场；引用它的扩散项一并移除
    pub fn remove_field(&mut self, id: FieldId) -> Option<CellField> {
        let removed = self.fields.remove(id)?;
        self.terms
            .retain(|t| t.variable.field != id && t.diffusivity.field != id);
        Some(removed)
    }

    fn check_component(&self, fc: FieldComponent, role: &str) -> AfResult<()> {
        let field = self.fields.try_get(fc.field)?;
        if field.interior_box().dim() != self.dim {
            return Err(AfError::dimension_mismatch(
                format!("{}: {} '{}'", self.name, role, field.name()),
                self.dim.n(),
                field.interior_box().dim().n(),
            ));
        }
        AfError::check_index("component", fc.component, field.depth())
    }

    /// 加入扩散项
    pub fn add_diffusive_term(
        &mut self,
        equation: usize,
        flux_direction: Direction,
        derivative_direction: Direction,
        variable: FieldComponent,
        diffusivity: FieldComponent,
    ) -> AfResult<()> {
        AfError::check_index("equation", equation, self.num_eqn)?;
        for d in [flux_direction, derivative_direction] {
            if !d.exists_in(self.dim) {
                return Err(AfError::invalid_input(format!(
                    "{}: {} 方向不存在于 {} 问题",
                    self.name, d, self.dim
                )));
            }
        }
        self.check_component(variable, "variable")?;
        self.check_component(diffusivity, "diffusivity")?;
        self.terms.push(DiffusiveTerm {
            equation,
            flux_direction,
            derivative_direction,
            variable,
            diffusivity,
        });
        Ok(())
    }

    /// 扩散项数量
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// 是否处于注册状态
    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    /// 已注册的数据上下文
    pub fn registered_context(&self) -> Option<DataContext> {
        self.registration.as_ref().map(|r| r.context)
    }

    /// 累计注册次数
    pub fn registration_count(&self) -> usize {
        self.registrations
    }

    fn collect(
        &self,
        flux_direction: Direction,
        derivative_direction: Direction,
        pick: impl Fn(&DiffusiveTerm) -> FieldComponent,
    ) -> AfResult<PerEquation> {
        let registration = self.registration.as_ref().ok_or_else(|| {
            AfError::internal(format!("{}: 未注册网格块时查询扩散项", self.name))
        })?;
        contract!(
            registration.derived_computed,
            "{}: 查询扩散项前必须先计算派生量",
            self.name
        );
        let mut out = vec![Vec::new(); self.num_eqn];
        for term in self.terms.iter().filter(|t| {
            t.flux_direction == flux_direction && t.derivative_direction == derivative_direction
        }) {
            out[term.equation].push(pick(term));
        }
        Ok(out)
    }
}

impl FlowModel for TabulatedFlowModel {
    fn num_eqn(&self) -> usize {
        self.num_eqn
    }

    fn register_patch_with_data_context(
        &mut self,
        patch: &Patch,
        context: DataContext,
    ) -> AfResult<()> {
        contract!(
            self.registration.is_none(),
            "{}: 网格块已注册, 不能重复注册",
            self.name
        );
        if patch.dim() != self.dim {
            return Err(AfError::dimension_mismatch(
                format!("{}: patch", self.name),
                self.dim.n(),
                patch.dim().n(),
            ));
        }
        for (_, field) in self.fields.iter() {
            if field.interior_box() != patch.cell_box() {
                return Err(AfError::invalid_input(format!(
                    "{}: 场 '{}' 的内部盒 {} 与网格块 {} 不符",
                    self.name,
                    field.name(),
                    field.interior_box(),
                    patch.cell_box()
                )));
            }
        }
        log::debug!("{}: 注册网格块 {} ({:?})", self.name, patch.cell_box(), context);
        self.registration = Some(Registration {
            patch: patch.clone(),
            context,
            diffusive_ghosts: None,
            derived_computed: false,
        });
        self.registrations += 1;
        Ok(())
    }

    fn register_diffusive_flux(&mut self, num_ghosts: &IntVector) -> AfResult<()> {
        let registration = require!(
            self.registration.as_ref(),
            AfError::internal(format!("{}: 注册扩散通量前必须先注册网格块", self.name))
        );
        log::trace!("{}: 扩散通量需要幽灵层 {} (网格块 {})", self.name, num_ghosts, registration.patch.cell_box());
        for term in &self.terms {
            for fc in [term.variable, term.diffusivity] {
                let field = self.fields.try_get(fc.field)?;
                let ghosts = field.ghosts();
                for axis in 0..self.dim.n() {
                    if ghosts[axis] < num_ghosts[axis] {
                        return Err(AfError::insufficient_ghosts(
                            field.name(),
                            axis,
                            num_ghosts[axis],
                            ghosts[axis],
                        ));
                    }
                }
            }
        }
        if let Some(registration) = self.registration.as_mut() {
            registration.diffusive_ghosts = Some(*num_ghosts);
        }
        Ok(())
    }

    fn compute_global_derived_cell_data(&mut self) -> AfResult<()> {
        let name = &self.name;
        let registration = self.registration.as_mut().ok_or_else(|| {
            AfError::internal(format!("{}: 计算派生量前必须先注册网格块", name))
        })?;
        contract!(
            registration.diffusive_ghosts.is_some(),
            "{}: 计算派生量前必须先注册扩散通量",
            name
        );
        registration.derived_computed = true;
        Ok(())
    }

    fn diffusive_flux_variables_for_derivative(
        &self,
        flux_direction: Direction,
        derivative_direction: Direction,
    ) -> AfResult<PerEquation> {
        self.collect(flux_direction, derivative_direction, |t| t.variable)
    }

    fn diffusive_flux_diffusivities(
        &self,
        flux_direction: Direction,
        derivative_direction: Direction,
    ) -> AfResult<PerEquation> {
        self.collect(flux_direction, derivative_direction, |t| t.diffusivity)
    }

    fn cell_data(&self, id: FieldId) -> AfResult<&CellField> {
        self.fields.try_get(id)
    }

    fn unregister_patch(&mut self) {
        if self.registration.take().is_some() {
            log::debug!("{}: 注销网格块", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_foundation::IndexBox;

    fn model_1d(ghosts: i32) -> (TabulatedFlowModel, FieldId, FieldId, Patch) {
        let cells = IndexBox::from_shape(Dimension::One, &[6]);
        let g = IntVector::uniform(Dimension::One, ghosts);
        let mut model = TabulatedFlowModel::new("m", Dimension::One, 2).unwrap();
        let u = model.add_field(CellField::new("u", cells, g, 1));
        let mu = model.add_field(CellField::new("mu", cells, g, 1));
        let patch = Patch::new(cells, &[1.0]).unwrap();
        (model, u, mu, patch)
    }

    #[test]
    fn test_zero_equations_rejected() {
        assert!(TabulatedFlowModel::new("m", Dimension::One, 0).is_err());
    }

    #[test]
    fn test_term_validation() {
        let (mut model, u, mu, _) = model_1d(6);
        let v = FieldComponent::new(u, 0);
        let d = FieldComponent::new(mu, 0);
        assert!(model.add_diffusive_term(2, Direction::X, Direction::X, v, d).is_err());
        assert!(model.add_diffusive_term(0, Direction::Y, Direction::X, v, d).is_err());
        assert!(model
            .add_diffusive_term(0, Direction::X, Direction::X, FieldComponent::new(u, 1), d)
            .is_err());
        assert!(model.add_diffusive_term(1, Direction::X, Direction::X, v, d).is_ok());
    }

    #[test]
    fn test_lists_are_per_equation() {
        let (mut model, u, mu, patch) = model_1d(6);
        let v = FieldComponent::new(u, 0);
        let d = FieldComponent::new(mu, 0);
        model.add_diffusive_term(1, Direction::X, Direction::X, v, d).unwrap();

        model.register_patch_with_data_context(&patch, DataContext::Scratch).unwrap();
        model.register_diffusive_flux(&IntVector::uniform(Dimension::One, 6)).unwrap();
        model.compute_global_derived_cell_data().unwrap();
        let vars = model.diffusive_flux_variables_for_derivative(Direction::X, Direction::X).unwrap();
        let diffs = model.diffusive_flux_diffusivities(Direction::X, Direction::X).unwrap();
        assert_eq!(vars, vec![vec![], vec![v]]);
        assert_eq!(diffs, vec![vec![], vec![d]]);
        assert_eq!(model.registered_context(), Some(DataContext::Scratch));

        model.unregister_patch();
        assert!(!model.is_registered());
        assert_eq!(model.registration_count(), 1);
    }

    #[test]
    fn test_insufficient_ghosts_rejected() {
        let (mut model, u, mu, patch) = model_1d(3);
        model
            .add_diffusive_term(0, Direction::X, Direction::X, FieldComponent::new(u, 0), FieldComponent::new(mu, 0))
            .unwrap();
        model.register_patch_with_data_context(&patch, DataContext::Current).unwrap();
        let err = model
            .register_diffusive_flux(&IntVector::uniform(Dimension::One, 6))
            .unwrap_err();
        assert!(matches!(err, AfError::InsufficientGhosts { required: 6, available: 3, .. }));
    }

    #[test]
    fn test_patch_mismatch_rejected() {
        let (mut model, _, _, _) = model_1d(6);
        let other = Patch::new(IndexBox::from_shape(Dimension::One, &[7]), &[1.0]).unwrap();
        assert!(model.register_patch_with_data_context(&other, DataContext::Current).is_err());
        assert!(!model.is_registered());
    }

    #[test]
    fn test_remove_field_drops_terms() {
        let (mut model, u, mu, _) = model_1d(6);
        model
            .add_diffusive_term(0, Direction::X, Direction::X, FieldComponent::new(u, 0), FieldComponent::new(mu, 0))
            .unwrap();
        assert!(model.remove_field(mu).is_some());
        assert_eq!(model.num_terms(), 0);
        assert!(model.cell_data(mu).is_err());
        assert!(model.field_mut(u).is_ok());
    }
}
