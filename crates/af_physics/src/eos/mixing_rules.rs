// crates/af_physics/src/eos/mixing_rules.rs

//! 多物种理想气体混合规则
//!
//! # 闭合模型
//!
//! 等温等压平衡（质量分数 Y）：
//!
//! ```text
//! c_p = Σ Y_s c_p,s    c_v = Σ Y_s c_v,s    R = c_p - c_v    γ = c_p / c_v
//! ```
//!
//! 等压平衡（体积分数 Z）：
//!
//! ```text
//! 1 / (γ - 1) = Σ Z_s / (γ_s - 1)
//! ```
//!
//! 分数可给 N 个或 N-1 个，后者最后一个物种取 `1 - Σ`。N = 1 时不读分数，
//! 直接使用该物种的性质。不检查分数和为 1，不截断。
//!
//! # 批量计算
//!
//! `compute_*` 在单元或边心数据上逐点求值。`domain` 为单元索引空间的区域，
//! 边心数据沿法向上界加一；空盒表示输出数组的整个幽灵盒。
//! 混合物性质先写入只覆盖该区域的临时数组，再代入理想气体公式。

use af_config::{KernelConfig, MixingClosureModel, RestartDatabase, SpeciesProperties};
use af_foundation::field::ops::{check_covers, evaluation_region};
use af_foundation::field::{ArrayView, CenteredData, Centering, ScratchArray};
use af_foundation::{contract, AfError, AfResult, Dimension, IndexBox};
use std::io::{self, Write};

use super::ideal_gas::{EquationOfStateIdealGas, GAMMA};

/// 每个物种的热力学性质数 `[γ, R, c_p, c_v]`
pub const NUM_SPECIES_THERMODYNAMIC_PROPERTIES: usize = 4;

/// 分数的类型
#[derive(Clone, Copy)]
enum Fractions<'a> {
    Mass(Option<&'a dyn CenteredData>),
    Volume(Option<&'a dyn CenteredData>),
}

/// 区域上的混合物性质
enum MixtureScratch {
    /// N = 1 或常数性质
    Uniform(Vec<f64>),
    /// 每个性质一个临时数组
    Field(Vec<ScratchArray>),
}

impl MixtureScratch {
    #[inline]
    fn load<'b>(&self, point: [i32; 3], buf: &'b mut [f64; 4]) -> &'b [f64] {
        match self {
            MixtureScratch::Uniform(values) => {
                buf[..values.len()].copy_from_slice(values);
                &buf[..values.len()]
            }
            MixtureScratch::Field(arrays) => {
                for (k, a) in arrays.iter().enumerate() {
                    buf[k] = a.get(point);
                }
                &buf[..arrays.len()]
            }
        }
    }
}

/// 多物种理想气体混合规则
#[derive(Debug, Clone)]
pub struct EquationOfStateMixingRulesIdealGas {
    object_name: String,
    dim: Dimension,
    num_species: usize,
    closure: MixingClosureModel,
    species_gamma: Vec<f64>,
    species_gas_constant: Vec<f64>,
    species_c_p: Vec<f64>,
    species_c_v: Vec<f64>,
    equation_of_state: EquationOfStateIdealGas,
}

impl EquationOfStateMixingRulesIdealGas {
    /// 创建
    ///
    /// # 错误
    ///
    /// - 物种数为 0
    /// - 物种表长度与物种数不符
    /// - `NoModel` 用于多物种
    pub fn new(
        object_name: impl Into<String>,
        dim: Dimension,
        num_species: usize,
        closure: MixingClosureModel,
        species: &[SpeciesProperties],
    ) -> AfResult<Self> {
        let object_name = object_name.into();
        if num_species == 0 {
            return Err(AfError::invalid_config(
                format!("{}: num_species", object_name),
                0,
                "物种数必须至少为 1",
            ));
        }
        if species.len() != num_species {
            return Err(AfError::invalid_config(
                format!("{}: species", object_name),
                species.len(),
                format!("物种表长度应为 {}", num_species),
            ));
        }
        if closure == MixingClosureModel::NoModel && num_species != 1 {
            return Err(AfError::invalid_config(
                format!("{}: mixing_closure_model", object_name),
                closure,
                format!("NO_MODEL 只适用于单一物种, 实际 {} 个物种", num_species),
            ));
        }

        log::debug!(
            "{}: 创建理想气体混合规则 ({}, {} 个物种, {})",
            object_name,
            dim,
            num_species,
            closure
        );
        let equation_of_state = EquationOfStateIdealGas::new(format!("{}::ideal gas", object_name));
        Ok(Self {
            object_name,
            dim,
            num_species,
            closure,
            species_gamma: species.iter().map(|s| s.gamma).collect(),
            species_gas_constant: species.iter().map(|s| s.gas_constant).collect(),
            species_c_p: species.iter().map(|s| s.c_p).collect(),
            species_c_v: species.iter().map(|s| s.c_v).collect(),
            equation_of_state,
        })
    }

    /// 从配置创建（先验证配置）
    pub fn from_config(object_name: impl Into<String>, config: &KernelConfig) -> AfResult<Self> {
        config.validate()?;
        let species = config.species_properties()?;
        Self::new(
            object_name,
            config.dim,
            config.num_species,
            config.equation_of_state.mixing_closure_model,
            &species,
        )
    }

    /// 对象名称
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// 维度
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// 物种数
    pub fn num_species(&self) -> usize {
        self.num_species
    }

    /// 闭合模型
    pub fn closure(&self) -> MixingClosureModel {
        self.closure
    }

    /// 单一物种状态方程
    pub fn equation_of_state(&self) -> &EquationOfStateIdealGas {
        &self.equation_of_state
    }

    /// 输出可读的对象摘要
    pub fn print_class_data<W: Write>(&self, os: &mut W) -> io::Result<()> {
        writeln!(os)?;
        writeln!(os, "Print EquationOfStateMixingRulesIdealGas object...")?;
        writeln!(os)?;
        writeln!(os, "d_object_name = {}", self.object_name)?;
        writeln!(os, "d_dim = {}", self.dim)?;
        writeln!(os, "d_num_species = {}", self.num_species)?;
        writeln!(os, "d_mixing_closure_model = {}", self.closure)?;
        writeln!(os, "d_species_gamma = {:?}", self.species_gamma)?;
        writeln!(os, "d_species_R = {:?}", self.species_gas_constant)?;
        writeln!(os, "d_species_c_p = {:?}", self.species_c_p)?;
        writeln!(os, "d_species_c_v = {:?}", self.species_c_v)
    }

    /// 把物种表写入重启数据库
    pub fn put_to_restart(&self, restart_db: &mut RestartDatabase) {
        restart_db.put_double_array("d_species_gamma", &self.species_gamma);
        restart_db.put_double_array("d_species_R", &self.species_gas_constant);
    }

    // ========================================================================
    // 物种与混合物性质
    // ========================================================================

    /// 每个物种的热力学性质数
    pub fn num_species_thermodynamic_properties(&self) -> usize {
        NUM_SPECIES_THERMODYNAMIC_PROPERTIES
    }

    /// 物种 `species` 的 `[γ, R, c_p, c_v]`
    pub fn get_species_thermodynamic_properties(&self, species: usize) -> [f64; 4] {
        contract!(
            species < self.num_species,
            "{}: 物种下标 {} 超出物种数 {}",
            self.object_name,
            species,
            self.num_species
        );
        [
            self.species_gamma[species],
            self.species_gas_constant[species],
            self.species_c_p[species],
            self.species_c_v[species],
        ]
    }

    /// 当前闭合模型下混合物性质的个数
    pub fn num_mixture_thermodynamic_properties(&self) -> usize {
        match self.closure {
            MixingClosureModel::Isobaric => 1,
            MixingClosureModel::IsothermalAndIsobaric | MixingClosureModel::NoModel => {
                NUM_SPECIES_THERMODYNAMIC_PROPERTIES
            }
        }
    }

    /// 按闭合模型解释 `fractions` 并返回混合物性质
    ///
    /// 等压闭合返回 `[γ]`，其余返回 `[γ, R, c_p, c_v]`。
    pub fn get_mixture_thermodynamic_properties(&self, fractions: &[f64]) -> Vec<f64> {
        match self.closure {
            MixingClosureModel::Isobaric => vec![self.mixture_gamma_with_volume_fractions(fractions)],
            MixingClosureModel::IsothermalAndIsobaric | MixingClosureModel::NoModel => {
                self.mixture_properties_with_mass_fractions(fractions).to_vec()
            }
        }
    }

    /// 质量分数下的 `[γ, R, c_p, c_v]`
    pub fn mixture_properties_with_mass_fractions(&self, mass_fractions: &[f64]) -> [f64; 4] {
        self.check_mass_fraction_closure();
        self.check_fraction_count("质量分数", mass_fractions.len());
        if self.num_species == 1 {
            return self.get_species_thermodynamic_properties(0);
        }

        let (mut c_p, mut c_v) = (0.0, 0.0);
        let mut remainder = 1.0;
        for (s, &y) in mass_fractions.iter().enumerate() {
            c_p += y * self.species_c_p[s];
            c_v += y * self.species_c_v[s];
            remainder -= y;
        }
        if mass_fractions.len() == self.num_species - 1 {
            let last = self.num_species - 1;
            c_p += remainder * self.species_c_p[last];
            c_v += remainder * self.species_c_v[last];
        }
        [c_p / c_v, c_p - c_v, c_p, c_v]
    }

    /// 体积分数下的 γ
    pub fn mixture_gamma_with_volume_fractions(&self, volume_fractions: &[f64]) -> f64 {
        self.check_volume_fraction_closure();
        self.check_fraction_count("体积分数", volume_fractions.len());
        if self.num_species == 1 {
            return self.species_gamma[0];
        }

        let mut xi = 0.0;
        let mut remainder = 1.0;
        for (s, &z) in volume_fractions.iter().enumerate() {
            xi += z / (self.species_gamma[s] - 1.0);
            remainder -= z;
        }
        if volume_fractions.len() == self.num_species - 1 {
            xi += remainder / (self.species_gamma[self.num_species - 1] - 1.0);
        }
        1.0 + 1.0 / xi
    }

    fn check_mass_fraction_closure(&self) {
        contract!(
            matches!(
                self.closure,
                MixingClosureModel::IsothermalAndIsobaric | MixingClosureModel::NoModel
            ),
            "{}: 质量分数接口不适用于 {} 闭合",
            self.object_name,
            self.closure
        );
    }

    fn check_volume_fraction_closure(&self) {
        contract!(
            matches!(
                self.closure,
                MixingClosureModel::Isobaric | MixingClosureModel::NoModel
            ),
            "{}: 体积分数接口不适用于 {} 闭合",
            self.object_name,
            self.closure
        );
    }

    fn check_fraction_count(&self, what: &str, count: usize) {
        contract!(
            count == self.num_species || count + 1 == self.num_species,
            "{}: {}个数 {} 应为 {} 或 {}",
            self.object_name,
            what,
            count,
            self.num_species,
            self.num_species - 1
        );
    }

    // ========================================================================
    // 逐点计算
    // ========================================================================

    /// 压力（等温等压）
    pub fn get_pressure(&self, density: f64, internal_energy: f64, mass_fractions: &[f64]) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state.pressure(density, internal_energy, &thermo)
    }

    /// 压力（等压）
    pub fn get_pressure_isobaric(
        &self,
        density: f64,
        internal_energy: f64,
        volume_fractions: &[f64],
    ) -> f64 {
        let gamma = self.mixture_gamma_with_volume_fractions(volume_fractions);
        self.equation_of_state.pressure(density, internal_energy, &[gamma])
    }

    /// 声速（等温等压）
    pub fn get_sound_speed(&self, density: f64, pressure: f64, mass_fractions: &[f64]) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state.sound_speed(density, pressure, &thermo)
    }

    /// 声速（等压）
    pub fn get_sound_speed_isobaric(
        &self,
        density: f64,
        pressure: f64,
        volume_fractions: &[f64],
    ) -> f64 {
        let gamma = self.mixture_gamma_with_volume_fractions(volume_fractions);
        self.equation_of_state.sound_speed(density, pressure, &[gamma])
    }

    /// 比内能（等温等压）
    pub fn get_internal_energy(&self, density: f64, pressure: f64, mass_fractions: &[f64]) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state.internal_energy(density, pressure, &thermo)
    }

    /// 比内能（等压）
    pub fn get_internal_energy_isobaric(
        &self,
        density: f64,
        pressure: f64,
        volume_fractions: &[f64],
    ) -> f64 {
        let gamma = self.mixture_gamma_with_volume_fractions(volume_fractions);
        self.equation_of_state.internal_energy(density, pressure, &[gamma])
    }

    /// 温度
    pub fn get_temperature(&self, density: f64, pressure: f64, mass_fractions: &[f64]) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state.temperature(density, pressure, &thermo)
    }

    /// 由温度求比内能
    pub fn get_internal_energy_from_temperature(
        &self,
        _density: f64,
        temperature: f64,
        mass_fractions: &[f64],
    ) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state
            .internal_energy_from_temperature(temperature, &thermo)
    }

    /// 定容比热
    pub fn get_isochoric_specific_heat_capacity(
        &self,
        _density: f64,
        _pressure: f64,
        mass_fractions: &[f64],
    ) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state.isochoric_specific_heat_capacity(&thermo)
    }

    /// 定压比热
    pub fn get_isobaric_specific_heat_capacity(
        &self,
        _density: f64,
        _pressure: f64,
        mass_fractions: &[f64],
    ) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state.isobaric_specific_heat_capacity(&thermo)
    }

    /// 混合物密度
    pub fn get_mixture_density(&self, pressure: f64, temperature: f64, mass_fractions: &[f64]) -> f64 {
        let thermo = self.mixture_properties_with_mass_fractions(mass_fractions);
        self.equation_of_state.density(pressure, temperature, &thermo)
    }

    // ========================================================================
    // 批量计算
    // ========================================================================

    /// 在区域上求混合物性质
    fn mixture_scratch(
        &self,
        fractions: Fractions<'_>,
        centering: Centering,
        region: &IndexBox,
    ) -> MixtureScratch {
        let (data, num_props) = match fractions {
            Fractions::Mass(data) => {
                self.check_mass_fraction_closure();
                (data, NUM_SPECIES_THERMODYNAMIC_PROPERTIES)
            }
            Fractions::Volume(data) => {
                self.check_volume_fraction_closure();
                (data, 1)
            }
        };

        if self.num_species == 1 {
            let props = self.get_species_thermodynamic_properties(0);
            return MixtureScratch::Uniform(props[..num_props].to_vec());
        }

        contract!(
            data.is_some(),
            "{}: {} 个物种需要分数数据",
            self.object_name,
            self.num_species
        );
        let Some(data) = data else {
            return MixtureScratch::Uniform(vec![f64::NAN; num_props]);
        };
        let depth = data.data_depth();
        self.check_fraction_count(data.data_name(), depth);
        check_covers(data, centering, region);

        let views: Vec<ArrayView<'_>> = (0..depth)
            .map(|s| data.centered_view(centering, s))
            .collect();
        let mut arrays: Vec<ScratchArray> = (0..num_props)
            .map(|_| ScratchArray::new(*region, 0.0))
            .collect();
        let mut buf = vec![0.0; depth];

        region.for_each_point(|p| {
            for (b, v) in buf.iter_mut().zip(&views) {
                *b = v.get(p);
            }
            match fractions {
                Fractions::Mass(_) => {
                    let props = self.mixture_properties_with_mass_fractions(&buf);
                    for (a, value) in arrays.iter_mut().zip(props) {
                        *a.get_mut(p) = value;
                    }
                }
                Fractions::Volume(_) => {
                    *arrays[GAMMA].get_mut(p) = self.mixture_gamma_with_volume_fractions(&buf);
                }
            }
        });
        MixtureScratch::Field(arrays)
    }

    /// 逐点 `out = f(x, y, thermo)`
    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        quantity: &str,
        out: &mut dyn CenteredData,
        x: &dyn CenteredData,
        y: &dyn CenteredData,
        fractions: Fractions<'_>,
        centering: Centering,
        domain: &IndexBox,
        f: impl Fn(f64, f64, &[f64]) -> f64,
    ) {
        contract!(
            out.centered_layout(centering).dim() == self.dim,
            "{}: '{}' 的维度与 {} 不符",
            self.object_name,
            out.data_name(),
            self.dim
        );
        let region = evaluation_region(domain, centering, out.centered_layout(centering));
        check_covers(&*out, centering, &region);
        check_covers(x, centering, &region);
        check_covers(y, centering, &region);

        log::trace!(
            "{}: 计算 {} ({}, 区域 {})",
            self.object_name,
            quantity,
            centering,
            region
        );

        let mixture = self.mixture_scratch(fractions, centering, &region);
        let xv = x.centered_view(centering, 0);
        let yv = y.centered_view(centering, 0);
        let mut ov = out.centered_view_mut(centering, 0);
        let mut buf = [0.0; 4];
        region.for_each_point(|p| {
            let thermo = mixture.load(p, &mut buf);
            ov.set(p, f(xv.get(p), yv.get(p), thermo));
        });
    }

    /// 批量压力（等温等压）
    pub fn compute_pressure(
        &self,
        pressure: &mut dyn CenteredData,
        density: &dyn CenteredData,
        internal_energy: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "pressure",
            pressure,
            density,
            internal_energy,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |rho, e, t| eos.pressure(rho, e, t),
        );
    }

    /// 批量压力（等压）
    pub fn compute_pressure_isobaric(
        &self,
        pressure: &mut dyn CenteredData,
        density: &dyn CenteredData,
        internal_energy: &dyn CenteredData,
        volume_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "pressure",
            pressure,
            density,
            internal_energy,
            Fractions::Volume(volume_fractions),
            centering,
            domain,
            |rho, e, t| eos.pressure(rho, e, t),
        );
    }

    /// 批量声速（等温等压）
    pub fn compute_sound_speed(
        &self,
        sound_speed: &mut dyn CenteredData,
        density: &dyn CenteredData,
        pressure: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "sound speed",
            sound_speed,
            density,
            pressure,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |rho, p, t| eos.sound_speed(rho, p, t),
        );
    }

    /// 批量声速（等压）
    pub fn compute_sound_speed_isobaric(
        &self,
        sound_speed: &mut dyn CenteredData,
        density: &dyn CenteredData,
        pressure: &dyn CenteredData,
        volume_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "sound speed",
            sound_speed,
            density,
            pressure,
            Fractions::Volume(volume_fractions),
            centering,
            domain,
            |rho, p, t| eos.sound_speed(rho, p, t),
        );
    }

    /// 批量比内能（等温等压）
    pub fn compute_internal_energy(
        &self,
        internal_energy: &mut dyn CenteredData,
        density: &dyn CenteredData,
        pressure: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "internal energy",
            internal_energy,
            density,
            pressure,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |rho, p, t| eos.internal_energy(rho, p, t),
        );
    }

    /// 批量比内能（等压）
    pub fn compute_internal_energy_isobaric(
        &self,
        internal_energy: &mut dyn CenteredData,
        density: &dyn CenteredData,
        pressure: &dyn CenteredData,
        volume_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "internal energy",
            internal_energy,
            density,
            pressure,
            Fractions::Volume(volume_fractions),
            centering,
            domain,
            |rho, p, t| eos.internal_energy(rho, p, t),
        );
    }

    /// 批量温度
    pub fn compute_temperature(
        &self,
        temperature: &mut dyn CenteredData,
        density: &dyn CenteredData,
        pressure: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "temperature",
            temperature,
            density,
            pressure,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |rho, p, t| eos.temperature(rho, p, t),
        );
    }

    /// 批量由温度求比内能
    pub fn compute_internal_energy_from_temperature(
        &self,
        internal_energy: &mut dyn CenteredData,
        density: &dyn CenteredData,
        temperature: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "internal energy from temperature",
            internal_energy,
            density,
            temperature,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |_, temp, t| eos.internal_energy_from_temperature(temp, t),
        );
    }

    /// 批量定容比热
    pub fn compute_isochoric_specific_heat_capacity(
        &self,
        c_v: &mut dyn CenteredData,
        density: &dyn CenteredData,
        pressure: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "c_v",
            c_v,
            density,
            pressure,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |_, _, t| eos.isochoric_specific_heat_capacity(t),
        );
    }

    /// 批量定压比热
    pub fn compute_isobaric_specific_heat_capacity(
        &self,
        c_p: &mut dyn CenteredData,
        density: &dyn CenteredData,
        pressure: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "c_p",
            c_p,
            density,
            pressure,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |_, _, t| eos.isobaric_specific_heat_capacity(t),
        );
    }

    /// 批量混合物密度
    pub fn compute_mixture_density(
        &self,
        density: &mut dyn CenteredData,
        pressure: &dyn CenteredData,
        temperature: &dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        let eos = &self.equation_of_state;
        self.evaluate(
            "mixture density",
            density,
            pressure,
            temperature,
            Fractions::Mass(mass_fractions),
            centering,
            domain,
            |p, temp, t| eos.density(p, temp, t),
        );
    }

    /// 批量混合物性质（质量分数），输出深度为 4
    pub fn compute_mixture_thermodynamic_properties_with_mass_fractions(
        &self,
        properties: &mut dyn CenteredData,
        mass_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        self.write_mixture(
            properties,
            Fractions::Mass(mass_fractions),
            NUM_SPECIES_THERMODYNAMIC_PROPERTIES,
            centering,
            domain,
        );
    }

    /// 批量混合物 γ（体积分数）
    pub fn compute_mixture_gamma_with_volume_fractions(
        &self,
        gamma: &mut dyn CenteredData,
        volume_fractions: Option<&dyn CenteredData>,
        centering: Centering,
        domain: &IndexBox,
    ) {
        self.write_mixture(gamma, Fractions::Volume(volume_fractions), 1, centering, domain);
    }

    fn write_mixture(
        &self,
        out: &mut dyn CenteredData,
        fractions: Fractions<'_>,
        num_props: usize,
        centering: Centering,
        domain: &IndexBox,
    ) {
        contract!(
            out.data_depth() >= num_props,
            "{}: '{}' 深度 {} 小于混合物性质数 {}",
            self.object_name,
            out.data_name(),
            out.data_depth(),
            num_props
        );
        let region = evaluation_region(domain, centering, out.centered_layout(centering));
        check_covers(&*out, centering, &region);

        let mixture = self.mixture_scratch(fractions, centering, &region);
        let mut buf = [0.0; 4];
        for k in 0..num_props {
            let mut ov = out.centered_view_mut(centering, k);
            region.for_each_point(|p| {
                let thermo = mixture.load(p, &mut buf);
                ov.set(p, thermo[k]);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_foundation::field::CellField;
    use af_foundation::IntVector;

    fn air() -> SpeciesProperties {
        SpeciesProperties::from_gamma_and_gas_constant(1.4, 287.0)
    }

    fn helium() -> SpeciesProperties {
        SpeciesProperties::from_gamma_and_gas_constant(5.0 / 3.0, 2077.0)
    }

    fn two_species(closure: MixingClosureModel) -> EquationOfStateMixingRulesIdealGas {
        EquationOfStateMixingRulesIdealGas::new("eos", Dimension::One, 2, closure, &[air(), helium()])
            .unwrap()
    }

    #[test]
    fn test_construction_errors() {
        let err = |n, c, s: &[SpeciesProperties]| {
            EquationOfStateMixingRulesIdealGas::new("eos", Dimension::One, n, c, s).is_err()
        };
        assert!(err(0, MixingClosureModel::Isobaric, &[]));
        assert!(err(2, MixingClosureModel::Isobaric, &[air()]));
        assert!(err(2, MixingClosureModel::NoModel, &[air(), helium()]));
        assert!(!err(1, MixingClosureModel::NoModel, &[air()]));
    }

    #[test]
    fn test_implied_last_fraction() {
        let eos = two_species(MixingClosureModel::IsothermalAndIsobaric);
        let full = eos.mixture_properties_with_mass_fractions(&[0.3, 0.7]);
        let short = eos.mixture_properties_with_mass_fractions(&[0.3]);
        for (a, b) in full.iter().zip(&short) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!((full[1] - (full[2] - full[3])).abs() < 1e-9);
    }

    #[test]
    fn test_volume_fraction_gamma() {
        let eos = two_species(MixingClosureModel::Isobaric);
        let g = eos.mixture_gamma_with_volume_fractions(&[0.5]);
        let xi = 0.5 / (1.4 - 1.0) + 0.5 / (5.0 / 3.0 - 1.0);
        assert!((g - (1.0 + 1.0 / xi)).abs() < 1e-14);
        assert_eq!(eos.num_mixture_thermodynamic_properties(), 1);
        let pure = eos.get_mixture_thermodynamic_properties(&[1.0, 0.0]);
        assert_eq!(pure.len(), 1);
        assert!((pure[0] - 1.4).abs() < 1e-14);
    }

    #[test]
    fn test_species_properties_lookup() {
        let eos = two_species(MixingClosureModel::IsothermalAndIsobaric);
        assert_eq!(eos.num_species_thermodynamic_properties(), 4);
        assert_eq!(eos.get_species_thermodynamic_properties(1), helium().to_array());
    }

    #[test]
    #[cfg_attr(not(any(debug_assertions, feature = "checked")), ignore)]
    #[should_panic(expected = "契约违反")]
    fn test_mass_fractions_rejected_for_isobaric_closure() {
        let eos = two_species(MixingClosureModel::Isobaric);
        eos.get_pressure(1.0, 1.0, &[0.5, 0.5]);
    }

    #[test]
    fn test_bulk_cell_pressure_with_domain() {
        let eos = two_species(MixingClosureModel::IsothermalAndIsobaric);
        let b = IndexBox::from_shape(Dimension::One, &[4]);
        let g = IntVector::uniform(Dimension::One, 1);
        let mut rho = CellField::new("rho", b, g, 1);
        rho.fill(1.0);
        let mut e = CellField::new("e", b, g, 1);
        e.fill(2.0);
        let mut y = CellField::new("Y", b, g, 1);
        y.fill(0.25);
        let mut p = CellField::new("p", b, g, 1);
        p.fill(-1.0);

        let domain = IndexBox::from_bounds(Dimension::One, &[1], &[2]);
        eos.compute_pressure(&mut p, &rho, &e, Some(&y), Centering::Cell, &domain);

        let expected = eos.get_pressure(1.0, 2.0, &[0.25]);
        assert_eq!(p.get([0, 0, 0], 0), -1.0);
        assert!((p.get([1, 0, 0], 0) - expected).abs() < 1e-12);
        assert!((p.get([2, 0, 0], 0) - expected).abs() < 1e-12);
        assert_eq!(p.get([3, 0, 0], 0), -1.0);
    }

    #[test]
    fn test_bulk_mixture_properties_whole_ghost_box() {
        let eos = two_species(MixingClosureModel::IsothermalAndIsobaric);
        let b = IndexBox::from_shape(Dimension::One, &[3]);
        let g = IntVector::uniform(Dimension::One, 2);
        let mut y = CellField::new("Y", b, g, 2);
        y.fill_with(0, |p| 0.1 * (p[0] + 2) as f64);
        y.fill_with(1, |p| 1.0 - 0.1 * (p[0] + 2) as f64);
        let mut props = CellField::new("props", b, g, 4);
        eos.compute_mixture_thermodynamic_properties_with_mass_fractions(
            &mut props,
            Some(&y),
            Centering::Cell,
            &IndexBox::empty(Dimension::One),
        );
        props.ghost_box().for_each_point(|p| {
            let expected = eos.mixture_properties_with_mass_fractions(&[y.get(p, 0), y.get(p, 1)]);
            for (k, v) in expected.iter().enumerate() {
                assert!((props.get(p, k) - v).abs() < 1e-12);
            }
        });
    }

    #[test]
    fn test_restart_and_print() {
        let eos = two_species(MixingClosureModel::IsothermalAndIsobaric);
        let mut db = RestartDatabase::new();
        eos.put_to_restart(&mut db);
        assert_eq!(db.get_double_array("d_species_gamma").unwrap(), &[1.4, 5.0 / 3.0]);
        assert_eq!(db.get_double_array("d_species_R").unwrap(), &[287.0, 2077.0]);

        let mut out = Vec::new();
        eos.print_class_data(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("d_num_species = 2"));
    }
}
