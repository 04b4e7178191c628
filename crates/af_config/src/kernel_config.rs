// crates/af_config/src/kernel_config.rs

//! KernelConfig - 数值核函数配置
//!
//! 描述维度、物种表、混合闭合模型和扩散通量格式。构造阶段读取一次，
//! 计算过程中不再读取。
//!
//! 物种表可以两种方式给出（每组长度都必须等于物种数）：
//!
//! - `species_gamma` + `species_R`：`c_p = γR/(γ-1)`，`c_v = R/(γ-1)`
//! - `species_c_p` + `species_c_v`：`γ = c_p/c_v`，`R = c_p - c_v`
//!
//! 两组同时给出时以 γ/R 为准。
//!
//! ```
//! use af_config::KernelConfig;
//!
//! let json = r#"{
//!     "dim": 2,
//!     "num_species": 2,
//!     "equation_of_state": {
//!         "mixing_closure_model": "ISOTHERMAL_AND_ISOBARIC",
//!         "species_gamma": [1.4, 1.67],
//!         "species_R": [287.0, 2077.0]
//!     },
//!     "diffusive_flux": { "scheme": "SIXTH_ORDER" }
//! }"#;
//! let config = KernelConfig::from_json_str(json).unwrap();
//! assert_eq!(config.num_species, 2);
//! ```

use af_foundation::validation::{check_open_range, ValidationIssue, ValidationReport};
use af_foundation::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

// ============================================================================
// 枚举
// ============================================================================

/// 混合闭合模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MixingClosureModel {
    /// 等温等压平衡，质量分数加权
    #[default]
    IsothermalAndIsobaric,
    /// 仅等压平衡，体积分数加权
    Isobaric,
    /// 无混合（单一物种）
    NoModel,
}

impl MixingClosureModel {
    /// 配置文件中的标签
    pub const fn tag(self) -> &'static str {
        match self {
            Self::IsothermalAndIsobaric => "ISOTHERMAL_AND_ISOBARIC",
            Self::Isobaric => "ISOBARIC",
            Self::NoModel => "NO_MODEL",
        }
    }
}

impl fmt::Display for MixingClosureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// 扩散通量重构格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffusiveFluxScheme {
    /// 二阶
    SecondOrder,
    /// 四阶
    FourthOrder,
    /// 六阶
    #[default]
    SixthOrder,
}

impl DiffusiveFluxScheme {
    /// 所有格式
    pub const ALL: [DiffusiveFluxScheme; 3] =
        [Self::SecondOrder, Self::FourthOrder, Self::SixthOrder];

    /// 重启标签
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SecondOrder => "SECOND_ORDER",
            Self::FourthOrder => "FOURTH_ORDER",
            Self::SixthOrder => "SIXTH_ORDER",
        }
    }

    /// 从重启标签解析
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|s| s.tag() == tag)
            .ok_or_else(|| ConfigError::invalid_value("diffusive_flux.scheme", tag, "未知的扩散通量格式"))
    }
}

impl fmt::Display for DiffusiveFluxScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// 物种性质
// ============================================================================

/// 单一物种的热力学性质
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesProperties {
    /// 比热比 γ
    pub gamma: f64,
    /// 气体常数 R
    pub gas_constant: f64,
    /// 定压比热 c_p
    pub c_p: f64,
    /// 定容比热 c_v
    pub c_v: f64,
}

impl SpeciesProperties {
    /// 由 γ 和 R 推出比热
    pub fn from_gamma_and_gas_constant(gamma: f64, gas_constant: f64) -> Self {
        Self {
            gamma,
            gas_constant,
            c_p: gamma * gas_constant / (gamma - 1.0),
            c_v: gas_constant / (gamma - 1.0),
        }
    }

    /// 由比热推出 γ 和 R
    pub fn from_heat_capacities(c_p: f64, c_v: f64) -> Self {
        Self {
            gamma: c_p / c_v,
            gas_constant: c_p - c_v,
            c_p,
            c_v,
        }
    }

    /// `[γ, R, c_p, c_v]`
    pub fn to_array(self) -> [f64; 4] {
        [self.gamma, self.gas_constant, self.c_p, self.c_v]
    }
}

// ============================================================================
// 配置结构
// ============================================================================

/// 理想气体混合规则配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixingRulesConfig {
    /// 混合闭合模型
    #[serde(default)]
    pub mixing_closure_model: MixingClosureModel,

    /// 各物种比热比
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species_gamma: Vec<f64>,

    /// 各物种气体常数
    #[serde(rename = "species_R", default, skip_serializing_if = "Vec::is_empty")]
    pub species_gas_constant: Vec<f64>,

    /// 各物种定压比热
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species_c_p: Vec<f64>,

    /// 各物种定容比热
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species_c_v: Vec<f64>,
}

impl Default for MixingRulesConfig {
    /// 单一空气：γ = 1.4，R = 287
    fn default() -> Self {
        Self {
            mixing_closure_model: MixingClosureModel::default(),
            species_gamma: vec![1.4],
            species_gas_constant: vec![287.0],
            species_c_p: Vec::new(),
            species_c_v: Vec::new(),
        }
    }
}

impl MixingRulesConfig {
    fn uses_gamma_and_gas_constant(&self) -> bool {
        !self.species_gamma.is_empty() || !self.species_gas_constant.is_empty()
    }

    fn check(&self, num_species: usize, report: &mut ValidationReport) {
        if self.mixing_closure_model == MixingClosureModel::NoModel && num_species != 1 {
            report.add_error(ValidationIssue::Inconsistent {
                message: format!("NO_MODEL 只适用于单一物种, 实际 {} 个物种", num_species),
            });
        }

        let check_len = |report: &mut ValidationReport, key: &'static str, values: &[f64]| {
            if values.len() != num_species {
                report.add_error(ValidationIssue::WrongLength {
                    key,
                    expected: num_species,
                    actual: values.len(),
                });
            }
        };

        if self.uses_gamma_and_gas_constant() {
            check_len(report, "species_gamma", &self.species_gamma);
            check_len(report, "species_R", &self.species_gas_constant);
            check_open_range(report, "species_gamma", &self.species_gamma, 1.0, f64::INFINITY);
            check_open_range(report, "species_R", &self.species_gas_constant, 0.0, f64::INFINITY);
            if !self.species_c_p.is_empty() || !self.species_c_v.is_empty() {
                report.add_warning(ValidationIssue::Inconsistent {
                    message: "同时给出 species_gamma/species_R 与 species_c_p/species_c_v, 忽略后者"
                        .into(),
                });
            }
        } else if !self.species_c_p.is_empty() || !self.species_c_v.is_empty() {
            check_len(report, "species_c_p", &self.species_c_p);
            check_len(report, "species_c_v", &self.species_c_v);
            check_open_range(report, "species_c_p", &self.species_c_p, 0.0, f64::INFINITY);
            check_open_range(report, "species_c_v", &self.species_c_v, 0.0, f64::INFINITY);
            for (s, (&c_p, &c_v)) in self.species_c_p.iter().zip(&self.species_c_v).enumerate() {
                if c_p <= c_v {
                    report.add_error(ValidationIssue::Inconsistent {
                        message: format!("物种 {}: c_p={} 必须大于 c_v={}", s, c_p, c_v),
                    });
                }
            }
        } else {
            report.add_error(ValidationIssue::Inconsistent {
                message: "缺少物种表: 需要 species_gamma + species_R 或 species_c_p + species_c_v"
                    .into(),
            });
        }
    }

    /// 解析为各物种热力学性质（先验证）
    pub fn species_properties(&self, num_species: usize) -> Result<Vec<SpeciesProperties>, ConfigError> {
        let mut report = ValidationReport::new();
        self.check(num_species, &mut report);
        finish(report)?;

        let species = if self.uses_gamma_and_gas_constant() {
            self.species_gamma
                .iter()
                .zip(&self.species_gas_constant)
                .map(|(&g, &r)| SpeciesProperties::from_gamma_and_gas_constant(g, r))
                .collect()
        } else {
            self.species_c_p
                .iter()
                .zip(&self.species_c_v)
                .map(|(&c_p, &c_v)| SpeciesProperties::from_heat_capacities(c_p, c_v))
                .collect()
        };
        Ok(species)
    }
}

/// 扩散通量配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffusiveFluxConfig {
    /// 重构格式
    #[serde(default)]
    pub scheme: DiffusiveFluxScheme,
}

/// 数值核函数配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// 问题维度
    #[serde(default = "default_dim")]
    pub dim: Dimension,

    /// 物种数
    #[serde(default = "default_num_species")]
    pub num_species: usize,

    /// 状态方程混合规则
    #[serde(default)]
    pub equation_of_state: MixingRulesConfig,

    /// 扩散通量
    #[serde(default)]
    pub diffusive_flux: DiffusiveFluxConfig,
}

fn default_dim() -> Dimension {
    Dimension::One
}
fn default_num_species() -> usize {
    1
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            dim: default_dim(),
            num_species: default_num_species(),
            equation_of_state: MixingRulesConfig::default(),
            diffusive_flux: DiffusiveFluxConfig::default(),
        }
    }
}

fn finish(report: ValidationReport) -> Result<(), ConfigError> {
    for warning in &report.warnings {
        log::warn!("配置警告: {}", warning);
    }
    if report.has_errors() {
        let message = report
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigError::Validation(message));
    }
    Ok(())
}

impl KernelConfig {
    /// 从 JSON 字符串解析并验证
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: KernelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("读取核函数配置: {}", path.as_ref().display());
        Self::from_json_str(&content)
    }

    /// 收集全部验证问题
    pub fn validation_report(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.num_species == 0 {
            report.add_error(ValidationIssue::Inconsistent {
                message: "num_species 必须至少为 1".into(),
            });
        }
        self.equation_of_state.check(self.num_species, &mut report);
        report
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        finish(self.validation_report())
    }

    /// 各物种热力学性质
    pub fn species_properties(&self) -> Result<Vec<SpeciesProperties>, ConfigError> {
        if self.num_species == 0 {
            return Err(ConfigError::invalid_value("num_species", 0, "物种数必须至少为 1"));
        }
        self.equation_of_state.species_properties(self.num_species)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
