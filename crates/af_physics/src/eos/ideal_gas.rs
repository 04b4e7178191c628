// crates/af_physics/src/eos/ideal_gas.rs

//! 理想气体状态方程
//!
//! 所有公式只依赖热力学性质切片：
//!
//! | 下标 | 量 |
//! |---|---|
//! | 0 | γ |
//! | 1 | R |
//! | 2 | c_p |
//! | 3 | c_v |
//!
//! 等压闭合下混合物只有 γ，切片长度为 1，此时只能调用仅用 γ 的公式。
//! 数值退化（ρ = 0、γ = 1 等）不检查，按 IEEE 规则得到 Inf/NaN。

/// γ 的下标
pub const GAMMA: usize = 0;
/// R 的下标
pub const GAS_CONSTANT: usize = 1;
/// c_p 的下标
pub const C_P: usize = 2;
/// c_v 的下标
pub const C_V: usize = 3;

/// 单一物种理想气体
#[derive(Debug, Clone)]
pub struct EquationOfStateIdealGas {
    object_name: String,
}

impl EquationOfStateIdealGas {
    /// 创建
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
        }
    }

    /// 对象名称
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// p = (γ - 1) ρ e
    #[inline]
    pub fn pressure(&self, density: f64, internal_energy: f64, thermo: &[f64]) -> f64 {
        (thermo[GAMMA] - 1.0) * density * internal_energy
    }

    /// c = sqrt(γ p / ρ)
    #[inline]
    pub fn sound_speed(&self, density: f64, pressure: f64, thermo: &[f64]) -> f64 {
        (thermo[GAMMA] * pressure / density).sqrt()
    }

    /// e = p / ((γ - 1) ρ)
    #[inline]
    pub fn internal_energy(&self, density: f64, pressure: f64, thermo: &[f64]) -> f64 {
        pressure / ((thermo[GAMMA] - 1.0) * density)
    }

    /// T = p / (ρ R)
    #[inline]
    pub fn temperature(&self, density: f64, pressure: f64, thermo: &[f64]) -> f64 {
        pressure / (density * thermo[GAS_CONSTANT])
    }

    /// e = c_v T
    #[inline]
    pub fn internal_energy_from_temperature(&self, temperature: f64, thermo: &[f64]) -> f64 {
        thermo[C_V] * temperature
    }

    /// c_v
    #[inline]
    pub fn isochoric_specific_heat_capacity(&self, thermo: &[f64]) -> f64 {
        thermo[C_V]
    }

    /// c_p
    #[inline]
    pub fn isobaric_specific_heat_capacity(&self, thermo: &[f64]) -> f64 {
        thermo[C_P]
    }

    /// ρ = p / (R T)
    #[inline]
    pub fn density(&self, pressure: f64, temperature: f64, thermo: &[f64]) -> f64 {
        pressure / (thermo[GAS_CONSTANT] * temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIR: [f64; 4] = [1.4, 287.0, 1004.5, 717.5];

    #[test]
    fn test_pressure_energy_inverse() {
        let eos = EquationOfStateIdealGas::new("air");
        let e = eos.internal_energy(1.2, 101325.0, &AIR);
        assert!((eos.pressure(1.2, e, &AIR) - 101325.0).abs() < 1e-8);
    }

    #[test]
    fn test_temperature_density_inverse() {
        let eos = EquationOfStateIdealGas::new("air");
        let t = eos.temperature(1.2, 101325.0, &AIR);
        assert!((t - 101325.0 / (1.2 * 287.0)).abs() < 1e-12);
        assert!((eos.density(101325.0, t, &AIR) - 1.2).abs() < 1e-12);
        assert_eq!(eos.internal_energy_from_temperature(300.0, &AIR), 717.5 * 300.0);
    }

    #[test]
    fn test_gamma_only_slice() {
        let eos = EquationOfStateIdealGas::new("mix");
        let c = eos.sound_speed(1.0, 1.4, &[1.4]);
        assert!((c - (1.96f64).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_degenerate_inputs_not_clamped() {
        let eos = EquationOfStateIdealGas::new("air");
        assert!(eos.sound_speed(0.0, 1.0, &AIR).is_infinite());
        assert!(eos.sound_speed(1.0, -1.0, &AIR).is_nan());
    }
}
