// crates/af_foundation/src/validation.rs

//! 配置验证报告
//!
//! 配置检查一次性收集所有问题，而不是遇到第一个就返回，
//! 便于一次修正整份配置文件。
//!
//! # 示例
//!
//! ```
//! use af_foundation::validation::{ValidationIssue, ValidationReport};
//!
//! let gamma = [1.4, 0.9];
//! let mut report = ValidationReport::new();
//! for (s, &g) in gamma.iter().enumerate() {
//!     if g <= 1.0 {
//!         report.add_error(ValidationIssue::OutOfRange {
//!             key: "species_gamma",
//!             index: Some(s),
//!             value: g,
//!             min: 1.0,
//!             max: f64::INFINITY,
//!         });
//!     }
//! }
//! assert!(report.has_errors());
//! assert!(report.into_result().is_err());
//! ```

use crate::error::{AfError, AfResult};
use std::fmt;

/// 验证报告
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationIssue>,
    /// 警告列表
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// 创建空报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    /// 添加警告
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 合并另一个报告
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// 有错误时转为 [`AfError::Config`]，消息包含全部错误
    pub fn into_result(self) -> AfResult<()> {
        if self.is_valid() {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(AfError::config(message))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告:")?;
        writeln!(f, "  错误: {} 个", self.errors.len())?;
        writeln!(f, "  警告: {} 个", self.warnings.len())?;
        for (i, err) in self.errors.iter().enumerate() {
            writeln!(f, "  E{}. {}", i + 1, err)?;
        }
        for (i, warn) in self.warnings.iter().enumerate() {
            writeln!(f, "  W{}. {}", i + 1, warn)?;
        }
        Ok(())
    }
}

/// 验证问题
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// 非有限值
    NonFinite {
        /// 配置键
        key: &'static str,
        /// 数组下标（标量为 None）
        index: Option<usize>,
        /// 数值
        value: f64,
    },
    /// 超出范围（开区间以外）
    OutOfRange {
        /// 配置键
        key: &'static str,
        /// 数组下标
        index: Option<usize>,
        /// 实际值
        value: f64,
        /// 下界
        min: f64,
        /// 上界
        max: f64,
    },
    /// 数组长度错误
    WrongLength {
        /// 配置键
        key: &'static str,
        /// 期望长度
        expected: usize,
        /// 实际长度
        actual: usize,
    },
    /// 一致性错误
    Inconsistent {
        /// 描述
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { key, index, value } => match index {
                Some(i) => write!(f, "{}[{}]={} (非有限值)", key, i, value),
                None => write!(f, "{}={} (非有限值)", key, value),
            },
            Self::OutOfRange {
                key,
                index,
                value,
                min,
                max,
            } => match index {
                Some(i) => write!(f, "{}[{}]={} 超出范围({}, {})", key, i, value, min, max),
                None => write!(f, "{}={} 超出范围({}, {})", key, value, min, max),
            },
            Self::WrongLength {
                key,
                expected,
                actual,
            } => write!(f, "{} 长度应为 {}, 实际 {}", key, expected, actual),
            Self::Inconsistent { message } => write!(f, "一致性错误: {}", message),
        }
    }
}

/// 检查数组每个元素有限且落在开区间 `(min, max)`
pub fn check_open_range(
    report: &mut ValidationReport,
    key: &'static str,
    values: &[f64],
    min: f64,
    max: f64,
) {
    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            report.add_error(ValidationIssue::NonFinite {
                key,
                index: Some(i),
                value,
            });
        } else if value <= min || value >= max {
            report.add_error(ValidationIssue::OutOfRange {
                key,
                index: Some(i),
                value,
                min,
                max,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(!report.has_warnings());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_check_open_range() {
        let mut report = ValidationReport::new();
        check_open_range(&mut report, "species_R", &[287.0, 0.0, f64::NAN], 0.0, f64::INFINITY);
        assert_eq!(report.errors.len(), 2);
        assert!(matches!(report.errors[0], ValidationIssue::OutOfRange { index: Some(1), .. }));
        assert!(matches!(report.errors[1], ValidationIssue::NonFinite { index: Some(2), .. }));
    }

    #[test]
    fn test_into_result_joins_messages() {
        let mut report = ValidationReport::new();
        report.add_error(ValidationIssue::WrongLength {
            key: "species_gamma",
            expected: 2,
            actual: 1,
        });
        report.add_error(ValidationIssue::Inconsistent {
            message: "NoModel 需要单一物种".into(),
        });
        let err = report.into_result().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("species_gamma"));
        assert!(msg.contains("NoModel"));
    }

    #[test]
    fn test_merge_and_display() {
        let mut a = ValidationReport::new();
        let mut b = ValidationReport::new();
        b.add_warning(ValidationIssue::Inconsistent {
            message: "w".into(),
        });
        a.merge(b);
        assert!(a.has_warnings());
        assert!(a.to_string().contains("警告: 1 个"));
    }
}
