// crates/af_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `AfError` 枚举和 `AfResult` 类型别名，用于整个项目的可恢复错误。
//!
//! # 错误分类
//!
//! 1. **配置错误**: 构造阶段发现（物种数、维度、模板宽度等），调用方应视为致命错误
//! 2. **数据错误**: 场数据形状/分量/幽灵层不匹配
//! 3. **契约违反**: 协作方之间的编程错误，不走本类型，由 [`crate::contract!`] 断言处理
//!
//! 数值退化（γ ≤ 1、体积分数越界、负密度等）不在本层检查。
//!
//! # 示例
//!
//! ```
//! use af_foundation::error::{AfError, AfResult};
//!
//! fn read_species() -> AfResult<()> {
//!     Err(AfError::config("物种数必须至少为 1"))
//! }
//! assert!(read_species().is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type AfResult<T> = Result<T, AfError>;

/// AmrFlow 错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AfError {
    // ========================================================================
    // 配置相关错误
    // ========================================================================
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 维度不匹配
    #[error("维度不匹配: {object} 期望 {expected}D, 实际 {actual}D")]
    DimensionMismatch {
        /// 出错对象
        object: String,
        /// 期望维度
        expected: usize,
        /// 实际维度
        actual: usize,
    },

    // ========================================================================
    // 数据相关错误
    // ========================================================================
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 幽灵层宽度不足
    #[error("幽灵层不足: {name} 在第 {axis} 轴需要 {required} 层, 实际 {available} 层")]
    InsufficientGhosts {
        /// 数据名称
        name: String,
        /// 轴编号
        axis: usize,
        /// 需要的层数
        required: i32,
        /// 实际层数
        available: i32,
    },

    /// 无效索引（代际不匹配）
    #[error("无效索引: 元素已被删除或索引过期")]
    InvalidIndex,

    /// 资源未找到
    #[error("资源未找到: {resource}")]
    NotFound {
        /// 资源名称
        resource: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl AfError {
    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 维度不匹配
    pub fn dimension_mismatch(object: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            object: object.into(),
            expected,
            actual,
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 幽灵层不足
    pub fn insufficient_ghosts(
        name: impl Into<String>,
        axis: usize,
        required: i32,
        available: i32,
    ) -> Self {
        Self::InsufficientGhosts {
            name: name.into(),
            axis,
            required,
            available,
        }
    }

    /// 资源未找到
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为配置类错误
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::InvalidConfig { .. } | Self::DimensionMismatch { .. }
        )
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl AfError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> AfResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> AfResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }
}

/// 条件不满足时提前返回错误
///
/// ```
/// use af_foundation::{ensure, AfError, AfResult};
///
/// fn positive(v: i32) -> AfResult<i32> {
///     ensure!(v > 0, AfError::invalid_input("value must be positive"));
///     Ok(v)
/// }
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// 从 `Option` 取值，`None` 时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr $(,)?) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AfError::config("测试配置错误");
        assert!(err.to_string().contains("配置错误"));
        assert!(err.is_config());
    }

    #[test]
    fn test_insufficient_ghosts_display() {
        let err = AfError::insufficient_ghosts("velocity", 1, 6, 3);
        let msg = err.to_string();
        assert!(msg.contains("velocity"));
        assert!(msg.contains('6'));
        assert!(!err.is_config());
    }

    #[test]
    fn test_index_out_of_bounds() {
        let err = AfError::index_out_of_bounds("component", 10, 5);
        assert!(err.to_string().contains("component"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_check_size() {
        assert!(AfError::check_size("test", 10, 10).is_ok());
        assert!(AfError::check_size("test", 10, 5).is_err());
    }

    #[test]
    fn test_check_index() {
        assert!(AfError::check_index("species", 1, 2).is_ok());
        assert!(AfError::check_index("species", 2, 2).is_err());
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> AfResult<()> {
            ensure!(value > 0, AfError::invalid_input("value must be positive"));
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(check(-1).is_err());
    }

    #[test]
    fn test_require_macro() {
        fn get_value(opt: Option<i32>) -> AfResult<i32> {
            let v = require!(opt, AfError::not_found("value"));
            Ok(v)
        }

        assert_eq!(get_value(Some(42)).unwrap(), 42);
        assert!(get_value(None).is_err());
    }
}
