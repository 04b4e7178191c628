// crates/af_config/src/error.rs

//! 配置层错误类型

use af_foundation::AfError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 验证失败（可能包含多条问题）
    #[error("配置验证失败: {0}")]
    Validation(String),

    /// 重启数据库中键的类型不符
    #[error("重启数据库键 '{key}' 类型不符: 期望 {expected}")]
    TypeMismatch {
        /// 键
        key: String,
        /// 期望的类型
        expected: &'static str,
    },
}

impl ConfigError {
    /// 无效值
    pub fn invalid_value(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<AfError> for ConfigError {
    fn from(err: AfError) -> Self {
        match err {
            AfError::InvalidConfig { key, value, reason } => Self::InvalidValue { key, value, reason },
            AfError::Config { message } => Self::Validation(message),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<ConfigError> for AfError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { key, value, reason } => {
                AfError::InvalidConfig { key, value, reason }
            }
            ConfigError::Parse(message) => AfError::serialization(message),
            ConfigError::Missing(key) => AfError::config(format!("缺失配置: {}", key)),
            other => AfError::config(other.to_string()),
        }
    }
}
