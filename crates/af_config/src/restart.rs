// crates/af_config/src/restart.rs

//! 重启数据库
//!
//! 键值存储，核函数对象只写入自身的标识信息（格式标签、物种表），
//! 供外部 I/O 层做重启一致性检查。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// 重启数据库中的值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestartValue {
    /// 字符串
    String(String),
    /// 实数数组
    DoubleArray(Vec<f64>),
    /// 整数
    Integer(i64),
}

/// 重启数据库
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestartDatabase {
    entries: BTreeMap<String, RestartValue>,
}

impl RestartDatabase {
    /// 创建空数据库
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入字符串
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), RestartValue::String(value.into()));
    }

    /// 写入实数数组
    pub fn put_double_array(&mut self, key: impl Into<String>, values: &[f64]) {
        self.entries
            .insert(key.into(), RestartValue::DoubleArray(values.to_vec()));
    }

    /// 写入整数
    pub fn put_integer(&mut self, key: impl Into<String>, value: i64) {
        self.entries.insert(key.into(), RestartValue::Integer(value));
    }

    /// 是否存在键
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 键数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 读取字符串
    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        match self.entries.get(key) {
            Some(RestartValue::String(s)) => Ok(s),
            Some(_) => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
            }),
            None => Err(ConfigError::Missing(key.to_string())),
        }
    }

    /// 读取实数数组
    pub fn get_double_array(&self, key: &str) -> Result<&[f64], ConfigError> {
        match self.entries.get(key) {
            Some(RestartValue::DoubleArray(v)) => Ok(v),
            Some(_) => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "double array",
            }),
            None => Err(ConfigError::Missing(key.to_string())),
        }
    }

    /// 读取整数
    pub fn get_integer(&self, key: &str) -> Result<i64, ConfigError> {
        match self.entries.get(key) {
            Some(RestartValue::Integer(v)) => Ok(*v),
            Some(_) => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "integer",
            }),
            None => Err(ConfigError::Missing(key.to_string())),
        }
    }

    /// 保存为 JSON 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let mut db = RestartDatabase::new();
        assert!(db.is_empty());
        db.put_string("d_diffusive_flux_reconstructor", "SIXTH_ORDER");
        db.put_double_array("d_species_gamma", &[1.4, 1.67]);
        db.put_integer("d_num_species", 2);

        assert_eq!(db.len(), 3);
        assert_eq!(db.get_string("d_diffusive_flux_reconstructor").unwrap(), "SIXTH_ORDER");
        assert_eq!(db.get_double_array("d_species_gamma").unwrap(), &[1.4, 1.67]);
        assert_eq!(db.get_integer("d_num_species").unwrap(), 2);
    }

    #[test]
    fn test_missing_and_type_mismatch() {
        let mut db = RestartDatabase::new();
        db.put_string("tag", "x");
        assert!(matches!(db.get_string("nope"), Err(ConfigError::Missing(_))));
        assert!(matches!(
            db.get_double_array("tag"),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_overwrite() {
        let mut db = RestartDatabase::new();
        db.put_string("tag", "SECOND_ORDER");
        db.put_string("tag", "FOURTH_ORDER");
        assert_eq!(db.get_string("tag").unwrap(), "FOURTH_ORDER");
        assert_eq!(db.len(), 1);
    }
}
