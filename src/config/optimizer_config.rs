// ==========================================
// MSME 补贴分配优化系统 - 优化配置
// ==========================================
// 职责: 默认预算/权重、匹配模式、数据表路径
// 存储: JSON 配置文件（缺失时使用默认值）+ 环境变量覆写
// ==========================================

use crate::domain::types::{MatchMode, PolicyWeights};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径环境变量
pub const ENV_CONFIG_PATH: &str = "SUBSIDY_OPTIMIZER_CONFIG";
/// 企业表路径环境变量
pub const ENV_ENTITY_TABLE: &str = "SUBSIDY_OPTIMIZER_ENTITIES";
/// 政策工具表路径环境变量
pub const ENV_INSTRUMENT_TABLE: &str = "SUBSIDY_OPTIMIZER_INSTRUMENTS";

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// OptimizerConfig - 优化配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 默认总预算
    pub default_budget: f64,
    /// 默认营收权重
    pub default_w_rev: f64,
    /// 默认就业权重
    pub default_w_emp: f64,
    /// 权重之和偏离 1 的告警容差
    pub weight_sum_tolerance: f64,
    /// 资格匹配模式
    pub match_mode: MatchMode,
    /// 企业表路径（.csv/.xlsx）
    pub entity_table_path: Option<PathBuf>,
    /// 政策工具表路径（.csv/.xlsx）
    pub instrument_table_path: Option<PathBuf>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            default_budget: 100_000_000.0,
            default_w_rev: 0.5,
            default_w_emp: 0.5,
            weight_sum_tolerance: 0.01,
            match_mode: MatchMode::LabelSet,
            entity_table_path: None,
            instrument_table_path: None,
        }
    }
}

impl OptimizerConfig {
    /// 默认权重
    pub fn default_weights(&self) -> PolicyWeights {
        PolicyWeights::new(self.default_w_rev, self.default_w_emp)
    }

    /// 从 JSON 文件加载
    ///
    /// # 返回
    /// - 文件不存在 → 默认配置
    /// - 读取/解析失败 → ConfigError
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// 加载配置：配置文件 + 环境变量覆写
    ///
    /// # 环境变量
    /// - SUBSIDY_OPTIMIZER_CONFIG: 配置文件路径
    /// - SUBSIDY_OPTIMIZER_ENTITIES / SUBSIDY_OPTIMIZER_INSTRUMENTS: 数据表路径
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(default_config_path())?;

        if let Some(path) = env_path(ENV_ENTITY_TABLE) {
            config.entity_table_path = Some(path);
        }
        if let Some(path) = env_path(ENV_INSTRUMENT_TABLE) {
            config.instrument_table_path = Some(path);
        }

        Ok(config)
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_budget.is_finite() || self.default_budget < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "default_budget".to_string(),
                message: format!("预算必须为非负有限数, 实际 {}", self.default_budget),
            });
        }
        if !self.default_w_rev.is_finite() || !self.default_w_emp.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "default_w_rev/default_w_emp".to_string(),
                message: "权重必须为有限数".to_string(),
            });
        }
        if !self.weight_sum_tolerance.is_finite() || self.weight_sum_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "weight_sum_tolerance".to_string(),
                message: format!("容差必须为非负有限数, 实际 {}", self.weight_sum_tolerance),
            });
        }
        Ok(())
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// 默认配置文件路径
///
/// 优先级: SUBSIDY_OPTIMIZER_CONFIG > {config_dir}/subsidy-optimizer/config.json > ./subsidy_optimizer.json
pub fn default_config_path() -> PathBuf {
    if let Some(path) = env_path(ENV_CONFIG_PATH) {
        return path;
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("subsidy-optimizer").join("config.json"),
        None => PathBuf::from("./subsidy_optimizer.json"),
    }
}
