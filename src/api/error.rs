// ==========================================
// MSME 补贴分配优化系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/配置错误为调用方可读的消息
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方前置条件错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据源 / 配置错误
    // ==========================================
    #[error("数据导入失败: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::InternalError(format!("后台任务失败: {}", err))
    }
}

/// API层结果类型别名
pub type ApiResult<T> = Result<T, ApiError>;
