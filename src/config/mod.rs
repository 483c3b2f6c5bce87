// ==========================================
// MSME 补贴分配优化系统 - 配置层
// ==========================================
// 职责: 优化默认参数与数据源路径
// 存储: JSON 配置文件 + 环境变量
// ==========================================

pub mod optimizer_config;

// 重导出核心配置
pub use optimizer_config::{default_config_path, ConfigError, OptimizerConfig};
