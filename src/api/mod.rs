// ==========================================
// MSME 补贴分配优化系统 - API 层
// ==========================================
// 职责: 提供进程内调用接口,供外部路由层/命令行调用
// ==========================================

pub mod error;
pub mod optimization_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use optimization_api::OptimizationApi;
