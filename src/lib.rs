// ==========================================
// MSME 补贴分配优化系统 - 核心库
// ==========================================
// 技术栈: Rust + tokio + serde
// 系统定位: 决策支持系统 (预算约束下的扶持计划分配)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 匹配/评分/分配/汇总
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 耗时统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Criterion, MatchMode, PolicyWeights, RejectionReason};

// 领域实体
pub use domain::{
    Allocation, Candidate, Entity, Instrument, InstrumentFields, OptimizationResult,
    OptimizationSummary, PolicyCatalog, Projection, Recommendation, Rejection, SectorStat,
    TradeoffPoint,
};

// 引擎
pub use engine::{
    Advisor, Aggregator, EligibilityMatcher, GreedyAllocator, ImpactScorer, OptimizationEngine,
    TradeoffSweep,
};

// API
pub use api::{ApiError, ApiResult, OptimizationApi};

// 配置
pub use config::OptimizerConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "MSME 补贴分配优化系统";
