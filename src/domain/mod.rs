// ==========================================
// MSME 补贴分配优化系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象、输出报告
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod catalog;
pub mod entity;
pub mod instrument;
pub mod report;
pub mod types;

// 重导出核心类型
pub use allocation::{Allocation, Candidate, Rejection};
pub use catalog::PolicyCatalog;
pub use entity::Entity;
pub use instrument::{Instrument, InstrumentFields};
pub use report::{
    OptimizationResult, OptimizationSummary, Projection, Recommendation, SectorStat,
    TradeoffPoint,
};
pub use types::{Criterion, MatchMode, PolicyWeights, RejectionReason};
