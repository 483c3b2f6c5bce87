// ==========================================
// MSME 补贴分配优化系统 - 引擎层
// ==========================================
// 职责: 资格匹配、影响评分、贪心分配、汇总、权衡扫描、单户建议
// 红线: Engine 不做 I/O, 所有淘汰必须输出 reason
// ==========================================

pub mod advisor;
pub mod aggregator;
pub mod allocator;
pub mod eligibility;
pub mod orchestrator;
pub mod scoring;
pub mod tradeoff;

// 重导出核心引擎
pub use advisor::{Advisor, ADVISOR_TOP_N};
pub use aggregator::Aggregator;
pub use allocator::{AllocationOutcome, GreedyAllocator};
pub use eligibility::{EligibilityCheck, EligibilityMatcher};
pub use orchestrator::OptimizationEngine;
pub use scoring::{ImpactScorer, NormalizationBasis};
pub use tradeoff::{point_from, weight_grid, TradeoffSweep, TRADEOFF_GRID_STEPS};
