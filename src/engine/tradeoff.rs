// ==========================================
// MSME 补贴分配优化系统 - 权衡曲线扫描
// ==========================================
// 职责: 在固定权重网格上重复运行完整优化，描绘效率前沿
// 网格: w_rev ∈ {0.0, 0.2, 0.4, 0.6, 0.8, 1.0}，w_emp = 1 - w_rev（一位小数）
// 红线: 每个网格点从零开始独立运行，不共享评分
// ==========================================

use crate::domain::catalog::PolicyCatalog;
use crate::domain::report::{OptimizationResult, TradeoffPoint};
use crate::domain::types::PolicyWeights;
use crate::engine::orchestrator::OptimizationEngine;
use crate::perf::PerfGuard;
use tracing::instrument;

/// 网格点数
pub const TRADEOFF_GRID_STEPS: usize = 6;

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// 固定权重网格
pub fn weight_grid() -> Vec<PolicyWeights> {
    (0..TRADEOFF_GRID_STEPS)
        .map(|step| {
            let w_rev = round_one_decimal(step as f64 * 0.2);
            let w_emp = round_one_decimal(1.0 - w_rev);
            PolicyWeights::new(w_rev, w_emp)
        })
        .collect()
}

/// 由一次优化结果提取曲线点
pub fn point_from(weights: PolicyWeights, result: &OptimizationResult) -> TradeoffPoint {
    TradeoffPoint {
        w_rev: weights.w_rev,
        w_emp: weights.w_emp,
        total_revenue_gain: result.summary.total_revenue_gain,
        total_jobs_created: result.summary.total_jobs_created,
        entities_funded: result.summary.entities_funded,
    }
}

// ==========================================
// TradeoffSweep - 权衡曲线扫描器
// ==========================================
pub struct TradeoffSweep<'a> {
    engine: &'a OptimizationEngine,
}

impl<'a> TradeoffSweep<'a> {
    pub fn new(engine: &'a OptimizationEngine) -> Self {
        Self { engine }
    }

    /// 顺序扫描全部网格点
    #[instrument(skip(self, catalog))]
    pub fn sweep(&self, catalog: &PolicyCatalog, budget: f64) -> Vec<TradeoffPoint> {
        let mut perf = PerfGuard::new("tradeoff_sweep");
        perf.set_items(TRADEOFF_GRID_STEPS);

        weight_grid()
            .into_iter()
            .map(|weights| {
                let result = self.engine.optimize(catalog, budget, weights);
                point_from(weights, &result)
            })
            .collect()
    }
}
