// ==========================================
// MSME 补贴分配优化系统 - 输出报告结构
// ==========================================
// 职责: 优化结果、行业汇总、权衡曲线点、单户建议
// 说明: 均为可直接序列化的纯数据
// ==========================================

use crate::domain::allocation::{Allocation, Rejection};
use serde::{Deserialize, Serialize};

/// 全局摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSummary {
    pub initial_budget: f64,
    pub spent_budget: f64,
    pub remaining_budget: f64,
    pub entities_funded: usize,
    /// 新增就业合计（取整）
    pub total_jobs_created: i64,
    pub total_revenue_gain: f64,
}

impl OptimizationSummary {
    /// 零分配时的摘要形态
    pub fn empty(budget: f64) -> Self {
        Self {
            initial_budget: budget,
            spent_budget: 0.0,
            remaining_budget: budget,
            entities_funded: 0,
            total_jobs_created: 0,
            total_revenue_gain: 0.0,
        }
    }
}

/// 行业汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorStat {
    pub sector: String,
    pub entities_funded: usize,
    pub total_cost: f64,
    pub total_revenue_gain: f64,
    pub total_jobs_created: f64,
}

/// optimize 的完整输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub summary: OptimizationSummary,
    pub allocations: Vec<Allocation>,
    pub rejected: Vec<Rejection>,
    pub sector_stats: Vec<SectorStat>,
}

/// 权衡曲线上的一个点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeoffPoint {
    pub w_rev: f64,
    pub w_emp: f64,
    pub total_revenue_gain: f64,
    pub total_jobs_created: i64,
    pub entities_funded: usize,
}

/// 单户建议（不受预算约束的排名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub instrument_id: String,
    pub instrument_name: String,
    pub revenue_impact_percent: f64,
    pub employment_impact_jobs: f64,
    pub before_revenue: f64,
    pub after_revenue: f64,
    pub revenue_gain: f64,
    pub max_subsidy_amount: f64,
    pub recommended: bool,
}

/// 全量预测行（每户取营收提升比例最高的工具）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub entity_id: String,
    pub instrument_name: String,
    pub before_revenue: f64,
    /// 保留两位小数
    pub after_revenue: f64,
    pub jobs_created: i64,
}
