// ==========================================
// MSME 补贴分配优化系统 - 汇总引擎
// ==========================================
// 职责: 全局摘要 + 行业汇总
// 输入: 分配结果
// 输出: OptimizationSummary / Vec<SectorStat>
// ==========================================

use crate::domain::allocation::Allocation;
use crate::domain::report::{OptimizationSummary, SectorStat};
use crate::engine::allocator::AllocationOutcome;
use std::collections::HashMap;

// ==========================================
// Aggregator - 汇总引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数,不修改输入
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// 生成全局摘要
    ///
    /// # 规则
    /// - spent = initial - remaining
    /// - 就业合计取整（向零截断）
    pub fn summarize(&self, outcome: &AllocationOutcome) -> OptimizationSummary {
        if outcome.allocations.is_empty() {
            return OptimizationSummary::empty(outcome.initial_budget);
        }

        let total_jobs: f64 = outcome.allocations.iter().map(|a| a.jobs_created).sum();
        let total_revenue_gain: f64 = outcome.allocations.iter().map(|a| a.revenue_increase).sum();

        OptimizationSummary {
            initial_budget: outcome.initial_budget,
            spent_budget: outcome.spent_budget(),
            remaining_budget: outcome.remaining_budget,
            entities_funded: outcome.allocations.len(),
            total_jobs_created: total_jobs.trunc() as i64,
            total_revenue_gain,
        }
    }

    /// 按行业汇总
    ///
    /// # 排序
    /// 按总成本降序；并列保持首次出现顺序
    pub fn sector_rollup(&self, allocations: &[Allocation]) -> Vec<SectorStat> {
        let mut stats: Vec<SectorStat> = Vec::new();
        let mut index_by_sector: HashMap<&str, usize> = HashMap::new();

        for allocation in allocations {
            let idx = *index_by_sector
                .entry(allocation.sector.as_str())
                .or_insert_with(|| {
                    stats.push(SectorStat {
                        sector: allocation.sector.clone(),
                        entities_funded: 0,
                        total_cost: 0.0,
                        total_revenue_gain: 0.0,
                        total_jobs_created: 0.0,
                    });
                    stats.len() - 1
                });

            let stat = &mut stats[idx];
            stat.entities_funded += 1;
            stat.total_cost += allocation.cost;
            stat.total_revenue_gain += allocation.revenue_increase;
            stat.total_jobs_created += allocation.jobs_created;
        }

        // 稳定排序，保留首次出现顺序
        stats.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
        stats
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
