// ==========================================
// MSME 补贴分配优化系统 - 优化编排器
// ==========================================
// 职责: 串联 资格匹配 → 影响评分 → 贪心分配 → 汇总
// 红线: 每次调用都是输入的纯函数，不跨调用保留状态
// ==========================================

use crate::domain::allocation::Candidate;
use crate::domain::catalog::PolicyCatalog;
use crate::domain::report::OptimizationResult;
use crate::domain::types::{MatchMode, PolicyWeights};
use crate::engine::aggregator::Aggregator;
use crate::engine::allocator::GreedyAllocator;
use crate::engine::eligibility::EligibilityMatcher;
use crate::engine::scoring::ImpactScorer;
use crate::perf::PerfGuard;
use tracing::{debug, info, instrument};

// ==========================================
// OptimizationEngine - 优化编排器
// ==========================================
pub struct OptimizationEngine {
    matcher: EligibilityMatcher,
    scorer: ImpactScorer,
    allocator: GreedyAllocator,
    aggregator: Aggregator,
}

impl OptimizationEngine {
    /// 创建编排器
    ///
    /// # 参数
    /// - match_mode: 资格匹配模式
    pub fn new(match_mode: MatchMode) -> Self {
        Self {
            matcher: EligibilityMatcher::new(match_mode),
            scorer: ImpactScorer::new(),
            allocator: GreedyAllocator::new(),
            aggregator: Aggregator::new(),
        }
    }

    /// 生成全部合格候选（企业优先，其次工具目录顺序）
    ///
    /// 无任何合格工具的企业在 debug 级别输出逐工具未通过条件
    pub fn generate_candidates(&self, catalog: &PolicyCatalog) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for entity in catalog.entities() {
            let mut failed: Vec<(&str, Vec<&'static str>)> = Vec::new();

            for instrument in catalog.instruments() {
                let check = self.matcher.evaluate(entity, instrument);
                if check.is_eligible() {
                    candidates.push(Candidate::from_pair(entity, instrument));
                } else {
                    failed.push((instrument.id.as_str(), check.failed_criteria()));
                }
            }

            if failed.len() == catalog.instruments().len() {
                debug!(
                    entity_id = %entity.id,
                    failed_criteria = ?failed,
                    "entity ineligible for every instrument"
                );
            }
        }
        candidates
    }

    /// 运行一次完整优化
    ///
    /// # 参数
    /// - `catalog`: 企业表 + 政策工具表快照
    /// - `budget`: 总预算
    /// - `weights`: 营收/就业权重
    ///
    /// # 返回
    /// 摘要 + 分配 + 淘汰 + 行业汇总；无候选时返回零值摘要
    #[instrument(skip(self, catalog), fields(
        entities_count = catalog.entities().len(),
        instruments_count = catalog.instruments().len()
    ))]
    pub fn optimize(
        &self,
        catalog: &PolicyCatalog,
        budget: f64,
        weights: PolicyWeights,
    ) -> OptimizationResult {
        let mut perf = PerfGuard::new("optimize");

        let mut candidates = self.generate_candidates(catalog);
        perf.set_items(candidates.len());

        let basis = self.scorer.score(&mut candidates, weights);
        let outcome = self.allocator.allocate(candidates, catalog.entities(), budget);

        let summary = self.aggregator.summarize(&outcome);
        let sector_stats = self.aggregator.sector_rollup(&outcome.allocations);

        info!(
            entities_funded = summary.entities_funded,
            spent_budget = summary.spent_budget,
            rejected = outcome.rejected.len(),
            max_revenue_increase = basis.max_revenue_increase,
            max_jobs_created = basis.max_jobs_created,
            "optimization finished"
        );

        OptimizationResult {
            summary,
            allocations: outcome.allocations,
            rejected: outcome.rejected,
            sector_stats,
        }
    }
}

impl Default for OptimizationEngine {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}
