// ==========================================
// MSME 补贴分配优化系统 - 单户建议引擎
// ==========================================
// 职责: 对单个企业按预计营收增量排名合格政策工具
// 红线: 不涉及预算与权重（建议排名，不是分配）
// ==========================================

use crate::domain::catalog::PolicyCatalog;
use crate::domain::entity::Entity;
use crate::domain::instrument::Instrument;
use crate::domain::report::{Projection, Recommendation};
use crate::engine::eligibility::EligibilityMatcher;
use crate::perf::PerfGuard;
use tracing::{debug, instrument};

/// 建议列表最大条数
pub const ADVISOR_TOP_N: usize = 5;

// ==========================================
// Advisor - 单户建议引擎
// ==========================================
pub struct Advisor {
    matcher: EligibilityMatcher,
}

impl Advisor {
    pub fn new(matcher: EligibilityMatcher) -> Self {
        Self { matcher }
    }

    /// 为单个企业排名合格工具
    ///
    /// # 规则
    /// 1) 对目录中每个工具做资格匹配
    /// 2) 按营收增量降序（稳定排序，并列保持目录顺序）
    /// 3) 截取前 5 条，首条标记 recommended
    ///
    /// # 返回
    /// 无合格工具时返回空列表
    #[instrument(skip(self, entity, instruments), fields(entity_id = %entity.id))]
    pub fn advise(&self, entity: &Entity, instruments: &[Instrument]) -> Vec<Recommendation> {
        let mut ranked: Vec<Recommendation> = self
            .matcher
            .eligible_instruments(entity, instruments)
            .into_iter()
            .map(|instrument| {
                let before_revenue = entity.annual_revenue;
                let revenue_gain = instrument.revenue_increase_for(before_revenue);
                Recommendation {
                    instrument_id: instrument.id.clone(),
                    instrument_name: instrument.name.clone(),
                    revenue_impact_percent: instrument.revenue_impact_percent,
                    employment_impact_jobs: instrument.employment_impact_jobs,
                    before_revenue,
                    after_revenue: before_revenue + revenue_gain,
                    revenue_gain,
                    max_subsidy_amount: instrument.max_subsidy_amount,
                    recommended: false,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.revenue_gain.total_cmp(&a.revenue_gain));
        ranked.truncate(ADVISOR_TOP_N);
        if let Some(first) = ranked.first_mut() {
            first.recommended = true;
        }

        debug!(recommendations = ranked.len(), "advice ranked");
        ranked
    }

    /// 全量预测：每户取营收提升比例最高的合格工具（并列取目录中靠前者）
    ///
    /// 无合格工具的企业不出现在结果中
    pub fn simulate_projections(&self, catalog: &PolicyCatalog) -> Vec<Projection> {
        let mut perf = PerfGuard::new("simulate_projections");
        perf.set_items(catalog.entities().len());

        catalog
            .entities()
            .iter()
            .filter_map(|entity| {
                let best = self
                    .matcher
                    .eligible_instruments(entity, catalog.instruments())
                    .into_iter()
                    .fold(None::<&Instrument>, |best, candidate| match best {
                        Some(b) if b.revenue_impact_percent >= candidate.revenue_impact_percent => {
                            Some(b)
                        }
                        _ => Some(candidate),
                    })?;

                let before_revenue = entity.annual_revenue;
                let after_revenue = before_revenue + best.revenue_increase_for(before_revenue);
                Some(Projection {
                    entity_id: entity.id.clone(),
                    instrument_name: best.name.clone(),
                    before_revenue,
                    after_revenue: (after_revenue * 100.0).round() / 100.0,
                    jobs_created: best.employment_impact_jobs.trunc() as i64,
                })
            })
            .collect()
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(EligibilityMatcher::default())
    }
}
