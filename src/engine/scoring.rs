// ==========================================
// MSME 补贴分配优化系统 - 影响评分引擎
// ==========================================
// 职责: 归一化营收/就业影响，计算加权综合得分与价值密度
// 红线: 纯函数、与顺序无关；权重变化必须重新评分，不缓存
// ==========================================

use crate::domain::allocation::Candidate;
use crate::domain::types::PolicyWeights;

/// 归一化分母（不会为 0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationBasis {
    pub max_revenue_increase: f64,
    pub max_jobs_created: f64,
}

impl NormalizationBasis {
    /// 由候选列表计算分母；最大值为 0（或列表为空）时以 1 代替
    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        let max_rev = candidates
            .iter()
            .map(|c| c.revenue_increase)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_jobs = candidates
            .iter()
            .map(|c| c.jobs_created)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            max_revenue_increase: denominator_or_one(max_rev),
            max_jobs_created: denominator_or_one(max_jobs),
        }
    }
}

fn denominator_or_one(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max
    } else {
        1.0
    }
}

// ==========================================
// ImpactScorer - 影响评分器
// ==========================================
pub struct ImpactScorer {
    // 无状态引擎
}

impl ImpactScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// 为全部候选打分（原地写入 norm_* / score / score_per_cost）
    ///
    /// # 规则
    /// 1) norm = 原值 / 全体最大值
    /// 2) score = w_rev * norm_revenue + w_emp * norm_jobs
    /// 3) score_per_cost = score / cost，cost 为 0 时按 1 计算（仅用于该除法）
    ///
    /// # 返回
    /// 本次使用的归一化分母
    pub fn score(&self, candidates: &mut [Candidate], weights: PolicyWeights) -> NormalizationBasis {
        let basis = NormalizationBasis::from_candidates(candidates);

        for candidate in candidates.iter_mut() {
            candidate.norm_revenue = candidate.revenue_increase / basis.max_revenue_increase;
            candidate.norm_jobs = candidate.jobs_created / basis.max_jobs_created;
            candidate.score =
                weights.w_rev * candidate.norm_revenue + weights.w_emp * candidate.norm_jobs;

            let divisor = if candidate.cost == 0.0 { 1.0 } else { candidate.cost };
            candidate.score_per_cost = candidate.score / divisor;
        }

        basis
    }
}

impl Default for ImpactScorer {
    fn default() -> Self {
        Self::new()
    }
}
