// ==========================================
// MSME 补贴分配优化系统 - 候选 / 分配 / 淘汰记录
// ==========================================
// 职责: 定义单次优化运行的派生对象
// 红线: 候选每次运行重新生成，运行结束即丢弃
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::instrument::Instrument;
use crate::domain::types::RejectionReason;
use serde::{Deserialize, Serialize};

// ==========================================
// Candidate - 合格的 (企业, 政策工具) 组合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub entity_id: String,
    /// 企业行业（用于后续行业汇总）
    pub sector: String,
    pub instrument_id: String,
    pub instrument_name: String,
    /// 成本 = 补贴上限
    pub cost: f64,
    pub revenue_increase: f64,
    pub jobs_created: f64,
    pub before_revenue: f64,
    pub after_revenue: f64,
    // 以下字段由 ImpactScorer 填充
    pub norm_revenue: f64,
    pub norm_jobs: f64,
    pub score: f64,
    pub score_per_cost: f64,
}

impl Candidate {
    /// 由合格组合生成未打分的候选
    pub fn from_pair(entity: &Entity, instrument: &Instrument) -> Self {
        let before_revenue = entity.annual_revenue;
        let revenue_increase = instrument.revenue_increase_for(before_revenue);

        Self {
            entity_id: entity.id.clone(),
            sector: entity.sector.clone(),
            instrument_id: instrument.id.clone(),
            instrument_name: instrument.name.clone(),
            cost: instrument.max_subsidy_amount,
            revenue_increase,
            jobs_created: instrument.employment_impact_jobs,
            before_revenue,
            after_revenue: before_revenue + revenue_increase,
            norm_revenue: 0.0,
            norm_jobs: 0.0,
            score: 0.0,
            score_per_cost: 0.0,
        }
    }
}

// ==========================================
// Allocation - 入选的候选（不可变）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub entity_id: String,
    pub sector: String,
    pub instrument_id: String,
    pub instrument_name: String,
    pub score: f64,
    pub score_per_cost: f64,
    pub cost: f64,
    pub before_revenue: f64,
    pub after_revenue: f64,
    pub revenue_increase: f64,
    pub jobs_created: f64,
}

impl From<Candidate> for Allocation {
    fn from(c: Candidate) -> Self {
        Self {
            entity_id: c.entity_id,
            sector: c.sector,
            instrument_id: c.instrument_id,
            instrument_name: c.instrument_name,
            score: c.score,
            score_per_cost: c.score_per_cost,
            cost: c.cost,
            before_revenue: c.before_revenue,
            after_revenue: c.after_revenue,
            revenue_increase: c.revenue_increase,
            jobs_created: c.jobs_created,
        }
    }
}

// ==========================================
// Rejection - 淘汰记录（必须带原因）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub entity_id: String,
    pub sector: String,
    /// 无合格工具的企业为 None
    pub instrument_id: Option<String>,
    pub instrument_name: Option<String>,
    pub cost: Option<f64>,
    pub score: Option<f64>,
    pub reason: RejectionReason,
}

impl Rejection {
    /// 预算不足的候选
    pub fn budget_miss(candidate: &Candidate) -> Self {
        Self {
            entity_id: candidate.entity_id.clone(),
            sector: candidate.sector.clone(),
            instrument_id: Some(candidate.instrument_id.clone()),
            instrument_name: Some(candidate.instrument_name.clone()),
            cost: Some(candidate.cost),
            score: Some(candidate.score),
            reason: RejectionReason::classify_budget_miss(candidate.score),
        }
    }

    /// 无任何合格工具的企业
    pub fn ineligible(entity: &Entity) -> Self {
        Self {
            entity_id: entity.id.clone(),
            sector: entity.sector.clone(),
            instrument_id: None,
            instrument_name: None,
            cost: None,
            score: None,
            reason: RejectionReason::Ineligible,
        }
    }
}
