// ==========================================
// MSME 补贴分配优化系统 - 政策工具（扶持计划）
// ==========================================
// 职责: 扶持计划目录条目，资格条件在构造时解析
// ==========================================

use crate::domain::entity::{finite_or_zero, non_negative_or_zero, text_or_empty};
use crate::domain::types::{Criterion, WILDCARD_URBAN_RURAL};
use serde::{Deserialize, Serialize};

/// 政策工具（一个扶持计划）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    /// 适用行业（"All" 或一个/多个行业）
    pub eligible_sectors: Criterion,
    /// 目标规模等级
    pub target_category: Criterion,
    /// 地域条件（"All"、"Urban/Rural" 或具体地域）
    pub location_criteria: Criterion,
    /// 营收提升百分比（缺失 → 0）
    pub revenue_impact_percent: f64,
    /// 新增就业岗位数（缺失 → 0）
    pub employment_impact_jobs: f64,
    /// 单户补贴上限（缺失 → 0，非负）
    pub max_subsidy_amount: f64,
}

/// 政策工具原始字段（导入层/调用方传入）
#[derive(Debug, Clone, Default)]
pub struct InstrumentFields<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub eligible_sectors: Option<&'a str>,
    pub target_category: Option<&'a str>,
    pub location_criteria: Option<&'a str>,
    pub revenue_impact_percent: Option<f64>,
    pub employment_impact_jobs: Option<f64>,
    pub max_subsidy_amount: Option<f64>,
}

impl Instrument {
    /// 构造政策工具，统一归一化缺失字段并解析资格条件
    pub fn new(fields: InstrumentFields<'_>) -> Self {
        let id = fields.id.trim().to_string();
        let name = match fields.name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => id.clone(),
        };

        Self {
            id,
            name,
            eligible_sectors: Criterion::parse(&text_or_empty(fields.eligible_sectors), &[]),
            target_category: Criterion::parse(&text_or_empty(fields.target_category), &[]),
            location_criteria: Criterion::parse(
                &text_or_empty(fields.location_criteria),
                &[WILDCARD_URBAN_RURAL],
            ),
            revenue_impact_percent: finite_or_zero(fields.revenue_impact_percent),
            employment_impact_jobs: finite_or_zero(fields.employment_impact_jobs),
            max_subsidy_amount: non_negative_or_zero(fields.max_subsidy_amount),
        }
    }

    /// 对给定年营收的营收提升额
    pub fn revenue_increase_for(&self, annual_revenue: f64) -> f64 {
        annual_revenue * self.revenue_impact_percent / 100.0
    }
}
