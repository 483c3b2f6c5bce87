// ==========================================
// MSME 补贴分配优化系统 - 企业实体
// ==========================================
// 红线: 单次优化运行期间不可变
// ==========================================

use serde::{Deserialize, Serialize};

/// 企业记录（一家 MSME）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// 企业唯一标识
    pub id: String,
    /// 行业
    pub sector: String,
    /// 企业规模等级（Micro/Small/Medium）
    pub category: String,
    /// 地域类型（Urban/Rural）
    pub location_type: String,
    /// 年营收（非负）
    pub annual_revenue: f64,
}

impl Entity {
    /// 构造企业记录，在边界处统一归一化缺失字段
    ///
    /// # 规则
    /// - 缺失文本 → 空串
    /// - 缺失/非有限/负数营收 → 0
    pub fn new(
        id: impl Into<String>,
        sector: Option<&str>,
        category: Option<&str>,
        location_type: Option<&str>,
        annual_revenue: Option<f64>,
    ) -> Self {
        Self {
            id: id.into().trim().to_string(),
            sector: text_or_empty(sector),
            category: text_or_empty(category),
            location_type: text_or_empty(location_type),
            annual_revenue: non_negative_or_zero(annual_revenue),
        }
    }
}

pub(crate) fn text_or_empty(value: Option<&str>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

pub(crate) fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

pub(crate) fn non_negative_or_zero(value: Option<f64>) -> f64 {
    finite_or_zero(value).max(0.0)
}
