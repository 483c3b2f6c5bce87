// ==========================================
// MSME 补贴分配优化系统 - 资格匹配引擎
// ==========================================
// 职责: 判定单个 (企业, 政策工具) 组合是否适用
// 规则: 行业 / 规模等级 / 地域 三项条件必须同时满足
// 红线: 无状态、无副作用、缺失字段按空串处理，永不报错
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::instrument::Instrument;
use crate::domain::types::MatchMode;

/// 三项条件的逐项判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityCheck {
    pub sector_match: bool,
    pub category_match: bool,
    pub location_match: bool,
}

impl EligibilityCheck {
    pub fn is_eligible(&self) -> bool {
        self.sector_match && self.category_match && self.location_match
    }

    /// 未通过的条件（用于无资格企业的日志解释）
    pub fn failed_criteria(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if !self.sector_match {
            failed.push("SECTOR");
        }
        if !self.category_match {
            failed.push("CATEGORY");
        }
        if !self.location_match {
            failed.push("LOCATION");
        }
        failed
    }
}

// ==========================================
// EligibilityMatcher - 资格匹配器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityMatcher {
    mode: MatchMode,
}

impl EligibilityMatcher {
    /// 创建匹配器
    ///
    /// # 参数
    /// - mode: LABEL_SET（默认）或 SUBSTRING（兼容旧版）
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// 逐项评估资格条件
    pub fn evaluate(&self, entity: &Entity, instrument: &Instrument) -> EligibilityCheck {
        EligibilityCheck {
            sector_match: instrument.eligible_sectors.admits(&entity.sector, self.mode),
            category_match: instrument.target_category.admits(&entity.category, self.mode),
            location_match: instrument
                .location_criteria
                .admits(&entity.location_type, self.mode),
        }
    }

    /// 判定组合是否合格
    pub fn is_eligible(&self, entity: &Entity, instrument: &Instrument) -> bool {
        self.evaluate(entity, instrument).is_eligible()
    }

    /// 筛选对某企业合格的全部政策工具（保持目录顺序）
    pub fn eligible_instruments<'a>(
        &self,
        entity: &Entity,
        instruments: &'a [Instrument],
    ) -> Vec<&'a Instrument> {
        instruments
            .iter()
            .filter(|instrument| self.is_eligible(entity, instrument))
            .collect()
    }
}
