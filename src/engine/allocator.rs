// ==========================================
// MSME 补贴分配优化系统 - 预算约束贪心分配引擎
// ==========================================
// 红线: 总分配成本不得超过预算；每家企业至多一个政策工具
// ==========================================
// 职责: 按价值密度排序 → 单次遍历择优 → 淘汰记录分类
// 输入: 已打分候选列表 + 企业表 + 预算
// 输出: 入选分配 + 淘汰记录 + 剩余预算
// 说明: 多选背包的确定性贪心近似，不回溯、不保证最优
// ==========================================

use crate::domain::allocation::{Allocation, Candidate, Rejection};
use crate::domain::entity::Entity;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// 单次分配结果
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub initial_budget: f64,
    /// 按排序后顺序排列（不再二次排序）
    pub allocations: Vec<Allocation>,
    /// 预算淘汰在前（遍历顺序），无资格企业在后（企业表顺序）
    pub rejected: Vec<Rejection>,
    pub remaining_budget: f64,
}

impl AllocationOutcome {
    pub fn spent_budget(&self) -> f64 {
        self.initial_budget - self.remaining_budget
    }
}

// ==========================================
// GreedyAllocator - 贪心分配器
// ==========================================
pub struct GreedyAllocator {
    // 无状态引擎，不需要注入依赖
}

impl GreedyAllocator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 在预算内选择候选
    ///
    /// 规则：
    /// 1) score_per_cost 降序稳定排序（并列保持生成顺序：企业优先，其次工具顺序）
    /// 2) 企业已有决定 → 直接跳过（更差的工具，不另记淘汰）
    /// 3) 剩余预算 ≥ 成本 → 入选，扣减预算
    /// 4) 否则 → 企业同样标记为已决定，并按得分分类淘汰原因
    /// 5) 企业表中没有任何候选的企业 → 记为无资格
    ///
    /// # 参数
    /// - `candidates`: 已打分的候选（生成顺序）
    /// - `entities`: 本次运行的企业表
    /// - `budget`: 总预算（非负）
    #[instrument(skip(self, candidates, entities), fields(
        candidates_count = candidates.len(),
        entities_count = entities.len()
    ))]
    pub fn allocate(
        &self,
        mut candidates: Vec<Candidate>,
        entities: &[Entity],
        budget: f64,
    ) -> AllocationOutcome {
        // Vec::sort_by 为稳定排序
        candidates.sort_by(|a, b| b.score_per_cost.total_cmp(&a.score_per_cost));

        let eligible_entities: HashSet<&str> =
            candidates.iter().map(|c| c.entity_id.as_str()).collect();

        let mut allocations = Vec::new();
        let mut rejected = Vec::new();
        let mut decided: HashSet<String> = HashSet::new();
        let mut remaining_budget = budget;

        for candidate in &candidates {
            if decided.contains(&candidate.entity_id) {
                continue;
            }

            if remaining_budget >= candidate.cost {
                remaining_budget -= candidate.cost;
                decided.insert(candidate.entity_id.clone());
                allocations.push(Allocation::from(candidate.clone()));
            } else {
                decided.insert(candidate.entity_id.clone());
                rejected.push(Rejection::budget_miss(candidate));
            }
        }

        let budget_rejections = rejected.len();

        // 无资格企业
        for entity in entities {
            if !eligible_entities.contains(entity.id.as_str()) {
                rejected.push(Rejection::ineligible(entity));
            }
        }

        debug!(
            allocated = allocations.len(),
            budget_rejections,
            ineligible = rejected.len() - budget_rejections,
            remaining_budget,
            "greedy allocation finished"
        );

        AllocationOutcome {
            initial_budget: budget,
            allocations,
            rejected,
            remaining_budget,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for GreedyAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RejectionReason;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    /// 创建已打分的测试候选
    fn scored(
        entity_id: &str,
        instrument_id: &str,
        cost: f64,
        score: f64,
        score_per_cost: f64,
    ) -> Candidate {
        Candidate {
            entity_id: entity_id.to_string(),
            sector: "IT".to_string(),
            instrument_id: instrument_id.to_string(),
            instrument_name: format!("Scheme {}", instrument_id),
            cost,
            revenue_increase: 0.0,
            jobs_created: 0.0,
            before_revenue: 0.0,
            after_revenue: 0.0,
            norm_revenue: 0.0,
            norm_jobs: 0.0,
            score,
            score_per_cost,
        }
    }

    fn entity(id: &str) -> Entity {
        Entity::new(id, Some("IT"), Some("Micro"), Some("Urban"), Some(100.0))
    }

    // ==========================================
    // 基础功能测试
    // ==========================================

    #[test]
    fn test_empty_candidates_return_full_budget() {
        let outcome = GreedyAllocator::new().allocate(vec![], &[], 500.0);

        assert!(outcome.allocations.is_empty());
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.remaining_budget, 500.0);
        assert_eq!(outcome.spent_budget(), 0.0);
    }

    #[test]
    fn test_sorted_by_density_descending() {
        let candidates = vec![
            scored("M1", "S1", 10.0, 0.6, 0.06),
            scored("M2", "S1", 10.0, 0.9, 0.09),
            scored("M3", "S1", 10.0, 0.7, 0.07),
        ];
        let entities = vec![entity("M1"), entity("M2"), entity("M3")];

        let outcome = GreedyAllocator::new().allocate(candidates, &entities, 100.0);

        let ids: Vec<&str> = outcome.allocations.iter().map(|a| a.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["M2", "M3", "M1"]);
        assert_eq!(outcome.remaining_budget, 70.0);
    }

    #[test]
    fn test_ties_preserve_generation_order() {
        let candidates = vec![
            scored("M1", "S1", 10.0, 0.5, 0.05),
            scored("M2", "S1", 10.0, 0.5, 0.05),
            scored("M3", "S1", 10.0, 0.5, 0.05),
        ];
        let entities = vec![entity("M1"), entity("M2"), entity("M3")];

        let outcome = GreedyAllocator::new().allocate(candidates, &entities, 20.0);

        assert_eq!(outcome.allocations[0].entity_id, "M1");
        assert_eq!(outcome.allocations[1].entity_id, "M2");
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].entity_id, "M3");
        assert_eq!(outcome.rejected[0].reason, RejectionReason::BudgetExhausted);
    }

    #[test]
    fn test_one_instrument_per_entity() {
        let candidates = vec![
            scored("M1", "S1", 10.0, 0.8, 0.08),
            scored("M1", "S2", 10.0, 0.6, 0.06),
        ];
        let outcome = GreedyAllocator::new().allocate(candidates, &[entity("M1")], 100.0);

        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(outcome.allocations[0].instrument_id, "S1");
        // 更差的工具直接跳过，不记淘汰
        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.remaining_budget, 90.0);
    }

    #[test]
    fn test_unaffordable_first_choice_blocks_weaker_instruments() {
        // 首选买不起 → 企业被标记，后续更便宜的工具也不再考虑
        let candidates = vec![
            scored("M1", "S1", 200.0, 0.9, 0.0045),
            scored("M1", "S2", 10.0, 0.02, 0.002),
        ];
        let outcome = GreedyAllocator::new().allocate(candidates, &[entity("M1")], 50.0);

        assert!(outcome.allocations.is_empty());
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].instrument_id.as_deref(), Some("S1"));
        assert_eq!(outcome.rejected[0].reason, RejectionReason::BudgetExhausted);
        assert_eq!(outcome.remaining_budget, 50.0);
    }

    #[test]
    fn test_costlier_instrument_taken_when_denser_and_affordable() {
        let candidates = vec![
            scored("M1", "CHEAP", 10.0, 0.1, 0.01),
            scored("M1", "DEAR", 50.0, 1.0, 0.02),
        ];
        let outcome = GreedyAllocator::new().allocate(candidates, &[entity("M1")], 60.0);

        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(outcome.allocations[0].instrument_id, "DEAR");
        assert_eq!(outcome.remaining_budget, 10.0);
    }

    #[test]
    fn test_rejection_reason_by_score_band() {
        let candidates = vec![
            scored("M1", "S1", 100.0, 0.2, 0.002),
            scored("M2", "S1", 100.0, 0.4, 0.004),
            scored("M3", "S1", 100.0, 0.7, 0.007),
        ];
        let entities = vec![entity("M1"), entity("M2"), entity("M3")];
        let outcome = GreedyAllocator::new().allocate(candidates, &entities, 0.0);

        assert!(outcome.allocations.is_empty());
        let reasons: Vec<(&str, RejectionReason)> = outcome
            .rejected
            .iter()
            .map(|r| (r.entity_id.as_str(), r.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("M3", RejectionReason::BudgetExhausted),
                ("M2", RejectionReason::LowerWeightedScore),
                ("M1", RejectionReason::PolicyPriorityMismatch),
            ]
        );
    }

    #[test]
    fn test_ineligible_entities_reported_after_budget_rejections() {
        let candidates = vec![scored("M1", "S1", 10.0, 0.9, 0.09)];
        let entities = vec![entity("M0"), entity("M1"), entity("M2")];

        let outcome = GreedyAllocator::new().allocate(candidates, &entities, 100.0);

        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(outcome.rejected[0].entity_id, "M0");
        assert_eq!(outcome.rejected[1].entity_id, "M2");
        assert!(outcome
            .rejected
            .iter()
            .all(|r| r.reason == RejectionReason::Ineligible && r.instrument_id.is_none()));
    }

    #[test]
    fn test_zero_cost_candidate_fits_zero_budget() {
        let candidates = vec![scored("M1", "FREE", 0.0, 0.3, 0.3)];
        let outcome = GreedyAllocator::new().allocate(candidates, &[entity("M1")], 0.0);

        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(outcome.remaining_budget, 0.0);
    }
}
