// ==========================================
// 优化引擎集成测试
// ==========================================
// 职责: 验证 资格匹配 → 评分 → 贪心分配 → 汇总 的端到端性质
// ==========================================

mod helpers;

use helpers::test_data_builder::catalog;
use helpers::{EntityBuilder, InstrumentBuilder};
use std::collections::HashSet;
use subsidy_optimizer::domain::{MatchMode, PolicyCatalog, PolicyWeights, RejectionReason};
use subsidy_optimizer::engine::{
    Advisor, EligibilityMatcher, ImpactScorer, OptimizationEngine, TradeoffSweep,
};

// ==========================================
// 测试数据
// ==========================================

/// 四家企业、三个工具的混合场景
fn mixed_catalog() -> PolicyCatalog {
    catalog(
        vec![
            EntityBuilder::new("M001")
                .sector("Manufacturing")
                .category("Micro")
                .location("Urban")
                .revenue(1_000_000.0)
                .build(),
            EntityBuilder::new("M002")
                .sector("IT")
                .category("Small")
                .location("Rural")
                .revenue(2_000_000.0)
                .build(),
            EntityBuilder::new("M003")
                .sector("Textile")
                .category("Medium")
                .location("Urban")
                .no_revenue()
                .build(),
            EntityBuilder::new("M004")
                .sector("Agriculture")
                .category("Micro")
                .location("Rural")
                .revenue(500_000.0)
                .build(),
        ],
        vec![
            InstrumentBuilder::new("S01")
                .name("Credit Guarantee")
                .revenue_pct(10.0)
                .jobs(4.0)
                .max_subsidy(100_000.0)
                .build(),
            InstrumentBuilder::new("S02")
                .name("Tech Upgrade")
                .sectors("IT, Manufacturing")
                .category("Micro/Small")
                .location("Urban/Rural")
                .revenue_pct(25.0)
                .jobs(2.0)
                .max_subsidy(300_000.0)
                .build(),
            InstrumentBuilder::new("S03")
                .name("Rural Boost")
                .sectors("Agriculture")
                .location("Rural")
                .revenue_pct(15.0)
                .jobs(8.0)
                .max_subsidy(150_000.0)
                .build(),
        ],
    )
}

fn balanced() -> PolicyWeights {
    PolicyWeights::new(0.5, 0.5)
}

// ==========================================
// 预算与唯一性
// ==========================================

#[test]
fn test_budget_cap_and_one_allocation_per_entity() {
    let engine = OptimizationEngine::default();
    let catalog = mixed_catalog();

    for budget in [0.0, 50_000.0, 100_000.0, 300_000.0, 1_000_000.0] {
        let result = engine.optimize(&catalog, budget, balanced());

        let spent: f64 = result.allocations.iter().map(|a| a.cost).sum();
        assert!(spent <= budget, "budget={} spent={}", budget, spent);
        assert_eq!(
            result.summary.remaining_budget + result.summary.spent_budget,
            result.summary.initial_budget
        );

        let mut seen = HashSet::new();
        for allocation in &result.allocations {
            assert!(seen.insert(allocation.entity_id.clone()));
        }
    }
}

#[test]
fn test_full_budget_funds_all_eligible_entities() {
    let result = OptimizationEngine::default().optimize(&mixed_catalog(), 1_000_000.0, balanced());

    let order: Vec<(&str, &str)> = result
        .allocations
        .iter()
        .map(|a| (a.entity_id.as_str(), a.instrument_id.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![("M002", "S01"), ("M004", "S03"), ("M001", "S01"), ("M003", "S01")]
    );

    assert_eq!(result.summary.entities_funded, 4);
    assert_eq!(result.summary.spent_budget, 450_000.0);
    assert_eq!(result.summary.remaining_budget, 550_000.0);
    assert_eq!(result.summary.total_jobs_created, 20);
    assert_eq!(result.summary.total_revenue_gain, 375_000.0);
    assert!(result.rejected.is_empty());

    let sectors: Vec<&str> = result.sector_stats.iter().map(|s| s.sector.as_str()).collect();
    assert_eq!(sectors, vec!["Agriculture", "IT", "Manufacturing", "Textile"]);
}

#[test]
fn test_tight_budget_rejection_reasons() {
    let result = OptimizationEngine::default().optimize(&mixed_catalog(), 300_000.0, balanced());

    let funded: Vec<&str> = result.allocations.iter().map(|a| a.entity_id.as_str()).collect();
    assert_eq!(funded, vec!["M002", "M004"]);
    assert_eq!(result.summary.remaining_budget, 50_000.0);

    assert_eq!(result.rejected.len(), 2);
    assert_eq!(result.rejected[0].entity_id, "M001");
    assert_eq!(result.rejected[0].reason, RejectionReason::LowerWeightedScore);
    assert_eq!(result.rejected[1].entity_id, "M003");
    assert_eq!(result.rejected[1].reason, RejectionReason::PolicyPriorityMismatch);
}

#[test]
fn test_zero_budget() {
    let result = OptimizationEngine::default().optimize(&mixed_catalog(), 0.0, balanced());

    assert!(result.allocations.is_empty());
    assert_eq!(result.summary.initial_budget, 0.0);
    assert_eq!(result.summary.spent_budget, 0.0);
    assert_eq!(result.summary.remaining_budget, 0.0);
    assert!(result.sector_stats.is_empty());
    assert_eq!(result.rejected.len(), 4);
}

#[test]
fn test_single_entity_exact_budget() {
    let catalog = catalog(
        vec![EntityBuilder::new("E1").build()],
        vec![InstrumentBuilder::new("I1").max_subsidy(100.0).build()],
    );

    let result = OptimizationEngine::default().optimize(&catalog, 100.0, balanced());

    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.summary.spent_budget, 100.0);
    assert_eq!(result.summary.remaining_budget, 0.0);
}

#[test]
fn test_entity_without_eligible_instrument_only_reported_ineligible() {
    let catalog = catalog(
        vec![
            EntityBuilder::new("E1").sector("IT").build(),
            EntityBuilder::new("E2").sector("Textile").build(),
        ],
        vec![InstrumentBuilder::new("I1").sectors("IT").build()],
    );

    let result = OptimizationEngine::default().optimize(&catalog, 1_000.0, balanced());

    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.rejected.len(), 1);
    let rejection = &result.rejected[0];
    assert_eq!(rejection.entity_id, "E2");
    assert_eq!(rejection.reason, RejectionReason::Ineligible);
    assert!(rejection.instrument_id.is_none());
}

// ==========================================
// 同一企业的两个工具
// ==========================================

fn two_instrument_catalog() -> PolicyCatalog {
    catalog(
        vec![EntityBuilder::new("E1").revenue(1_000.0).build()],
        vec![
            // 便宜但价值密度低: score 0.35, spc 0.0035
            InstrumentBuilder::new("CHEAP")
                .revenue_pct(5.0)
                .jobs(2.0)
                .max_subsidy(100.0)
                .build(),
            // 昂贵但价值密度高: score 1.0, spc 0.005
            InstrumentBuilder::new("DENSE")
                .revenue_pct(10.0)
                .jobs(10.0)
                .max_subsidy(200.0)
                .build(),
        ],
    )
}

#[test]
fn test_denser_instrument_taken_when_affordable() {
    let result = OptimizationEngine::default().optimize(&two_instrument_catalog(), 1_000.0, balanced());

    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.allocations[0].instrument_id, "DENSE");
    assert_eq!(result.summary.spent_budget, 200.0);
}

#[test]
fn test_unaffordable_denser_instrument_decides_entity() {
    let result = OptimizationEngine::default().optimize(&two_instrument_catalog(), 150.0, balanced());

    assert!(result.allocations.is_empty());
    assert_eq!(result.rejected.len(), 1);
    assert_eq!(result.rejected[0].instrument_id.as_deref(), Some("DENSE"));
    assert_eq!(result.rejected[0].reason, RejectionReason::BudgetExhausted);
    assert_eq!(result.summary.remaining_budget, 150.0);
}

// ==========================================
// 资格与评分性质
// ==========================================

#[test]
fn test_wildcard_instrument_eligible_for_every_entity() {
    let wildcard = InstrumentBuilder::new("ALL").build();
    let catalog = mixed_catalog();

    for mode in [MatchMode::LabelSet, MatchMode::Substring] {
        let matcher = EligibilityMatcher::new(mode);
        for entity in catalog.entities() {
            assert!(matcher.is_eligible(entity, &wildcard), "{} / {}", entity.id, mode);
        }
    }
}

#[test]
fn test_label_set_and_substring_modes_differ() {
    let entity = EntityBuilder::new("E1").sector("IT").build();
    let furniture = InstrumentBuilder::new("F").sectors("Furniture").build();

    assert!(!EligibilityMatcher::new(MatchMode::LabelSet).is_eligible(&entity, &furniture));
    assert!(EligibilityMatcher::new(MatchMode::Substring).is_eligible(&entity, &furniture));
}

#[test]
fn test_slash_sector_in_list_is_funded() {
    let catalog = catalog(
        vec![EntityBuilder::new("E1").sector("Food/Beverages").build()],
        vec![InstrumentBuilder::new("FB")
            .sectors("Food/Beverages, Textile")
            .max_subsidy(100.0)
            .build()],
    );

    let result = OptimizationEngine::default().optimize(&catalog, 100.0, balanced());

    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.allocations[0].instrument_id, "FB");
    assert!(result.rejected.is_empty());
}

#[test]
fn test_normalized_values_within_unit_interval() {
    let engine = OptimizationEngine::default();
    let mut candidates = engine.generate_candidates(&mixed_catalog());
    assert_eq!(candidates.len(), 7);

    ImpactScorer::new().score(&mut candidates, PolicyWeights::new(0.7, 0.3));

    for c in &candidates {
        assert!((0.0..=1.0).contains(&c.norm_revenue), "{:?}", c);
        assert!((0.0..=1.0).contains(&c.norm_jobs), "{:?}", c);
    }
}

#[test]
fn test_identical_inputs_serialize_identically() {
    let engine = OptimizationEngine::default();
    let catalog = mixed_catalog();

    let first = serde_json::to_string(&engine.optimize(&catalog, 300_000.0, balanced())).unwrap();
    let second = serde_json::to_string(&engine.optimize(&catalog, 300_000.0, balanced())).unwrap();

    assert_eq!(first, second);
}

// ==========================================
// 权衡曲线
// ==========================================

#[test]
fn test_sweep_jobs_trend_towards_employment_weight() {
    // 预算只够资助一家：营收导向选 R，就业导向选 J
    let catalog = catalog(
        vec![
            EntityBuilder::new("R").sector("Retail").revenue(10_000_000.0).build(),
            EntityBuilder::new("J").sector("Crafts").revenue(10_000.0).build(),
        ],
        vec![
            InstrumentBuilder::new("REV")
                .sectors("Retail")
                .revenue_pct(10.0)
                .jobs(1.0)
                .max_subsidy(100.0)
                .build(),
            InstrumentBuilder::new("JOB")
                .sectors("Crafts")
                .revenue_pct(10.0)
                .jobs(10.0)
                .max_subsidy(100.0)
                .build(),
        ],
    );

    let engine = OptimizationEngine::default();
    let points = TradeoffSweep::new(&engine).sweep(&catalog, 100.0);

    assert_eq!(points.len(), 6);
    assert_eq!((points[0].w_rev, points[0].w_emp), (0.0, 1.0));
    assert_eq!((points[5].w_rev, points[5].w_emp), (1.0, 0.0));

    // 营收权重上升时就业合计不增
    for pair in points.windows(2) {
        assert!(pair[0].total_jobs_created >= pair[1].total_jobs_created);
    }
    assert_eq!(points[0].total_jobs_created, 10);
    assert_eq!(points[0].total_revenue_gain, 1_000.0);
    assert_eq!(points[5].total_jobs_created, 1);
    assert_eq!(points[5].total_revenue_gain, 1_000_000.0);
    assert!(points.iter().all(|p| p.entities_funded == 1));
}

// ==========================================
// 单户建议
// ==========================================

#[test]
fn test_advisor_ranks_by_revenue_gain() {
    let catalog = mixed_catalog();
    let entity = catalog.find_entity("M001").unwrap();

    let recs = Advisor::default().advise(entity, catalog.instruments());

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].instrument_id, "S02");
    assert!(recs[0].recommended);
    assert_eq!(recs[0].revenue_gain, 250_000.0);
    assert_eq!(recs[0].after_revenue, 1_250_000.0);
    assert_eq!(recs[1].instrument_id, "S01");
    assert!(!recs[1].recommended);
}

#[test]
fn test_simulated_projections_pick_highest_percent() {
    let projections = Advisor::default().simulate_projections(&mixed_catalog());

    let rows: Vec<(&str, &str, f64, i64)> = projections
        .iter()
        .map(|p| (p.entity_id.as_str(), p.instrument_name.as_str(), p.after_revenue, p.jobs_created))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("M001", "Tech Upgrade", 1_250_000.0, 2),
            ("M002", "Tech Upgrade", 2_500_000.0, 2),
            ("M003", "Credit Guarantee", 0.0, 4),
            ("M004", "Rural Boost", 575_000.0, 8),
        ]
    );
}
