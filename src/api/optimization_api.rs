// ==========================================
// MSME 补贴分配优化系统 - 优化 API
// ==========================================
// 职责: 加载数据快照 → 校验入参 → 委托引擎层
// 架构: 路由层(外部) → OptimizationApi → Engine 层
// 红线: 每次调用使用独立快照，不跨调用保留状态
// ==========================================

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::OptimizerConfig;
use crate::domain::catalog::PolicyCatalog;
use crate::domain::entity::Entity;
use crate::domain::report::{OptimizationResult, Projection, Recommendation, TradeoffPoint};
use crate::domain::types::PolicyWeights;
use crate::engine::advisor::Advisor;
use crate::engine::eligibility::EligibilityMatcher;
use crate::engine::orchestrator::OptimizationEngine;
use crate::engine::tradeoff::{point_from, weight_grid};
use crate::importer::RecordSource;

// ==========================================
// OptimizationApi - 优化 API
// ==========================================
pub struct OptimizationApi<S>
where
    S: RecordSource,
{
    source: Arc<S>,
    config: Arc<OptimizerConfig>,
}

impl<S> OptimizationApi<S>
where
    S: RecordSource,
{
    /// 创建新的 OptimizationApi 实例
    ///
    /// # 参数
    /// - source: 企业/政策工具数据源
    /// - config: 优化配置
    pub fn new(source: Arc<S>, config: Arc<OptimizerConfig>) -> Self {
        Self { source, config }
    }

    /// 加载本次调用的数据快照
    async fn load_catalog(&self) -> ApiResult<Arc<PolicyCatalog>> {
        let catalog = self.source.load_catalog().await?;
        Ok(Arc::new(catalog))
    }

    fn validate_budget(&self, budget: f64) -> ApiResult<()> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "预算必须为非负有限数, 实际 {}",
                budget
            )));
        }
        Ok(())
    }

    fn validate_weights(&self, weights: PolicyWeights) -> ApiResult<()> {
        if !weights.w_rev.is_finite() || !weights.w_emp.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "权重必须为有限数, 实际 w_rev={} w_emp={}",
                weights.w_rev, weights.w_emp
            )));
        }

        // 权重之和不为 1 仅告警
        if weights.deviates_from_unit_sum(self.config.weight_sum_tolerance) {
            warn!(
                w_rev = weights.w_rev,
                w_emp = weights.w_emp,
                tolerance = self.config.weight_sum_tolerance,
                "policy weights usually sum to 1, proceeding anyway"
            );
        }
        Ok(())
    }

    // ==========================================
    // 优化接口
    // ==========================================

    /// 运行预算约束优化
    ///
    /// # 参数
    /// - budget: 总预算（非负）
    /// - w_rev / w_emp: 营收/就业权重
    ///
    /// # 返回
    /// - Ok(OptimizationResult): 摘要 + 分配 + 淘汰 + 行业汇总
    /// - Err(ApiError::InvalidInput): 预算/权重非法
    #[instrument(skip(self))]
    pub async fn optimize(
        &self,
        budget: f64,
        w_rev: f64,
        w_emp: f64,
    ) -> ApiResult<OptimizationResult> {
        let weights = PolicyWeights::new(w_rev, w_emp);
        self.validate_budget(budget)?;
        self.validate_weights(weights)?;

        let catalog = self.load_catalog().await?;
        let match_mode = self.config.match_mode;

        let result = tokio::task::spawn_blocking(move || {
            OptimizationEngine::new(match_mode).optimize(&catalog, budget, weights)
        })
        .await?;

        Ok(result)
    }

    /// 使用配置中的默认预算与权重运行优化
    pub async fn optimize_with_defaults(&self) -> ApiResult<OptimizationResult> {
        let weights = self.config.default_weights();
        self.optimize(self.config.default_budget, weights.w_rev, weights.w_emp)
            .await
    }

    /// 权衡曲线：六个网格点并行独立运行，按网格顺序返回
    #[instrument(skip(self))]
    pub async fn tradeoff(&self, budget: f64) -> ApiResult<Vec<TradeoffPoint>> {
        self.validate_budget(budget)?;

        let catalog = self.load_catalog().await?;
        let match_mode = self.config.match_mode;

        let handles = weight_grid().into_iter().map(|weights| {
            let catalog = Arc::clone(&catalog);
            tokio::task::spawn_blocking(move || {
                let result = OptimizationEngine::new(match_mode).optimize(&catalog, budget, weights);
                point_from(weights, &result)
            })
        });

        let points = try_join_all(handles).await?;
        info!(points = points.len(), "tradeoff sweep finished");
        Ok(points)
    }

    // ==========================================
    // 单户建议接口
    // ==========================================

    /// 按企业 id 查询建议
    ///
    /// # 返回
    /// - Ok(Vec<Recommendation>): 至多 5 条，首条 recommended
    /// - Err(ApiError::NotFound): 企业不存在
    #[instrument(skip(self))]
    pub async fn advise(&self, entity_id: &str) -> ApiResult<Vec<Recommendation>> {
        if entity_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("企业ID不能为空".to_string()));
        }

        let catalog = self.load_catalog().await?;
        let entity = catalog
            .find_entity(entity_id)
            .ok_or_else(|| ApiError::NotFound(format!("企业(id={})不存在", entity_id.trim())))?;

        Ok(self.advisor().advise(entity, catalog.instruments()))
    }

    /// 对调用方直接提供的企业记录给出建议
    pub async fn advise_entity(&self, entity: &Entity) -> ApiResult<Vec<Recommendation>> {
        let catalog = self.load_catalog().await?;
        Ok(self.advisor().advise(entity, catalog.instruments()))
    }

    /// 全量预测（每户取营收提升比例最高的工具）
    pub async fn simulate(&self) -> ApiResult<Vec<Projection>> {
        let catalog = self.load_catalog().await?;
        Ok(self.advisor().simulate_projections(&catalog))
    }

    fn advisor(&self) -> Advisor {
        Advisor::new(EligibilityMatcher::new(self.config.match_mode))
    }
}
