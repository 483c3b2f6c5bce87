// ==========================================
// MSME 补贴分配优化系统 - 领域类型定义
// ==========================================
// 职责: 资格条件值对象、匹配模式、淘汰原因
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 通配符（不区分大小写）
pub const WILDCARD_ALL: &str = "All";

/// 复合通配符：城市/农村均适用（仅用于地域条件）
pub const WILDCARD_URBAN_RURAL: &str = "Urban/Rural";

// 列表分隔符（拆分为独立条目）
const LIST_SEPARATORS: &[char] = &[',', ';', '|'];

// 条目内的子项分隔符（"Food/Beverages" 同时登记 "food"、"beverages"）
const SUB_LABEL_SEPARATOR: char = '/';

// ==========================================
// 匹配模式 (Match Mode)
// ==========================================
// LABEL_SET: 显式标签集合匹配（默认）
// SUBSTRING: 旧版子串包含匹配（兼容基线，"IT" 会命中 "Furniture"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMode {
    #[default]
    LabelSet,
    Substring,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::LabelSet => write!(f, "LABEL_SET"),
            MatchMode::Substring => write!(f, "SUBSTRING"),
        }
    }
}

// ==========================================
// 资格条件 (Criterion)
// ==========================================
// 构造时一次性解析原始文本，保留 raw 供兼容模式使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// 原始字段文本（已 trim）
    raw: String,
    /// 是否为通配符
    wildcard: bool,
    /// 小写标签集合（整段文本、每个列表条目及其 "/" 子项）
    labels: BTreeSet<String>,
}

impl Criterion {
    /// 解析资格条件字段
    ///
    /// # 参数
    /// - raw: 原始文本（缺失时传空串）
    /// - extra_wildcards: 除 "All" 外也视为通配符的取值（如 "Urban/Rural"）
    pub fn parse(raw: &str, extra_wildcards: &[&str]) -> Self {
        let raw = raw.trim().to_string();
        let lowered = raw.to_lowercase();

        let wildcard = lowered == WILDCARD_ALL.to_lowercase()
            || extra_wildcards
                .iter()
                .any(|w| lowered == w.to_lowercase());

        let mut labels = BTreeSet::new();
        if !lowered.is_empty() {
            labels.insert(lowered.clone());
            for item in lowered.split(LIST_SEPARATORS) {
                let item = item.trim();
                if item.is_empty() {
                    continue;
                }
                labels.insert(item.to_string());
                for part in item.split(SUB_LABEL_SEPARATOR) {
                    let part = part.trim();
                    if !part.is_empty() {
                        labels.insert(part.to_string());
                    }
                }
            }
        }

        Self {
            raw,
            wildcard,
            labels,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// 判定标签是否满足条件
    ///
    /// # 规则
    /// - 通配符 → 恒为 true
    /// - LABEL_SET → 标签（小写、trim）属于集合；空标签永不命中
    /// - SUBSTRING → 标签（小写）是原始文本（小写）的子串
    pub fn admits(&self, label: &str, mode: MatchMode) -> bool {
        if self.wildcard {
            return true;
        }

        let label = label.trim().to_lowercase();
        match mode {
            MatchMode::LabelSet => !label.is_empty() && self.labels.contains(&label),
            MatchMode::Substring => self.raw.to_lowercase().contains(&label),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

// ==========================================
// 淘汰原因 (Rejection Reason)
// ==========================================
// 序列化格式: 面向调用方的可读文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    #[serde(rename = "policy priority mismatch")]
    PolicyPriorityMismatch,
    #[serde(rename = "lower weighted score")]
    LowerWeightedScore,
    #[serde(rename = "budget exhausted")]
    BudgetExhausted,
    #[serde(rename = "ineligible — no matching sector/category/location criteria")]
    Ineligible,
}

impl RejectionReason {
    /// 低于该分数视为政策优先级不匹配
    pub const PRIORITY_MISMATCH_BELOW: f64 = 0.3;
    /// 低于该分数视为加权得分偏低
    pub const LOWER_SCORE_BELOW: f64 = 0.5;

    /// 按综合得分对预算不足的候选分类
    pub fn classify_budget_miss(score: f64) -> Self {
        if score < Self::PRIORITY_MISMATCH_BELOW {
            RejectionReason::PolicyPriorityMismatch
        } else if score < Self::LOWER_SCORE_BELOW {
            RejectionReason::LowerWeightedScore
        } else {
            RejectionReason::BudgetExhausted
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::PolicyPriorityMismatch => "policy priority mismatch",
            RejectionReason::LowerWeightedScore => "lower weighted score",
            RejectionReason::BudgetExhausted => "budget exhausted",
            RejectionReason::Ineligible => {
                "ineligible — no matching sector/category/location criteria"
            }
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 政策权重 (Policy Weights)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyWeights {
    /// 营收权重
    pub w_rev: f64,
    /// 就业权重
    pub w_emp: f64,
}

impl PolicyWeights {
    pub fn new(w_rev: f64, w_emp: f64) -> Self {
        Self { w_rev, w_emp }
    }

    /// 权重之和是否偏离 1 超过容差（仅用于告警，不做强制）
    pub fn deviates_from_unit_sum(&self, tolerance: f64) -> bool {
        ((self.w_rev + self.w_emp) - 1.0).abs() > tolerance
    }
}

impl Default for PolicyWeights {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}
