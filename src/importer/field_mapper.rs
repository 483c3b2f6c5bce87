// ==========================================
// MSME 补贴分配优化系统 - 字段映射器实现
// ==========================================
// 职责: 原始行 → Entity / Instrument
// 规则: 列名支持别名；缺失/无法解析的数值按缺失处理（构造时归零）
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::instrument::{Instrument, InstrumentFields};
use crate::importer::file_parser::RawRow;
use tracing::warn;

// 列名别名（原始表头在前，snake_case 在后）
const ENTITY_ID: &[&str] = &["MSME_ID", "msme_id", "entity_id", "id"];
const ENTITY_SECTOR: &[&str] = &["Sector", "sector"];
const ENTITY_CATEGORY: &[&str] = &["Category", "category", "Enterprise_Size", "enterprise_size"];
const ENTITY_LOCATION: &[&str] = &["Location_Type", "location_type"];
const ENTITY_REVENUE: &[&str] = &["Annual_Revenue", "annual_revenue"];

const SCHEME_ID: &[&str] = &["Scheme_ID", "scheme_id", "instrument_id", "id"];
const SCHEME_NAME: &[&str] = &["Scheme_Name", "scheme_name", "name"];
const SCHEME_SECTORS: &[&str] = &["Eligible_Sectors", "eligible_sectors"];
const SCHEME_CATEGORY: &[&str] = &["Target_Category", "target_category"];
const SCHEME_LOCATION: &[&str] = &["Location_Criteria", "location_criteria"];
const SCHEME_REVENUE_PCT: &[&str] = &[
    "Impact_Factor_Revenue (%)",
    "Impact_Factor_Revenue",
    "revenue_impact_percent",
];
const SCHEME_JOBS: &[&str] = &[
    "Impact_Factor_Employment (Jobs)",
    "Impact_Factor_Employment",
    "employment_impact_jobs",
];
const SCHEME_SUBSIDY: &[&str] = &["Max_Subsidy_Amount", "max_subsidy_amount"];

/// 映射结果：成功记录 + 被跳过的行号（1 起，不含表头）
#[derive(Debug, Clone)]
pub struct MappedRows<T> {
    pub records: Vec<T>,
    pub skipped_rows: Vec<usize>,
}

pub struct FieldMapper;

impl FieldMapper {
    /// 映射企业表
    ///
    /// 缺少企业标识的行被跳过
    pub fn map_entities(&self, rows: &[RawRow]) -> MappedRows<Entity> {
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped_rows = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            let Some(id) = self.get_string(row, ENTITY_ID) else {
                warn!(row_number, "entity row skipped: MSME_ID missing");
                skipped_rows.push(row_number);
                continue;
            };

            records.push(Entity::new(
                id,
                self.get_string(row, ENTITY_SECTOR),
                self.get_string(row, ENTITY_CATEGORY),
                self.get_string(row, ENTITY_LOCATION),
                self.parse_f64(row, ENTITY_REVENUE, row_number),
            ));
        }

        MappedRows {
            records,
            skipped_rows,
        }
    }

    /// 映射政策工具表
    ///
    /// Scheme_ID 缺失时以 Scheme_Name 代替；两者都缺失的行被跳过
    pub fn map_instruments(&self, rows: &[RawRow]) -> MappedRows<Instrument> {
        let mut records = Vec::with_capacity(rows.len());
        let mut skipped_rows = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            let name = self.get_string(row, SCHEME_NAME);
            let Some(id) = self.get_string(row, SCHEME_ID).or(name) else {
                warn!(row_number, "instrument row skipped: Scheme_ID and Scheme_Name missing");
                skipped_rows.push(row_number);
                continue;
            };

            records.push(Instrument::new(InstrumentFields {
                id,
                name,
                eligible_sectors: self.get_string(row, SCHEME_SECTORS),
                target_category: self.get_string(row, SCHEME_CATEGORY),
                location_criteria: self.get_string(row, SCHEME_LOCATION),
                revenue_impact_percent: self.parse_f64(row, SCHEME_REVENUE_PCT, row_number),
                employment_impact_jobs: self.parse_f64(row, SCHEME_JOBS, row_number),
                max_subsidy_amount: self.parse_f64(row, SCHEME_SUBSIDY, row_number),
            }));
        }

        MappedRows {
            records,
            skipped_rows,
        }
    }

    /// 表头中是否存在任一别名
    pub fn has_any_column(&self, rows: &[RawRow], aliases: &[&str]) -> bool {
        rows.first()
            .map(|row| aliases.iter().any(|a| row.contains_key(*a)))
            .unwrap_or(true)
    }

    /// 提取非空字符串字段，按别名顺序尝试
    fn get_string<'a>(&self, row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
        aliases
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    /// 解析数值字段（允许千分位逗号与货币符号）
    ///
    /// 空值 → None；无法解析 → None 并告警
    fn parse_f64(&self, row: &RawRow, aliases: &[&str], row_number: usize) -> Option<f64> {
        let raw = self.get_string(row, aliases)?;
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, ',' | '₹' | '$' | ' '))
            .collect();

        match cleaned.parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(row_number, field = aliases[0], value = raw, "numeric field unparseable, treated as missing");
                None
            }
        }
    }
}

/// 企业表的必需列
pub fn entity_id_columns() -> &'static [&'static str] {
    ENTITY_ID
}

/// 政策工具表的必需列
pub fn instrument_id_columns() -> &'static [&'static str] {
    SCHEME_ID
}
