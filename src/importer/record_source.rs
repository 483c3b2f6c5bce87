// ==========================================
// MSME 补贴分配优化系统 - 数据源接口
// ==========================================
// 职责: 为优化器提供企业表/政策工具表快照（外部协作方边界）
// 红线: 只读；引擎层不直接依赖本模块
// ==========================================

use crate::domain::catalog::PolicyCatalog;
use crate::domain::entity::Entity;
use crate::domain::instrument::Instrument;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{entity_id_columns, instrument_id_columns, FieldMapper};
use crate::importer::file_parser::UniversalFileParser;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, instrument};

// ==========================================
// RecordSource Trait
// ==========================================
// 实现者: FileRecordSource（表格文件）/ InMemoryRecordSource（测试与嵌入调用）
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// 加载企业表
    async fn load_entities(&self) -> ImportResult<Vec<Entity>>;

    /// 加载政策工具表
    async fn load_instruments(&self) -> ImportResult<Vec<Instrument>>;

    /// 加载完整快照
    async fn load_catalog(&self) -> ImportResult<PolicyCatalog> {
        let entities = self.load_entities().await?;
        let instruments = self.load_instruments().await?;
        Ok(PolicyCatalog::new(entities, instruments))
    }
}

// ==========================================
// FileRecordSource - 表格文件数据源
// ==========================================
pub struct FileRecordSource {
    entity_table: PathBuf,
    instrument_table: PathBuf,
}

impl FileRecordSource {
    pub fn new(entity_table: impl Into<PathBuf>, instrument_table: impl Into<PathBuf>) -> Self {
        Self {
            entity_table: entity_table.into(),
            instrument_table: instrument_table.into(),
        }
    }

    /// 由配置中的路径构造
    pub fn from_paths(
        entity_table: Option<PathBuf>,
        instrument_table: Option<PathBuf>,
    ) -> ImportResult<Self> {
        let entity_table = entity_table
            .ok_or_else(|| ImportError::SourceNotConfigured("entity_table_path".to_string()))?;
        let instrument_table = instrument_table
            .ok_or_else(|| ImportError::SourceNotConfigured("instrument_table_path".to_string()))?;
        Ok(Self::new(entity_table, instrument_table))
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    #[instrument(skip(self), fields(path = %self.entity_table.display()))]
    async fn load_entities(&self) -> ImportResult<Vec<Entity>> {
        let path = self.entity_table.clone();
        let rows = tokio::task::spawn_blocking(move || UniversalFileParser.parse(path))
            .await
            .map_err(|e| ImportError::FileReadError(e.to_string()))??;

        if !FieldMapper.has_any_column(&rows, entity_id_columns()) {
            return Err(ImportError::MissingColumn {
                table: "entity".to_string(),
                column: entity_id_columns().join("/"),
            });
        }

        let mapped = FieldMapper.map_entities(&rows);
        info!(
            loaded = mapped.records.len(),
            skipped = mapped.skipped_rows.len(),
            "entity table loaded"
        );
        Ok(mapped.records)
    }

    #[instrument(skip(self), fields(path = %self.instrument_table.display()))]
    async fn load_instruments(&self) -> ImportResult<Vec<Instrument>> {
        let path = self.instrument_table.clone();
        let rows = tokio::task::spawn_blocking(move || UniversalFileParser.parse(path))
            .await
            .map_err(|e| ImportError::FileReadError(e.to_string()))??;

        if !FieldMapper.has_any_column(&rows, instrument_id_columns())
            && !FieldMapper.has_any_column(&rows, &["Scheme_Name", "scheme_name", "name"])
        {
            return Err(ImportError::MissingColumn {
                table: "instrument".to_string(),
                column: instrument_id_columns().join("/"),
            });
        }

        let mapped = FieldMapper.map_instruments(&rows);
        info!(
            loaded = mapped.records.len(),
            skipped = mapped.skipped_rows.len(),
            "instrument table loaded"
        );
        Ok(mapped.records)
    }
}

// ==========================================
// InMemoryRecordSource - 内存数据源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    entities: Vec<Entity>,
    instruments: Vec<Instrument>,
}

impl InMemoryRecordSource {
    pub fn new(entities: Vec<Entity>, instruments: Vec<Instrument>) -> Self {
        Self {
            entities,
            instruments,
        }
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn load_entities(&self) -> ImportResult<Vec<Entity>> {
        Ok(self.entities.clone())
    }

    async fn load_instruments(&self) -> ImportResult<Vec<Instrument>> {
        Ok(self.instruments.clone())
    }
}
