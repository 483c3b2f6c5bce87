// ==========================================
// MSME 补贴分配优化系统 - 导入层
// ==========================================
// 职责: 表格文件解析 → 字段映射 → 企业/政策工具快照
// 说明: 只读边界适配器，优化引擎本身不做 I/O
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_source;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, MappedRows};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use record_source::{FileRecordSource, InMemoryRecordSource, RecordSource};
