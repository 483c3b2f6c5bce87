// ==========================================
// MSME 补贴分配优化系统 - 政策目录快照
// ==========================================
// 职责: 企业表 + 政策工具表的不可变快照
// 红线: 每个入口显式传入，不使用全局可变状态
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::instrument::Instrument;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyCatalog {
    entities: Vec<Entity>,
    instruments: Vec<Instrument>,
}

impl PolicyCatalog {
    pub fn new(entities: Vec<Entity>, instruments: Vec<Instrument>) -> Self {
        Self {
            entities,
            instruments,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// 按 id 查找企业（首个匹配）
    pub fn find_entity(&self, entity_id: &str) -> Option<&Entity> {
        let id = entity_id.trim();
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() || self.instruments.is_empty()
    }
}
