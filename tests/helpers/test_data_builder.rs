// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use subsidy_optimizer::domain::{Entity, Instrument, InstrumentFields, PolicyCatalog};

// ==========================================
// Entity 构建器
// ==========================================

pub struct EntityBuilder {
    id: String,
    sector: Option<String>,
    category: Option<String>,
    location_type: Option<String>,
    annual_revenue: Option<f64>,
}

impl EntityBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            sector: Some("Manufacturing".to_string()),
            category: Some("Micro".to_string()),
            location_type: Some("Urban".to_string()),
            annual_revenue: Some(1_000_000.0),
        }
    }

    pub fn sector(mut self, sector: &str) -> Self {
        self.sector = Some(sector.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location_type = Some(location.to_string());
        self
    }

    pub fn revenue(mut self, revenue: f64) -> Self {
        self.annual_revenue = Some(revenue);
        self
    }

    pub fn no_revenue(mut self) -> Self {
        self.annual_revenue = None;
        self
    }

    pub fn build(self) -> Entity {
        Entity::new(
            self.id,
            self.sector.as_deref(),
            self.category.as_deref(),
            self.location_type.as_deref(),
            self.annual_revenue,
        )
    }
}

// ==========================================
// Instrument 构建器
// ==========================================
// 默认: 三项条件均为 "All"

pub struct InstrumentBuilder {
    id: String,
    name: Option<String>,
    eligible_sectors: String,
    target_category: String,
    location_criteria: String,
    revenue_impact_percent: Option<f64>,
    employment_impact_jobs: Option<f64>,
    max_subsidy_amount: Option<f64>,
}

impl InstrumentBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            eligible_sectors: "All".to_string(),
            target_category: "All".to_string(),
            location_criteria: "All".to_string(),
            revenue_impact_percent: Some(10.0),
            employment_impact_jobs: Some(5.0),
            max_subsidy_amount: Some(100.0),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn sectors(mut self, sectors: &str) -> Self {
        self.eligible_sectors = sectors.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.target_category = category.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location_criteria = location.to_string();
        self
    }

    pub fn revenue_pct(mut self, pct: f64) -> Self {
        self.revenue_impact_percent = Some(pct);
        self
    }

    pub fn jobs(mut self, jobs: f64) -> Self {
        self.employment_impact_jobs = Some(jobs);
        self
    }

    pub fn max_subsidy(mut self, amount: f64) -> Self {
        self.max_subsidy_amount = Some(amount);
        self
    }

    pub fn build(self) -> Instrument {
        Instrument::new(InstrumentFields {
            id: &self.id,
            name: self.name.as_deref(),
            eligible_sectors: Some(&self.eligible_sectors),
            target_category: Some(&self.target_category),
            location_criteria: Some(&self.location_criteria),
            revenue_impact_percent: self.revenue_impact_percent,
            employment_impact_jobs: self.employment_impact_jobs,
            max_subsidy_amount: self.max_subsidy_amount,
        })
    }
}

/// 组装快照
pub fn catalog(entities: Vec<Entity>, instruments: Vec<Instrument>) -> PolicyCatalog {
    PolicyCatalog::new(entities, instruments)
}
