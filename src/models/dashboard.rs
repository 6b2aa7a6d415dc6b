// src/models/dashboard.rs

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use uuid::Uuid;

// Janela de tempo aplicada sobre created_at dos hồ sơ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Today,
    // Semana ISO, começando na segunda-feira (mesma conta da tela original).
    ThisWeek,
    ThisMonth,
    All,
}

impl TimeFilter {
    pub fn matches(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let d = timestamp.date_naive();
        let n = now.date_naive();
        match self {
            TimeFilter::All => true,
            TimeFilter::Today => d == n,
            TimeFilter::ThisWeek => d.iso_week() == n.iso_week(),
            TimeFilter::ThisMonth => d.month() == n.month() && d.year() == n.year(),
        }
    }
}

// Os quatro cartões do painel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_profiles: usize,
    pub approved_count: usize,
    pub license_count: usize,
    pub registration_count: usize,
}

// Desempenho individual de um cán bộ dentro de uma área.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    pub user_id: Uuid,
    pub full_name: String,
    pub collected_count: usize,
    pub approved_count: usize,
}

// Consolidado por área (địa bàn), ordenado por volume de hồ sơ.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStats {
    pub area_name: String,
    pub staff_count: usize,
    pub total_profiles: usize,
    pub approved_count: usize,
    pub license_count: usize,
    pub registration_count: usize,
    pub users: Vec<StaffStats>,
}
