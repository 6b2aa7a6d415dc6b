// src/services/dashboard_service.rs

use chrono::Utc;

use crate::{
    common::error::AppError,
    models::{
        auth::User,
        dashboard::{AreaStats, DashboardSummary, StaffStats, TimeFilter},
        profile::{DocumentType, Profile},
    },
    store::{ProfileStore, UserStore},
};

// Rótulo para cán bộ ainda sem território atribuído.
const UNASSIGNED_AREA: &str = "Chưa phân vùng";

// Consolida os números do painel: totais por janela de tempo, por área
// e por cán bộ. Admin enxerga tudo; staff enxerga só o que coletou.
#[derive(Clone)]
pub struct DashboardService {
    profile_store: ProfileStore,
    user_store: UserStore,
}

impl DashboardService {
    pub fn new(profile_store: ProfileStore, user_store: UserStore) -> Self {
        Self {
            profile_store,
            user_store,
        }
    }

    pub fn summary(
        &self,
        viewer: &User,
        filter: TimeFilter,
        area_filter: Option<&str>,
    ) -> Result<DashboardSummary, AppError> {
        let now = Utc::now();
        let profiles: Vec<Profile> = self
            .profile_store
            .list()
            .into_iter()
            .filter(|p| filter.matches(p.created_at, now))
            .filter(|p| {
                if viewer.is_admin() {
                    match area_filter {
                        Some(area) => self.collector_area(p) == area,
                        None => true,
                    }
                } else {
                    // Staff só vê os próprios hồ sơ.
                    p.collector_id == viewer.id
                }
            })
            .collect();

        Ok(summarize(&profiles))
    }

    // Desempenho por área (địa bàn), ordenado por volume decrescente.
    pub fn area_stats(&self, filter: TimeFilter) -> Result<Vec<AreaStats>, AppError> {
        let now = Utc::now();
        let staff: Vec<User> = self
            .user_store
            .list()
            .into_iter()
            .filter(|u| !u.is_admin())
            .collect();

        let profiles: Vec<Profile> = self
            .profile_store
            .list()
            .into_iter()
            .filter(|p| filter.matches(p.created_at, now))
            .collect();

        let mut areas: Vec<String> = staff.iter().map(|u| area_of(u).to_owned()).collect();
        areas.sort();
        areas.dedup();

        let mut stats: Vec<AreaStats> = areas
            .into_iter()
            .map(|area_name| {
                let users_in_area: Vec<&User> =
                    staff.iter().filter(|u| area_of(u) == area_name).collect();

                let area_profiles: Vec<&Profile> = profiles
                    .iter()
                    .filter(|p| users_in_area.iter().any(|u| u.id == p.collector_id))
                    .collect();

                let users = users_in_area
                    .iter()
                    .map(|u| {
                        let own: Vec<&&Profile> = area_profiles
                            .iter()
                            .filter(|p| p.collector_id == u.id)
                            .collect();
                        StaffStats {
                            user_id: u.id,
                            full_name: u.full_name.clone(),
                            collected_count: own.len(),
                            approved_count: own.iter().filter(|p| p.is_approved).count(),
                        }
                    })
                    .collect();

                AreaStats {
                    area_name,
                    staff_count: users_in_area.len(),
                    total_profiles: area_profiles.len(),
                    approved_count: area_profiles.iter().filter(|p| p.is_approved).count(),
                    license_count: count_documents(&area_profiles, DocumentType::License),
                    registration_count: count_documents(&area_profiles, DocumentType::Registration),
                    users,
                }
            })
            .collect();

        stats.sort_by(|a, b| b.total_profiles.cmp(&a.total_profiles));
        Ok(stats)
    }

    fn collector_area(&self, profile: &Profile) -> String {
        self.user_store
            .find_by_id(profile.collector_id)
            .and_then(|u| u.area)
            .unwrap_or_else(|| UNASSIGNED_AREA.to_owned())
    }
}

fn area_of(user: &User) -> &str {
    user.area.as_deref().unwrap_or(UNASSIGNED_AREA)
}

fn summarize(profiles: &[Profile]) -> DashboardSummary {
    DashboardSummary {
        total_profiles: profiles.len(),
        approved_count: profiles.iter().filter(|p| p.is_approved).count(),
        license_count: profiles
            .iter()
            .flat_map(|p| &p.documents)
            .filter(|d| d.doc_type == DocumentType::License)
            .count(),
        registration_count: profiles
            .iter()
            .flat_map(|p| &p.documents)
            .filter(|d| d.doc_type == DocumentType::Registration)
            .count(),
    }
}

fn count_documents(profiles: &[&Profile], doc_type: DocumentType) -> usize {
    profiles
        .iter()
        .flat_map(|p| &p.documents)
        .filter(|d| d.doc_type == doc_type)
        .count()
}
