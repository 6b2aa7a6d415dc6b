pub mod auth;
pub use auth::AuthService;
pub mod lock_service;
pub use lock_service::LockService;
pub mod permission;
pub mod profile_service;
pub use profile_service::ProfileService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod sync_service;
pub use sync_service::SyncService;
