pub mod booking_repo;
pub mod dashboard_repo;
pub mod document_repo;
pub mod finance_repo;
pub mod hr_repo;
pub mod room_repo;
pub mod settings_repo;
pub mod task_repo;
pub mod tenancy_repo;

pub use booking_repo::BookingRepository;
pub use dashboard_repo::DashboardRepository;
pub use document_repo::DocumentRepository;
pub use finance_repo::FinanceRepository;
pub use hr_repo::HrRepository;
pub use room_repo::RoomRepository;
pub use settings_repo::SettingsRepository;
pub use task_repo::TaskRepository;
pub use tenancy_repo::TenancyRepository;
