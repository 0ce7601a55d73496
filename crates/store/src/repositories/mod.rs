//! Stateless repository types, one per collection.

pub mod availability_repo;
pub mod config_repo;
pub mod shift_repo;
pub mod shift_request_repo;
pub mod staff_repo;
pub mod timeoff_repo;

pub use availability_repo::AvailabilityRepo;
pub use config_repo::ConfigRepo;
pub use shift_repo::ShiftRepo;
pub use shift_request_repo::ShiftRequestRepo;
pub use staff_repo::StaffRepo;
pub use timeoff_repo::TimeOffRepo;
