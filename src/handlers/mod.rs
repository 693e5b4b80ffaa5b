pub mod assistant;
pub mod bookings;
pub mod dashboard;
pub mod documents;
pub mod finance;
pub mod hr;
pub mod rooms;
pub mod settings;
pub mod tasks;
pub mod tenancy;
