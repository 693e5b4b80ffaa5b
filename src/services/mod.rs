pub mod assistant_service;
pub mod booking_service;
pub mod document_service;
pub mod payroll_service;
