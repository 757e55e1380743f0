// Application layer - Use cases over the reading store
pub mod classification_service;
pub mod dashboard_service;
pub mod reading_repository;
