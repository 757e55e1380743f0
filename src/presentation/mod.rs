// Presentation layer - Serializable views for dashboards
pub mod report;
