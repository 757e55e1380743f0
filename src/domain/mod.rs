// Domain layer - Pure classification types and rules
pub mod chart;
pub mod decision_tree;
pub mod features;
pub mod freshness;
pub mod processed;
pub mod quality;
pub mod reading;
pub mod statistics;
