pub mod config;
pub mod distance;
pub mod predict;
pub mod venues;
