pub mod check;
pub mod context;
pub mod fastest_laps;
pub mod form;
pub mod head_to_head;
pub mod heatmap;
pub mod insights;
pub mod podiums;
pub mod season;
pub mod sessions;
pub mod standings;
pub mod teams;
pub mod trend;
