pub mod prune;
pub mod resume;
pub mod usage;
