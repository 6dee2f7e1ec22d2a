pub mod limit;
pub mod report;
pub mod symptoms;
