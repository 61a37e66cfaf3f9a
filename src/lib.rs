pub mod config;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod store;
