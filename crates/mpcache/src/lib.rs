//! mpcache library: application logic for the pool inspection CLI.

pub mod app;
pub mod config;
pub mod errors;
pub mod report;
pub mod version;
pub mod workload;
