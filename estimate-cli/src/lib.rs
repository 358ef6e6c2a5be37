pub mod app;
pub mod config;
pub mod csv_loader;
pub mod export;
pub mod leads;
pub mod logging;
pub mod report;
pub mod utils;
