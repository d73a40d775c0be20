pub mod config;
pub mod logging;

pub mod body;
pub mod dates;
pub mod export;
pub mod fetch;
pub mod manifest;
pub mod url_model;
pub mod wxr;

pub use export::{export, ExportSummary, Exporter};
