pub mod config;
pub mod processor;
pub mod error;

pub use config::Config;
pub use processor::ReportProcessor;
pub use error::Error;
