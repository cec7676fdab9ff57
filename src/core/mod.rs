// Core module containing the measurement data model
pub mod config;
pub mod measurement;
pub mod units;

// Re-export commonly used types
pub use config::{ConfigError, MonitorConfig, OutputFormat};
pub use measurement::Measurement;
pub use units::{unit_label, BaseUnit, Coupling};
