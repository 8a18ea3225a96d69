pub mod config;
pub mod csv_reader;
pub mod dataset;
pub mod error;
pub mod report;
pub mod stats;

pub use config::{OutputFormat, ReportConfig};
pub use dataset::{CensusDataSet, Subset, ValueCounts};
pub use error::ReportError;
pub use report::{calculate_demographic_data, DemographicData, DemographicReport};
