use std::fs::File;
use std::path::Path;

use log::{debug, info};

use crate::error::{ReportError, Result};

/// Columns the report cannot be computed without.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "race",
    "sex",
    "age",
    "education",
    "hours-per-week",
    "native-country",
    "salary",
];

#[derive(Debug, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Record {
    pub race: String,
    pub sex: String,
    pub age: u32,
    pub education: String,
    /// Absent column and empty cells both read as `None`.
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(rename = "hours-per-week")]
    pub hours_per_week: u32,
    #[serde(rename = "native-country")]
    pub native_country: String,
    pub salary: String,
}

pub fn read_data<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let load_err = |source: csv::Error| ReportError::Load {
        path: path.to_path_buf(),
        source,
    };

    debug!("opening census table {}", path.display());
    let file = File::open(path).map_err(|e| load_err(csv::Error::from(e)))?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers().map_err(load_err)?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ReportError::Schema {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut records = Vec::<Record>::new();
    for result in rdr.deserialize() {
        let record: Record = result.map_err(load_err)?;
        records.push(record);
    }
    info!("loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}
