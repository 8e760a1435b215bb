//! CSV loading for measurement series and rate schedules
//!
//! Files carry a header row and two numeric columns:
//! - series: `time_hr,value` (pressure in psia or rate in STB/D)
//! - schedule: `time_change_hr,rate_stb_d`
//!
//! Blank lines and `#` comment lines are skipped. Loaded data goes through
//! the same constructors the library uses, so a file that loads is already
//! a valid [`MeasurementSeries`] / [`RateSchedule`].

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::debug;

use crate::error::AnalysisError;
use crate::types::{MeasurementSeries, RateSchedule, RateStep};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Malformed CSV in {}: {}", .0.display(), .1)]
    Csv(PathBuf, #[source] csv::Error),

    #[error("{} contains no data rows", .0.display())]
    Empty(PathBuf),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Read every `(f64, f64)` record of a headed two-column CSV.
fn read_pairs(path: &Path) -> Result<Vec<(f64, f64)>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.deserialize::<(f64, f64)>() {
        rows.push(record.map_err(|e| LoadError::Csv(path.to_path_buf(), e))?);
    }
    if rows.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    debug!(path = %path.display(), rows = rows.len(), "Read CSV");
    Ok(rows)
}

/// Load a `time,value` series.
pub fn load_series(path: &Path) -> Result<MeasurementSeries, LoadError> {
    let (time, value) = read_pairs(path)?.into_iter().unzip();
    Ok(MeasurementSeries::new(time, value)?)
}

/// Load a `time_change,rate` schedule.
pub fn load_schedule(path: &Path) -> Result<RateSchedule, LoadError> {
    let steps = read_pairs(path)?
        .into_iter()
        .map(|(time_change, rate)| RateStep { time_change, rate })
        .collect();
    Ok(RateSchedule::new(steps)?)
}
