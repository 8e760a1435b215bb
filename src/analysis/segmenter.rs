//! Flow-Regime Segmentation
//!
//! Splits a drawdown record into a middle-time (infinite-acting radial flow)
//! region and a late-time (boundary-dominated) region at a caller-chosen
//! boundary index. The two regions share the boundary sample.
//!
//! Sample 0 is excluded from the middle-time region: recorded tests usually
//! start at t = 0, where the semilog coordinate is undefined.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::types::IndexRange;

/// Minimum points per region for a line fit.
pub const MIN_REGION_POINTS: usize = 2;

/// Middle-time and late-time index ranges of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimePartition {
    pub boundary: usize,
    /// Indices `[1, boundary]`
    pub early: IndexRange,
    /// Indices `[boundary, n - 1]`
    pub late: IndexRange,
}

/// Boundary-index segmenter; no automatic break-point detection.
pub struct FlowRegimeSegmenter;

impl FlowRegimeSegmenter {
    /// Partition a series of length `len` at `boundary`.
    ///
    /// # Errors
    /// `InvalidBoundary` when `boundary` is outside `[1, len - 1]` or when
    /// either region would hold fewer than two samples.
    pub fn segment(len: usize, boundary: usize) -> Result<RegimePartition> {
        let invalid = |reason: String| AnalysisError::InvalidBoundary {
            boundary,
            len,
            reason,
        };

        if boundary == 0 || boundary >= len {
            return Err(invalid(format!(
                "must lie in [1, {}]",
                len.saturating_sub(1)
            )));
        }

        let early = IndexRange {
            start: 1,
            end: boundary,
        };
        let late = IndexRange {
            start: boundary,
            end: len - 1,
        };

        if early.len() < MIN_REGION_POINTS {
            return Err(invalid(format!(
                "middle-time region has {} point(s), need {MIN_REGION_POINTS}",
                early.len()
            )));
        }
        if late.len() < MIN_REGION_POINTS {
            return Err(invalid(format!(
                "late-time region has {} point(s), need {MIN_REGION_POINTS}",
                late.len()
            )));
        }

        Ok(RegimePartition {
            boundary,
            early,
            late,
        })
    }
}
