//! Sweep configuration.

use serde::{Deserialize, Serialize};

use crate::error::{TopologyError, TopologyResult};
use crate::math::{DIRECTION_TOLERANCE, POINT_TOLERANCE};

/// Tolerances and discretization used by a sweep.
///
/// Missing JSON fields take their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Distance under which two profile or body points are merged.
    pub point_tolerance: f64,
    /// Allowed deviation of the direction's length from 1.
    pub direction_tolerance: f64,
    /// Segments per sketch arc.
    pub arc_segments: usize,
    /// Segments per sketch circle.
    pub circle_segments: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            point_tolerance: POINT_TOLERANCE,
            direction_tolerance: DIRECTION_TOLERANCE,
            arc_segments: 12,
            circle_segments: 24,
        }
    }
}

impl SweepSettings {
    pub fn from_json(json: &str) -> TopologyResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> TopologyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> TopologyResult<()> {
        if !(self.point_tolerance > 0.0 && self.point_tolerance.is_finite()) {
            return Err(TopologyError::invalid(format!(
                "point tolerance must be positive, got {}",
                self.point_tolerance
            )));
        }
        if !(self.direction_tolerance > 0.0 && self.direction_tolerance.is_finite()) {
            return Err(TopologyError::invalid(format!(
                "direction tolerance must be positive, got {}",
                self.direction_tolerance
            )));
        }
        if self.arc_segments < 1 {
            return Err(TopologyError::invalid("arcs need at least 1 segment"));
        }
        if self.circle_segments < 3 {
            return Err(TopologyError::invalid(format!(
                "circles need at least 3 segments, got {}",
                self.circle_segments
            )));
        }
        Ok(())
    }
}
