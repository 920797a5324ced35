//! Parameters of the curvature model and of segment extraction.
//!
//! Both are plain values handed to every function that needs them, so
//! concurrent runs with different parameters never observe each other.

use serde::{Deserialize, Serialize};

use crate::{Error, MIN_SPEED_MPH};

/// Metres to feet, the default for projected CRSs measured in metres
pub const FEET_PER_METRE: f64 = 3.28084;

/// Parameters of the superelevation speed model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurvatureConfig {
    /// Actual superelevation (cant) in inches
    pub superelevation_in: f64,
    /// Unbalanced superelevation (cant deficiency) allowed, in inches
    pub unbalanced_superelevation_in: f64,
    /// Upper bound for every estimated speed, in mph
    pub max_speed_mph: f64,
    /// Target point spacing used when densifying, in geometry units
    pub densify_spacing: f64,
    /// Conversion factor from geometry units to feet
    pub feet_per_unit: f64,
}

impl Default for CurvatureConfig {
    fn default() -> Self {
        Self {
            superelevation_in: 4.0,
            unbalanced_superelevation_in: 3.0,
            max_speed_mph: 150.0,
            densify_spacing: 30.0,
            feet_per_unit: FEET_PER_METRE,
        }
    }
}

impl CurvatureConfig {
    /// Total cant the speed formula works with, in inches
    pub fn total_superelevation(&self) -> f64 {
        self.superelevation_in + self.unbalanced_superelevation_in
    }

    /// Checks that every parameter is finite and within its physical range
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        let non_negative = [
            ("superelevation_in", self.superelevation_in),
            ("unbalanced_superelevation_in", self.unbalanced_superelevation_in),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if !self.max_speed_mph.is_finite() || self.max_speed_mph < MIN_SPEED_MPH {
            return Err(Error::InvalidConfig(format!(
                "max_speed_mph must be finite and at least {MIN_SPEED_MPH}, got {}",
                self.max_speed_mph
            )));
        }

        let positive = [
            ("densify_spacing", self.densify_spacing),
            ("feet_per_unit", self.feet_per_unit),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a finite positive number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// What to do with a routed network edge that carries no geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingGeometryPolicy {
    /// Substitute a straight line between the edge endpoints
    #[default]
    StraightLine,
    /// Leave the edge out of the extracted segments
    Skip,
    /// Emit the segment without geometry and let evaluation report it
    Keep,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    pub missing_geometry: MissingGeometryPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CurvatureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_superelevation(), 7.0);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let config = CurvatureConfig {
            densify_spacing: 0.0,
            ..CurvatureConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(msg) if msg.contains("densify_spacing")));
    }

    #[test]
    fn rejects_speed_cap_below_floor() {
        let config = CurvatureConfig {
            max_speed_mph: 0.5,
            ..CurvatureConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nan_superelevation() {
        let config = CurvatureConfig {
            superelevation_in: f64::NAN,
            ..CurvatureConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
