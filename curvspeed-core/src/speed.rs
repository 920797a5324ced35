//! Radius to speed conversion.
//!
//! Uses the AREMA balance formula `V = sqrt((Ea + Eu) * R / 11.8)` with the
//! cant in inches, the radius in feet and the speed in mph.

use crate::{CurvatureConfig, MIN_SPEED_MPH};

const AREMA_CONSTANT: f64 = 11.8;

/// Highest speed a curve of `radius` (geometry units) can be run at.
///
/// The result always lies within `[MIN_SPEED_MPH, config.max_speed_mph]`;
/// an infinite radius maps straight to the cap.
pub fn speed_for_radius(radius: f64, config: &CurvatureConfig) -> f64 {
    if radius.is_infinite() {
        return config.max_speed_mph;
    }

    let radius_ft = radius.max(0.0) * config.feet_per_unit;
    let speed = (config.total_superelevation() * radius_ft / AREMA_CONSTANT).sqrt();

    speed.min(config.max_speed_mph).max(MIN_SPEED_MPH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn straight_track_runs_at_the_cap() {
        let config = CurvatureConfig::default();
        assert_eq!(speed_for_radius(f64::INFINITY, &config), 150.0);
    }

    #[test]
    fn curve_speed_follows_balance_formula() {
        let config = CurvatureConfig::default();
        // 1000 m = 3280.84 ft, 7 in of cant
        let expected = (7.0 * 3280.84 / 11.8_f64).sqrt();
        assert_approx_eq!(speed_for_radius(1000.0, &config), expected, 1e-9);
    }

    #[test]
    fn wide_curves_are_capped() {
        let config = CurvatureConfig {
            max_speed_mph: 79.0,
            ..CurvatureConfig::default()
        };
        assert_eq!(speed_for_radius(50_000.0, &config), 79.0);
    }

    #[test]
    fn tiny_radius_hits_the_floor() {
        let config = CurvatureConfig::default();
        assert_eq!(speed_for_radius(0.1, &config), MIN_SPEED_MPH);
    }

    #[test]
    fn cant_changes_the_result() {
        let low = CurvatureConfig {
            superelevation_in: 0.0,
            unbalanced_superelevation_in: 3.0,
            ..CurvatureConfig::default()
        };
        let high = CurvatureConfig::default();
        assert!(speed_for_radius(500.0, &low) < speed_for_radius(500.0, &high));
    }
}
