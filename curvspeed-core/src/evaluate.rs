//! Per-segment curvature speed and its parallel batch form

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::LineString;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use crate::geometry::{circumradius, densify};
use crate::speed::speed_for_radius;
use crate::{CurvatureConfig, Error, EvaluatedSegment, SegmentRecord};

/// Shared count of finished segment evaluations.
///
/// Clones observe the same counter, so a reporter thread can watch a batch
/// while it runs.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    completed: Arc<AtomicUsize>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[inline]
    fn tick(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Mean speed over every consecutive point triple of the densified line
#[allow(clippy::cast_precision_loss)]
pub fn segment_curvature_speed(line: &LineString<f64>, config: &CurvatureConfig) -> f64 {
    let dense = densify(line, config.densify_spacing);
    if dense.0.len() < 3 {
        return config.max_speed_mph;
    }

    let (sum, count) = dense
        .0
        .iter()
        .tuple_windows()
        .map(|(p1, p2, p3)| speed_for_radius(circumradius(*p1, *p2, *p3), config))
        .fold((0.0, 0_usize), |(sum, count), speed| (sum + speed, count + 1));

    if count == 0 {
        return config.max_speed_mph;
    }

    sum / count as f64
}

/// Evaluates one segment; `index` is its position in the batch and only
/// serves to locate the record in error reports.
///
/// # Errors
///
/// Returns [`Error::MissingGeometry`] if the record has no geometry.
pub fn evaluate_segment(
    index: usize,
    record: &SegmentRecord,
    config: &CurvatureConfig,
) -> Result<EvaluatedSegment, Error> {
    let geometry = record
        .geometry
        .as_ref()
        .ok_or_else(|| Error::MissingGeometry {
            index,
            corridor_key: record.corridor_key.clone(),
        })?;

    if geometry.0.len() < 3 {
        debug!(
            "Segment #{index} of '{}' has {} vertices, curvature may be underestimated",
            record.corridor_key,
            geometry.0.len()
        );
    }

    Ok(EvaluatedSegment {
        record: record.clone(),
        curvature_speed: segment_curvature_speed(geometry, config),
    })
}

/// Evaluates all segments on the current rayon pool.
///
/// Results keep the input order whatever order the workers finish in.
/// `progress` is advanced once per evaluated segment.
///
/// # Errors
///
/// Fails with [`Error::InvalidConfig`] for an invalid `config`, or with the
/// [`Error::MissingGeometry`] of the lowest-indexed record lacking geometry.
pub fn evaluate_segments(
    segments: &[SegmentRecord],
    config: &CurvatureConfig,
    progress: &Progress,
) -> Result<Vec<EvaluatedSegment>, Error> {
    config.validate()?;

    info!(
        "Estimating curvature speed for {} segments on {} threads",
        segments.len(),
        rayon::current_num_threads()
    );

    let results: Vec<Result<EvaluatedSegment, Error>> = segments
        .par_iter()
        .enumerate()
        .map(|(index, record)| {
            let result = evaluate_segment(index, record, config);
            progress.tick();
            result
        })
        .collect();

    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use geo::line_string;

    #[test]
    fn straight_segment_runs_at_the_cap() {
        let config = CurvatureConfig::default();
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        assert_eq!(segment_curvature_speed(&line, &config), config.max_speed_mph);
    }

    #[test]
    fn two_point_segment_falls_back_to_the_cap() {
        let config = CurvatureConfig::default();
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 5.0)];
        assert_eq!(segment_curvature_speed(&line, &config), config.max_speed_mph);
    }

    #[test]
    fn empty_segment_falls_back_to_the_cap() {
        let config = CurvatureConfig::default();
        let line = LineString::<f64>::new(vec![]);
        assert_eq!(segment_curvature_speed(&line, &config), config.max_speed_mph);
    }

    #[test]
    fn sharp_short_segment_is_averaged_over_its_triple() {
        let config = CurvatureConfig::default();
        // right angle, circumradius 5 m, shorter than the spacing so no resampling
        let line = line_string![(x: 0.0, y: 0.0), (x: 6.0, y: 0.0), (x: 6.0, y: 8.0)];
        let expected = speed_for_radius(5.0, &config);
        assert_approx_eq!(segment_curvature_speed(&line, &config), expected);
    }

    #[test]
    fn missing_geometry_is_reported_with_context() {
        let record = SegmentRecord {
            corridor_key: "Chicago_Detroit".to_string(),
            geometry: None,
            length: Some(1.0),
            declared_speed: None,
            segment_type: None,
        };
        let err = evaluate_segment(7, &record, &CurvatureConfig::default()).unwrap_err();
        assert_eq!(
            err,
            Error::MissingGeometry {
                index: 7,
                corridor_key: "Chicago_Detroit".to_string()
            }
        );
    }

    #[test]
    fn progress_counts_every_segment() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 10.0), (x: 200.0, y: 0.0)];
        let segments: Vec<_> = (0..25)
            .map(|i| SegmentRecord::new(format!("c{}", i % 3), line.clone()))
            .collect();
        let progress = Progress::new();
        let evaluated =
            evaluate_segments(&segments, &CurvatureConfig::default(), &progress).unwrap();
        assert_eq!(evaluated.len(), 25);
        assert_eq!(progress.completed(), 25);
    }

    #[test]
    fn lowest_index_error_wins() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        let mut segments: Vec<_> = (0..50)
            .map(|i| SegmentRecord::new(format!("c{i}"), line.clone()))
            .collect();
        segments[12].geometry = None;
        segments[40].geometry = None;

        let err = evaluate_segments(&segments, &CurvatureConfig::default(), &Progress::new())
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingGeometry {
                index: 12,
                corridor_key: "c12".to_string()
            }
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_work_starts() {
        let config = CurvatureConfig {
            densify_spacing: -1.0,
            ..CurvatureConfig::default()
        };
        let progress = Progress::new();
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        let result = evaluate_segments(&[SegmentRecord::new("a", line)], &config, &progress);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        assert_eq!(progress.completed(), 0);
    }
}
