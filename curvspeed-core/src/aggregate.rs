//! Length-weighted corridor statistics

use std::collections::BTreeMap;

use log::{info, warn};

use crate::{AverageSpeed, CorridorSummary, EvaluatedSegment};

#[derive(Debug, Default)]
struct CorridorAccumulator {
    total_length: f64,
    weighted_speed: f64,
    segment_count: usize,
    excluded_count: usize,
}

impl CorridorAccumulator {
    fn add(&mut self, segment: &EvaluatedSegment) {
        self.segment_count += 1;
        match segment.record.usable_length() {
            Some(length) => {
                self.total_length += length;
                self.weighted_speed += length * segment.curvature_speed;
            }
            None => self.excluded_count += 1,
        }
    }

    fn finish(self, corridor_key: String) -> CorridorSummary {
        let avg_curvature_speed = if self.total_length > 0.0 {
            AverageSpeed::Known(self.weighted_speed / self.total_length)
        } else {
            AverageSpeed::NoData
        };

        CorridorSummary {
            corridor_key,
            total_length: self.total_length,
            avg_curvature_speed,
            segment_count: self.segment_count,
            excluded_count: self.excluded_count,
        }
    }
}

/// Groups segments by corridor and computes their length-weighted speed.
///
/// Segments without a usable length are counted but carry no weight. A
/// corridor left with no weight at all reports [`AverageSpeed::NoData`].
pub fn aggregate(segments: &[EvaluatedSegment]) -> BTreeMap<String, CorridorSummary> {
    let mut groups: BTreeMap<&str, CorridorAccumulator> = BTreeMap::new();
    for segment in segments {
        groups
            .entry(segment.record.corridor_key.as_str())
            .or_default()
            .add(segment);
    }

    let summaries: BTreeMap<String, CorridorSummary> = groups
        .into_iter()
        .map(|(key, acc)| (key.to_string(), acc.finish(key.to_string())))
        .collect();

    let no_data = summaries
        .values()
        .filter(|s| s.avg_curvature_speed == AverageSpeed::NoData)
        .count();
    if no_data > 0 {
        warn!("{no_data} corridors have no segment with a usable length");
    }
    info!(
        "Aggregated {} segments into {} corridors",
        segments.len(),
        summaries.len()
    );

    summaries
}
