//! Quick health checks over segment batches

use std::fmt;

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;

use crate::{EvaluatedSegment, SegmentRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentDiagnostics {
    pub segment_count: usize,
    pub corridor_count: usize,
    /// Input records that could not be read as segments at all, such as
    /// features with a non-line geometry. Filled in by the reader.
    pub unsupported_geometry: usize,
    pub missing_geometry: usize,
    pub empty_geometry: usize,
    pub missing_length: usize,
    /// Segments with fewer than 3 vertices, whose curvature cannot be seen
    /// without densification
    pub below_three_vertices: usize,
    pub min_vertices: Option<usize>,
    pub max_vertices: Option<usize>,
    pub mean_vertices: Option<f64>,
}

impl SegmentDiagnostics {
    pub fn collect(segments: &[SegmentRecord]) -> Self {
        let corridors: HashSet<&str> = segments
            .iter()
            .map(|s| s.corridor_key.as_str())
            .collect();

        let vertex_counts: Vec<usize> = segments
            .iter()
            .filter_map(|s| s.geometry.as_ref())
            .map(|g| g.0.len())
            .collect();

        let (min_vertices, max_vertices) = vertex_counts
            .iter()
            .copied()
            .minmax()
            .into_option()
            .unzip();
        #[allow(clippy::cast_precision_loss)]
        let mean_vertices = (!vertex_counts.is_empty())
            .then(|| vertex_counts.iter().sum::<usize>() as f64 / vertex_counts.len() as f64);

        Self {
            segment_count: segments.len(),
            corridor_count: corridors.len(),
            unsupported_geometry: 0,
            missing_geometry: segments.iter().filter(|s| s.geometry.is_none()).count(),
            empty_geometry: vertex_counts.iter().filter(|&&n| n == 0).count(),
            missing_length: segments.iter().filter(|s| s.usable_length().is_none()).count(),
            below_three_vertices: vertex_counts.iter().filter(|&&n| n < 3).count(),
            min_vertices,
            max_vertices,
            mean_vertices,
        }
    }
}

impl fmt::Display for SegmentDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} segments in {} corridors",
            self.segment_count, self.corridor_count
        )?;
        if self.unsupported_geometry > 0 {
            writeln!(
                f,
                "skipped {} records with unsupported geometry",
                self.unsupported_geometry
            )?;
        }
        writeln!(
            f,
            "missing geometry: {}, empty geometry: {}, missing length: {}",
            self.missing_geometry, self.empty_geometry, self.missing_length
        )?;
        match (self.min_vertices, self.max_vertices, self.mean_vertices) {
            (Some(min), Some(max), Some(mean)) => writeln!(
                f,
                "vertices per segment: min {min}, max {max}, mean {mean:.1}"
            )?,
            _ => writeln!(f, "vertices per segment: n/a")?,
        }
        write!(
            f,
            "segments with fewer than 3 vertices: {} of {}",
            self.below_three_vertices, self.segment_count
        )
    }
}

/// The `n` most frequent curvature speeds with their counts, most frequent
/// first; ties are ordered by speed.
pub fn most_common_speeds(segments: &[EvaluatedSegment], n: usize) -> Vec<(f64, usize)> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for segment in segments {
        *counts.entry(segment.curvature_speed.to_bits()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(bits, count)| (f64::from_bits(bits), count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.total_cmp(&b.0)))
        .take(n)
        .collect()
}
