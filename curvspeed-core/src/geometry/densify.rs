use geo::{Coord, LineString};

use super::distance;

/// Upper bound on the points a single densified line may hold
pub const MAX_DENSIFIED_POINTS: usize = 1 << 20;

/// Total length of a polyline in its own units
pub fn polyline_length(line: &LineString<f64>) -> f64 {
    line.lines().map(|l| l.dx().hypot(l.dy())).sum()
}

/// Resamples `line` to points spaced evenly along its length.
///
/// Lines shorter than `spacing` are returned as they are. Longer lines get
/// `max(3, floor(length / spacing))` points, the first and last of which are
/// the original endpoints. The count is capped at [`MAX_DENSIFIED_POINTS`],
/// which widens the spacing for very small `spacing` values.
pub fn densify(line: &LineString<f64>, spacing: f64) -> LineString<f64> {
    let total = polyline_length(line);
    if !spacing.is_finite() || spacing <= 0.0 || !total.is_finite() || total < spacing {
        return line.clone();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let num_points = ((total / spacing).floor() as usize).clamp(3, MAX_DENSIFIED_POINTS);
    #[allow(clippy::cast_precision_loss)]
    let step = total / (num_points - 1) as f64;

    let coords = &line.0;
    let mut points: Vec<Coord<f64>> = Vec::with_capacity(num_points);

    // Cursor over the source segments: `seg` is the index of the segment's
    // first vertex and `seg_start` its distance from the line start.
    let mut seg = 0;
    let mut seg_start = 0.0;
    let mut seg_len = distance(coords[0], coords[1]);

    for k in 0..num_points - 1 {
        #[allow(clippy::cast_precision_loss)]
        let target = step * k as f64;

        while seg + 2 < coords.len() && target > seg_start + seg_len {
            seg_start += seg_len;
            seg += 1;
            seg_len = distance(coords[seg], coords[seg + 1]);
        }

        let t = if seg_len > 0.0 {
            ((target - seg_start) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        points.push(coords[seg] + (coords[seg + 1] - coords[seg]) * t);
    }

    if let Some(&last) = coords.last() {
        points.push(last);
    }

    LineString::new(points)
}
