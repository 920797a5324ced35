//! Planar geometry primitives of the curvature model

pub mod densify;
pub mod radius;

pub use densify::{densify, polyline_length};
pub use radius::circumradius;

use geo::Coord;

/// Euclidean distance between two coordinates
#[inline]
pub(crate) fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let delta = b - a;
    delta.x.hypot(delta.y)
}
