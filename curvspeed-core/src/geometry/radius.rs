use geo::Coord;

use super::distance;

/// Radius of the circle through three points.
///
/// Collinear or coincident points describe no curve at all and yield
/// `f64::INFINITY`.
pub fn circumradius(p1: Coord<f64>, p2: Coord<f64>, p3: Coord<f64>) -> f64 {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p3, p1);
    let s = (a + b + c) / 2.0;

    // Heron's formula, the radicand may dip below zero for near-collinear input
    let area = (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt();
    if area == 0.0 {
        return f64::INFINITY;
    }

    (a * b * c) / (4.0 * area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn collinear_points_have_infinite_radius() {
        let r = circumradius(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        );
        assert!(r.is_infinite());
    }

    #[test]
    fn repeated_points_have_infinite_radius() {
        let p = coord! { x: 3.0, y: 7.0 };
        assert!(circumradius(p, p, p).is_infinite());
        assert!(circumradius(p, p, coord! { x: 4.0, y: 7.0 }).is_infinite());
    }

    #[test]
    fn points_on_a_known_circle() {
        let radius = 100.0;
        let on_circle = |deg: f64| {
            let rad = deg.to_radians();
            coord! { x: radius * rad.cos(), y: radius * rad.sin() }
        };
        let r = circumradius(on_circle(0.0), on_circle(40.0), on_circle(95.0));
        assert!(((r - radius) / radius).abs() < 1e-6, "got {r}");
    }

    #[test]
    fn right_triangle_radius_is_half_hypotenuse() {
        let r = circumradius(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 6.0, y: 0.0 },
            coord! { x: 6.0, y: 8.0 },
        );
        assert!((r - 5.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_input_does_not_panic() {
        let r = circumradius(
            coord! { x: f64::NAN, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 2.0, y: 1.0 },
        );
        assert!(r.is_infinite());
    }
}
