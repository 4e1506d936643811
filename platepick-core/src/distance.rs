//! Great-circle distance between WGS84 coordinates.

use geo::Coord;

/// Mean Earth radius used by the scorer, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two `x = lon`, `y = lat`
/// coordinates.
///
/// The radius is fixed at [`EARTH_RADIUS_KM`] so scores stay reproducible
/// across `geo` releases that tweak their own constant.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use platepick_core::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let one_degree_north = Coord { x: 0.0, y: 1.0 };
/// let km = haversine_km(origin, one_degree_north);
/// assert!((km - 111.19).abs() < 0.01);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat_from = from.y.to_radians();
    let lat_to = to.y.to_radians();
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lon = (to.x - from.x).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_KM * angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-6;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let point = Coord { x: 13.405, y: 52.52 };
        assert!(haversine_km(point, point).abs() < TOLERANCE);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let berlin = Coord { x: 13.405, y: 52.52 };
        let paris = Coord { x: 2.3522, y: 48.8566 };
        let there = haversine_km(berlin, paris);
        let back = haversine_km(paris, berlin);
        assert!((there - back).abs() < TOLERANCE);
    }

    #[rstest]
    fn berlin_to_paris_is_roughly_878_km() {
        let berlin = Coord { x: 13.405, y: 52.52 };
        let paris = Coord { x: 2.3522, y: 48.8566 };
        let km = haversine_km(berlin, paris);
        assert!((km - 877.5).abs() < 2.0, "unexpected distance {km}");
    }
}
