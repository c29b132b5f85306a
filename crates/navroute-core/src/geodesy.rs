//! Great-circle math on a spherical earth, in nautical miles.

use thiserror::Error;

use crate::models::Coordinate;

/// Mean earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Error type for the geodesy functions.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeodesyError {
    /// A non-finite or out-of-range coordinate reached a geodesy entry
    /// point. Catalog data is validated at ingestion, so hitting this
    /// indicates a caller bug.
    #[error("invalid coordinate ({lat_deg}, {lon_deg})")]
    InvalidCoordinate { lat_deg: f64, lon_deg: f64 },
}

fn validate(c: Coordinate) -> Result<(), GeodesyError> {
    if !c.lat_deg.is_finite() || !c.lon_deg.is_finite() {
        return Err(GeodesyError::InvalidCoordinate {
            lat_deg: c.lat_deg,
            lon_deg: c.lon_deg,
        });
    }
    Ok(())
}

/// Great-circle distance between two points, haversine formula.
///
/// Identical points give exactly 0; antipodal points give a finite
/// value of roughly pi times the earth radius.
pub fn distance_nm(a: Coordinate, b: Coordinate) -> Result<f64, GeodesyError> {
    validate(a)?;
    validate(b)?;

    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let dphi = (b.lat_deg - a.lat_deg).to_radians();
    let dlambda = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    Ok(2.0 * EARTH_RADIUS_NM * h.sqrt().atan2((1.0 - h).sqrt()))
}

/// Initial bearing from `a` to `b`, normalized to [0, 360).
///
/// Undefined in principle when the points coincide; returns 0 in that
/// case rather than NaN.
pub fn initial_bearing_deg(a: Coordinate, b: Coordinate) -> Result<f64, GeodesyError> {
    validate(a)?;
    validate(b)?;

    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let dlambda = (b.lon_deg - a.lon_deg).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();

    // atan2(0, 0) is 0 in Rust, which covers the coincident-point case.
    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid rounds a tiny negative input up to exactly 360.0.
    Ok(if bearing >= 360.0 { 0.0 } else { bearing })
}

/// Signed perpendicular distance of `point` from the great-circle path
/// through `start` -> `end`.
///
/// Negative values lie left of the track, positive values right; callers
/// interested in corridor membership compare the absolute value.
pub fn cross_track_nm(
    point: Coordinate,
    start: Coordinate,
    end: Coordinate,
) -> Result<f64, GeodesyError> {
    let d13 = distance_nm(start, point)? / EARTH_RADIUS_NM;
    let theta13 = initial_bearing_deg(start, point)?.to_radians();
    let theta12 = initial_bearing_deg(start, end)?.to_radians();

    Ok((d13.sin() * (theta13 - theta12).sin()).asin() * EARTH_RADIUS_NM)
}
