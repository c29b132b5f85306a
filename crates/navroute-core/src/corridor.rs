//! Corridor search: pick navaids that plausibly lie along a direct route.

use serde::{Deserialize, Serialize};

use crate::catalog::NavaidCatalog;
use crate::geodesy::{self, GeodesyError};
use crate::models::{Coordinate, Waypoint};

/// Tuning knobs for waypoint selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorConfig {
    /// Half-width of the lateral corridor around the direct track, in NM.
    /// A station is "on route" when its absolute cross-track distance is
    /// within this value.
    pub half_width_nm: f64,
    /// Stations closer than this to either endpoint are dropped, in NM,
    /// to avoid waypoints that are redundant with the airports themselves.
    pub endpoint_margin_nm: f64,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            half_width_nm: 1.0,
            endpoint_margin_nm: 50.0,
        }
    }
}

/// Select and order the navaids lying along the direct origin-destination
/// track.
///
/// Only VOR and VOR-DME stations are considered. A station is kept when
/// its cross-track distance is within the corridor half-width and its
/// distance from the origin falls strictly inside the endpoint margins.
/// Results are sorted ascending by distance from the origin, ties broken
/// by ident so identical inputs always produce identical output.
///
/// Coincident endpoints yield an empty list: with a zero-length route the
/// endpoint-margin window is meaningless, and a direct "route" is still a
/// valid answer.
pub fn find_waypoints(
    origin: Coordinate,
    destination: Coordinate,
    catalog: &NavaidCatalog,
    config: &CorridorConfig,
) -> Result<Vec<Waypoint>, GeodesyError> {
    let total_nm = geodesy::distance_nm(origin, destination)?;
    if total_nm == 0.0 {
        return Ok(Vec::new());
    }

    let mut waypoints = Vec::new();
    for navaid in catalog.iter() {
        if !navaid.kind.is_route_candidate() {
            continue;
        }

        let cross_track = geodesy::cross_track_nm(navaid.position, origin, destination)?;
        if cross_track.abs() > config.half_width_nm {
            continue;
        }

        let from_origin = geodesy::distance_nm(origin, navaid.position)?;
        if from_origin <= config.endpoint_margin_nm
            || from_origin >= total_nm - config.endpoint_margin_nm
        {
            continue;
        }

        waypoints.push(Waypoint {
            navaid: navaid.clone(),
            distance_from_origin_nm: from_origin,
        });
    }

    waypoints.sort_by(|a, b| {
        a.distance_from_origin_nm
            .total_cmp(&b.distance_from_origin_nm)
            .then_with(|| a.navaid.ident.cmp(&b.navaid.ident))
    });

    tracing::debug!(
        waypoints = waypoints.len(),
        total_nm,
        "corridor search complete"
    );
    Ok(waypoints)
}
