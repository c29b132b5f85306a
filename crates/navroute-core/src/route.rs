//! Route assembly on top of the corridor search.

use crate::catalog::NavaidCatalog;
use crate::corridor::{self, CorridorConfig};
use crate::geodesy::{self, GeodesyError};
use crate::models::{Airport, Route};

/// Build a route from `origin` to `destination` through the navaids the
/// corridor search selects.
///
/// The reported total distance is the sum of consecutive great-circle
/// legs (origin -> first waypoint -> ... -> destination), i.e. the true
/// flown distance including doglegs, not the direct distance.
///
/// Deterministic and idempotent: the same catalog, endpoints and config
/// always produce an identical route. A route with zero waypoints is a
/// valid direct route, not a failure.
pub fn build_route(
    origin: &Airport,
    destination: &Airport,
    catalog: &NavaidCatalog,
    config: &CorridorConfig,
) -> Result<Route, GeodesyError> {
    let waypoints =
        corridor::find_waypoints(origin.position, destination.position, catalog, config)?;

    let mut total_distance_nm = 0.0;
    let mut previous = origin.position;
    for waypoint in &waypoints {
        total_distance_nm += geodesy::distance_nm(previous, waypoint.navaid.position)?;
        previous = waypoint.navaid.position;
    }
    total_distance_nm += geodesy::distance_nm(previous, destination.position)?;

    Ok(Route {
        origin: origin.clone(),
        destination: destination.clone(),
        waypoints,
        total_distance_nm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirportClass, Coordinate, Navaid, NavaidKind};

    fn airport(icao: &str, lat: f64, lon: f64) -> Airport {
        Airport {
            icao: icao.to_string(),
            iata: None,
            name: format!("{icao} airport"),
            city: None,
            country: "FR".to_string(),
            position: Coordinate::new(lat, lon).unwrap(),
            elevation_ft: Some(100),
            class: AirportClass::Large,
        }
    }

    fn station(ident: &str, kind: NavaidKind, lat: f64, lon: f64) -> Navaid {
        Navaid {
            ident: ident.to_string(),
            name: format!("{ident} station"),
            kind,
            frequency_mhz: 113.5,
            position: Coordinate::new(lat, lon).unwrap(),
            elevation_ft: Some(100),
            country: "FR".to_string(),
            dme_channel: None,
            magnetic_variation: None,
            associated_airport: None,
            usage: "HI".to_string(),
        }
    }

    #[test]
    fn end_to_end_route_over_a_known_catalog() {
        // Equatorial track (0,0) -> (0,10), about 600 NM. Three stations
        // sit on the track; one of them is only 10 NM from the origin so
        // the endpoint margin must drop it. A fourth sits well off the
        // corridor.
        let origin = airport("AAAA", 0.0, 0.0);
        let destination = airport("BBBB", 0.0, 10.0);
        let catalog = NavaidCatalog::from_records([
            station("NEAR", NavaidKind::Vor, 0.0, 10.0 / 60.0),
            station("ONE", NavaidKind::Vor, 0.0, 3.0),
            station("TWO", NavaidKind::VorDme, 0.0, 7.0),
            station("OFF", NavaidKind::Vor, 3.0, 5.0),
        ]);

        let route =
            build_route(&origin, &destination, &catalog, &CorridorConfig::default()).unwrap();

        let idents: Vec<&str> = route
            .waypoints
            .iter()
            .map(|wp| wp.navaid.ident.as_str())
            .collect();
        assert_eq!(idents, ["ONE", "TWO"]);
        assert!(route.waypoints[0].distance_from_origin_nm < route.waypoints[1].distance_from_origin_nm);

        // All the selected stations lie on the direct track, so the leg
        // sum matches the direct distance.
        let direct = geodesy::distance_nm(origin.position, destination.position).unwrap();
        assert!((route.total_distance_nm - direct).abs() < 0.01);

        let positions = route.positions();
        assert_eq!(positions.len(), 4);
        assert_eq!(positions[0], origin.position);
        assert_eq!(positions[3], destination.position);
    }

    #[test]
    fn dogleg_total_distance_exceeds_direct_distance() {
        let origin = airport("AAAA", 0.0, 0.0);
        let destination = airport("BBBB", 0.0, 10.0);
        // Half a degree off track (about 30 NM): admitted by a wide
        // corridor, and the flown distance grows accordingly.
        let catalog = NavaidCatalog::from_records([station("DOG", NavaidKind::Vor, 0.5, 5.0)]);
        let config = CorridorConfig {
            half_width_nm: 50.0,
            ..CorridorConfig::default()
        };

        let route = build_route(&origin, &destination, &catalog, &config).unwrap();
        assert_eq!(route.waypoints.len(), 1);

        let direct = geodesy::distance_nm(origin.position, destination.position).unwrap();
        assert!(route.total_distance_nm > direct + 1.0);
    }

    #[test]
    fn route_with_no_waypoints_is_a_direct_line() {
        let origin = airport("AAAA", 0.0, 0.0);
        let destination = airport("BBBB", 0.0, 10.0);
        let catalog = NavaidCatalog::default();

        let route =
            build_route(&origin, &destination, &catalog, &CorridorConfig::default()).unwrap();
        assert!(route.waypoints.is_empty());

        let direct = geodesy::distance_nm(origin.position, destination.position).unwrap();
        assert!((route.total_distance_nm - direct).abs() < 1e-9);
        assert_eq!(route.positions().len(), 2);
    }

    #[test]
    fn coincident_airports_build_an_empty_route() {
        let origin = airport("AAAA", 43.6294, 1.3678);
        let catalog = NavaidCatalog::from_records([
            station("TOU", NavaidKind::VorDme, 43.680, 1.310),
        ]);

        let route = build_route(&origin, &origin, &catalog, &CorridorConfig::default()).unwrap();
        assert!(route.waypoints.is_empty());
        assert_eq!(route.total_distance_nm, 0.0);
    }

    #[test]
    fn identical_inputs_produce_identical_routes() {
        let origin = airport("AAAA", 0.0, 0.0);
        let destination = airport("BBBB", 0.0, 10.0);
        let catalog = NavaidCatalog::from_records([
            station("ONE", NavaidKind::Vor, 0.0, 3.0),
            station("TWO", NavaidKind::Vor, 0.0, 5.0),
            station("TRE", NavaidKind::VorDme, 0.0, 7.0),
        ]);
        let config = CorridorConfig::default();

        let first = build_route(&origin, &destination, &catalog, &config).unwrap();
        let second = build_route(&origin, &destination, &catalog, &config).unwrap();

        let idents = |route: &Route| -> Vec<String> {
            route
                .waypoints
                .iter()
                .map(|wp| wp.navaid.ident.clone())
                .collect()
        };
        assert_eq!(idents(&first), idents(&second));
        assert_eq!(first.total_distance_nm, second.total_distance_nm);
    }
}
