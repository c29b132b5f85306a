//! Flight route construction over static navaid and airport datasets.
//!
//! The engine ingests tabular navaid/airport data into immutable
//! catalogs, then builds routes between two airports by selecting VOR
//! and VOR-DME stations inside a lateral corridor around the direct
//! great-circle track. Everything after ingestion is synchronous, pure
//! and safe to share across threads.

pub mod catalog;
pub mod corridor;
pub mod geodesy;
pub mod models;
pub mod route;

pub use catalog::{AirportCatalog, CatalogError, IngestReport, NavaidCatalog};
pub use corridor::{find_waypoints, CorridorConfig};
pub use geodesy::{
    cross_track_nm, distance_nm, initial_bearing_deg, GeodesyError, EARTH_RADIUS_NM,
};
pub use models::{Airport, AirportClass, Coordinate, Navaid, NavaidKind, Route, Waypoint};
pub use route::build_route;
