//! Core data models for route planning.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geodesy::GeodesyError;

/// A position on the earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Coordinate {
    /// Create a validated coordinate.
    ///
    /// Both values must be finite, with latitude in [-90, 90] and
    /// longitude in [-180, 180].
    pub fn new(lat_deg: f64, lon_deg: f64) -> Result<Self, GeodesyError> {
        if !lat_deg.is_finite()
            || !lon_deg.is_finite()
            || !(-90.0..=90.0).contains(&lat_deg)
            || !(-180.0..=180.0).contains(&lon_deg)
        {
            return Err(GeodesyError::InvalidCoordinate { lat_deg, lon_deg });
        }
        Ok(Self { lat_deg, lon_deg })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat_deg, self.lon_deg)
    }
}

/// Category of a ground-based radio navigation aid.
///
/// Parsed from the dataset's `type` field. The source data spells a
/// combined VOR/DME station either `VORDME` or `VOR-DME`; both map to
/// [`NavaidKind::VorDme`] since they are operationally the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavaidKind {
    #[serde(rename = "VOR")]
    Vor,
    #[serde(rename = "DME")]
    Dme,
    #[serde(rename = "NDB")]
    Ndb,
    #[serde(rename = "VOR-DME")]
    VorDme,
}

impl NavaidKind {
    /// Parse the dataset `type` field. Unrecognized values yield `None`
    /// and the record is dropped at ingestion.
    pub fn from_type_field(value: &str) -> Option<Self> {
        match value.trim() {
            "VOR" => Some(Self::Vor),
            "DME" => Some(Self::Dme),
            "NDB" => Some(Self::Ndb),
            "VORDME" | "VOR-DME" => Some(Self::VorDme),
            _ => None,
        }
    }

    /// Whether this kind of station may be inserted into a route.
    ///
    /// Only VOR and combined VOR/DME stations become waypoints; DME-only
    /// and NDB stations are catalog entries but never route points.
    pub fn is_route_candidate(self) -> bool {
        matches!(self, Self::Vor | Self::VorDme)
    }
}

impl fmt::Display for NavaidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Vor => "VOR",
            Self::Dme => "DME",
            Self::Ndb => "NDB",
            Self::VorDme => "VOR-DME",
        };
        f.write_str(label)
    }
}

/// A radio navigation aid from the navaid dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Navaid {
    /// Station identifier (ICAO-style ident, unique key).
    pub ident: String,
    pub name: String,
    pub kind: NavaidKind,
    /// Frequency in MHz, derived from the dataset's integer kHz value.
    pub frequency_mhz: f64,
    pub position: Coordinate,
    /// Station elevation in feet; `None` when absent or unparseable.
    pub elevation_ft: Option<i32>,
    /// ISO country code.
    pub country: String,
    pub dme_channel: Option<String>,
    /// Magnetic variation as reported by the dataset, surfaced verbatim.
    pub magnetic_variation: Option<String>,
    /// Ident of the airport this station is associated with, if any.
    pub associated_airport: Option<String>,
    /// Usage classification (e.g. HI, LO, BOTH, TERMINAL).
    pub usage: String,
}

/// Airport size classification. Anything smaller than a medium airport
/// (heliports, seaplane bases, small strips) is dropped at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirportClass {
    Large,
    Medium,
}

impl AirportClass {
    /// Parse the dataset `type` field.
    pub fn from_type_field(value: &str) -> Option<Self> {
        match value.trim() {
            "large_airport" => Some(Self::Large),
            "medium_airport" => Some(Self::Medium),
            _ => None,
        }
    }
}

/// An airport from the airport dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    /// ICAO identifier (unique key, never empty).
    pub icao: String,
    pub iata: Option<String>,
    pub name: String,
    pub city: Option<String>,
    pub country: String,
    pub position: Coordinate,
    /// Field elevation in feet; `None` when absent or unparseable.
    pub elevation_ft: Option<i32>,
    pub class: AirportClass,
}

/// A navaid selected as an intermediate route point, annotated with its
/// great-circle distance from the route origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub navaid: Navaid,
    pub distance_from_origin_nm: f64,
}

/// A constructed route: origin, waypoints in flying order, destination.
///
/// Carries everything a renderer needs for markers and popups so the
/// catalogs never have to be consulted again for this route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub origin: Airport,
    pub destination: Airport,
    /// Waypoints sorted ascending by distance from the origin.
    pub waypoints: Vec<Waypoint>,
    /// Total flown distance in NM, summed leg by leg through the
    /// waypoints rather than the direct origin-destination distance.
    pub total_distance_nm: f64,
}

impl Route {
    /// Ordered coordinate sequence: origin, each waypoint, destination.
    pub fn positions(&self) -> Vec<Coordinate> {
        let mut positions = Vec::with_capacity(self.waypoints.len() + 2);
        positions.push(self.origin.position);
        positions.extend(self.waypoints.iter().map(|wp| wp.navaid.position));
        positions.push(self.destination.position);
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_rejects_non_finite_and_out_of_range() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn navaid_kind_parses_both_vor_dme_spellings() {
        assert_eq!(NavaidKind::from_type_field("VORDME"), Some(NavaidKind::VorDme));
        assert_eq!(NavaidKind::from_type_field("VOR-DME"), Some(NavaidKind::VorDme));
        assert_eq!(NavaidKind::from_type_field("VOR"), Some(NavaidKind::Vor));
        assert_eq!(NavaidKind::from_type_field("TACAN"), None);
    }

    #[test]
    fn route_serializes_with_display_metadata() {
        let airport = |icao: &str, lat: f64, lon: f64| Airport {
            icao: icao.to_string(),
            iata: None,
            name: format!("{icao} airport"),
            city: None,
            country: "FR".to_string(),
            position: Coordinate::new(lat, lon).unwrap(),
            elevation_ft: Some(499),
            class: AirportClass::Large,
        };
        let route = Route {
            origin: airport("LFBO", 43.6294, 1.3678),
            destination: airport("EGLL", 51.4706, -0.4619),
            waypoints: vec![Waypoint {
                navaid: Navaid {
                    ident: "TOU".to_string(),
                    name: "Toulouse".to_string(),
                    kind: NavaidKind::VorDme,
                    frequency_mhz: 117.7,
                    position: Coordinate::new(43.680, 1.310).unwrap(),
                    elevation_ft: Some(499),
                    country: "FR".to_string(),
                    dme_channel: Some("124X".to_string()),
                    magnetic_variation: None,
                    associated_airport: Some("LFBO".to_string()),
                    usage: "LO".to_string(),
                },
                distance_from_origin_nm: 4.2,
            }],
            total_distance_nm: 500.0,
        };

        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["origin"]["icao"], "LFBO");
        assert_eq!(json["waypoints"][0]["navaid"]["kind"], "VOR-DME");
        assert_eq!(json["waypoints"][0]["navaid"]["dme_channel"], "124X");
    }

    #[test]
    fn only_vor_family_is_route_candidate() {
        assert!(NavaidKind::Vor.is_route_candidate());
        assert!(NavaidKind::VorDme.is_route_candidate());
        assert!(!NavaidKind::Dme.is_route_candidate());
        assert!(!NavaidKind::Ndb.is_route_candidate());
    }
}
