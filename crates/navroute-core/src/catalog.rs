//! Navaid and airport catalogs loaded from tabular datasets.
//!
//! Both catalogs are immutable once built and keep their records in load
//! order, so "first N matches" operations have explicit, stable semantics
//! instead of relying on incidental map iteration. Lookups go through an
//! uppercase-ident index.
//!
//! Ingestion is tolerant: rows that cannot be typed (unrecognized
//! category, non-numeric coordinates, empty key) are skipped and counted,
//! never a hard failure. Callers receive the skip count alongside the
//! catalog and decide whether to log or alert.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;
use thiserror::Error;

use crate::models::{Airport, AirportClass, Coordinate, Navaid, NavaidKind};

/// UI-style searches return at most this many airports.
const MAX_SEARCH_RESULTS: usize = 5;

/// Error type for catalog ingestion. Covers transport failures only;
/// malformed rows are tolerated and counted in the [`IngestReport`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog data: {0}")]
    Csv(#[from] csv::Error),
}

/// Outcome summary of one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows seen (header excluded).
    pub rows: usize,
    /// Records retained in the catalog.
    pub loaded: usize,
    /// Rows dropped as unusable.
    pub skipped: usize,
}

/// Column positions in the navaid dataset.
mod navaid_col {
    pub const IDENT: usize = 2;
    pub const NAME: usize = 3;
    pub const TYPE: usize = 4;
    pub const FREQUENCY_KHZ: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
    pub const ELEVATION_FT: usize = 8;
    pub const ISO_COUNTRY: usize = 9;
    pub const DME_CHANNEL: usize = 11;
    pub const MAGNETIC_VARIATION: usize = 16;
    pub const USAGE: usize = 17;
    pub const ASSOCIATED_AIRPORT: usize = 19;
}

/// Column positions in the airport dataset.
mod airport_col {
    pub const IDENT: usize = 1;
    pub const TYPE: usize = 2;
    pub const NAME: usize = 3;
    pub const LATITUDE: usize = 4;
    pub const LONGITUDE: usize = 5;
    pub const ELEVATION_FT: usize = 6;
    pub const COUNTRY: usize = 8;
    pub const MUNICIPALITY: usize = 10;
    pub const IATA: usize = 13;
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).map(str::trim).unwrap_or("")
}

fn optional_field(record: &StringRecord, idx: usize) -> Option<String> {
    let value = field(record, idx);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// All recognized radio navigation aids, keyed by ident.
#[derive(Debug, Clone, Default)]
pub struct NavaidCatalog {
    records: Vec<Navaid>,
    by_ident: HashMap<String, usize>,
}

impl NavaidCatalog {
    /// Ingest the navaid dataset from CSV.
    ///
    /// Retains only records whose category is recognized (VOR, DME, NDB,
    /// VOR-DME in either spelling) and whose coordinates parse. Duplicate
    /// idents are last-write-wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<(Self, IngestReport), CatalogError> {
        let mut catalog = Self::default();
        let mut report = IngestReport::default();

        for record in csv_reader(reader).records() {
            let record = record?;
            report.rows += 1;
            match parse_navaid(&record) {
                Some(navaid) => {
                    catalog.insert(navaid);
                    report.loaded += 1;
                }
                None => {
                    report.skipped += 1;
                    tracing::debug!(row = report.rows, "skipping unusable navaid row");
                }
            }
        }

        Ok((catalog, report))
    }

    /// Build a catalog from already-typed records, in the given order.
    pub fn from_records(records: impl IntoIterator<Item = Navaid>) -> Self {
        let mut catalog = Self::default();
        for navaid in records {
            catalog.insert(navaid);
        }
        catalog
    }

    fn insert(&mut self, navaid: Navaid) {
        match self.by_ident.entry(navaid.ident.clone()) {
            // Last write wins, in place, keeping the first load slot.
            Entry::Occupied(slot) => self.records[*slot.get()] = navaid,
            Entry::Vacant(slot) => {
                slot.insert(self.records.len());
                self.records.push(navaid);
            }
        }
    }

    /// Look up a station by ident, case-insensitively.
    pub fn get(&self, ident: &str) -> Option<&Navaid> {
        let key = ident.trim().to_ascii_uppercase();
        self.by_ident.get(&key).map(|&idx| &self.records[idx])
    }

    /// Iterate all stations in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Navaid> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_navaid(record: &StringRecord) -> Option<Navaid> {
    let kind = NavaidKind::from_type_field(field(record, navaid_col::TYPE))?;
    let ident = field(record, navaid_col::IDENT).to_ascii_uppercase();
    if ident.is_empty() {
        return None;
    }

    let lat_deg: f64 = field(record, navaid_col::LATITUDE).parse().ok()?;
    let lon_deg: f64 = field(record, navaid_col::LONGITUDE).parse().ok()?;
    let position = Coordinate::new(lat_deg, lon_deg).ok()?;

    let frequency_khz: i64 = field(record, navaid_col::FREQUENCY_KHZ).parse().ok()?;
    // kHz to decimal MHz; integer kHz input means this is already exact
    // at 3-decimal resolution.
    let frequency_mhz = frequency_khz as f64 / 1000.0;

    Some(Navaid {
        ident,
        name: field(record, navaid_col::NAME).to_string(),
        kind,
        frequency_mhz,
        position,
        elevation_ft: field(record, navaid_col::ELEVATION_FT).parse().ok(),
        country: field(record, navaid_col::ISO_COUNTRY).to_string(),
        dme_channel: optional_field(record, navaid_col::DME_CHANNEL),
        magnetic_variation: optional_field(record, navaid_col::MAGNETIC_VARIATION),
        associated_airport: optional_field(record, navaid_col::ASSOCIATED_AIRPORT),
        usage: field(record, navaid_col::USAGE).to_string(),
    })
}

/// Large and medium airports, keyed by ICAO code.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    records: Vec<Airport>,
    by_icao: HashMap<String, usize>,
}

impl AirportCatalog {
    /// Ingest the airport dataset from CSV.
    ///
    /// Retains only rows with a non-empty ICAO ident and a class of
    /// large or medium; heliports, seaplane bases and small strips are
    /// skipped along with rows whose coordinates fail to parse.
    pub fn from_reader<R: Read>(reader: R) -> Result<(Self, IngestReport), CatalogError> {
        let mut catalog = Self::default();
        let mut report = IngestReport::default();

        for record in csv_reader(reader).records() {
            let record = record?;
            report.rows += 1;
            match parse_airport(&record) {
                Some(airport) => {
                    catalog.insert(airport);
                    report.loaded += 1;
                }
                None => {
                    report.skipped += 1;
                    tracing::debug!(row = report.rows, "skipping unusable airport row");
                }
            }
        }

        Ok((catalog, report))
    }

    /// Build a catalog from already-typed records, in the given order.
    pub fn from_records(records: impl IntoIterator<Item = Airport>) -> Self {
        let mut catalog = Self::default();
        for airport in records {
            catalog.insert(airport);
        }
        catalog
    }

    fn insert(&mut self, airport: Airport) {
        match self.by_icao.entry(airport.icao.clone()) {
            Entry::Occupied(slot) => self.records[*slot.get()] = airport,
            Entry::Vacant(slot) => {
                slot.insert(self.records.len());
                self.records.push(airport);
            }
        }
    }

    /// Look up an airport by ICAO code, case-insensitively.
    pub fn get(&self, icao: &str) -> Option<&Airport> {
        let key = icao.trim().to_ascii_uppercase();
        self.by_icao.get(&key).map(|&idx| &self.records[idx])
    }

    /// Case-insensitive substring search over ICAO, IATA, name and city.
    ///
    /// Returns the first matches in load order, capped at five. This is
    /// the dropdown-style search; it is intentionally first-N rather than
    /// relevance-ranked.
    pub fn search(&self, query: &str) -> Vec<&Airport> {
        let needle = query.trim().to_ascii_uppercase();
        self.records
            .iter()
            .filter(|airport| {
                airport.icao.contains(&needle)
                    || airport
                        .iata
                        .as_deref()
                        .is_some_and(|iata| iata.to_ascii_uppercase().contains(&needle))
                    || airport.name.to_ascii_uppercase().contains(&needle)
                    || airport
                        .city
                        .as_deref()
                        .is_some_and(|city| city.to_ascii_uppercase().contains(&needle))
            })
            .take(MAX_SEARCH_RESULTS)
            .collect()
    }

    /// Fallback suggestion set when there is no query text: the first
    /// five large airports in load order.
    pub fn suggestions(&self) -> Vec<&Airport> {
        self.records
            .iter()
            .filter(|airport| airport.class == AirportClass::Large)
            .take(MAX_SEARCH_RESULTS)
            .collect()
    }

    /// Iterate all airports in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_airport(record: &StringRecord) -> Option<Airport> {
    let class = AirportClass::from_type_field(field(record, airport_col::TYPE))?;
    let icao = field(record, airport_col::IDENT).to_ascii_uppercase();
    if icao.is_empty() {
        return None;
    }

    let lat_deg: f64 = field(record, airport_col::LATITUDE).parse().ok()?;
    let lon_deg: f64 = field(record, airport_col::LONGITUDE).parse().ok()?;
    let position = Coordinate::new(lat_deg, lon_deg).ok()?;

    Some(Airport {
        icao,
        iata: optional_field(record, airport_col::IATA),
        name: field(record, airport_col::NAME).to_string(),
        city: optional_field(record, airport_col::MUNICIPALITY),
        country: field(record, airport_col::COUNTRY).to_string(),
        position,
        elevation_ft: field(record, airport_col::ELEVATION_FT).parse().ok(),
        class,
    })
}
