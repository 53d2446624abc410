//! Database models
//!
//! Data structures representing the reference tables, the airports fact
//! table and the API key table. Nullable columns are `Option`s.

use serde::{Deserialize, Serialize};

/// Airport classification (e.g. `large_airport`, `heliport`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportType {
    pub code: String,
    pub description: Option<String>,
}

/// Country referenced by `airports.iso_country`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: Option<i64>,
    pub code: String,
    pub name: Option<String>,
    pub continent: Option<String>,
    pub wikipedia_link: Option<String>,
    pub keywords: Option<String>,
}

/// ISO 3166-2 region referenced by `airports.iso_region`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: Option<i64>,
    pub code: String,
    pub local_code: Option<String>,
    pub name: Option<String>,
    pub continent: Option<String>,
    pub iso_country: Option<String>,
    pub wikipedia_link: Option<String>,
    pub keywords: Option<String>,
}

/// Navaid classification (e.g. VOR, NDB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavaidType {
    pub code: String,
    pub description: Option<String>,
}

/// Airport row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: Option<i64>,
    pub ident: String,
    pub airport_type: Option<String>,
    pub name: Option<String>,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub elevation_ft: Option<i64>,
    pub continent: Option<String>,
    pub iso_country: Option<String>,
    pub iso_region: Option<String>,
    pub municipality: Option<String>,
    pub scheduled_service: Option<String>,
    pub gps_code: Option<String>,
    pub iata_code: Option<String>,
    pub local_code: Option<String>,
    pub home_link: Option<String>,
    pub wikipedia_link: Option<String>,
    pub keywords: Option<String>,
}

/// Radio frequency published for an airport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub id: i64,
    pub airport_ref: Option<i64>,
    pub airport_ident: Option<String>,
    pub frequency_type: Option<String>,
    pub description: Option<String>,
    pub frequency_mhz: Option<f64>,
}

/// Navigation aid, loosely tied to an airport through `associated_airport`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navaid {
    pub id: i64,
    pub filename: Option<String>,
    pub ident: Option<String>,
    pub name: Option<String>,
    pub navaid_type: Option<String>,
    pub frequency_khz: Option<i64>,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub elevation_ft: Option<i64>,
    pub iso_country: Option<String>,
    pub dme_frequency_khz: Option<i64>,
    pub dme_channel: Option<String>,
    pub dme_latitude_deg: Option<f64>,
    pub dme_longitude_deg: Option<f64>,
    pub dme_elevation_ft: Option<i64>,
    pub slaved_variation_deg: Option<String>,
    pub magnetic_variation_deg: Option<f64>,
    pub usage_type: Option<String>,
    pub power: Option<String>,
    pub associated_airport: Option<String>,
}

/// One physical direction of a runway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunwayEnd {
    pub ident: Option<String>,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub elevation_ft: Option<i64>,
    pub heading_degt: Option<i64>,
    pub displaced_threshold_ft: Option<i64>,
}

/// Runway with its low-end and high-end records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    pub id: i64,
    pub airport_ref: Option<i64>,
    pub airport_ident: Option<String>,
    pub length_ft: Option<i64>,
    pub width_ft: Option<i64>,
    pub surface: Option<String>,
    pub lighted: Option<i64>, // 0 or 1
    pub closed: Option<i64>,  // 0 or 1
    pub low_end: RunwayEnd,
    pub high_end: RunwayEnd,
}

/// API key record; only active keys authorize requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub key: String,
    pub is_active: bool,
}

/// An airport together with every relationship resolved
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    pub airport: Airport,
    pub airport_type: Option<AirportType>,
    pub country: Option<Country>,
    pub region: Option<Region>,
    pub runways: Vec<Runway>,
    pub frequencies: Vec<Frequency>,
    pub navaids: Vec<NavaidRecord>,
}

/// A navaid with its type row, when the type code resolves
#[derive(Debug, Clone, PartialEq)]
pub struct NavaidRecord {
    pub navaid: Navaid,
    pub navaid_type: Option<NavaidType>,
}

impl AirportRecord {
    /// Wrap an airport row with no relationships attached yet
    pub fn bare(airport: Airport) -> Self {
        Self {
            airport,
            airport_type: None,
            country: None,
            region: None,
            runways: Vec::new(),
            frequencies: Vec::new(),
            navaids: Vec::new(),
        }
    }
}
