use crate::db::models::{
    AirportRecord, AirportType, Country, Frequency, NavaidRecord, NavaidType, Region, Runway,
};
use serde::Serialize;

// Airport search response models

/// Airport type as returned nested in an airport
#[derive(Debug, Serialize)]
pub struct AirportTypeView {
    pub code: String,
    pub description: Option<String>,
}

impl From<AirportType> for AirportTypeView {
    fn from(t: AirportType) -> Self {
        Self {
            code: t.code,
            description: t.description,
        }
    }
}

/// Country as returned nested in an airport
#[derive(Debug, Serialize)]
pub struct CountryView {
    pub id: Option<i64>,
    pub code: String,
    pub name: Option<String>,
    pub continent: Option<String>,
    pub wikipedia_link: Option<String>,
    pub keywords: Option<String>,
}

impl From<Country> for CountryView {
    fn from(c: Country) -> Self {
        Self {
            id: c.id,
            code: c.code,
            name: c.name,
            continent: c.continent,
            wikipedia_link: c.wikipedia_link,
            keywords: c.keywords,
        }
    }
}

/// Region as returned nested in an airport
#[derive(Debug, Serialize)]
pub struct RegionView {
    pub id: Option<i64>,
    pub code: String,
    pub local_code: Option<String>,
    pub name: Option<String>,
    pub continent: Option<String>,
    pub iso_country: Option<String>,
    pub wikipedia_link: Option<String>,
    pub keywords: Option<String>,
}

impl From<Region> for RegionView {
    fn from(r: Region) -> Self {
        Self {
            id: r.id,
            code: r.code,
            local_code: r.local_code,
            name: r.name,
            continent: r.continent,
            iso_country: r.iso_country,
            wikipedia_link: r.wikipedia_link,
            keywords: r.keywords,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FrequencyView {
    pub id: Option<i64>,
    pub airport_ref: Option<i64>,
    pub airport_ident: Option<String>,
    #[serde(rename = "type")]
    pub frequency_type: Option<String>,
    pub description: Option<String>,
    pub frequency_mhz: Option<f64>,
}

impl From<Frequency> for FrequencyView {
    fn from(f: Frequency) -> Self {
        Self {
            id: Some(f.id),
            airport_ref: f.airport_ref,
            airport_ident: f.airport_ident,
            frequency_type: f.frequency_type,
            description: f.description,
            frequency_mhz: f.frequency_mhz,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavaidTypeView {
    pub code: String,
    pub description: Option<String>,
}

impl From<NavaidType> for NavaidTypeView {
    fn from(t: NavaidType) -> Self {
        Self {
            code: t.code,
            description: t.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavaidView {
    pub id: Option<i64>,
    pub filename: Option<String>,
    pub ident: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
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
    pub usagetype: Option<String>,
    pub power: Option<String>,
    pub associated_airport: Option<String>,
    /// Resolved type row, `null` when the code has no row
    #[serde(rename = "navaid_type")]
    pub type_detail: Option<NavaidTypeView>,
}

impl From<NavaidRecord> for NavaidView {
    fn from(record: NavaidRecord) -> Self {
        let n = record.navaid;
        Self {
            id: Some(n.id),
            filename: n.filename,
            ident: n.ident,
            name: n.name,
            navaid_type: n.navaid_type,
            frequency_khz: n.frequency_khz,
            latitude_deg: n.latitude_deg,
            longitude_deg: n.longitude_deg,
            elevation_ft: n.elevation_ft,
            iso_country: n.iso_country,
            dme_frequency_khz: n.dme_frequency_khz,
            dme_channel: n.dme_channel,
            dme_latitude_deg: n.dme_latitude_deg,
            dme_longitude_deg: n.dme_longitude_deg,
            dme_elevation_ft: n.dme_elevation_ft,
            slaved_variation_deg: n.slaved_variation_deg,
            magnetic_variation_deg: n.magnetic_variation_deg,
            usagetype: n.usage_type,
            power: n.power,
            associated_airport: n.associated_airport,
            type_detail: record.navaid_type.map(Into::into),
        }
    }
}

/// Runway with both ends flattened into `le_*` / `he_*` fields
#[derive(Debug, Serialize)]
pub struct RunwayView {
    pub id: Option<i64>,
    pub airport_ref: Option<i64>,
    pub airport_ident: Option<String>,
    pub length_ft: Option<i64>,
    pub width_ft: Option<i64>,
    pub surface: Option<String>,
    pub lighted: Option<i64>,
    pub closed: Option<i64>,

    pub le_ident: Option<String>,
    pub le_latitude_deg: Option<f64>,
    pub le_longitude_deg: Option<f64>,
    pub le_elevation_ft: Option<i64>,
    pub le_heading_degt: Option<i64>,
    pub le_displaced_threshold_ft: Option<i64>,

    pub he_ident: Option<String>,
    pub he_latitude_deg: Option<f64>,
    pub he_longitude_deg: Option<f64>,
    pub he_elevation_ft: Option<i64>,
    pub he_heading_degt: Option<i64>,
    pub he_displaced_threshold_ft: Option<i64>,
}

impl From<Runway> for RunwayView {
    fn from(r: Runway) -> Self {
        let (le, he) = (r.low_end, r.high_end);
        Self {
            id: Some(r.id),
            airport_ref: r.airport_ref,
            airport_ident: r.airport_ident,
            length_ft: r.length_ft,
            width_ft: r.width_ft,
            surface: r.surface,
            lighted: r.lighted,
            closed: r.closed,
            le_ident: le.ident,
            le_latitude_deg: le.latitude_deg,
            le_longitude_deg: le.longitude_deg,
            le_elevation_ft: le.elevation_ft,
            le_heading_degt: le.heading_degt,
            le_displaced_threshold_ft: le.displaced_threshold_ft,
            he_ident: he.ident,
            he_latitude_deg: he.latitude_deg,
            he_longitude_deg: he.longitude_deg,
            he_elevation_ft: he.elevation_ft,
            he_heading_degt: he.heading_degt,
            he_displaced_threshold_ft: he.displaced_threshold_ft,
        }
    }
}

/// Airport as returned by `GET /airportByName/{name}`
///
/// Single related objects serialize as `null` when absent; the three
/// collections are always arrays.
#[derive(Debug, Serialize)]
pub struct AirportView {
    pub id: Option<i64>,
    pub ident: String,
    #[serde(rename = "type")]
    pub airport_type_code: Option<String>,
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

    pub airport_type: Option<AirportTypeView>,
    pub country: Option<CountryView>,
    pub region: Option<RegionView>,

    pub runways: Vec<RunwayView>,
    pub frequencies: Vec<FrequencyView>,
    pub navaids: Vec<NavaidView>,
}

impl From<AirportRecord> for AirportView {
    fn from(record: AirportRecord) -> Self {
        let a = record.airport;
        Self {
            id: a.id,
            ident: a.ident,
            airport_type_code: a.airport_type,
            name: a.name,
            latitude_deg: a.latitude_deg,
            longitude_deg: a.longitude_deg,
            elevation_ft: a.elevation_ft,
            continent: a.continent,
            iso_country: a.iso_country,
            iso_region: a.iso_region,
            municipality: a.municipality,
            scheduled_service: a.scheduled_service,
            gps_code: a.gps_code,
            iata_code: a.iata_code,
            local_code: a.local_code,
            home_link: a.home_link,
            wikipedia_link: a.wikipedia_link,
            keywords: a.keywords,
            airport_type: record.airport_type.map(Into::into),
            country: record.country.map(Into::into),
            region: record.region.map(Into::into),
            runways: record.runways.into_iter().map(Into::into).collect(),
            frequencies: record.frequencies.into_iter().map(Into::into).collect(),
            navaids: record.navaids.into_iter().map(Into::into).collect(),
        }
    }
}
