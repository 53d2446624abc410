//! Repositories for the data access layer
//!
//! Read-only lookups: active API keys for the auth gate, and the airport
//! search with every relationship of the matched airports resolved.

use crate::core::error::Result;
use crate::db::manager::{fold_case, DatabaseManager};
use crate::db::models::{
    Airport, AirportRecord, AirportType, ApiKey, Country, Frequency, Navaid, NavaidRecord,
    NavaidType, Region, Runway, RunwayEnd,
};
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Repository for API key lookups
pub struct ApiKeyRepository {
    db: Arc<DatabaseManager>,
}

impl ApiKeyRepository {
    /// Create a new ApiKeyRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find the key row matching `key` exactly, if it is active
    pub async fn find_active(&self, key: &str) -> Result<Option<ApiKey>> {
        let key = key.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, key, is_active FROM api_keys \
                     WHERE key = ?1 AND is_active = 1 LIMIT 1",
                    [&key],
                    |row| {
                        Ok(ApiKey {
                            id: row.get(0)?,
                            key: row.get(1)?,
                            is_active: row.get(2)?,
                        })
                    },
                )
                .optional()
                .map_err(Into::into)
            })
            .await
    }
}

/// Repository for airport lookups
pub struct AirportRepository {
    db: Arc<DatabaseManager>,
}

impl AirportRepository {
    /// Create a new AirportRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Airports whose name or ident contains `query`, case-insensitively,
    /// with type, country, region, runways, frequencies and navaids attached
    pub async fn search(&self, query: &str) -> Result<Vec<AirportRecord>> {
        let query = query.to_string();
        self.db
            .execute(move |conn| search_airports(conn, &query))
            .await
    }
}

/// Matches airports on `casefold(name)` or `casefold(ident)` against `:pattern`
const AIRPORT_MATCH: &str =
    "casefold(a.name) LIKE :pattern ESCAPE '\\' OR casefold(a.ident) LIKE :pattern ESCAPE '\\'";

const AIRPORT_COLUMNS: &str = "a.id, a.ident, a.type, a.name, a.latitude_deg, a.longitude_deg, \
     a.elevation_ft, a.continent, a.iso_country, a.iso_region, a.municipality, \
     a.scheduled_service, a.gps_code, a.iata_code, a.local_code, a.home_link, \
     a.wikipedia_link, a.keywords";

/// SQLite's default `SQLITE_MAX_LIKE_PATTERN_LENGTH`, in bytes
///
/// Longer patterns make the statement fail. No stored name or ident comes
/// close to this length, so such a query simply has no matches.
pub const MAX_LIKE_PATTERN_LEN: usize = 50_000;

/// Build the contains-pattern for `query`; `%`, `_` and `\` match literally
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in fold_case(query).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Run the search on a single connection
///
/// One statement selects the matching airports; each related table is then
/// fetched once, restricted to the matched set through a sub-select, and
/// attached by key. The number of statements does not depend on how many
/// airports match. Everything runs in one read transaction.
pub fn search_airports(conn: &Connection, query: &str) -> Result<Vec<AirportRecord>> {
    let pattern = like_pattern(query);
    if pattern.len() > MAX_LIKE_PATTERN_LEN {
        tracing::debug!(pattern_len = pattern.len(), "Search pattern too long, no match possible");
        return Ok(Vec::new());
    }

    let tx = conn.unchecked_transaction()?;

    let mut airports = query_airports(&tx, &pattern)?;

    // Each airport appears once, however many related rows it has.
    let mut seen = HashSet::new();
    airports.retain(|airport| seen.insert(airport.ident.clone()));

    if airports.is_empty() {
        tx.commit()?;
        return Ok(Vec::new());
    }

    let airport_types = query_airport_types(&tx, &pattern)?;
    let countries = query_countries(&tx, &pattern)?;
    let regions = query_regions(&tx, &pattern)?;
    let mut runways = query_runways(&tx, &pattern)?;
    let mut frequencies = query_frequencies(&tx, &pattern)?;
    let mut navaids = query_navaids(&tx, &pattern)?;
    let navaid_types = query_navaid_types(&tx, &pattern)?;

    tx.commit()?;

    let records = airports
        .into_iter()
        .map(|airport| {
            let mut record = AirportRecord::bare(airport);
            let airport = &record.airport;

            record.airport_type = lookup(&airport_types, airport.airport_type.as_deref());
            record.country = lookup(&countries, airport.iso_country.as_deref());
            record.region = lookup(&regions, airport.iso_region.as_deref());
            record.runways = runways.remove(&airport.ident).unwrap_or_default();
            record.frequencies = frequencies.remove(&airport.ident).unwrap_or_default();
            record.navaids = navaids
                .remove(&airport.ident)
                .unwrap_or_default()
                .into_iter()
                .map(|navaid| NavaidRecord {
                    navaid_type: lookup(&navaid_types, navaid.navaid_type.as_deref()),
                    navaid,
                })
                .collect();

            record
        })
        .collect();

    Ok(records)
}

fn lookup<T: Clone>(arena: &HashMap<String, T>, code: Option<&str>) -> Option<T> {
    code.and_then(|code| arena.get(code)).cloned()
}

/// Group rows by the airport ident they point at
fn group_by_ident<T>(rows: Vec<(String, T)>) -> HashMap<String, Vec<T>> {
    let mut grouped: HashMap<String, Vec<T>> = HashMap::new();
    for (ident, row) in rows {
        grouped.entry(ident).or_default().push(row);
    }
    grouped
}

fn query_airports(conn: &Connection, pattern: &str) -> Result<Vec<Airport>> {
    let sql = format!(
        "SELECT {} FROM airports a WHERE {} ORDER BY a.ident",
        AIRPORT_COLUMNS, AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let airports = stmt
        .query_map(named_params! { ":pattern": pattern }, airport_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(airports)
}

fn query_airport_types(conn: &Connection, pattern: &str) -> Result<HashMap<String, AirportType>> {
    let sql = format!(
        "SELECT t.code, t.description FROM airport_types t \
         WHERE t.code IN (SELECT a.type FROM airports a WHERE {})",
        AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(named_params! { ":pattern": pattern }, |row| {
            Ok(AirportType {
                code: row.get("code")?,
                description: row.get("description")?,
            })
        })?
        .map(|row| row.map(|t| (t.code.clone(), t)))
        .collect::<std::result::Result<HashMap<_, _>, _>>()?;
    Ok(rows)
}

fn query_countries(conn: &Connection, pattern: &str) -> Result<HashMap<String, Country>> {
    let sql = format!(
        "SELECT c.id, c.code, c.name, c.continent, c.wikipedia_link, c.keywords \
         FROM countries c \
         WHERE c.code IN (SELECT a.iso_country FROM airports a WHERE {})",
        AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(named_params! { ":pattern": pattern }, |row| {
            Ok(Country {
                id: row.get("id")?,
                code: row.get("code")?,
                name: row.get("name")?,
                continent: row.get("continent")?,
                wikipedia_link: row.get("wikipedia_link")?,
                keywords: row.get("keywords")?,
            })
        })?
        .map(|row| row.map(|c| (c.code.clone(), c)))
        .collect::<std::result::Result<HashMap<_, _>, _>>()?;
    Ok(rows)
}

fn query_regions(conn: &Connection, pattern: &str) -> Result<HashMap<String, Region>> {
    let sql = format!(
        "SELECT r.id, r.code, r.local_code, r.name, r.continent, r.iso_country, \
         r.wikipedia_link, r.keywords \
         FROM regions r \
         WHERE r.code IN (SELECT a.iso_region FROM airports a WHERE {})",
        AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(named_params! { ":pattern": pattern }, |row| {
            Ok(Region {
                id: row.get("id")?,
                code: row.get("code")?,
                local_code: row.get("local_code")?,
                name: row.get("name")?,
                continent: row.get("continent")?,
                iso_country: row.get("iso_country")?,
                wikipedia_link: row.get("wikipedia_link")?,
                keywords: row.get("keywords")?,
            })
        })?
        .map(|row| row.map(|r| (r.code.clone(), r)))
        .collect::<std::result::Result<HashMap<_, _>, _>>()?;
    Ok(rows)
}

fn query_runways(conn: &Connection, pattern: &str) -> Result<HashMap<String, Vec<Runway>>> {
    let sql = format!(
        "SELECT r.* FROM runways r \
         WHERE r.airport_ident IN (SELECT a.ident FROM airports a WHERE {}) \
         ORDER BY r.id",
        AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(named_params! { ":pattern": pattern }, |row| {
            let runway = runway_from_row(row)?;
            Ok((row.get::<_, String>("airport_ident")?, runway))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(group_by_ident(rows))
}

fn query_frequencies(conn: &Connection, pattern: &str) -> Result<HashMap<String, Vec<Frequency>>> {
    let sql = format!(
        "SELECT f.id, f.airport_ref, f.airport_ident, f.type, f.description, f.frequency_mhz \
         FROM frequencies f \
         WHERE f.airport_ident IN (SELECT a.ident FROM airports a WHERE {}) \
         ORDER BY f.id",
        AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(named_params! { ":pattern": pattern }, |row| {
            let frequency = Frequency {
                id: row.get("id")?,
                airport_ref: row.get("airport_ref")?,
                airport_ident: row.get("airport_ident")?,
                frequency_type: row.get("type")?,
                description: row.get("description")?,
                frequency_mhz: row.get("frequency_mhz")?,
            };
            Ok((row.get::<_, String>("airport_ident")?, frequency))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(group_by_ident(rows))
}

/// Navaids whose `associated_airport` equals a matched ident; blank values never associate
fn query_navaids(conn: &Connection, pattern: &str) -> Result<HashMap<String, Vec<Navaid>>> {
    let sql = format!(
        "SELECT n.* FROM navaids n \
         WHERE TRIM(n.associated_airport) <> '' \
         AND n.associated_airport IN (SELECT a.ident FROM airports a WHERE {}) \
         ORDER BY n.id",
        AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(named_params! { ":pattern": pattern }, |row| {
            let navaid = navaid_from_row(row)?;
            Ok((row.get::<_, String>("associated_airport")?, navaid))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(group_by_ident(rows))
}

fn query_navaid_types(conn: &Connection, pattern: &str) -> Result<HashMap<String, NavaidType>> {
    let sql = format!(
        "SELECT t.code, t.description FROM navid_types t \
         WHERE t.code IN (SELECT n.type FROM navaids n \
             WHERE n.associated_airport IN (SELECT a.ident FROM airports a WHERE {}))",
        AIRPORT_MATCH
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(named_params! { ":pattern": pattern }, |row| {
            Ok(NavaidType {
                code: row.get("code")?,
                description: row.get("description")?,
            })
        })?
        .map(|row| row.map(|t| (t.code.clone(), t)))
        .collect::<std::result::Result<HashMap<_, _>, _>>()?;
    Ok(rows)
}

fn airport_from_row(row: &Row<'_>) -> rusqlite::Result<Airport> {
    Ok(Airport {
        id: row.get("id")?,
        ident: row.get("ident")?,
        airport_type: row.get("type")?,
        name: row.get("name")?,
        latitude_deg: row.get("latitude_deg")?,
        longitude_deg: row.get("longitude_deg")?,
        elevation_ft: row.get("elevation_ft")?,
        continent: row.get("continent")?,
        iso_country: row.get("iso_country")?,
        iso_region: row.get("iso_region")?,
        municipality: row.get("municipality")?,
        scheduled_service: row.get("scheduled_service")?,
        gps_code: row.get("gps_code")?,
        iata_code: row.get("iata_code")?,
        local_code: row.get("local_code")?,
        home_link: row.get("home_link")?,
        wikipedia_link: row.get("wikipedia_link")?,
        keywords: row.get("keywords")?,
    })
}

fn runway_from_row(row: &Row<'_>) -> rusqlite::Result<Runway> {
    let end = |prefix: &str| -> rusqlite::Result<RunwayEnd> {
        Ok(RunwayEnd {
            ident: row.get(format!("{prefix}_ident").as_str())?,
            latitude_deg: row.get(format!("{prefix}_latitude_deg").as_str())?,
            longitude_deg: row.get(format!("{prefix}_longitude_deg").as_str())?,
            elevation_ft: row.get(format!("{prefix}_elevation_ft").as_str())?,
            heading_degt: row.get(format!("{prefix}_heading_degt").as_str())?,
            displaced_threshold_ft: row.get(format!("{prefix}_displaced_threshold_ft").as_str())?,
        })
    };

    Ok(Runway {
        id: row.get("id")?,
        airport_ref: row.get("airport_ref")?,
        airport_ident: row.get("airport_ident")?,
        length_ft: row.get("length_ft")?,
        width_ft: row.get("width_ft")?,
        surface: row.get("surface")?,
        lighted: row.get("lighted")?,
        closed: row.get("closed")?,
        low_end: end("le")?,
        high_end: end("he")?,
    })
}

fn navaid_from_row(row: &Row<'_>) -> rusqlite::Result<Navaid> {
    Ok(Navaid {
        id: row.get("id")?,
        filename: row.get("filename")?,
        ident: row.get("ident")?,
        name: row.get("name")?,
        navaid_type: row.get("type")?,
        frequency_khz: row.get("frequency_khz")?,
        latitude_deg: row.get("latitude_deg")?,
        longitude_deg: row.get("longitude_deg")?,
        elevation_ft: row.get("elevation_ft")?,
        iso_country: row.get("iso_country")?,
        dme_frequency_khz: row.get("dme_frequency_khz")?,
        dme_channel: row.get("dme_channel")?,
        dme_latitude_deg: row.get("dme_latitude_deg")?,
        dme_longitude_deg: row.get("dme_longitude_deg")?,
        dme_elevation_ft: row.get("dme_elevation_ft")?,
        slaved_variation_deg: row.get("slaved_variation_deg")?,
        magnetic_variation_deg: row.get("magnetic_variation_deg")?,
        usage_type: row.get("usagetype")?,
        power: row.get("power")?,
        associated_airport: row.get("associated_airport")?,
    })
}
