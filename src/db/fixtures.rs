//! Test fixtures: the reference schema and a small seeded dataset.
//!
//! The production schema is owned by the ingestion process; this copy only
//! mirrors the tables and columns the API reads.

use crate::db::manager::DatabaseManager;
use rusqlite::{params, Connection};
use std::sync::Arc;

pub(crate) const ACTIVE_KEY: &str = "active-key";
pub(crate) const INACTIVE_KEY: &str = "retired-key";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS airport_types (
    code TEXT PRIMARY KEY,
    description TEXT
);

CREATE TABLE IF NOT EXISTS api_keys (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT UNIQUE NOT NULL,
    is_active BOOLEAN DEFAULT 1
);

CREATE TABLE IF NOT EXISTS countries (
    id INTEGER,
    code TEXT PRIMARY KEY,
    name TEXT,
    continent TEXT,
    wikipedia_link TEXT,
    keywords TEXT
);

CREATE TABLE IF NOT EXISTS navid_types (
    code TEXT PRIMARY KEY,
    description TEXT
);

CREATE TABLE IF NOT EXISTS regions (
    id INTEGER,
    code TEXT PRIMARY KEY,
    local_code TEXT,
    name TEXT,
    continent TEXT,
    iso_country TEXT,
    wikipedia_link TEXT,
    keywords TEXT
);

CREATE TABLE IF NOT EXISTS airports (
    id INTEGER,
    ident TEXT PRIMARY KEY,
    type TEXT,
    name TEXT,
    latitude_deg REAL,
    longitude_deg REAL,
    elevation_ft INTEGER,
    continent TEXT,
    iso_country TEXT,
    iso_region TEXT,
    municipality TEXT,
    scheduled_service TEXT,
    gps_code TEXT,
    iata_code TEXT,
    local_code TEXT,
    home_link TEXT,
    wikipedia_link TEXT,
    keywords TEXT
);

CREATE TABLE IF NOT EXISTS frequencies (
    id INTEGER PRIMARY KEY,
    airport_ref INTEGER,
    airport_ident TEXT,
    type TEXT,
    description TEXT,
    frequency_mhz REAL
);

CREATE TABLE IF NOT EXISTS navaids (
    id INTEGER PRIMARY KEY,
    filename TEXT,
    ident TEXT,
    name TEXT,
    type TEXT,
    frequency_khz INTEGER,
    latitude_deg REAL,
    longitude_deg REAL,
    elevation_ft INTEGER,
    iso_country TEXT,
    dme_frequency_khz INTEGER,
    dme_channel TEXT,
    dme_latitude_deg REAL,
    dme_longitude_deg REAL,
    dme_elevation_ft INTEGER,
    slaved_variation_deg TEXT,
    magnetic_variation_deg REAL,
    usagetype TEXT,
    power TEXT,
    associated_airport TEXT
);

CREATE TABLE IF NOT EXISTS runways (
    id INTEGER PRIMARY KEY,
    airport_ref INTEGER,
    airport_ident TEXT,
    length_ft INTEGER,
    width_ft INTEGER,
    surface TEXT,
    lighted INTEGER,
    closed INTEGER,
    le_ident TEXT,
    le_latitude_deg REAL,
    le_longitude_deg REAL,
    le_elevation_ft INTEGER,
    le_heading_degt INTEGER,
    le_displaced_threshold_ft INTEGER,
    he_ident TEXT,
    he_latitude_deg REAL,
    he_longitude_deg REAL,
    he_elevation_ft INTEGER,
    he_heading_degt INTEGER,
    he_displaced_threshold_ft INTEGER
);
"#;

pub(crate) fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}

pub(crate) fn insert_api_key(conn: &Connection, key: &str, active: bool) {
    conn.execute(
        "INSERT INTO api_keys (key, is_active) VALUES (?1, ?2)",
        params![key, active],
    )
    .unwrap();
}

pub(crate) fn insert_airport_type(conn: &Connection, code: &str, description: &str) {
    conn.execute(
        "INSERT INTO airport_types (code, description) VALUES (?1, ?2)",
        params![code, description],
    )
    .unwrap();
}

pub(crate) fn insert_navaid_type(conn: &Connection, code: &str, description: &str) {
    conn.execute(
        "INSERT INTO navid_types (code, description) VALUES (?1, ?2)",
        params![code, description],
    )
    .unwrap();
}

pub(crate) fn insert_country(conn: &Connection, id: i64, code: &str, name: &str) {
    conn.execute(
        "INSERT INTO countries (id, code, name, continent) VALUES (?1, ?2, ?3, 'NA')",
        params![id, code, name],
    )
    .unwrap();
}

pub(crate) fn insert_region(conn: &Connection, id: i64, code: &str, name: &str, iso_country: &str) {
    conn.execute(
        "INSERT INTO regions (id, code, local_code, name, continent, iso_country) \
         VALUES (?1, ?2, ?3, ?4, 'NA', ?5)",
        params![id, code, code.rsplit('-').next(), name, iso_country],
    )
    .unwrap();
}

pub(crate) struct AirportSeed<'a> {
    pub id: i64,
    pub ident: &'a str,
    pub name: &'a str,
    pub kind: Option<&'a str>,
    pub iso_country: Option<&'a str>,
    pub iso_region: Option<&'a str>,
}

pub(crate) fn insert_airport(conn: &Connection, seed: AirportSeed<'_>) {
    conn.execute(
        "INSERT INTO airports (id, ident, type, name, latitude_deg, longitude_deg, elevation_ft, \
         iso_country, iso_region, scheduled_service) \
         VALUES (?1, ?2, ?3, ?4, 40.0, -73.0, 13, ?5, ?6, 'yes')",
        params![
            seed.id,
            seed.ident,
            seed.kind,
            seed.name,
            seed.iso_country,
            seed.iso_region
        ],
    )
    .unwrap();
}

pub(crate) fn insert_runway(conn: &Connection, id: i64, airport_ident: &str, le: &str, he: &str) {
    conn.execute(
        "INSERT INTO runways (id, airport_ident, length_ft, width_ft, surface, lighted, closed, \
         le_ident, le_heading_degt, he_ident, he_heading_degt) \
         VALUES (?1, ?2, 10000, 150, 'ASP', 1, 0, ?3, 40, ?4, 220)",
        params![id, airport_ident, le, he],
    )
    .unwrap();
}

pub(crate) fn insert_frequency(conn: &Connection, id: i64, airport_ident: &str, kind: &str, mhz: f64) {
    conn.execute(
        "INSERT INTO frequencies (id, airport_ident, type, description, frequency_mhz) \
         VALUES (?1, ?2, ?3, ?3, ?4)",
        params![id, airport_ident, kind, mhz],
    )
    .unwrap();
}

pub(crate) fn insert_navaid(
    conn: &Connection,
    id: i64,
    ident: &str,
    kind: &str,
    associated_airport: Option<&str>,
) {
    conn.execute(
        "INSERT INTO navaids (id, ident, name, type, frequency_khz, associated_airport) \
         VALUES (?1, ?2, ?2, ?3, 115900, ?4)",
        params![id, ident, kind, associated_airport],
    )
    .unwrap();
}

/// Seed the shared scenario used across repository, service and API tests
///
/// - KJFK: one runway, one frequency, no navaid; type, country and region resolve
/// - KLGA: two runways, three frequencies, two navaids
/// - EGLL: no type row, no region row, country GB resolves
/// - LSZH: non-ASCII name
/// - XPCT: a literal `%` in its name
/// - navaids with a blank and a mismatched `associated_airport`
pub(crate) fn seed(conn: &Connection) {
    insert_api_key(conn, ACTIVE_KEY, true);
    insert_api_key(conn, INACTIVE_KEY, false);

    insert_airport_type(conn, "large_airport", "Large airport");
    insert_airport_type(conn, "small_airport", "Small airport");
    insert_navaid_type(conn, "VOR-DME", "VHF omnidirectional range with DME");

    insert_country(conn, 302755, "US", "United States");
    insert_country(conn, 302634, "GB", "United Kingdom");
    insert_country(conn, 302678, "CH", "Switzerland");
    insert_region(conn, 306109, "US-NY", "New York", "US");
    insert_region(conn, 303294, "CH-ZH", "Zürich", "CH");

    insert_airport(
        conn,
        AirportSeed {
            id: 3622,
            ident: "KJFK",
            name: "John F Kennedy Intl",
            kind: Some("large_airport"),
            iso_country: Some("US"),
            iso_region: Some("US-NY"),
        },
    );
    insert_airport(
        conn,
        AirportSeed {
            id: 3697,
            ident: "KLGA",
            name: "La Guardia Airport",
            kind: Some("large_airport"),
            iso_country: Some("US"),
            iso_region: Some("US-NY"),
        },
    );
    insert_airport(
        conn,
        AirportSeed {
            id: 2434,
            ident: "EGLL",
            name: "London Heathrow Airport",
            kind: Some("mega_airport"),
            iso_country: Some("GB"),
            iso_region: Some("GB-ENG"),
        },
    );
    insert_airport(
        conn,
        AirportSeed {
            id: 2740,
            ident: "LSZH",
            name: "ZÜRICH Airport",
            kind: Some("large_airport"),
            iso_country: Some("CH"),
            iso_region: Some("CH-ZH"),
        },
    );
    insert_airport(
        conn,
        AirportSeed {
            id: 9001,
            ident: "XPCT",
            name: "100% Grass Strip",
            kind: Some("small_airport"),
            iso_country: None,
            iso_region: None,
        },
    );

    insert_runway(conn, 1, "KJFK", "04L", "22R");
    insert_frequency(conn, 1, "KJFK", "TWR", 119.1);

    insert_runway(conn, 2, "KLGA", "04", "22");
    insert_runway(conn, 3, "KLGA", "13", "31");
    insert_frequency(conn, 2, "KLGA", "TWR", 118.7);
    insert_frequency(conn, 3, "KLGA", "GND", 121.7);
    insert_frequency(conn, 4, "KLGA", "ATIS", 127.05);
    insert_navaid(conn, 1, "LGA", "VOR-DME", Some("KLGA"));
    insert_navaid(conn, 2, "LG", "NDB", Some("KLGA"));

    insert_navaid(conn, 3, "JFK", "VOR-DME", Some(""));
    insert_navaid(conn, 4, "CRI", "VOR-DME", Some("KJF"));
    insert_navaid(conn, 5, "DPK", "VOR-DME", None);
}

/// In-memory manager holding the seeded scenario
pub(crate) fn seeded_manager() -> Arc<DatabaseManager> {
    let manager = DatabaseManager::new_in_memory().unwrap();
    {
        let conn = manager.get_connection().unwrap();
        seed(&conn);
    }
    Arc::new(manager)
}
