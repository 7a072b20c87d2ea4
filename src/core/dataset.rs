//! Parsing and lookup for the OpenFlights `airports.dat` / `routes.dat` tables.
//!
//! Both files have no header row and use `\N` for missing values. Lookups keep
//! the first matching row, so each table carries a first-occurrence index.

use crate::domain::model::{Airport, Coordinates, Route};
use crate::utils::error::{Result, RouteMapError};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;

const AIRPORT_COLUMNS: usize = 14;
const ROUTE_COLUMNS: usize = 9;

pub const FLIGHT_DETAILS_UNAVAILABLE: &str = "Flight details unavailable";

fn optional_field(record: &StringRecord, index: usize) -> Option<String> {
    match record.get(index).map(str::trim) {
        None | Some("") | Some("\\N") => None,
        Some(value) => Some(value.to_string()),
    }
}

fn required_field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().trim().to_string()
}

fn parse_coordinate(record: &StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    airports: Vec<Airport>,
    by_iata: HashMap<String, usize>,
}

impl AirportTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::default();
        let mut skipped = 0usize;

        for row in reader_for(reader).records() {
            let record = row?;
            match Self::parse_row(&record) {
                Some(airport) => table.push(airport),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed airport rows", skipped);
        }
        tracing::debug!("Loaded {} airports", table.len());
        Ok(table)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(data)
    }

    fn parse_row(record: &StringRecord) -> Option<Airport> {
        if record.len() < 8 {
            return None;
        }
        // 經緯度無法解析的列直接略過
        let latitude = parse_coordinate(record, 6)?;
        let longitude = parse_coordinate(record, 7)?;

        Some(Airport {
            airport_id: required_field(record, 0),
            name: required_field(record, 1),
            city: required_field(record, 2),
            country: required_field(record, 3),
            iata: optional_field(record, 4),
            icao: optional_field(record, 5),
            coordinates: Coordinates::new(latitude, longitude),
            altitude: optional_field(record, 8),
            timezone: optional_field(record, 9),
            dst: optional_field(record, 10),
            tz_database: optional_field(record, 11),
            airport_type: optional_field(record, 12),
            source: optional_field(record, AIRPORT_COLUMNS - 1),
        })
    }

    pub fn push(&mut self, airport: Airport) {
        if let Some(iata) = &airport.iata {
            self.by_iata
                .entry(iata.clone())
                .or_insert(self.airports.len());
        }
        self.airports.push(airport);
    }

    pub fn find(&self, iata: &str) -> Option<&Airport> {
        self.by_iata.get(iata).map(|&index| &self.airports[index])
    }

    pub fn find_coordinates(&self, iata: &str) -> Option<Coordinates> {
        self.find(iata).map(|airport| airport.coordinates)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_pair: HashMap<(String, String), usize>,
}

impl RouteTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::default();
        let mut skipped = 0usize;

        for row in reader_for(reader).records() {
            let record = row?;
            if record.len() < 5 {
                skipped += 1;
                continue;
            }
            table.push(Route {
                airline: required_field(&record, 0),
                airline_id: optional_field(&record, 1),
                source_airport: required_field(&record, 2),
                source_airport_id: optional_field(&record, 3),
                destination_airport: required_field(&record, 4),
                destination_airport_id: optional_field(&record, 5),
                codeshare: optional_field(&record, 6),
                stops: optional_field(&record, 7),
                equipment: optional_field(&record, ROUTE_COLUMNS - 1),
            });
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed route rows", skipped);
        }
        tracing::debug!("Loaded {} routes", table.len());
        Ok(table)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(data)
    }

    pub fn push(&mut self, route: Route) {
        let key = (
            route.source_airport.clone(),
            route.destination_airport.clone(),
        );
        self.by_pair.entry(key).or_insert(self.routes.len());
        self.routes.push(route);
    }

    /// First route flying `source` -> `destination`. Direction matters.
    pub fn find_route(&self, source: &str, destination: &str) -> Option<&Route> {
        self.by_pair
            .get(&(source.to_string(), destination.to_string()))
            .map(|&index| &self.routes[index])
    }

    pub fn flight_info(&self, source: &str, destination: &str) -> String {
        match self.find_route(source, destination) {
            Some(route) => format!(
                "Carrier: {}, Equipment: {}",
                route.airline,
                route.equipment.as_deref().unwrap_or_default()
            ),
            None => FLIGHT_DETAILS_UNAVAILABLE.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// 空資料表通常代表下載到錯誤的檔案
pub fn ensure_not_empty(name: &str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(RouteMapError::DatasetError {
            message: format!("{} dataset contains no usable rows", name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AIRPORTS: &str = r#"1,"Goroka Airport","Goroka","Papua New Guinea","GKA","AYGA",-6.081689834590001,145.391998291,5282,10,"U","Pacific/Port_Moresby","airport","OurAirports"
507,"London Heathrow Airport","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E","Europe/London","airport","OurAirports"
3797,"John F Kennedy International Airport","New York","United States","JFK","KJFK",40.63980103,-73.77890015,13,-5,"A","America/New_York","airport","OurAirports"
9999,"Duplicate Heathrow","London","United Kingdom","LHR","XXXX",0.0,0.0,0,0,"E","Europe/London","airport","Test"
5,"No Code Field","Nowhere","Nowhere",\N,"ZZZZ",1.5,2.5,0,0,"U",\N,"airport","Test"
6,"Broken Row","Nowhere","Nowhere","BRK","BRKK",not-a-number,2.5,0,0,"U",\N,"airport","Test"
"#;

    const ROUTES: &str = "BA,1355,LHR,507,JFK,3797,,0,744 777\n\
AA,24,LHR,507,JFK,3797,Y,0,777\n\
AA,24,JFK,3797,LHR,507,,0,\\N\n";

    #[test]
    fn test_find_coordinates_returns_exact_values() {
        let table = AirportTable::from_bytes(AIRPORTS.as_bytes()).unwrap();

        let goroka = table.find_coordinates("GKA").unwrap();
        assert_eq!(goroka.latitude, -6.081689834590001);
        assert_eq!(goroka.longitude, 145.391998291);

        let jfk = table.find_coordinates("JFK").unwrap();
        assert_eq!(jfk, Coordinates::new(40.63980103, -73.77890015));
    }

    #[test]
    fn test_unknown_iata_returns_none() {
        let table = AirportTable::from_bytes(AIRPORTS.as_bytes()).unwrap();
        assert!(table.find_coordinates("XYZ").is_none());
        assert!(table.find_coordinates("lhr").is_none());
        assert!(table.find_coordinates("\\N").is_none());
    }

    #[test]
    fn test_first_matching_airport_wins() {
        let table = AirportTable::from_bytes(AIRPORTS.as_bytes()).unwrap();
        let heathrow = table.find("LHR").unwrap();
        assert_eq!(heathrow.icao.as_deref(), Some("EGLL"));
        assert_eq!(heathrow.coordinates, Coordinates::new(51.4706, -0.461941));
    }

    #[test]
    fn test_malformed_coordinates_are_skipped() {
        let table = AirportTable::from_bytes(AIRPORTS.as_bytes()).unwrap();
        assert_eq!(table.len(), 5);
        assert!(table.find("BRK").is_none());
    }

    #[test]
    fn test_non_finite_coordinates_are_skipped() {
        let rows = r#"7,"Not A Number","X","X","NAN","NANN",NaN,inf,0,0,"U",\N,"airport","Test"
8,"Infinite","X","X","INF","INFF",10.0,-infinity,0,0,"U",\N,"airport","Test"
9,"Fine","X","X","FIN","FINE",10.0,20.0,0,0,"U",\N,"airport","Test"
"#;
        let table = AirportTable::from_bytes(rows.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.find_coordinates("NAN").is_none());
        assert!(table.find_coordinates("INF").is_none());
        assert_eq!(table.find_coordinates("FIN"), Some(Coordinates::new(10.0, 20.0)));
    }

    #[test]
    fn test_airport_without_iata_is_not_indexed() {
        let table = AirportTable::from_bytes(AIRPORTS.as_bytes()).unwrap();
        // ICAO codes are never used as lookup keys
        assert!(table.find("ZZZZ").is_none());
        assert!(table.find("").is_none());
    }

    #[test]
    fn test_airport_optional_fields() {
        let table = AirportTable::from_bytes(AIRPORTS.as_bytes()).unwrap();
        let goroka = table.find("GKA").unwrap();
        assert_eq!(goroka.name, "Goroka Airport");
        assert_eq!(goroka.tz_database.as_deref(), Some("Pacific/Port_Moresby"));
        assert_eq!(goroka.source.as_deref(), Some("OurAirports"));
    }

    #[test]
    fn test_find_route_keeps_direction_and_first_match() {
        let routes = RouteTable::from_bytes(ROUTES.as_bytes()).unwrap();
        assert_eq!(routes.len(), 3);

        let outbound = routes.find_route("LHR", "JFK").unwrap();
        assert_eq!(outbound.airline, "BA");
        assert_eq!(outbound.equipment.as_deref(), Some("744 777"));

        let inbound = routes.find_route("JFK", "LHR").unwrap();
        assert_eq!(inbound.airline, "AA");
        assert!(routes.find_route("LHR", "GKA").is_none());
    }

    #[test]
    fn test_flight_info() {
        let routes = RouteTable::from_bytes(ROUTES.as_bytes()).unwrap();
        assert_eq!(
            routes.flight_info("LHR", "JFK"),
            "Carrier: BA, Equipment: 744 777"
        );
        assert_eq!(routes.flight_info("JFK", "LHR"), "Carrier: AA, Equipment: ");
        assert_eq!(routes.flight_info("GKA", "LHR"), FLIGHT_DETAILS_UNAVAILABLE);
    }

    #[test]
    fn test_short_route_rows_are_skipped() {
        let routes = RouteTable::from_bytes(b"BA,1355,LHR\nBA,1355,LHR,507,JFK,3797,,0,744\n").unwrap();
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(ensure_not_empty("airports", 3).is_ok());
        assert!(matches!(
            ensure_not_empty("airports", 0),
            Err(RouteMapError::DatasetError { .. })
        ));
    }
}
