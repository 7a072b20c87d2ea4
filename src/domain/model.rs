use serde::{Deserialize, Serialize};

use crate::core::dataset::{AirportTable, RouteTable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One row of the OpenFlights `airports.dat` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub airport_id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub coordinates: Coordinates,
    pub altitude: Option<String>,
    pub timezone: Option<String>,
    pub dst: Option<String>,
    pub tz_database: Option<String>,
    pub airport_type: Option<String>,
    pub source: Option<String>,
}

/// One row of the OpenFlights `routes.dat` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub airline: String,
    pub airline_id: Option<String>,
    pub source_airport: String,
    pub source_airport_id: Option<String>,
    pub destination_airport: String,
    pub destination_airport_id: Option<String>,
    pub codeshare: Option<String>,
    pub stops: Option<String>,
    pub equipment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Datasets {
    pub airports: AirportTable,
    pub routes: RouteTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Blue,
    Red,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Blue => "blue",
            MarkerColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinates,
    pub popup: String,
    pub color: MarkerColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: [Coordinates; 2],
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

/// 連線樣式 (顏色、粗細、透明度)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStyle {
    pub zoom_start: u8,
    pub line_color: String,
    pub line_weight: f64,
    pub line_opacity: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            zoom_start: 3,
            line_color: "blue".to_string(),
            line_weight: 2.5,
            line_opacity: 1.0,
        }
    }
}

/// Everything needed to draw the route: the transform phase output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightMap {
    pub source_iata: String,
    pub destination_iata: String,
    pub center: Coordinates,
    pub zoom_start: u8,
    pub markers: Vec<Marker>,
    pub polyline: Polyline,
    pub flight_info: String,
}
