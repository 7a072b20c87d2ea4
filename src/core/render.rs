//! Turns a [`FlightMap`] into files a browser or GIS tool can open.
//!
//! The HTML output is a self-contained Leaflet page: two colored markers, one
//! polyline and a tile layer, centered on the route midpoint. All map data is
//! embedded as a JSON blob so popup text never reaches the page as markup.

use crate::domain::model::{Coordinates, FlightMap};
use crate::utils::error::{Result, RouteMapError};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

const LEAFLET_VERSION: &str = "1.9.4";
const AWESOME_MARKERS_VERSION: &str = "2.0.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Html,
    GeoJson,
}

impl OutputFormat {
    pub const SUPPORTED: [&'static str; 2] = ["html", "geojson"];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::GeoJson => "geojson",
        }
    }

    pub fn render(&self, map: &FlightMap) -> Result<String> {
        match self {
            OutputFormat::Html => render_html(map),
            OutputFormat::GeoJson => render_geojson(map),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RouteMapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "geojson" => Ok(OutputFormat::GeoJson),
            other => Err(RouteMapError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    Self::SUPPORTED.join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn lat_lng(point: &Coordinates) -> [f64; 2] {
    [point.latitude, point.longitude]
}

fn lng_lat(point: &Coordinates) -> [f64; 2] {
    [point.longitude, point.latitude]
}

/// 嵌入 <script> 前避免出現 "</script>"
fn script_safe_json(value: &serde_json::Value) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn render_html(map: &FlightMap) -> Result<String> {
    let markers: Vec<_> = map
        .markers
        .iter()
        .map(|marker| {
            json!({
                "location": lat_lng(&marker.position),
                "popup": marker.popup,
                "color": marker.color.as_str(),
            })
        })
        .collect();

    let data = json!({
        "center": lat_lng(&map.center),
        "zoom": map.zoom_start,
        "markers": markers,
        "line": {
            "points": map.polyline.points.iter().map(lat_lng).collect::<Vec<_>>(),
            "color": map.polyline.color,
            "weight": map.polyline.weight,
            "opacity": map.polyline.opacity,
        },
    });

    let title = escape_html_text(&format!(
        "{} to {}",
        map.source_iata, map.destination_iata
    ));

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.css">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/{awesome}/leaflet.awesome-markers.css">
<link rel="stylesheet" href="https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css">
<style>
html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
#map {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}
.route-popup {{ white-space: pre-line; }}
</style>
</head>
<body>
<div id="map"></div>
<script src="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.js"></script>
<script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/{awesome}/leaflet.awesome-markers.js"></script>
<script id="route-data" type="application/json">{data}</script>
<script>
var data = JSON.parse(document.getElementById("route-data").textContent);
var map = L.map("map").setView(data.center, data.zoom);
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
data.markers.forEach(function (m) {{
  var popup = document.createElement("div");
  popup.className = "route-popup";
  popup.textContent = m.popup;
  L.marker(m.location, {{
    icon: L.AwesomeMarkers.icon({{ icon: "info-sign", prefix: "glyphicon", markerColor: m.color }})
  }}).bindPopup(popup).addTo(map);
}});
L.polyline(data.line.points, {{
  color: data.line.color,
  weight: data.line.weight,
  opacity: data.line.opacity
}}).addTo(map);
</script>
</body>
</html>
"#,
        title = title,
        leaflet = LEAFLET_VERSION,
        awesome = AWESOME_MARKERS_VERSION,
        data = script_safe_json(&data)?,
    ))
}

pub fn render_geojson(map: &FlightMap) -> Result<String> {
    let mut features: Vec<_> = map
        .markers
        .iter()
        .map(|marker| {
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": lng_lat(&marker.position) },
                "properties": {
                    "popup": marker.popup,
                    "marker-color": marker.color.as_str(),
                },
            })
        })
        .collect();

    features.push(json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": map.polyline.points.iter().map(lng_lat).collect::<Vec<_>>(),
        },
        "properties": {
            "source": map.source_iata,
            "destination": map.destination_iata,
            "flight_info": map.flight_info,
            "stroke": map.polyline.color,
            "stroke-width": map.polyline.weight,
            "stroke-opacity": map.polyline.opacity,
        },
    }));

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    Ok(serde_json::to_string_pretty(&collection)?)
}
