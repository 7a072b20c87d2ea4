use crate::core::dataset::{ensure_not_empty, AirportTable, RouteTable};
use crate::core::geo::midpoint;
use crate::core::{ConfigProvider, Datasets, FlightMap, Pipeline, Storage};
use crate::domain::model::{Marker, MarkerColor, Polyline};
use crate::utils::error::{Result, RouteMapError};
use crate::utils::validation::is_remote_source;
use reqwest::Client;

pub struct RoutePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> RoutePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    /// http(s) 來源用 reqwest 下載，其餘當成本機檔案讀取
    async fn fetch_dataset(&self, source: &str) -> Result<Vec<u8>> {
        if is_remote_source(source) {
            tracing::debug!("Downloading dataset from: {}", source);
            let response = self.client.get(source).send().await?;
            tracing::debug!("Dataset response status: {}", response.status());

            let body = response.error_for_status()?.bytes().await?;
            Ok(body.to_vec())
        } else {
            tracing::debug!("Reading dataset from local file: {}", source);
            Ok(tokio::fs::read(source).await?)
        }
    }

    fn output_filename(&self, extension: &str) -> String {
        let stem = self
            .config
            .file_stem()
            .replace("{timestamp}", &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string());

        format!(
            "{}_{}_{}.{}",
            stem,
            self.config.source_iata(),
            self.config.destination_iata(),
            extension
        )
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RoutePipeline<S, C> {
    async fn extract(&self) -> Result<Datasets> {
        let (airport_bytes, route_bytes) = tokio::try_join!(
            self.fetch_dataset(self.config.airports_source()),
            self.fetch_dataset(self.config.routes_source()),
        )?;

        let airports = AirportTable::from_bytes(&airport_bytes)?;
        ensure_not_empty("airports", airports.len())?;

        let routes = RouteTable::from_bytes(&route_bytes)?;
        if routes.is_empty() {
            tracing::warn!("Routes dataset is empty, flight details will be unavailable");
        }

        Ok(Datasets { airports, routes })
    }

    async fn transform(&self, data: Datasets) -> Result<FlightMap> {
        let source_iata = self.config.source_iata();
        let destination_iata = self.config.destination_iata();

        let source = data.airports.find_coordinates(source_iata);
        let destination = data.airports.find_coordinates(destination_iata);

        let (source, destination) = match (source, destination) {
            (Some(source), Some(destination)) => (source, destination),
            (source, destination) => {
                let missing = [(source_iata, source), (destination_iata, destination)]
                    .into_iter()
                    .filter(|(_, found)| found.is_none())
                    .map(|(code, _)| code.to_string())
                    .collect();

                return Err(RouteMapError::AirportNotFound {
                    source_iata: source_iata.to_string(),
                    destination_iata: destination_iata.to_string(),
                    missing,
                });
            }
        };

        let flight_info = data.routes.flight_info(source_iata, destination_iata);
        tracing::debug!("{} -> {}: {}", source_iata, destination_iata, flight_info);

        let style = self.config.map_style();

        Ok(FlightMap {
            source_iata: source_iata.to_string(),
            destination_iata: destination_iata.to_string(),
            center: midpoint(source, destination),
            zoom_start: style.zoom_start,
            markers: vec![
                Marker {
                    position: source,
                    popup: format!("Source: {}", source_iata),
                    color: MarkerColor::Blue,
                },
                Marker {
                    position: destination,
                    popup: format!("Destination: {}\n{}", destination_iata, flight_info),
                    color: MarkerColor::Red,
                },
            ],
            polyline: Polyline {
                points: [source, destination],
                color: style.line_color,
                weight: style.line_weight,
                opacity: style.line_opacity,
            },
            flight_info,
        })
    }

    async fn load(&self, map: FlightMap) -> Result<String> {
        let formats = self.config.output_formats();
        if formats.is_empty() {
            return Err(RouteMapError::ConfigError {
                message: "No supported output format configured".to_string(),
            });
        }

        let mut written = Vec::with_capacity(formats.len());
        for format in formats {
            let filename = self.output_filename(format.extension());
            let content = format.render(&map)?;

            tracing::debug!("Writing {} map ({} bytes) to {}", format, content.len(), filename);
            self.storage.write_file(&filename, content.as_bytes()).await?;
            written.push(format!("{}/{}", self.config.output_path(), filename));
        }

        // 回傳第一個輸出檔 (預設為 HTML)
        Ok(written.swap_remove(0))
    }
}
