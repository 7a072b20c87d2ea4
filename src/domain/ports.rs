use crate::core::render::OutputFormat;
use crate::domain::model::{Datasets, FlightMap, MapStyle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn airports_source(&self) -> &str;
    fn routes_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    fn file_stem(&self) -> &str;
    fn map_style(&self) -> MapStyle;
    fn source_iata(&self) -> &str;
    fn destination_iata(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Datasets>;
    async fn transform(&self, data: Datasets) -> Result<FlightMap>;
    async fn load(&self, map: FlightMap) -> Result<String>;
}
