use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::PhaseMonitor;

pub struct RouteEngine<P: Pipeline> {
    pipeline: P,
    monitor: PhaseMonitor,
}

impl<P: Pipeline> RouteEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: PhaseMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting route map process...");

        // Extract
        tracing::info!("📥 Loading airport and route datasets...");
        let datasets = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} airports and {} routes",
            datasets.airports.len(),
            datasets.routes.len()
        );
        self.monitor.log_phase("Extract");

        // Transform
        tracing::info!("🧭 Looking up airports and route...");
        let map = self.pipeline.transform(datasets).await?;
        tracing::info!(
            "Route {} -> {} centered at ({:.4}, {:.4}); {}",
            map.source_iata,
            map.destination_iata,
            map.center.latitude,
            map.center.longitude,
            map.flight_info
        );
        self.monitor.log_phase("Transform");

        // Load
        tracing::info!("🗺️ Rendering map...");
        let output_path = self.pipeline.load(map).await?;
        self.monitor.log_phase("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
