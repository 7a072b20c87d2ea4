pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, RouteConfig};

pub use core::{engine::RouteEngine, pipeline::RoutePipeline};
pub use utils::error::{Result, RouteMapError};
