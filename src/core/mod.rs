pub mod dataset;
pub mod engine;
pub mod geo;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{Datasets, FlightMap};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
