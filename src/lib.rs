pub mod dataset;
pub mod error;
pub mod export;
pub mod figure;
pub mod graph;
pub mod layout;
pub mod network;
pub mod raster;
pub mod selection;

pub use error::{DiscographError, Result};
