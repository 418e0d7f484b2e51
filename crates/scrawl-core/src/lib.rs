pub mod config;
pub mod error;
pub mod model;

pub use config::{Endpoints, PadConfig, Route, UploadConfig};
pub use error::{ConfigError, ExportError};
pub use model::*;
