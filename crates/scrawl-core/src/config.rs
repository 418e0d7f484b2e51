//! Pad configuration: canvas size, brush, backend endpoints, upload fields.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! configuration. Deployments that only differ by backend host override
//! `endpoints.base_url` and nothing else.

use crate::error::ConfigError;
use crate::model::Brush;
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Largest accepted canvas side in pixels. An 8192 × 8192 raster is 256 MiB.
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Top-level configuration for a drawing pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Canvas width in pixels. Default: **280** (10 × a 28 px digit).
    pub width: u32,
    /// Canvas height in pixels. Default: **280**.
    pub height: u32,
    pub brush: Brush,
    pub endpoints: Endpoints,
    pub upload: UploadConfig,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: 280,
            height: 280,
            brush: Brush::default(),
            endpoints: Endpoints::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl PadConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::Json` on malformed input, or the first
    /// validation failure.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PadConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "loaded pad config {}x{} backend={}",
            config.width,
            config.height,
            config.endpoints.base_url
        );
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    ///
    /// Zero canvas dimensions are accepted: the surface then holds no pixels
    /// and export reports `ExportError::EmptyCanvas`. Sides above
    /// `MAX_CANVAS_SIDE` are rejected before anything is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(ConfigError::CanvasSize {
                width: self.width,
                height: self.height,
                max: MAX_CANVAS_SIDE,
            });
        }
        if !self.brush.has_valid_width() {
            return Err(ConfigError::BrushWidth(self.brush.width));
        }
        self.endpoints.validate()?;
        self.upload.validate()
    }
}

// ─── Endpoints ────────────────────────────────────────────────────────────

/// Backend routes the page talks to, all behind one base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Dataset names available for training.
    ListData,
    /// Trained model names available for inference.
    ListModels,
    /// Multipart upload of an image for classification.
    Predict,
}

impl Route {
    /// Path below the base URL, including the reverse-proxy service prefix.
    pub fn path(self) -> &'static str {
        match self {
            Route::ListData => "train/list_data",
            Route::ListModels => "inference/list_models",
            Route::Predict => "inference/predict",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "list_data" | "listData" => Some(Route::ListData),
            "list_models" | "listModels" => Some(Route::ListModels),
            "predict" => Some(Route::Predict),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Scheme + host (+ optional path prefix) of the page's backend proxy.
    pub base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Absolute URL for `route`. Tolerates a trailing slash on the base.
    pub fn url(&self, route: Route) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), route.path())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ok = ["http://", "https://"]
            .iter()
            .any(|scheme| self.base_url.len() > scheme.len() && self.base_url.starts_with(scheme));
        if ok {
            Ok(())
        } else {
            Err(ConfigError::BaseUrl(self.base_url.clone()))
        }
    }
}

// ─── Upload form fields ───────────────────────────────────────────────────

/// Field names the inference form expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Multipart field carrying the image file. Default: `test_image`.
    pub image_field: String,
    /// Text field naming the model to run. Default: `model_folder`.
    pub model_field: String,
    /// File name given to the exported drawing. Default: `drawing.png`.
    pub file_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            image_field: "test_image".to_string(),
            model_field: "model_folder".to_string(),
            file_name: "drawing.png".to_string(),
        }
    }
}

impl UploadConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.image_field.is_empty() {
            return Err(ConfigError::EmptyField("image_field"));
        }
        if self.model_field.is_empty() {
            return Err(ConfigError::EmptyField("model_field"));
        }
        if self.file_name.is_empty() {
            return Err(ConfigError::EmptyField("file_name"));
        }
        Ok(())
    }
}
