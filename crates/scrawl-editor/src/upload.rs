//! Upload hand-off.
//!
//! The exported drawing replaces whatever file the user picked for
//! inference: it goes into the form's image field under the configured
//! file name, next to the chosen model. The host owns the actual HTTP
//! submission; this type only describes what to submit.

use scrawl_core::config::UploadConfig;
use scrawl_core::model::ExportedImage;

/// The file part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// A multipart form ready for the host to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file: FilePart,
    /// Plain text fields, in submission order.
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    /// Build the inference form from an exported drawing.
    ///
    /// `model` is omitted when `None` or empty; the backend reports the
    /// missing model itself.
    pub fn for_inference(config: &UploadConfig, image: ExportedImage, model: Option<&str>) -> Self {
        let image = image.with_file_name(config.file_name.clone());
        let mut fields = Vec::new();
        if let Some(model) = model.filter(|m| !m.is_empty()) {
            fields.push((config.model_field.clone(), model.to_string()));
        }
        log::debug!(
            "upload form: {} ({} bytes) + {} field(s)",
            image.file_name,
            image.len(),
            fields.len()
        );
        Self {
            file: FilePart {
                field: config.image_field.clone(),
                file_name: image.file_name,
                mime_type: image.mime_type,
                bytes: image.bytes,
            },
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
