use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub const HYPERSPECTRAL_EXTENSIONS: [&str; 5] = [".hdr", ".dat", ".tif", ".tiff", ".geotiff"];
pub const SENSOR_EXTENSION: &str = ".csv";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    #[default]
    Image,
    Hyperspectral,
    Sensor,
}

/// Extension rules win over the reported MIME type, hyperspectral first.
pub fn classify(filename: &str, mime_type: &str) -> Result<FileKind, ClientError> {
    let name = filename.to_lowercase();

    if HYPERSPECTRAL_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return Ok(FileKind::Hyperspectral);
    }
    if name.ends_with(SENSOR_EXTENSION) {
        return Ok(FileKind::Sensor);
    }
    if mime_type.trim().to_lowercase().starts_with("image/") {
        return Ok(FileKind::Image);
    }

    log::warn!("Rejected {} ({:?})", filename, mime_type);
    Err(ClientError::UnsupportedFileType {
        filename: filename.to_string(),
    })
}

impl FileKind {
    /// Value for the file input's `accept` attribute.
    pub fn accept(&self) -> &'static str {
        match self {
            FileKind::Image => "image/*",
            FileKind::Hyperspectral => ".hdr,.dat,.tif,.tiff,.geotiff",
            FileKind::Sensor => ".csv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "RGB Images",
            FileKind::Hyperspectral => "Hyperspectral Data",
            FileKind::Sensor => "Sensor Data",
        }
    }

    pub fn formats(&self) -> &'static str {
        match self {
            FileKind::Image => "JPG, PNG formats",
            FileKind::Hyperspectral => "ENVI, GeoTIFF formats",
            FileKind::Sensor => "CSV format",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            FileKind::Image => "Select an image of your crop (JPG, PNG)",
            FileKind::Hyperspectral => "Upload hyperspectral data (ENVI .hdr/.dat or GeoTIFF)",
            FileKind::Sensor => "Upload sensor data (CSV format)",
        }
    }

    pub fn has_preview(&self) -> bool {
        matches!(self, FileKind::Image)
    }

    pub fn sends_metadata(&self) -> bool {
        matches!(self, FileKind::Hyperspectral)
    }
}
