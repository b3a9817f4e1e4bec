use crate::error::ClientError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub upload_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default = "default_upload_message")]
    pub message: String,
    /// Only present when the spectral endpoint answers with its index summary.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indices: BTreeMap<String, IndexStats>,
}

fn default_upload_message() -> String {
    "File uploaded successfully".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub upload_id: String,
    pub prediction: String,
    pub confidence: f64,
    pub recommendation: String,
    pub timestamp: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::High => "High Risk",
            Severity::Medium => "Medium Risk",
            Severity::Low => "Low Risk",
        }
    }
}

/// Field alert. Accepts both the dashboard field names and the ones the
/// risk detector emits (`risk_type`, `risk_level`, `average_confidence`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "type", alias = "risk_type", default)]
    pub kind: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub zone: String,
    #[serde(alias = "risk_level")]
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(alias = "timestamp", default)]
    pub date: String,
    #[serde(alias = "average_confidence", default)]
    pub confidence: f64,
}

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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IndexType {
    #[default]
    Ndvi,
    SoilMoisture,
    Temperature,
    Humidity,
}

impl IndexType {
    pub fn label(&self) -> &'static str {
        match self {
            IndexType::Ndvi => "NDVI",
            IndexType::SoilMoisture => "Soil Moisture",
            IndexType::Temperature => "Temperature",
            IndexType::Humidity => "Humidity",
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        match self {
            IndexType::Ndvi => format!("{:.2}", value),
            IndexType::Temperature => format!("{:.1}°C", value),
            IndexType::SoilMoisture | IndexType::Humidity => format!("{:.1}%", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDataPoint {
    pub date: String,
    pub value: f64,
    #[serde(default)]
    pub index_type: IndexType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDataResult {
    pub upload_id: String,
    #[serde(default)]
    pub index_type: IndexType,
    #[serde(default)]
    pub data: Vec<TrendDataPoint>,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorGenerationRequest {
    pub start_date: String,
    pub end_date: String,
    pub field_id: String,
    pub crop_type: String,
    pub location: String,
}

impl SensorGenerationRequest {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            field_id: "field_1".to_string(),
            crop_type: "corn".to_string(),
            location: "default".to_string(),
        }
    }

    /// Dates must be `YYYY-MM-DD` and in order.
    pub fn validate(&self) -> Result<(), ClientError> {
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if start > end {
            return Err(ClientError::InvalidRequest(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ClientError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::InvalidRequest(format!("{} must be YYYY-MM-DD, got {:?}", field, value))
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub dataset_id: String,
    pub data_points: u64,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn spectral_shape_parses_as_upload_response() {
        let body = r#"{
            "upload_id": "u-1",
            "file_info": {"path": "data/u-1.hdr", "shape": [10, 10, 6], "bands": 6},
            "indices": {"ndvi": {"min": -0.1, "max": 0.9, "mean": 0.55, "data": [0.1]}}
        }"#;
        let response: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.upload_id, "u-1");
        assert_eq!(response.filename, "");
        assert_eq!(response.message, "File uploaded successfully");
        assert_eq!(response.indices["ndvi"].mean, 0.55);
    }

    #[test]
    fn alert_accepts_risk_detector_names() {
        let body = r#"{
            "risk_type": "pest",
            "risk_level": "high",
            "average_confidence": 0.91,
            "recommendation": "Apply neem oil",
            "timestamp": "2024-03-01"
        }"#;
        let alert: Alert = serde_json::from_str(body).unwrap();
        assert_eq!(alert.kind, "pest");
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.confidence, 0.91);
        assert_eq!(alert.date, "2024-03-01");
        assert_eq!(alert.zone, "");
    }

    #[test]
    fn alert_dashboard_shape() {
        let body = r#"{
            "id": 2, "type": "Stress", "subtype": "Water Stress", "zone": "North Field",
            "severity": "medium", "message": "Signs of water stress",
            "recommendation": "Increase irrigation", "date": "2023-02-18", "confidence": 0.76
        }"#;
        let alert: Alert = serde_json::from_str(body).unwrap();
        assert_eq!(alert.id, 2);
        assert_eq!(alert.kind, "Stress");
        assert_eq!(alert.severity, Severity::Medium);
    }

    #[test]
    fn index_type_wire_names() {
        assert_eq!(IndexType::SoilMoisture.to_string(), "soil_moisture");
        assert_eq!(IndexType::from_str("humidity").unwrap(), IndexType::Humidity);
        assert!(IndexType::from_str("ndre").is_err());
    }

    #[test]
    fn index_values_are_formatted_per_unit() {
        assert_eq!(IndexType::Ndvi.format_value(0.7234), "0.72");
        assert_eq!(IndexType::Temperature.format_value(20.66), "20.7°C");
        assert_eq!(IndexType::Humidity.format_value(61.0), "61.0%");
    }

    #[test]
    fn generation_request_defaults_and_validation() {
        let request = SensorGenerationRequest::new("2024-01-01", "2024-01-31");
        assert_eq!(request.field_id, "field_1");
        assert_eq!(request.crop_type, "corn");
        assert!(request.validate().is_ok());

        let reversed = SensorGenerationRequest::new("2024-02-01", "2024-01-01");
        assert!(matches!(
            reversed.validate(),
            Err(ClientError::InvalidRequest(_))
        ));

        let malformed = SensorGenerationRequest::new("01/02/2024", "2024-01-01");
        assert!(malformed.validate().is_err());
    }
}
