use crate::models::IndexType;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const API_BASE_ENV: &str = "KRISHI_API_BASE_URL";

/// Where the backend lives, plus the endpoint paths hung off it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    /// Reads `KRISHI_API_BASE_URL`, falling back to the localhost default.
    pub fn from_env() -> Self {
        match std::env::var(API_BASE_ENV) {
            Ok(value) => Self::new(value),
            Err(_) => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn spectral_url(&self) -> String {
        format!("{}/spectral/analyze", self.base_url)
    }

    pub fn analyze_url(&self, upload_id: &str) -> String {
        format!("{}/analyze/{}", self.base_url, urlencoding::encode(upload_id))
    }

    pub fn results_url(&self, upload_id: &str) -> String {
        format!("{}/results/{}", self.base_url, urlencoding::encode(upload_id))
    }

    pub fn alerts_url(&self, field_id: &str) -> String {
        format!("{}/alerts/{}", self.base_url, urlencoding::encode(field_id))
    }

    pub fn trends_url(&self, dataset_id: &str, index: IndexType) -> String {
        format!(
            "{}/sensors/trends/{}?index_type={}",
            self.base_url,
            urlencoding::encode(dataset_id),
            index
        )
    }

    pub fn generate_url(&self) -> String {
        format!("{}/sensors/generate", self.base_url)
    }
}
