use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::models::{
    Alert, AnalysisResult, GenerationSummary, IndexType, SensorGenerationRequest,
    TrendDataResult, UploadResponse,
};
use crate::resolver::{self, AnalysisSource};
use crate::transport::{HttpReply, RequestBody, Transport, error_detail};
use crate::upload::{SubmissionPlan, UploadCandidate, UploadMetadata};

/// Typed access to the KrishiDrishti REST API over any [`Transport`].
pub struct ApiClient<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Single attempt. Hyperspectral files go to the spectral endpoint with
    /// their metadata; everything else is posted bare to `/upload`.
    pub async fn submit(
        &self,
        candidate: &UploadCandidate<T::File>,
        metadata: &UploadMetadata,
    ) -> Result<UploadResponse, ClientError> {
        let plan = SubmissionPlan::for_kind(candidate.kind(), metadata);
        let url = plan.target.url(&self.config);
        log::info!(
            "Uploading {} as {} to {}",
            candidate.name(),
            candidate.kind(),
            url
        );

        let body = RequestBody::Multipart {
            file: candidate.file(),
            file_name: candidate.name(),
            fields: plan.fields,
        };
        let reply = self
            .transport
            .post(&url, body)
            .await
            .map_err(|err| ClientError::UploadFailed(err.to_string()))?;

        if !reply.is_success() {
            let detail = error_detail(&reply.body, "Upload failed");
            log::error!("Upload of {} rejected ({}): {}", candidate.name(), reply.status, detail);
            return Err(ClientError::UploadFailed(detail));
        }

        let mut response: UploadResponse = reply
            .json()
            .map_err(|err| ClientError::UploadFailed(err.to_string()))?;
        if response.filename.is_empty() {
            response.filename = candidate.name().to_string();
        }
        Ok(response)
    }

    pub async fn trigger_analysis(&self, upload_id: &str) -> Result<AnalysisResult, ClientError> {
        let url = self.config.analyze_url(upload_id);
        log::debug!("POST {}", url);
        let reply = self.transport.post(&url, RequestBody::Empty).await?;
        if !reply.is_success() {
            return Err(api_error(&reply, "Analysis failed"));
        }
        reply.json()
    }

    pub async fn fetch_analysis_result(
        &self,
        upload_id: &str,
    ) -> Result<AnalysisResult, ClientError> {
        let url = self.config.results_url(upload_id);
        log::debug!("GET {}", url);
        let reply = self.transport.get(&url).await?;
        if reply.status == 404 {
            return Err(ClientError::ResultNotFound(upload_id.to_string()));
        }
        if !reply.is_success() {
            return Err(api_error(&reply, "Failed to fetch result"));
        }
        reply.json()
    }

    pub async fn resolve(&self, upload_id: &str) -> Result<AnalysisResult, ClientError> {
        resolver::resolve(self, upload_id).await
    }

    /// A field without alerts answers 404, which is reported as no alerts.
    pub async fn fetch_alerts(&self, field_id: &str) -> Result<Vec<Alert>, ClientError> {
        let url = self.config.alerts_url(field_id);
        log::debug!("GET {}", url);
        let reply = self.transport.get(&url).await?;
        if reply.status == 404 {
            return Ok(Vec::new());
        }
        if !reply.is_success() {
            return Err(api_error(&reply, "Failed to fetch alerts"));
        }
        reply.json()
    }

    pub async fn fetch_trends(
        &self,
        dataset_id: &str,
        index: IndexType,
    ) -> Result<TrendDataResult, ClientError> {
        let url = self.config.trends_url(dataset_id, index);
        log::debug!("GET {}", url);
        let reply = self.transport.get(&url).await?;
        if reply.status == 404 {
            return Err(ClientError::ResultNotFound(dataset_id.to_string()));
        }
        if !reply.is_success() {
            return Err(api_error(&reply, "Failed to fetch trend data"));
        }
        reply.json()
    }

    pub async fn generate_sensor_data(
        &self,
        request: &SensorGenerationRequest,
    ) -> Result<GenerationSummary, ClientError> {
        request.validate()?;
        let url = self.config.generate_url();
        log::debug!("POST {}", url);
        let body = serde_json::to_string(request)?;
        let reply = self.transport.post(&url, RequestBody::Json(body)).await?;
        if !reply.is_success() {
            return Err(api_error(&reply, "Sensor data generation failed"));
        }
        reply.json()
    }
}

impl<T: Transport> AnalysisSource for ApiClient<T> {
    async fn trigger_analysis(&self, upload_id: &str) -> Result<AnalysisResult, ClientError> {
        ApiClient::trigger_analysis(self, upload_id).await
    }

    async fn fetch_analysis_result(&self, upload_id: &str) -> Result<AnalysisResult, ClientError> {
        ApiClient::fetch_analysis_result(self, upload_id).await
    }
}

fn api_error(reply: &HttpReply, fallback: &str) -> ClientError {
    ClientError::Api {
        status: reply.status,
        detail: error_detail(&reply.body, fallback),
    }
}
