use crate::error::ClientError;
use crate::models::AnalysisResult;

/// The two ways of getting an analysis for an upload id.
#[allow(async_fn_in_trait)]
pub trait AnalysisSource {
    async fn trigger_analysis(&self, upload_id: &str) -> Result<AnalysisResult, ClientError>;

    async fn fetch_analysis_result(&self, upload_id: &str) -> Result<AnalysisResult, ClientError>;
}

/// Triggers a fresh analysis and falls back to the stored result on any
/// failure. The backend may refuse to re-analyze an id it already processed.
pub async fn resolve<S: AnalysisSource>(
    source: &S,
    upload_id: &str,
) -> Result<AnalysisResult, ClientError> {
    match source.trigger_analysis(upload_id).await {
        Ok(result) => return Ok(result),
        Err(err) => {
            log::warn!(
                "Triggering analysis for {} failed ({}), fetching stored result",
                upload_id,
                err
            );
        }
    }

    match source.fetch_analysis_result(upload_id).await {
        Ok(result) => Ok(result),
        Err(err) => {
            log::error!("No analysis available for {}: {}", upload_id, err);
            Err(ClientError::AnalysisUnavailable {
                upload_id: upload_id.to_string(),
            })
        }
    }
}
