//! Platform-neutral core of the KrishiDrishti client: wire models, upload
//! classification and submission, analysis resolution and the helpers the
//! pages use to present results.

pub mod alerts;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod resolver;
pub mod route;
pub mod transport;
pub mod trends;
pub mod upload;
pub mod view_state;

pub use classify::{FileKind, classify};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ClientError;
pub use models::{
    Alert, AnalysisResult, GenerationSummary, IndexStats, IndexType, SensorGenerationRequest,
    Severity, TrendDataPoint, TrendDataResult, UploadResponse,
};
pub use route::Route;
pub use transport::{HttpReply, RequestBody, Transport};
pub use upload::{UploadCandidate, UploadForm, UploadMetadata};
pub use view_state::ViewState;
