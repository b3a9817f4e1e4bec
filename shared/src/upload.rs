use crate::classify::{FileKind, classify};
use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::models::UploadResponse;
use crate::route::Route;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// A selected file that passed classification. It cannot exist unclassified.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate<F> {
    file: F,
    name: String,
    kind: FileKind,
}

impl<F> UploadCandidate<F> {
    pub fn classify(file: F, name: impl Into<String>, mime_type: &str) -> Result<Self, ClientError> {
        let name = name.into();
        let kind = classify(&name, mime_type)?;
        Ok(Self { file, name, kind })
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum MetadataField {
    CropType,
    FieldId,
    Location,
}

impl MetadataField {
    /// Multipart field name.
    pub fn form_name(&self) -> &'static str {
        match self {
            MetadataField::CropType => "crop_type",
            MetadataField::FieldId => "field_id",
            MetadataField::Location => "location",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetadataField::CropType => "Crop Type",
            MetadataField::FieldId => "Field ID",
            MetadataField::Location => "Location",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            MetadataField::CropType => "e.g., Corn, Wheat",
            MetadataField::FieldId => "e.g., Field-01",
            MetadataField::Location => "e.g., Pune, Maharashtra",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub crop_type: Option<String>,
    pub field_id: Option<String>,
    pub location: Option<String>,
}

impl UploadMetadata {
    pub fn get(&self, field: MetadataField) -> Option<&str> {
        match field {
            MetadataField::CropType => self.crop_type.as_deref(),
            MetadataField::FieldId => self.field_id.as_deref(),
            MetadataField::Location => self.location.as_deref(),
        }
    }

    /// Blank input clears the field.
    pub fn set(&mut self, field: MetadataField, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() { None } else { Some(value) };
        match field {
            MetadataField::CropType => self.crop_type = value,
            MetadataField::FieldId => self.field_id = value,
            MetadataField::Location => self.location = value,
        }
    }

    /// All three fields, absent ones sent as empty strings.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        [
            MetadataField::CropType,
            MetadataField::FieldId,
            MetadataField::Location,
        ]
        .into_iter()
        .map(|field| {
            (
                field.form_name(),
                self.get(field).unwrap_or_default().to_string(),
            )
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Spectral,
    Generic,
}

impl UploadTarget {
    pub fn url(&self, config: &ApiConfig) -> String {
        match self {
            UploadTarget::Spectral => config.spectral_url(),
            UploadTarget::Generic => config.upload_url(),
        }
    }
}

/// Where a candidate goes and which extra form fields travel with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan {
    pub target: UploadTarget,
    pub fields: Vec<(&'static str, String)>,
}

impl SubmissionPlan {
    pub fn for_kind(kind: FileKind, metadata: &UploadMetadata) -> Self {
        if kind.sends_metadata() {
            Self {
                target: UploadTarget::Spectral,
                fields: metadata.form_fields(),
            }
        } else {
            Self {
                target: UploadTarget::Generic,
                fields: Vec::new(),
            }
        }
    }
}

/// Upload page state: the kind hint, the current candidate, metadata and
/// whether a submission is outstanding.
#[derive(Debug, Clone)]
pub struct UploadForm<F> {
    hint: FileKind,
    candidate: Option<UploadCandidate<F>>,
    pub metadata: UploadMetadata,
    error: Option<String>,
    uploading: bool,
}

impl<F> Default for UploadForm<F> {
    fn default() -> Self {
        Self {
            hint: FileKind::default(),
            candidate: None,
            metadata: UploadMetadata::default(),
            error: None,
            uploading: false,
        }
    }
}

impl<F: Clone> UploadForm<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hint(&self) -> FileKind {
        self.hint
    }

    pub fn set_hint(&mut self, hint: FileKind) {
        self.hint = hint;
    }

    pub fn candidate(&self) -> Option<&UploadCandidate<F>> {
        self.candidate.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Kind the page should render for: the candidate's, else the hint.
    pub fn active_kind(&self) -> FileKind {
        self.candidate
            .as_ref()
            .map(UploadCandidate::kind)
            .unwrap_or(self.hint)
    }

    /// Replaces the candidate. A rejected file clears the previous one.
    pub fn select(&mut self, file: F, name: &str, mime_type: &str) -> Result<FileKind, ClientError> {
        self.error = None;
        match UploadCandidate::classify(file, name, mime_type) {
            Ok(candidate) => {
                let kind = candidate.kind();
                self.hint = kind;
                self.candidate = Some(candidate);
                Ok(kind)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.candidate = None;
                Err(err)
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        self.candidate.is_some() && !self.uploading
    }

    /// Marks the form busy and hands out what to send. Returns `None` while a
    /// submission is already in flight or when nothing is selected.
    pub fn begin_submit(&mut self) -> Option<(UploadCandidate<F>, UploadMetadata)> {
        if self.uploading {
            return None;
        }
        let Some(candidate) = self.candidate.clone() else {
            self.error = Some("Please select a file.".to_string());
            return None;
        };
        self.uploading = true;
        self.error = None;
        Some((candidate, self.metadata.clone()))
    }

    /// Records the outcome; on success returns where to navigate.
    pub fn finish_submit(&mut self, outcome: Result<UploadResponse, ClientError>) -> Option<Route> {
        self.uploading = false;
        match outcome {
            Ok(response) => Some(Route::Analysis(response.upload_id)),
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn submit_label(&self) -> String {
        if self.uploading {
            return "Uploading...".to_string();
        }
        match &self.candidate {
            Some(candidate) => format!("Upload {}", candidate.name()),
            None => "Upload Data".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(crop: &str) -> UploadMetadata {
        let mut metadata = UploadMetadata::default();
        metadata.set(MetadataField::CropType, crop);
        metadata
    }

    #[test]
    fn hyperspectral_goes_to_spectral_with_all_fields() {
        let plan = SubmissionPlan::for_kind(FileKind::Hyperspectral, &metadata("Corn"));
        assert_eq!(plan.target, UploadTarget::Spectral);
        assert_eq!(
            plan.fields,
            vec![
                ("crop_type", "Corn".to_string()),
                ("field_id", String::new()),
                ("location", String::new()),
            ]
        );
    }

    #[test]
    fn image_and_sensor_go_to_generic_without_fields() {
        for kind in [FileKind::Image, FileKind::Sensor] {
            let plan = SubmissionPlan::for_kind(kind, &metadata("Corn"));
            assert_eq!(plan.target, UploadTarget::Generic);
            assert!(plan.fields.is_empty());
        }
    }

    #[test]
    fn blank_metadata_is_cleared() {
        let mut metadata = metadata("Wheat");
        metadata.set(MetadataField::CropType, "   ");
        assert_eq!(metadata.crop_type, None);
    }

    #[test]
    fn rejected_selection_clears_previous_candidate() {
        let mut form = UploadForm::new();
        assert_eq!(form.select(1u8, "leaf.png", "image/png").unwrap(), FileKind::Image);
        assert!(form.candidate().is_some());

        assert!(form.select(2u8, "notes.txt", "text/plain").is_err());
        assert!(form.candidate().is_none());
        assert!(form.error().unwrap().contains("Unsupported file type"));
        assert!(!form.can_submit());
    }

    #[test]
    fn selection_overrides_hint() {
        let mut form = UploadForm::new();
        form.set_hint(FileKind::Sensor);
        form.select((), "scene.hdr", "").unwrap();
        assert_eq!(form.active_kind(), FileKind::Hyperspectral);
        assert_eq!(form.hint(), FileKind::Hyperspectral);
    }

    #[test]
    fn submit_without_file_reports_error() {
        let mut form: UploadForm<()> = UploadForm::new();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error(), Some("Please select a file."));
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut form = UploadForm::new();
        form.select((), "leaf.jpg", "image/jpeg").unwrap();
        assert!(form.begin_submit().is_some());
        assert!(form.is_uploading());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
        assert_eq!(form.submit_label(), "Uploading...");
    }

    #[test]
    fn finish_submit_routes_to_analysis_or_reenables() {
        let mut form = UploadForm::new();
        form.select((), "leaf.jpg", "image/jpeg").unwrap();

        form.begin_submit();
        let failed = form.finish_submit(Err(ClientError::UploadFailed("Upload failed".into())));
        assert_eq!(failed, None);
        assert_eq!(form.error(), Some("Upload failed"));
        assert!(form.can_submit());

        form.begin_submit();
        let route = form.finish_submit(Ok(UploadResponse {
            upload_id: "u-7".into(),
            filename: "leaf.jpg".into(),
            message: "ok".into(),
            indices: Default::default(),
        }));
        assert_eq!(route, Some(Route::Analysis("u-7".into())));
        assert!(!form.is_uploading());
    }
}
