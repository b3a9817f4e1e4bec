//! Plain-text renderings of backend responses for the terminal.

use serde::Serialize;
use shared::alerts::{SeverityCounts, SeverityFilter, filter_alerts};
use shared::format::{ConfidenceBand, format_confidence, format_timestamp, truncate};
use shared::trends::{TrendSummary, normalized};
use shared::{
    Alert, AnalysisResult, FileKind, GenerationSummary, IndexType, Severity, TrendDataResult,
    UploadResponse,
};
use std::fmt::{self, Write};
use strum::IntoEnumIterator;

const BAR_WIDTH: usize = 30;
const MESSAGE_WIDTH: usize = 72;

/// What `upload --json` prints: the upload plus its analysis when one was resolved.
#[derive(Debug, Serialize)]
pub struct UploadReport<'a> {
    pub kind: FileKind,
    pub upload: &'a UploadResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<&'a AnalysisResult>,
}

pub fn classification(name: &str, kind: FileKind) -> String {
    let target = if kind.sends_metadata() {
        "spectral analysis (with crop metadata)"
    } else {
        "generic upload"
    };
    format!("{}: {} ({}) -> {}", name, kind.label(), kind.formats(), target)
}

pub fn upload(response: &UploadResponse) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", response.message)?;
    writeln!(out, "  Upload ID: {}", response.upload_id)?;
    writeln!(out, "  File:      {}", response.filename)?;
    for (index, stats) in &response.indices {
        writeln!(
            out,
            "  {:<10} min {:.3}  max {:.3}  mean {:.3}",
            index.to_uppercase(),
            stats.min,
            stats.max,
            stats.mean
        )?;
    }
    Ok(out)
}

pub fn analysis(result: &AnalysisResult) -> Result<String, fmt::Error> {
    let band = ConfidenceBand::from_confidence(result.confidence);
    let mut out = String::new();
    writeln!(out, "Analysis for {}", result.upload_id)?;
    writeln!(out, "  Prediction:     {}", result.prediction)?;
    writeln!(
        out,
        "  Confidence:     {} ({})",
        format_confidence(result.confidence),
        band.description()
    )?;
    writeln!(out, "  Recommendation: {}", result.recommendation)?;
    writeln!(out, "  Analyzed at:    {}", format_timestamp(&result.timestamp))?;
    Ok(out)
}

pub fn alerts(
    field_id: &str,
    alerts: &[Alert],
    filter: SeverityFilter,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if alerts.is_empty() {
        writeln!(out, "No alerts for {}", field_id)?;
        return Ok(out);
    }

    let counts = SeverityCounts::from_alerts(alerts);
    let tally: Vec<String> = Severity::iter()
        .map(|severity| format!("{} {}", counts.get(severity), severity))
        .collect();
    writeln!(
        out,
        "{} alerts for {} ({})",
        counts.total(),
        field_id,
        tally.join(", ")
    )?;

    let shown = filter_alerts(alerts, filter);
    if shown.is_empty() {
        writeln!(out, "None match filter: {}", filter.label())?;
        return Ok(out);
    }
    for alert in shown {
        writeln!(
            out,
            "[{}] {} / {} in {} ({})",
            alert.severity.label(),
            alert.kind,
            alert.subtype,
            alert.zone,
            format_timestamp(&alert.date)
        )?;
        writeln!(out, "    {}", truncate(&alert.message, MESSAGE_WIDTH))?;
        if !alert.recommendation.is_empty() {
            writeln!(out, "    -> {}", truncate(&alert.recommendation, MESSAGE_WIDTH))?;
        }
    }
    Ok(out)
}

pub fn trends(result: &TrendDataResult, index: IndexType) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} trend for {}", index.label(), result.upload_id)?;

    let Some(summary) = TrendSummary::from_points(&result.data) else {
        writeln!(out, "  No data points")?;
        return Ok(out);
    };
    writeln!(
        out,
        "  {} ({}): latest {}, min {}, max {}, mean {}",
        summary.direction.label(),
        signed(index, summary.change()),
        index.format_value(summary.latest),
        index.format_value(summary.min),
        index.format_value(summary.max),
        index.format_value(summary.mean)
    )?;

    for (point, scale) in result.data.iter().zip(normalized(&result.data)) {
        let filled = (scale * BAR_WIDTH as f64).round() as usize;
        writeln!(
            out,
            "  {}  {:<width$}  {}",
            point.date,
            "#".repeat(filled.max(1)),
            index.format_value(point.value),
            width = BAR_WIDTH
        )?;
    }
    Ok(out)
}

pub fn generation(summary: &GenerationSummary) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if !summary.message.is_empty() {
        writeln!(out, "{}", summary.message)?;
    }
    writeln!(out, "  Dataset ID:  {}", summary.dataset_id)?;
    writeln!(out, "  Data points: {}", summary.data_points)?;
    if !summary.file_path.is_empty() {
        writeln!(out, "  Stored at:   {}", summary.file_path)?;
    }
    Ok(out)
}

fn signed(index: IndexType, change: f64) -> String {
    let formatted = index.format_value(change.abs());
    if change < 0.0 {
        format!("-{}", formatted)
    } else {
        format!("+{}", formatted)
    }
}
