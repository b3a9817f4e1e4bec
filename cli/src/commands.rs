use crate::args::{Cli, Commands};
use crate::output::{self, UploadReport};
use crate::sniff::load_file;
use crate::transport::ReqwestTransport;
use anyhow::{Context, Result};
use serde::Serialize;
use shared::upload::MetadataField;
use shared::{ApiClient, ApiConfig, SensorGenerationRequest, UploadCandidate, UploadMetadata};
use std::io::Write;
use std::time::Duration;

pub fn build_client(cli: &Cli) -> Result<ApiClient<ReqwestTransport>> {
    let config = match &cli.api_base {
        Some(base) => ApiConfig::new(base),
        None => ApiConfig::from_env(),
    };
    let transport = ReqwestTransport::new(cli.timeout_secs.map(Duration::from_secs))
        .context("failed to build HTTP client")?;
    let client = ApiClient::new(transport, config);
    log::info!("Using backend at {}", client.config().base_url());
    Ok(client)
}

/// Runs one subcommand, writing its report to `out`.
pub async fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let client = build_client(&cli)?;
    let json = cli.json;

    match cli.command {
        Commands::Upload {
            file,
            crop_type,
            field_id,
            location,
            mime,
            no_analyze,
        } => {
            let local = load_file(&file, mime.as_deref()).await?;
            let name = local.name.clone();
            let mime = local.mime.clone();
            let candidate = UploadCandidate::classify(local, name, &mime)?;

            let mut metadata = UploadMetadata::default();
            for (field, value) in [
                (MetadataField::CropType, crop_type),
                (MetadataField::FieldId, field_id),
                (MetadataField::Location, location),
            ] {
                if let Some(value) = value {
                    metadata.set(field, value);
                }
            }
            if !candidate.kind().sends_metadata() && metadata != UploadMetadata::default() {
                log::warn!(
                    "{} is {}; crop metadata is only sent with hyperspectral data",
                    candidate.name(),
                    candidate.kind().label()
                );
            }

            let response = client.submit(&candidate, &metadata).await?;
            let analysis = if no_analyze {
                None
            } else {
                match client.resolve(&response.upload_id).await {
                    Ok(result) => Some(result),
                    Err(err) => {
                        emit_upload(out, json, candidate.kind(), &response, None)?;
                        return Err(err.into());
                    }
                }
            };
            emit_upload(out, json, candidate.kind(), &response, analysis.as_ref())?;
        }

        Commands::Analyze { upload_id } => {
            let result = client.resolve(&upload_id).await?;
            emit(out, json, &result, output::analysis)?;
        }

        Commands::Result { upload_id } => {
            let result = match client.fetch_analysis_result(&upload_id).await {
                Err(err) if err.is_not_found() => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("no stored analysis for {}; try `krishi analyze`", upload_id)));
                }
                other => other?,
            };
            emit(out, json, &result, output::analysis)?;
        }

        Commands::Alerts { field_id, severity } => {
            let alerts = client.fetch_alerts(&field_id).await?;
            if json {
                let shown = shared::alerts::filter_alerts(&alerts, severity);
                writeln!(out, "{}", serde_json::to_string_pretty(&shown)?)?;
            } else {
                write!(out, "{}", output::alerts(&field_id, &alerts, severity)?)?;
            }
        }

        Commands::Trends { dataset_id, index } => {
            let result = client.fetch_trends(&dataset_id, index).await?;
            emit(out, json, &result, |result| output::trends(result, index))?;
        }

        Commands::Generate {
            start,
            end,
            field_id,
            crop_type,
            location,
        } => {
            let request = SensorGenerationRequest {
                field_id,
                crop_type,
                location,
                ..SensorGenerationRequest::new(start, end)
            };
            let summary = client.generate_sensor_data(&request).await?;
            emit(out, json, &summary, output::generation)?;
        }

        Commands::Classify { file, mime } => {
            let local = load_file(&file, mime.as_deref()).await?;
            let kind = shared::classify(&local.name, &local.mime)?;
            if json {
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({ "file": local.name, "kind": kind })
                )?;
            } else {
                writeln!(out, "{}", output::classification(&local.name, kind))?;
            }
        }
    }

    Ok(())
}

fn emit<W: Write, T: Serialize>(
    out: &mut W,
    json: bool,
    value: &T,
    render: impl FnOnce(&T) -> Result<String, std::fmt::Error>,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        write!(out, "{}", render(value)?)?;
    }
    Ok(())
}

fn emit_upload<W: Write>(
    out: &mut W,
    json: bool,
    kind: shared::FileKind,
    upload: &shared::UploadResponse,
    analysis: Option<&shared::AnalysisResult>,
) -> Result<()> {
    if json {
        let report = UploadReport {
            kind,
            upload,
            analysis,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }
    write!(out, "{}", output::upload(upload)?)?;
    if let Some(result) = analysis {
        writeln!(out)?;
        write!(out, "{}", output::analysis(result)?)?;
    }
    Ok(())
}
