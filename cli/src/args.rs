use clap::{Parser, Subcommand};
use shared::alerts::SeverityFilter;
use shared::route::DEFAULT_FIELD_ID;
use shared::{IndexType, Severity};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "krishi")]
#[command(about = "KrishiDrishti crop health client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (defaults to $KRISHI_API_BASE_URL, then localhost)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds. No timeout when omitted.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify and upload a file, then resolve its analysis
    Upload {
        #[arg(required = true)]
        file: PathBuf,

        /// Crop type (hyperspectral only)
        #[arg(long)]
        crop_type: Option<String>,

        /// Field id (hyperspectral only)
        #[arg(long)]
        field_id: Option<String>,

        /// Location (hyperspectral only)
        #[arg(long)]
        location: Option<String>,

        /// MIME type to report instead of sniffing the content
        #[arg(long)]
        mime: Option<String>,

        /// Stop after the upload
        #[arg(long)]
        no_analyze: bool,
    },

    /// Trigger analysis for an upload, falling back to the stored result
    Analyze {
        #[arg(required = true)]
        upload_id: String,
    },

    /// Fetch the stored analysis result only
    Result {
        #[arg(required = true)]
        upload_id: String,
    },

    /// List alerts for a field
    Alerts {
        #[arg(default_value = DEFAULT_FIELD_ID)]
        field_id: String,

        /// all/high/medium/low
        #[arg(short, long, default_value = "all", value_parser = parse_severity)]
        severity: SeverityFilter,
    },

    /// Show a trend series for a dataset
    Trends {
        #[arg(default_value = DEFAULT_FIELD_ID)]
        dataset_id: String,

        /// ndvi/soil_moisture/temperature/humidity
        #[arg(short, long, default_value = "ndvi", value_parser = parse_index)]
        index: IndexType,
    },

    /// Ask the backend to generate synthetic sensor data
    Generate {
        /// YYYY-MM-DD
        #[arg(long, required = true)]
        start: String,

        /// YYYY-MM-DD
        #[arg(long, required = true)]
        end: String,

        #[arg(long, default_value = DEFAULT_FIELD_ID)]
        field_id: String,

        #[arg(long, default_value = "corn")]
        crop_type: String,

        #[arg(long, default_value = "default")]
        location: String,
    },

    /// Show how a file would be routed without uploading it
    Classify {
        #[arg(required = true)]
        file: PathBuf,

        #[arg(long)]
        mime: Option<String>,
    },
}

pub fn parse_severity(value: &str) -> Result<SeverityFilter, String> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(SeverityFilter::All);
    }
    Severity::from_str(&value.to_lowercase())
        .map(SeverityFilter::Only)
        .map_err(|_| format!("unknown severity {:?} (expected all, high, medium or low)", value))
}

pub fn parse_index(value: &str) -> Result<IndexType, String> {
    IndexType::from_str(&value.to_lowercase().replace('-', "_")).map_err(|_| {
        format!(
            "unknown index {:?} (expected ndvi, soil_moisture, temperature or humidity)",
            value
        )
    })
}
