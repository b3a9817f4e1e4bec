use chrono::{DateTime, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `0.8734` -> `"87.34%"`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        let percent = confidence * 100.0;
        if percent >= 90.0 {
            ConfidenceBand::High
        } else if percent >= 70.0 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "Highly Confident",
            ConfidenceBand::Moderate => "Moderately Confident",
            ConfidenceBand::Low => "Low Confidence - Verify Manually",
        }
    }
}

/// CSS modifier for the confidence meter.
pub fn confidence_tier(confidence: f64) -> &'static str {
    let percent = confidence * 100.0;
    if percent < 50.0 {
        "danger"
    } else if percent < 70.0 {
        "warning"
    } else {
        "success"
    }
}

pub fn is_celebration(confidence: f64) -> bool {
    confidence > 0.95
}

/// Accepts RFC 3339 and the naive ISO-8601 the backend emits. Anything else is
/// returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }
    timestamp.to_string()
}

/// Cuts `text` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len < 3 {
        return text.chars().take(max_len).collect();
    }
    let keep = max_len - 3;
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}
