use crate::models::{Alert, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    pub const ALL: [SeverityFilter; 4] = [
        SeverityFilter::All,
        SeverityFilter::Only(Severity::High),
        SeverityFilter::Only(Severity::Medium),
        SeverityFilter::Only(Severity::Low),
    ];

    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(severity) => alert.severity == *severity,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityFilter::All => "All",
            SeverityFilter::Only(severity) => severity.label(),
        }
    }
}

pub fn filter_alerts(alerts: &[Alert], filter: SeverityFilter) -> Vec<&Alert> {
    alerts.iter().filter(|alert| filter.matches(alert)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut counts, alert| {
            match alert.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
            counts
        })
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}
