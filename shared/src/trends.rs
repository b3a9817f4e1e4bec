use crate::models::TrendDataPoint;

/// Relative change below which a series counts as flat.
const STABLE_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "Rising",
            TrendDirection::Falling => "Falling",
            TrendDirection::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub first: f64,
    pub latest: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub direction: TrendDirection,
}

impl TrendSummary {
    /// `None` for an empty series. Points are taken in the order given.
    pub fn from_points(points: &[TrendDataPoint]) -> Option<Self> {
        let first = points.first()?.value;
        let latest = points.last()?.value;

        let (min, max, sum) = points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), point| (min.min(point.value), max.max(point.value), sum + point.value),
        );
        let mean = sum / points.len() as f64;

        Some(Self {
            first,
            latest,
            min,
            max,
            mean,
            direction: direction(first, latest),
        })
    }

    pub fn change(&self) -> f64 {
        self.latest - self.first
    }
}

fn direction(first: f64, latest: f64) -> TrendDirection {
    let change = latest - first;
    let relative = if first.abs() > f64::EPSILON {
        change / first.abs()
    } else {
        change
    };
    if relative > STABLE_THRESHOLD {
        TrendDirection::Rising
    } else if relative < -STABLE_THRESHOLD {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    }
}

/// Scales each value into `0.0..=1.0` against the series range, for bar widths.
pub fn normalized(points: &[TrendDataPoint]) -> Vec<f64> {
    let Some(summary) = TrendSummary::from_points(points) else {
        return Vec::new();
    };
    let span = summary.max - summary.min;
    points
        .iter()
        .map(|point| {
            if span.abs() < f64::EPSILON {
                1.0
            } else {
                (point.value - summary.min) / span
            }
        })
        .collect()
}
