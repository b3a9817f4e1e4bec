pub const DEFAULT_FIELD_ID: &str = "field_1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Upload,
    Analysis(String),
    Alerts(String),
    Trends(String),
    NotFound,
}

impl Route {
    /// Parses a location path. Query string and fragment are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["upload"] => Route::Upload,
            ["analysis", id] => Route::Analysis(decode(id)),
            ["alerts"] => Route::Alerts(DEFAULT_FIELD_ID.to_string()),
            ["alerts", id] => Route::Alerts(decode(id)),
            ["trends"] => Route::Trends(DEFAULT_FIELD_ID.to_string()),
            ["trends", id] => Route::Trends(decode(id)),
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::Analysis(id) => format!("/analysis/{}", urlencoding::encode(id)),
            Route::Alerts(id) => format!("/alerts/{}", urlencoding::encode(id)),
            Route::Trends(id) => format!("/trends/{}", urlencoding::encode(id)),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home | Route::Upload => "Data Upload Center",
            Route::Analysis(_) => "Analysis Results",
            Route::Alerts(_) => "Field Alerts & Recommendations",
            Route::Trends(_) => "Temporal Trends",
            Route::NotFound => "Page Not Found",
        }
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/upload"), Route::Upload);
        assert_eq!(Route::from_path("/upload/"), Route::Upload);
        assert_eq!(
            Route::from_path("/analysis/3f2a-11"),
            Route::Analysis("3f2a-11".into())
        );
        assert_eq!(
            Route::from_path("/alerts"),
            Route::Alerts(DEFAULT_FIELD_ID.into())
        );
        assert_eq!(
            Route::from_path("/trends/ds-4?index_type=ndvi"),
            Route::Trends("ds-4".into())
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::from_path("/dashboard"), Route::NotFound);
        assert_eq!(Route::from_path("/analysis"), Route::NotFound);
        assert_eq!(Route::from_path("/analysis/a/b"), Route::NotFound);
    }

    #[test]
    fn ids_survive_encoding() {
        let route = Route::Analysis("north field/7".into());
        let path = route.to_path();
        assert_eq!(path, "/analysis/north%20field%2F7");
        assert_eq!(Route::from_path(&path), route);
    }
}
