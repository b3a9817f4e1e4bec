use crate::error::ClientError;
use serde::de::DeserializeOwned;

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub enum RequestBody<'a, F> {
    Empty,
    Json(String),
    Multipart {
        file: &'a F,
        file_name: &'a str,
        fields: Vec<(&'static str, String)>,
    },
}

/// Performs HTTP requests for [`crate::client::ApiClient`].
///
/// Implementations only report transport failures as errors; any status code
/// the server answers with comes back as an [`HttpReply`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    type File;

    async fn get(&self, url: &str) -> Result<HttpReply, ClientError>;

    async fn post(
        &self,
        url: &str,
        body: RequestBody<'_, Self::File>,
    ) -> Result<HttpReply, ClientError>;
}

/// Pulls `detail` out of a JSON error body, or returns `fallback`.
pub fn error_detail(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    #[derive(Debug, Clone, PartialEq)]
    pub struct Recorded {
        pub method: &'static str,
        pub url: String,
        pub file_name: Option<String>,
        pub fields: Vec<(&'static str, String)>,
        pub json: Option<String>,
    }

    /// In-memory transport answering from canned replies keyed by method and url.
    #[derive(Default)]
    pub struct MockTransport {
        replies: RefCell<HashMap<(&'static str, String), VecDeque<Result<HttpReply, ClientError>>>>,
        pub calls: RefCell<Vec<Recorded>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(
            self,
            method: &'static str,
            url: &str,
            reply: Result<HttpReply, ClientError>,
        ) -> Self {
            self.replies
                .borrow_mut()
                .entry((method, url.to_string()))
                .or_default()
                .push_back(reply);
            self
        }

        pub fn calls_to(&self, url: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c.url == url).count()
        }

        fn answer(&self, method: &'static str, url: &str) -> Result<HttpReply, ClientError> {
            self.replies
                .borrow_mut()
                .get_mut(&(method, url.to_string()))
                .and_then(|queue| queue.pop_front())
                .unwrap_or_else(|| Ok(HttpReply::new(404, r#"{"detail":"Not Found"}"#)))
        }
    }

    impl Transport for MockTransport {
        type File = Vec<u8>;

        async fn get(&self, url: &str) -> Result<HttpReply, ClientError> {
            self.calls.borrow_mut().push(Recorded {
                method: "GET",
                url: url.to_string(),
                file_name: None,
                fields: Vec::new(),
                json: None,
            });
            self.answer("GET", url)
        }

        async fn post(
            &self,
            url: &str,
            body: RequestBody<'_, Self::File>,
        ) -> Result<HttpReply, ClientError> {
            let (file_name, fields, json) = match body {
                RequestBody::Empty => (None, Vec::new(), None),
                RequestBody::Json(json) => (None, Vec::new(), Some(json)),
                RequestBody::Multipart {
                    file_name, fields, ..
                } => (Some(file_name.to_string()), fields, None),
            };
            self.calls.borrow_mut().push(Recorded {
                method: "POST",
                url: url.to_string(),
                file_name,
                fields,
                json,
            });
            self.answer("POST", url)
        }
    }
}
