use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use shared::{ClientError, HttpReply, RequestBody, Transport};
use std::time::Duration;

/// A file read from disk, ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// No timeout unless one is given.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for ReqwestTransport {
    type File = LocalFile;

    async fn get(&self, url: &str) -> Result<HttpReply, ClientError> {
        let response = self.client.get(url).send().await.map_err(network)?;
        into_reply(response).await
    }

    async fn post(
        &self,
        url: &str,
        body: RequestBody<'_, Self::File>,
    ) -> Result<HttpReply, ClientError> {
        let request = self.client.post(url);
        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request.header(CONTENT_TYPE, "application/json").body(json),
            RequestBody::Multipart {
                file,
                file_name,
                fields,
            } => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file_name.to_string())
                    .mime_str(&file.mime)
                    .map_err(|err| ClientError::InvalidRequest(err.to_string()))?;
                let form = fields
                    .into_iter()
                    .fold(Form::new().part("file", part), |form, (name, value)| {
                        form.text(name, value)
                    });
                request.multipart(form)
            }
        };

        let response = request.send().await.map_err(network)?;
        into_reply(response).await
    }
}

async fn into_reply(response: reqwest::Response) -> Result<HttpReply, ClientError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(network)?;
    log::debug!("-> {} ({} bytes)", status, body.len());
    Ok(HttpReply::new(status, body))
}

fn network(err: reqwest::Error) -> ClientError {
    ClientError::Network(err.to_string())
}
