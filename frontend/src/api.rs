use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use shared::config::DEFAULT_API_BASE;
use shared::{ApiClient, ApiConfig, ClientError, HttpReply, RequestBody, Transport};
use wasm_bindgen::JsValue;

/// Backend base URL, fixed at build time through `KRISHI_API_BASE_URL`.
pub fn api_config() -> ApiConfig {
    ApiConfig::new(option_env!("KRISHI_API_BASE_URL").unwrap_or(DEFAULT_API_BASE))
}

pub fn client() -> ApiClient<GlooTransport> {
    ApiClient::new(GlooTransport, api_config())
}

/// Browser fetch through gloo-net.
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    type File = GlooFile;

    async fn get(&self, url: &str) -> Result<HttpReply, ClientError> {
        let response = Request::get(url).send().await.map_err(network)?;
        into_reply(response).await
    }

    async fn post(
        &self,
        url: &str,
        body: RequestBody<'_, Self::File>,
    ) -> Result<HttpReply, ClientError> {
        let request = match body {
            RequestBody::Empty => Request::post(url).build(),
            RequestBody::Json(json) => Request::post(url)
                .header("Content-Type", "application/json")
                .body(json),
            RequestBody::Multipart {
                file,
                file_name,
                fields,
            } => {
                let form_data = web_sys::FormData::new().map_err(js_error)?;
                form_data
                    .append_with_blob_and_filename("file", file.as_ref(), file_name)
                    .map_err(js_error)?;
                for (name, value) in fields {
                    form_data.append_with_str(name, &value).map_err(js_error)?;
                }
                Request::post(url).body(form_data)
            }
        }
        .map_err(|err| ClientError::InvalidRequest(err.to_string()))?;

        let response = request.send().await.map_err(network)?;
        into_reply(response).await
    }
}

async fn into_reply(response: Response) -> Result<HttpReply, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(network)?;
    Ok(HttpReply::new(status, body))
}

fn network(err: gloo_net::Error) -> ClientError {
    log::error!("Fetch error: {:?}", err);
    ClientError::Network(err.to_string())
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::InvalidRequest(format!("{:?}", err))
}
