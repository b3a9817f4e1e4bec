//! Runs the CLI against a throwaway actix-web backend on localhost.

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{App, Error, HttpRequest, HttpResponse, HttpServer, web};
use clap::Parser;
use futures::{StreamExt, TryStreamExt};
use krishi::args::Cli;
use krishi::commands;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    value: String,
}

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path: String,
    body: String,
    parts: Vec<Part>,
}

impl Seen {
    fn part(&self, name: &str) -> &Part {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .unwrap_or_else(|| panic!("no form field {}", name))
    }
}

struct StubState {
    routes: HashMap<(String, String), (u16, String)>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

struct Stub {
    base: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Stub {
    fn start(routes: &[(&str, &str, u16, &str)]) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            routes: routes
                .iter()
                .map(|(method, path, status, body)| {
                    ((method.to_string(), path.to_string()), (*status, body.to_string()))
                })
                .collect(),
            seen: seen.clone(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind stub backend");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            base: format!("http://{}/api", addr),
            seen,
        }
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    async fn run(&self, args: &[&str]) -> (anyhow::Result<()>, String) {
        let mut argv = vec!["krishi", "--api-base", self.base.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let result = commands::execute(cli, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }
}

async fn record(
    req: HttpRequest,
    mut payload: web::Payload,
    stub: web::Data<StubState>,
) -> Result<HttpResponse, Error> {
    let is_multipart = req
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let mut body = Vec::new();
    let mut parts = Vec::new();
    if is_multipart {
        let mut form = Multipart::new(req.headers(), payload);
        while let Some(mut field) = form.try_next().await? {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                value.extend_from_slice(&chunk?);
            }
            parts.push(Part {
                name: field.name().unwrap_or_default().to_string(),
                file_name: field
                    .content_disposition()
                    .and_then(|disposition| disposition.get_filename())
                    .map(str::to_string),
                content_type: field.content_type().map(|mime| mime.to_string()),
                value: String::from_utf8_lossy(&value).into_owned(),
            });
        }
    } else {
        while let Some(chunk) = payload.next().await {
            body.extend_from_slice(&chunk?);
        }
    }

    let method = req.method().to_string();
    let path = req.uri().to_string();
    stub.seen.lock().unwrap().push(Seen {
        method: method.clone(),
        path: path.clone(),
        body: String::from_utf8_lossy(&body).into_owned(),
        parts,
    });

    let (status, reply) = stub
        .routes
        .get(&(method, path))
        .cloned()
        .unwrap_or((404, r#"{"detail":"Not Found"}"#.to_string()));
    Ok(HttpResponse::build(StatusCode::from_u16(status).unwrap())
        .content_type("application/json")
        .body(reply))
}

fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> String {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path.to_string_lossy().into_owned()
}

const ANALYSIS: &str = r#"{"upload_id":"u-77","prediction":"Leaf Blight","confidence":0.91,"recommendation":"Apply fungicide","timestamp":"2024-06-01T09:30:00"}"#;

#[actix_web::test]
async fn hyperspectral_upload_goes_to_spectral_with_metadata_and_falls_back() {
    let stub = Stub::start(&[
        (
            "POST",
            "/api/spectral/analyze",
            200,
            r#"{"upload_id":"u-77","filename":"field1.hdr","message":"Spectral analysis complete","indices":{"ndvi":{"min":0.1,"max":0.8,"mean":0.55}}}"#,
        ),
        ("POST", "/api/analyze/u-77", 500, r#"{"detail":"model offline"}"#),
        ("GET", "/api/results/u-77", 200, ANALYSIS),
    ]);
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file = write_fixture(dir.path(), "field1.hdr", b"ENVI\nsamples = 4\n");

    let (result, out) = stub
        .run(&["upload", &file, "--crop-type", "Corn", "--json"])
        .await;
    result.unwrap();

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["kind"], "hyperspectral");
    assert_eq!(report["upload"]["upload_id"], "u-77");
    assert_eq!(report["analysis"]["prediction"], "Leaf Blight");

    let seen = stub.seen();
    let paths: Vec<&str> = seen.iter().map(|s| s.path.as_str()).collect();
    assert_eq!(
        paths,
        ["/api/spectral/analyze", "/api/analyze/u-77", "/api/results/u-77"]
    );
    let upload = &seen[0];
    assert_eq!(upload.method, "POST");
    assert_eq!(upload.part("file").file_name.as_deref(), Some("field1.hdr"));
    assert_eq!(upload.part("file").value, "ENVI\nsamples = 4\n");
    assert_eq!(upload.part("crop_type").value, "Corn");
    assert_eq!(upload.part("field_id").value, "");
    assert_eq!(upload.part("location").value, "");
}

#[actix_web::test]
async fn image_upload_goes_to_generic_endpoint_without_metadata() {
    let stub = Stub::start(&[(
        "POST",
        "/api/upload",
        200,
        r#"{"upload_id":"u-5","filename":"photo.png","message":"File uploaded successfully"}"#,
    )]);
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file = write_fixture(dir.path(), "photo.png", b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");

    let (result, out) = stub
        .run(&["upload", &file, "--crop-type", "Corn", "--no-analyze"])
        .await;
    result.unwrap();
    assert!(out.contains("Upload ID: u-5"));

    let seen = stub.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/api/upload");
    assert_eq!(seen[0].parts.len(), 1);
    let file = seen[0].part("file");
    assert_eq!(file.file_name.as_deref(), Some("photo.png"));
    assert_eq!(file.content_type.as_deref(), Some("image/png"));
}

#[actix_web::test]
async fn unsupported_file_never_reaches_the_backend() {
    let stub = Stub::start(&[]);
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file = write_fixture(dir.path(), "notes.txt", b"just some notes");

    let (result, _) = stub.run(&["upload", &file]).await;
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Unsupported file type."));
    assert!(stub.seen().is_empty());
}

#[actix_web::test]
async fn analysis_unavailable_when_both_paths_fail() {
    let stub = Stub::start(&[("POST", "/api/analyze/ghost", 500, "{}")]);

    let (result, out) = stub.run(&["analyze", "ghost"]).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Failed to load analysis for ID: ghost"
    );
    assert!(out.is_empty());
    assert_eq!(stub.seen().len(), 2);
}

#[actix_web::test]
async fn missing_alerts_are_an_empty_list() {
    let stub = Stub::start(&[]);

    let (result, out) = stub.run(&["alerts"]).await;
    result.unwrap();
    assert_eq!(out, "No alerts for field_1\n");
    assert_eq!(stub.seen()[0].path, "/api/alerts/field_1");
}

#[actix_web::test]
async fn trends_request_carries_index_type() {
    let stub = Stub::start(&[(
        "GET",
        "/api/sensors/trends/ds-3?index_type=soil_moisture",
        200,
        r#"{"upload_id":"ds-3","index_type":"soil_moisture","data":[{"date":"2024-01-01","value":30.0},{"date":"2024-01-02","value":33.0}],"timestamp":"2024-01-03T00:00:00"}"#,
    )]);

    let (result, out) = stub
        .run(&["trends", "ds-3", "--index", "soil_moisture"])
        .await;
    result.unwrap();
    assert!(out.contains("Soil Moisture trend for ds-3"));
    assert!(out.contains("Rising (+3.0%)"));
}

#[actix_web::test]
async fn generate_posts_json_request() {
    let stub = Stub::start(&[(
        "POST",
        "/api/sensors/generate",
        200,
        r#"{"dataset_id":"ds-new","data_points":31,"file_path":"data/ds-new.csv","message":"Generated"}"#,
    )]);

    let (result, out) = stub
        .run(&["generate", "--start", "2024-01-01", "--end", "2024-01-31"])
        .await;
    result.unwrap();
    assert!(out.contains("Dataset ID:  ds-new"));

    let body: serde_json::Value = serde_json::from_str(&stub.seen()[0].body).unwrap();
    assert_eq!(body["start_date"], "2024-01-01");
    assert_eq!(body["field_id"], "field_1");
}
