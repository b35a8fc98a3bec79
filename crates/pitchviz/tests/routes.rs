use std::fs;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pitchviz::router;
use pitchviz_core::{AppConfig, AppContext};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "pitchviz-test-boundary";

fn fixture_bytes(name: &str) -> Vec<u8> {
    let full_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../pitchviz-core/tests/data")
        .join(name);
    fs::read(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn app() -> Router {
    router(AppContext::new(AppConfig {
        chart_width: 640,
        chart_height: 400,
        ..AppConfig::default()
    }))
}

fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
Content-Type: text/csv\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(uri: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body("file", file_name, content)))
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, String) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_serves_upload_form() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, html) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Rotational Velocity Analysis"));
    assert!(html.contains("name=\"file\""));
    assert!(html.contains("<div id=\"velocity_plot\"></div>"));
}

#[tokio::test]
async fn upload_renders_chart() {
    let content = fixture_bytes("lhp_session.csv");
    let (status, html) = send(upload_request("/upload", "lhp_session.csv", &content)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<svg"));
    assert!(html.contains("Rotational Velocities - LHP - Jordan Lee"));
}

#[tokio::test]
async fn upload_with_missing_columns_shows_message() {
    let content = fixture_bytes("missing_columns.csv");
    let (status, html) = send(upload_request("/upload", "missing_columns.csv", &content)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Missing required columns: "));
    assert!(!html.contains("<svg"));
}

#[tokio::test]
async fn upload_without_file_name_is_no_input() {
    let (status, html) = send(upload_request("/upload", "", b"")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<div id=\"velocity_plot\"></div>"));
}

#[tokio::test]
async fn upload_of_other_file_type_is_rejected() {
    let content = fixture_bytes("rhp_three_rows.csv");
    let (status, html) = send(upload_request("/upload", "session.xlsx", &content)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Only .csv files are accepted"));
}

#[tokio::test]
async fn api_reports_event_times() {
    let content = fixture_bytes("rhp_three_rows.csv");
    let (status, body) = send(upload_request("/api/analyze", "rhp_three_rows.csv", &content)).await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "analyzed");
    assert_eq!(json["result"]["status"], "success");
    assert_eq!(json["result"]["detail"]["athlete_name"], "Sam Reyes");
    assert_eq!(json["result"]["detail"]["foot_contact_time"], 1.0);
    assert_eq!(json["result"]["detail"]["ball_release_time"], 2.0);
    assert!(json["message"].is_null());
}

#[tokio::test]
async fn api_reports_schema_errors() {
    let header = "athlete_name,handedness,time\n";
    let (status, body) = send(upload_request("/api/analyze", "short.csv", header.as_bytes())).await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["result"]["status"], "schema_error");
    assert_eq!(json["result"]["detail"]["kind"], "missing_columns");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Missing required columns: trunk_rotational_velocity_with_respect_to_ground"));
}

#[tokio::test]
async fn api_rejects_empty_file() {
    let (status, body) = send(upload_request("/api/analyze", "blank.csv", b"\n")).await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["outcome"], "rejected");
    assert_eq!(json["message"], "Uploaded file is empty");
}

#[tokio::test]
async fn api_without_file_is_no_input() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body("notes", "notes.csv", b"x")))
        .unwrap();
    let (status, body) = send(request).await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["status"], "no_input");
}
