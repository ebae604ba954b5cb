//! Integration tests for the canvas HTTP endpoints.

mod common;

use axum::http::StatusCode;
use common::fixtures::{decode, gradient_png, solid_png, solid_rgba};
use common::{
    assert_json_error, assert_ok, assert_png, assert_two_level, region, MockHttpServer, TestApp,
};
use dithercanvas::models::{AppConfig, CanvasSpec};
use pretty_assertions::assert_eq;
use step_dither::{dither, DitherOptions, PixelBuffer};

fn small_config() -> AppConfig {
    AppConfig {
        canvas: CanvasSpec::new(8, 4),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(small_config());
    let response = app.get("/health").await;
    assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_canvas_shows_source_and_dithered_copy() {
    let app = TestApp::with_image(&solid_png(4, 2, [200, 200, 200, 255]), small_config());

    let response = app.get("/api/canvas").await;
    assert_png(&response);

    let canvas = decode(response.bytes());
    assert_eq!(canvas.width(), 8);
    assert_eq!(canvas.height(), 4);

    // left: the source as drawn (canvas is 8 wide, image drawn 4 wide)
    let source = region(&canvas, 0, 0, 4, 2);
    assert_eq!(source.as_bytes(), solid_rgba(4, 2, [200, 200, 200, 255]).as_slice());

    // right: exactly what the engine produces for that source
    let mut expected_source =
        PixelBuffer::from_rgba(solid_rgba(4, 2, [200, 200, 200, 255]), 4, 2).unwrap();
    let expected = dither(&mut expected_source, &DitherOptions::new()).unwrap();
    assert_eq!(region(&canvas, 4, 0, 4, 2), expected);

    // below the image nothing was drawn
    assert!(region(&canvas, 0, 2, 8, 2).as_bytes().iter().all(|&b| b == 0));
}

#[tokio::test]
async fn test_canvas_default_steps_are_two_level() {
    let config = AppConfig {
        canvas: CanvasSpec::new(32, 8),
        ..Default::default()
    };
    let app = TestApp::with_image(&gradient_png(16, 8), config);

    let response = app.get("/api/canvas").await;
    assert_png(&response);

    let canvas = decode(response.bytes());
    assert_two_level(&region(&canvas, 16, 0, 16, 8));
}

#[tokio::test]
async fn test_canvas_grayscale_query() {
    let app = TestApp::with_image(&solid_png(4, 4, [200, 30, 90, 255]), small_config());

    let response = app.get("/api/canvas?grayscale=true&steps=3").await;
    assert_png(&response);

    let canvas = decode(response.bytes());
    let dithered = region(&canvas, 4, 0, 4, 4);
    for px in dithered.as_bytes().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
}

#[tokio::test]
async fn test_canvas_zero_steps_is_bad_request() {
    let app = TestApp::with_image(&solid_png(4, 4, [1, 2, 3, 255]), small_config());

    let response = app.get("/api/canvas?steps=0").await;
    let message = assert_json_error(&response, StatusCode::BAD_REQUEST);
    assert!(message.contains("steps must be at least 1"), "got: {message}");
}

#[tokio::test]
async fn test_canvas_malformed_query_is_json_bad_request() {
    let app = TestApp::with_image(&solid_png(4, 4, [1, 2, 3, 255]), small_config());

    for query in ["steps=abc", "steps=-1", "grayscale=maybe"] {
        let response = app.get(&format!("/api/canvas?{query}")).await;
        let message = assert_json_error(&response, StatusCode::BAD_REQUEST);
        assert!(
            message.contains("Failed to deserialize query string"),
            "{query}: {message}"
        );
    }
}

#[tokio::test]
async fn test_canvas_missing_image_is_bad_gateway() {
    let app = TestApp::new(AppConfig {
        image_url: "does-not-exist.png".to_string(),
        ..small_config()
    });

    let response = app.get("/api/canvas").await;
    let message = assert_json_error(&response, StatusCode::BAD_GATEWAY);
    assert!(message.contains("does-not-exist.png"), "got: {message}");
}

#[tokio::test]
async fn test_canvas_invalid_png_is_bad_gateway() {
    let app = TestApp::with_image(b"GIF89a not a png", small_config());

    let response = app.get("/api/canvas").await;
    let message = assert_json_error(&response, StatusCode::BAD_GATEWAY);
    assert!(message.contains("PNG decode error"), "got: {message}");
}

#[tokio::test]
async fn test_canvas_from_remote_image() {
    let mock = MockHttpServer::start().await;
    mock.mock_png("/img/test-01.png", solid_png(2, 2, [0, 0, 0, 255]), 1)
        .await;

    let app = TestApp::new(AppConfig {
        image_url: mock.url_for("/img/test-01.png"),
        ..small_config()
    });

    let response = app.get("/api/canvas").await;
    assert_png(&response);

    // black is a fixed point of the dither
    let canvas = decode(response.bytes());
    assert_eq!(
        region(&canvas, 4, 0, 4, 4).as_bytes(),
        solid_rgba(4, 4, [0, 0, 0, 255]).as_slice()
    );
}

#[tokio::test]
async fn test_canvas_upstream_error_is_bad_gateway() {
    let mock = MockHttpServer::start().await;
    mock.mock_error("/missing.png", 404, "Not Found").await;

    let app = TestApp::new(AppConfig {
        image_url: mock.url_for("/missing.png"),
        ..small_config()
    });

    let response = app.get("/api/canvas").await;
    let message = assert_json_error(&response, StatusCode::BAD_GATEWAY);
    assert!(message.contains("404"), "got: {message}");
}

#[tokio::test]
async fn test_canvas_is_not_cacheable() {
    let app = TestApp::with_image(&solid_png(2, 2, [9, 9, 9, 255]), small_config());

    let response = app.get("/api/canvas").await;
    assert_png(&response);
    assert_eq!(
        response
            .headers
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
}

#[tokio::test]
async fn test_config_endpoint() {
    let app = TestApp::new(AppConfig {
        steps: 3,
        grayscale: true,
        ..small_config()
    });

    let response = app.get("/api/config").await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["steps"], 3);
    assert_eq!(json["grayscale"], true);
    assert_eq!(json["canvas"]["width"], 8);
    assert_eq!(json["edge_mode"], "strict");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new(small_config());
    let response = app.get("/api/nothing-here").await;
    let message = assert_json_error(&response, StatusCode::NOT_FOUND);
    assert_eq!(message, "Not found");
}
