//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use step_dither::PixelBuffer;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    let content_type = response
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());
    assert_eq!(
        content_type,
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert JSON error body carries the expected status and returns its message
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}",
        expected.as_u16(),
        json["status"]
    );
    json["error"]
        .as_str()
        .expect("Expected error message string")
        .to_string()
}

/// Assert every channel of every pixel is 0 or 255
pub fn assert_two_level(buffer: &PixelBuffer) {
    for (i, &v) in buffer.as_bytes().iter().enumerate() {
        assert!(v == 0 || v == 255, "byte {i} = {v}, expected 0 or 255");
    }
}

/// Extract the `width x height` region at `(x, y)`
pub fn region(
    buffer: &PixelBuffer,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> PixelBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for row in y..y + height {
        data.extend_from_slice(&buffer.row(row)[x * 4..(x + width) * 4]);
    }
    PixelBuffer::from_rgba(data, width, height).unwrap()
}
