/// Drawing surface dimensions.
///
/// The source image is drawn at the left edge at a fraction of the canvas
/// width; the dithered copy is presented directly to its right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
}

impl CanvasSpec {
    /// Typical desktop browser viewport
    pub const DEFAULT: Self = Self {
        width: 1280,
        height: 720,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width at which the source image is drawn: `floor(width * fraction)`.
    pub fn source_width(&self, fraction: f64) -> u32 {
        (self.width as f64 * fraction).floor() as u32
    }

    /// Size the source image is drawn at, keeping its aspect ratio.
    ///
    /// Returns `None` when the image itself has no pixels.
    pub fn fit_source(
        &self,
        image_width: u32,
        image_height: u32,
        fraction: f64,
    ) -> Option<(u32, u32)> {
        if image_width == 0 || image_height == 0 {
            return None;
        }
        let width = self.source_width(fraction);
        let height = (image_height as f64 * (width as f64 / image_width as f64)).floor() as u32;
        Some((width, height))
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_1280x720() {
        assert_eq!(CanvasSpec::default(), CanvasSpec::new(1280, 720));
    }

    #[test]
    fn test_source_width_floors() {
        let spec = CanvasSpec::new(1001, 10);
        assert_eq!(spec.source_width(0.5), 500);
        assert_eq!(spec.source_width(1.0), 1001);
        assert_eq!(spec.source_width(0.0), 0);
    }

    #[test]
    fn test_fit_source_keeps_aspect_ratio() {
        let spec = CanvasSpec::new(1280, 720);
        // 640 wide, 1000x500 image -> 640x320
        assert_eq!(spec.fit_source(1000, 500, 0.5), Some((640, 320)));
        // 640 wide, 3x7 image -> floor(7 * 640 / 3) = 1493
        assert_eq!(spec.fit_source(3, 7, 0.5), Some((640, 1493)));
    }

    #[test]
    fn test_fit_source_rejects_empty_image() {
        let spec = CanvasSpec::default();
        assert_eq!(spec.fit_source(0, 10, 0.5), None);
        assert_eq!(spec.fit_source(10, 0, 0.5), None);
    }
}
