use crate::foundation::core::AnchorRect;
use crate::raster::buffer::PixelBuffer;

/// Pluggable face detection backend.
///
/// Implement this for a real detector (Haar cascade, ONNX, ...) and hand it to
/// [`crate::GameSession::new`]. Rectangles must be in the frame's pixel coordinates and are only
/// valid for the frame they were computed from. Order is up to the detector.
pub trait FaceDetector: Send + Sync {
    fn detect(&self, frame: &PixelBuffer) -> Vec<AnchorRect>;
}

/// Detector that reports the same rectangles for every frame.
#[derive(Clone, Debug, Default)]
pub struct StaticDetector {
    faces: Vec<AnchorRect>,
}

impl StaticDetector {
    pub fn new(faces: Vec<AnchorRect>) -> Self {
        Self { faces }
    }
}

impl FaceDetector for StaticDetector {
    fn detect(&self, _frame: &PixelBuffer) -> Vec<AnchorRect> {
        self.faces.clone()
    }
}
