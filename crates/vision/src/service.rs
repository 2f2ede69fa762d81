use {async_trait::async_trait, tracing::warn};

use crate::{
    error::Result,
    types::{CelebrityMatch, FaceAttributes, TextDetection, VisionAnalysisResult},
};

/// The three independent analyses the bot runs on every image.
#[async_trait]
pub trait VisionService: Send + Sync {
    async fn detect_faces(&self, image: &[u8]) -> Result<Vec<FaceAttributes>>;

    async fn recognize_celebrities(&self, image: &[u8]) -> Result<Vec<CelebrityMatch>>;

    async fn detect_text(&self, image: &[u8]) -> Result<Vec<TextDetection>>;
}

/// Run all three analyses concurrently and collect whatever succeeded.
///
/// A failing analysis is logged and contributes no data; it never cancels
/// the other two.
pub async fn analyze(service: &dyn VisionService, image: &[u8]) -> VisionAnalysisResult {
    let (faces, celebrities, texts) = tokio::join!(
        service.detect_faces(image),
        service.recognize_celebrities(image),
        service.detect_text(image),
    );
    VisionAnalysisResult {
        faces: or_empty("detect_faces", faces),
        celebrities: or_empty("recognize_celebrities", celebrities),
        texts: or_empty("detect_text", texts),
    }
}

fn or_empty<T>(operation: &'static str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(operation, error = %e, "vision analysis failed, continuing without it");
        Vec::new()
    })
}
