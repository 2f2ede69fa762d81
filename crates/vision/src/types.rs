//! Vision result model.
//!
//! Every attribute the service may omit is an `Option`; the rendering
//! defaults live in [`crate::fusion`].

/// Attributes of one detected face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceAttributes {
    pub age_range: Option<AgeRange>,
    pub gender: Option<Gender>,
    pub emotions: Vec<Emotion>,
}

/// Estimated age bounds; a missing bound renders as `?`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgeRange {
    pub low: Option<u32>,
    pub high: Option<u32>,
}

/// Gender label with confidence in `[0, 100]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gender {
    pub value: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emotion {
    pub kind: Option<String>,
    pub confidence: Option<f64>,
}

impl Emotion {
    pub fn new(kind: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind: Some(kind.into()),
            confidence: Some(confidence),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CelebrityMatch {
    pub name: Option<String>,
    pub match_confidence: Option<f64>,
}

impl CelebrityMatch {
    pub fn new(name: impl Into<String>, match_confidence: f64) -> Self {
        Self {
            name: Some(name.into()),
            match_confidence: Some(match_confidence),
        }
    }
}

/// Granularity of a text detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextGranularity {
    Line,
    Word,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextDetection {
    pub detected_text: Option<String>,
    pub granularity: Option<TextGranularity>,
}

impl TextDetection {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            detected_text: Some(text.into()),
            granularity: Some(TextGranularity::Line),
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self {
            detected_text: Some(text.into()),
            granularity: Some(TextGranularity::Word),
        }
    }
}

/// The three analyses of one image, correlated only by their source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisionAnalysisResult {
    pub faces: Vec<FaceAttributes>,
    pub celebrities: Vec<CelebrityMatch>,
    pub texts: Vec<TextDetection>,
}
