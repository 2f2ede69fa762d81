//! Turns the three analyses of one image into a single reply.
//!
//! Faces take priority: when at least one face was detected the reply is a
//! four-line profile of the first face (age, gender, emotion, closest
//! celebrity), and detected text is not shown even if present. Only when no
//! face exists are `LINE` text detections surfaced.

use crate::types::{
    CelebrityMatch, Emotion, FaceAttributes, TextDetection, TextGranularity, VisionAnalysisResult,
};

pub const NOTHING_DETECTED: &str = "顔も文字も検出できませんでした。";
pub const NO_EMOTION: &str = "感情が検出できませんでした。";
pub const NO_CELEBRITY: &str = "有名人は検出できませんでした。";
const UNKNOWN: &str = "不明";

/// Build the reply text for one analyzed image.
#[must_use]
pub fn synthesize(result: &VisionAnalysisResult) -> String {
    match result.faces.first() {
        Some(face) => describe_face(face, &result.celebrities),
        None => describe_text(&result.texts),
    }
}

fn describe_face(face: &FaceAttributes, celebrities: &[CelebrityMatch]) -> String {
    format!(
        "・推定年齢: {}\n・性別: {}\n・感情：{}\n・最も似ている有名人: {}",
        age_text(face),
        gender_text(face),
        emotion_text(&face.emotions),
        celebrity_text(celebrities),
    )
}

fn age_text(face: &FaceAttributes) -> String {
    let bound = |b: Option<u32>| b.map_or_else(|| "?".to_string(), |v| v.to_string());
    let (low, high) = face
        .age_range
        .as_ref()
        .map_or((None, None), |r| (r.low, r.high));
    format!("{}-{}歳", bound(low), bound(high))
}

fn gender_text(face: &FaceAttributes) -> String {
    let gender = face.gender.as_ref();
    let label = match gender.and_then(|g| g.value.as_deref()) {
        Some("Male") => "男性",
        Some("Female") => "女性",
        _ => UNKNOWN,
    };
    // Truncated, not rounded: 97.6 renders as 97.
    let confidence = gender.and_then(|g| g.confidence).unwrap_or(0.0).trunc() as i64;
    format!("{label} ({confidence}%)")
}

fn emotion_text(emotions: &[Emotion]) -> String {
    let typed = emotions
        .iter()
        .filter_map(|e| e.kind.as_deref().map(|kind| (kind, e.confidence.unwrap_or(0.0))));
    let Some((kind, _)) = first_max_by(typed, |(_, confidence)| *confidence) else {
        return NO_EMOTION.to_string();
    };
    match kind {
        "HAPPY" => "楽しそうですね！いい気分が伝わってきます。".to_string(),
        "SAD" => "何か悲しいことがありましたか？大丈夫ですか？".to_string(),
        "ANGRY" => "怒っているみたいですね。リラックスしましょう。".to_string(),
        "SURPRISED" => "驚いた顔ですね！何かいいことがありましたか？".to_string(),
        "CALM" => "落ち着いた感じがいいですね。".to_string(),
        "CONFUSED" => "少し混乱しているみたいですね。".to_string(),
        other => format!("{other}のようですね。"),
    }
}

fn celebrity_text(celebrities: &[CelebrityMatch]) -> String {
    let Some(top) = first_max_by(celebrities.iter(), |c| c.match_confidence.unwrap_or(0.0)) else {
        return NO_CELEBRITY.to_string();
    };
    format!(
        "{} ({:.1}%)",
        top.name.as_deref().unwrap_or(UNKNOWN),
        top.match_confidence.unwrap_or(0.0)
    )
}

fn describe_text(texts: &[TextDetection]) -> String {
    let lines: Vec<&str> = texts
        .iter()
        .filter(|t| t.granularity == Some(TextGranularity::Line))
        .filter_map(|t| t.detected_text.as_deref())
        .collect();
    if lines.is_empty() {
        NOTHING_DETECTED.to_string()
    } else {
        lines.join("\n")
    }
}

/// Maximum by `key`; among equal maxima the earliest item wins.
fn first_max_by<T>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> f64) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let score = key(&item);
        if best.as_ref().is_none_or(|(_, top)| score > *top) {
            best = Some((item, score));
        }
    }
    best.map(|(item, _)| item)
}
