//! Amazon Rekognition backend.
//!
//! Requests are SigV4-signed by the SDK with credentials from the standard
//! AWS chain. SDK shapes are mapped into the crate's own result model so the
//! fusion rules never see SDK types.

use std::time::Duration;

use {
    async_trait::async_trait,
    aws_config::{BehaviorVersion, timeout::TimeoutConfig},
    aws_sdk_rekognition::{
        Client,
        config::Region,
        error::DisplayErrorContext,
        primitives::Blob,
        types::{self as sdk, Attribute, Image, TextTypes},
    },
    miru_config::VisionConfig,
    tracing::{debug, warn},
};

use crate::{
    error::{Error, Result},
    service::VisionService,
    types::{
        AgeRange, CelebrityMatch, Emotion, FaceAttributes, Gender, TextDetection, TextGranularity,
    },
};

/// [`VisionService`] backed by Amazon Rekognition.
#[derive(Clone)]
pub struct RekognitionVision {
    client: Client,
}

impl RekognitionVision {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the AWS environment, applying the region, endpoint
    /// and timeout overrides in `config`.
    pub async fn from_config(config: &VisionConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(config.timeout_secs))
            .build();
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeouts);
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.as_str());
        }
        let sdk_config = loader.load().await;

        match sdk_config.region() {
            Some(region) => debug!(region = ?region, "vision client configured"),
            None => warn!("no AWS region configured, image analysis will fail"),
        }
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl VisionService for RekognitionVision {
    async fn detect_faces(&self, image: &[u8]) -> Result<Vec<FaceAttributes>> {
        let out = self
            .client
            .detect_faces()
            .image(image_input(image))
            .attributes(Attribute::All)
            .send()
            .await
            .map_err(|e| sdk_error("DetectFaces", e))?;
        Ok(out.face_details().iter().map(face_from_sdk).collect())
    }

    async fn recognize_celebrities(&self, image: &[u8]) -> Result<Vec<CelebrityMatch>> {
        let out = self
            .client
            .recognize_celebrities()
            .image(image_input(image))
            .send()
            .await
            .map_err(|e| sdk_error("RecognizeCelebrities", e))?;
        Ok(out.celebrity_faces().iter().map(celebrity_from_sdk).collect())
    }

    async fn detect_text(&self, image: &[u8]) -> Result<Vec<TextDetection>> {
        let out = self
            .client
            .detect_text()
            .image(image_input(image))
            .send()
            .await
            .map_err(|e| sdk_error("DetectText", e))?;
        Ok(out.text_detections().iter().map(text_from_sdk).collect())
    }
}

fn image_input(image: &[u8]) -> Image {
    Image::builder().bytes(Blob::new(image)).build()
}

fn sdk_error(operation: &'static str, err: impl std::error::Error) -> Error {
    Error::recognition(operation, DisplayErrorContext(err).to_string())
}

fn face_from_sdk(face: &sdk::FaceDetail) -> FaceAttributes {
    let bound = |v: Option<i32>| v.and_then(|v| u32::try_from(v).ok());
    FaceAttributes {
        age_range: face.age_range().map(|r| AgeRange {
            low: bound(r.low()),
            high: bound(r.high()),
        }),
        gender: face.gender().map(|g| Gender {
            value: g.value().map(|v| v.as_str().to_string()),
            confidence: g.confidence().map(f64::from),
        }),
        emotions: face
            .emotions()
            .iter()
            .map(|e| Emotion {
                kind: e.r#type().map(|t| t.as_str().to_string()),
                confidence: e.confidence().map(f64::from),
            })
            .collect(),
    }
}

fn celebrity_from_sdk(celebrity: &sdk::Celebrity) -> CelebrityMatch {
    CelebrityMatch {
        name: celebrity.name().map(str::to_string),
        match_confidence: celebrity.match_confidence().map(f64::from),
    }
}

fn text_from_sdk(text: &sdk::TextDetection) -> TextDetection {
    TextDetection {
        detected_text: text.detected_text().map(str::to_string),
        granularity: text.r#type().map(|t| match t {
            TextTypes::Line => TextGranularity::Line,
            TextTypes::Word => TextGranularity::Word,
            _ => TextGranularity::Other,
        }),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        aws_sdk_rekognition::config::Credentials,
        axum::{
            Router,
            body::Bytes,
            extract::State,
            http::{HeaderMap, HeaderName, StatusCode, header},
            response::{IntoResponse, Response},
            routing::post,
        },
        std::sync::{Arc, Mutex},
        tokio::net::TcpListener,
    };

    #[test]
    fn face_detail_maps_all_attributes() {
        let face = sdk::FaceDetail::builder()
            .age_range(sdk::AgeRange::builder().low(20).high(29).build())
            .gender(
                sdk::Gender::builder()
                    .value(sdk::GenderType::Female)
                    .confidence(97.6)
                    .build(),
            )
            .emotions(
                sdk::Emotion::builder()
                    .r#type(sdk::EmotionName::Happy)
                    .confidence(93.0)
                    .build(),
            )
            .build();

        let mapped = face_from_sdk(&face);
        assert_eq!(
            mapped.age_range,
            Some(AgeRange {
                low: Some(20),
                high: Some(29)
            })
        );
        let gender = mapped.gender.unwrap();
        assert_eq!(gender.value.as_deref(), Some("Female"));
        assert!((gender.confidence.unwrap() - 97.6).abs() < 1e-4);
        assert_eq!(mapped.emotions[0].kind.as_deref(), Some("HAPPY"));
    }

    #[test]
    fn sparse_face_detail_keeps_gaps() {
        let face = sdk::FaceDetail::builder()
            .age_range(sdk::AgeRange::builder().low(20).build())
            .build();
        let mapped = face_from_sdk(&face);
        assert_eq!(
            mapped.age_range,
            Some(AgeRange {
                low: Some(20),
                high: None
            })
        );
        assert!(mapped.gender.is_none());
        assert!(mapped.emotions.is_empty());
    }

    #[test]
    fn text_types_map_to_granularity() {
        let texts = [
            sdk::TextDetection::builder()
                .detected_text("SALE")
                .r#type(TextTypes::Line)
                .build(),
            sdk::TextDetection::builder()
                .detected_text("S")
                .r#type(TextTypes::Word)
                .build(),
            sdk::TextDetection::builder()
                .detected_text("?")
                .r#type(TextTypes::from("BLOCK"))
                .build(),
        ];
        let kinds: Vec<_> = texts.iter().map(|t| text_from_sdk(t).granularity).collect();
        assert_eq!(kinds, vec![
            Some(TextGranularity::Line),
            Some(TextGranularity::Word),
            Some(TextGranularity::Other),
        ]);
    }

    #[test]
    fn celebrity_maps_name_and_confidence() {
        let celebrity = sdk::Celebrity::builder()
            .name("A")
            .match_confidence(90.0)
            .build();
        assert_eq!(
            celebrity_from_sdk(&celebrity),
            CelebrityMatch::new("A", 90.0)
        );
    }

    // ── Signed requests against a local endpoint ────────────────────────────

    #[derive(Clone, Default)]
    struct MockRekognition {
        seen: Arc<Mutex<Vec<(HeaderMap, serde_json::Value)>>>,
    }

    async fn rekognition_handler(
        State(state): State<MockRekognition>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let target = headers
            .get("x-amz-target")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        state.seen.lock().unwrap().push((headers, parsed));

        let json = [(header::CONTENT_TYPE, "application/x-amz-json-1.1")];
        match target.as_str() {
            "RekognitionService.DetectFaces" => (
                json,
                serde_json::json!({
                    "FaceDetails": [{
                        "AgeRange": {"Low": 20, "High": 29},
                        "Gender": {"Value": "Female", "Confidence": 97.6},
                        "Emotions": [{"Type": "HAPPY", "Confidence": 93.0}]
                    }]
                })
                .to_string(),
            )
                .into_response(),
            "RekognitionService.RecognizeCelebrities" => (
                json,
                serde_json::json!({
                    "CelebrityFaces": [{"Name": "A", "MatchConfidence": 90.0}],
                    "UnrecognizedFaces": []
                })
                .to_string(),
            )
                .into_response(),
            _ => (
                StatusCode::BAD_REQUEST,
                [
                    (header::CONTENT_TYPE, "application/x-amz-json-1.1"),
                    (
                        HeaderName::from_static("x-amzn-errortype"),
                        "InvalidImageFormatException",
                    ),
                ],
                r#"{"__type":"InvalidImageFormatException","Message":"bad image"}"#,
            )
                .into_response(),
        }
    }

    async fn start_mock() -> (RekognitionVision, MockRekognition) {
        let state = MockRekognition::default();
        let app = Router::new()
            .route("/", post(rekognition_handler))
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let conf = aws_sdk_rekognition::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new(
                "AKIDMIRUTEST",
                "secret",
                None,
                None,
                "test",
            ))
            .endpoint_url(format!("http://{addr}"))
            .build();
        (RekognitionVision::new(Client::from_conf(conf)), state)
    }

    #[tokio::test]
    async fn detect_faces_is_signed_and_parsed() {
        let (vision, mock) = start_mock().await;
        let faces = vision.detect_faces(b"jpeg").await.unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].emotions[0].kind.as_deref(), Some("HAPPY"));

        let seen = mock.seen.lock().unwrap();
        let (headers, body) = &seen[0];
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDMIRUTEST/"));
        assert!(auth.contains("/us-east-1/rekognition/aws4_request"));
        assert!(headers.contains_key("x-amz-date"));
        assert_eq!(body["Image"]["Bytes"], "anBlZw==");
        assert_eq!(body["Attributes"], serde_json::json!(["ALL"]));
    }

    #[tokio::test]
    async fn recognize_celebrities_sends_no_attributes() {
        let (vision, mock) = start_mock().await;
        let celebs = vision.recognize_celebrities(b"jpeg").await.unwrap();
        assert_eq!(celebs, vec![CelebrityMatch::new("A", 90.0)]);
        assert!(mock.seen.lock().unwrap()[0].1.get("Attributes").is_none());
    }

    #[tokio::test]
    async fn service_error_is_recognition_error() {
        let (vision, _mock) = start_mock().await;
        let err = vision.detect_text(b"jpeg").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Recognition {
                operation: "DetectText",
                ..
            }
        ));
    }
}
