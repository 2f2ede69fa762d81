//! Image analysis for the bot.
//!
//! Three independent analyses (faces, celebrities, text) run concurrently
//! against a [`VisionService`], and [`fusion::synthesize`] turns the combined
//! [`VisionAnalysisResult`] into one Japanese reply.

pub mod error;
pub mod fusion;
pub mod rekognition;
pub mod service;
pub mod types;

pub use {
    error::{Error, Result},
    fusion::synthesize,
    rekognition::RekognitionVision,
    service::{VisionService, analyze},
    types::{
        AgeRange, CelebrityMatch, Emotion, FaceAttributes, Gender, TextDetection, TextGranularity,
        VisionAnalysisResult,
    },
};
