// src/types/mod.rs
pub mod extraction;

pub use extraction::{ErrorBody, ExtractionResult, HealthResponse, ResumeField, TextExtractionRequest};
