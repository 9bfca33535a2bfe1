// src/core/service_client.rs
//! HTTP client for the résumé extraction service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::app_log;
use crate::core::config_manager::ServiceConfig;
use crate::core::intake::SelectedFile;
use crate::types::{ErrorBody, ExtractionResult, HealthResponse, TextExtractionRequest};

const EXTRACT_PDF_ENDPOINT: &str = "/extract/pdf";
const EXTRACT_TEXT_ENDPOINT: &str = "/extract/text";
const HEALTH_ENDPOINT: &str = "/health";

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Everything that can go wrong between pressing "extract" and getting fields back.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", status_message(.status, .detail))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Empty text")]
    EmptyText,
}

impl ExtractionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Status { .. } => "SERVICE_ERROR",
            Self::InvalidBody(_) => "INVALID_RESPONSE",
            Self::EmptyText => "EMPTY_TEXT",
        }
    }
}

fn status_message(status: &StatusCode, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// The one awaited call the upload panel makes.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract_pdf(&self, file: &SelectedFile) -> Result<ExtractionResult, ExtractionError>;
}

#[derive(Debug, Clone)]
pub struct ExtractionClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    /// Create new extraction client with configuration
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send plain résumé text instead of a PDF
    pub async fn extract_text(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyText);
        }

        let url = format!("{}{}", self.base_url, EXTRACT_TEXT_ENDPOINT);
        app_log!(info, "Calling text extraction service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&TextExtractionRequest { text })
            .send()
            .await?;

        Self::read_result(response).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ExtractionError> {
        let url = format!("{}{}", self.base_url, HEALTH_ENDPOINT);
        app_log!(trace, "Checking service health: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ExtractionError::InvalidBody(e.to_string()))
    }

    async fn read_result(response: reqwest::Response) -> Result<ExtractionResult, ExtractionError> {
        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        app_log!(debug, "Raw extraction response: {}", body);

        serde_json::from_str::<ExtractionResult>(&body)
            .map_err(|e| ExtractionError::InvalidBody(e.to_string()))
    }

    /// Build the error for a non-success response, preferring the service's `detail`.
    async fn status_error(response: reqwest::Response) -> ExtractionError {
        let status = response.status();
        let detail = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message()),
            Err(_) => None,
        };

        app_log!(error, "Extraction service error {}: {:?}", status, detail);
        ExtractionError::Status { status, detail }
    }
}

#[async_trait]
impl ExtractionService for ExtractionClient {
    async fn extract_pdf(&self, file: &SelectedFile) -> Result<ExtractionResult, ExtractionError> {
        let url = format!("{}{}", self.base_url, EXTRACT_PDF_ENDPOINT);

        let part = Part::bytes(file.content().to_vec())
            .file_name(file.name().to_string())
            .mime_str(PDF_CONTENT_TYPE)?;
        let form = Form::new().part("file", part);

        app_log!(info, "Uploading {} to {}", file.label(), url);

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::read_result(response).await
    }
}
