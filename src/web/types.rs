// src/web/types.rs

use rocket::form::FromForm;
use rocket::fs::TempFile;

use crate::core::ExtractionClient;

/// Shared state of the web front end.
pub struct ServerState {
    pub client: ExtractionClient,
}

impl ServerState {
    pub fn new(client: ExtractionClient) -> Self {
        Self { client }
    }
}

#[derive(FromForm)]
pub struct UploadForm<'f> {
    pub file: TempFile<'f>,
}
