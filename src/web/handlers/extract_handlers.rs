// src/web/handlers/extract_handlers.rs
//! Upload form handler - runs a fresh upload panel per submitted form

use anyhow::Context;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;
use tokio::io::AsyncReadExt;
use tracing::Instrument;

use crate::core::{SelectedFile, UploadPanel};
use crate::web::page::render_page;
use crate::web::types::{ServerState, UploadForm};
use crate::{app_log, app_span};

pub async fn index_handler() -> Result<RawHtml<String>, Status> {
    render_page(&UploadPanel::new())
}

pub async fn extract_handler(
    upload: Form<UploadForm<'_>>,
    state: &State<ServerState>,
) -> Result<RawHtml<String>, Status> {
    let mut panel = UploadPanel::new();

    let file = match read_upload(&upload.file).await {
        Ok(file) => file,
        Err(e) => {
            app_log!(error, "Failed to read uploaded file: {:#}", e);
            panel.show_alert("Could not read the uploaded file. Please try again.");
            return render_page(&panel);
        }
    };

    let span = app_span!("web_extract", file = %file.name(), size = file.size());
    async move {
        if panel.select(file).is_ok() {
            let outcome = panel.submit(&state.client).await;
            app_log!(info, "Extraction finished: {:?}", outcome);
        }
        render_page(&panel)
    }
    .instrument(span)
    .await
}

async fn read_upload(file: &TempFile<'_>) -> anyhow::Result<SelectedFile> {
    let name = file
        .raw_name()
        .map(|n| n.dangerous_unsafe_unsanitized_raw().as_str())
        .and_then(|raw| raw.rsplit(['/', '\\']).next())
        .unwrap_or_default()
        .to_string();

    let reader = file.open().await.context("Failed to open uploaded file")?;
    tokio::pin!(reader);

    let mut content = Vec::with_capacity(file.len() as usize);
    reader
        .read_to_end(&mut content)
        .await
        .context("Failed to read uploaded file")?;

    Ok(SelectedFile::new(name, content))
}
