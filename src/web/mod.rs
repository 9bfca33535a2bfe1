// src/web/mod.rs
//! Browser front end: upload page, form handler and health check

pub mod handlers;
pub mod page;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catch, catchers, get, post, routes, Build, Rocket, State};

use crate::app_log;
use crate::core::{ConfigManager, ExtractionClient, UploadPanel};
use page::render_page;

/// Largest PDF accepted by the upload form, in MiB.
const MAX_UPLOAD_MIB: u64 = 20;

#[get("/")]
pub async fn index() -> Result<RawHtml<String>, Status> {
    handlers::index_handler().await
}

#[post("/extract", data = "<upload>")]
pub async fn extract(
    upload: Form<UploadForm<'_>>,
    state: &State<ServerState>,
) -> Result<RawHtml<String>, Status> {
    handlers::extract_handler(upload, state).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

fn alert_page(message: &str) -> Result<RawHtml<String>, Status> {
    let mut panel = UploadPanel::new();
    panel.show_alert(message);
    render_page(&panel)
}

// Error catchers
#[catch(400)]
pub fn bad_request() -> Result<RawHtml<String>, Status> {
    alert_page("Invalid upload. Please choose a PDF file.")
}

#[catch(413)]
pub fn payload_too_large() -> Result<RawHtml<String>, Status> {
    alert_page("The file is too large to upload.")
}

#[catch(422)]
pub fn unprocessable() -> Result<RawHtml<String>, Status> {
    alert_page("Invalid upload. Please choose a PDF file.")
}

pub fn build_rocket(state: ServerState, port: u16) -> Rocket<Build> {
    let limits = Limits::default()
        .limit("file", MAX_UPLOAD_MIB.mebibytes())
        .limit("data-form", (MAX_UPLOAD_MIB + 1).mebibytes());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("limits", limits));

    rocket::custom(figment)
        .manage(state)
        .register("/", catchers![bad_request, payload_too_large, unprocessable])
        .mount("/", routes![index, extract, health])
}

// Main server start function
pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    let client = ExtractionClient::new(&config.service)?;

    app_log!(info, "Starting CV extractor web front end");
    app_log!(info, "Server: http://127.0.0.1:{}", config.web.port);
    app_log!(info, "Extraction service: {}", client.base_url());

    build_rocket(ServerState::new(client), config.web.port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
