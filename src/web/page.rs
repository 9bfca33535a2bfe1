// src/web/page.rs
//! Server-rendered upload page

use askama::Template;
use rocket::http::Status;
use rocket::response::content::RawHtml;

use crate::app_log;
use crate::core::{Card, UploadPanel};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub alert: Option<&'a str>,
    pub selected_label: &'a str,
    pub trigger_disabled: bool,
    pub status: &'a str,
    pub cards: &'a [Card],
    pub json_output: &'a str,
}

impl<'a> IndexPage<'a> {
    pub fn from_panel(panel: &'a UploadPanel) -> Self {
        Self {
            alert: panel.alert(),
            selected_label: panel.selected_label(),
            trigger_disabled: !panel.trigger_enabled(),
            status: panel.status(),
            cards: panel.cards(),
            json_output: panel.json_output(),
        }
    }
}

/// Render the whole page for the current panel state.
pub fn render_page(panel: &UploadPanel) -> Result<RawHtml<String>, Status> {
    IndexPage::from_panel(panel)
        .render()
        .map(RawHtml)
        .map_err(|e| {
            app_log!(error, "Failed to render upload page: {}", e);
            Status::InternalServerError
        })
}
