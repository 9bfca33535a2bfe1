// src/core/mod.rs
//! Upload & render: intake, the extraction request, rendering and the panel tying them together

pub mod config_manager;
pub mod intake;
pub mod panel;
pub mod render;
pub mod service_client;

pub use config_manager::{ConfigManager, ServiceConfig, WebConfig};
pub use intake::{IntakeError, SelectedFile};
pub use panel::{PanelState, UploadPanel};
pub use render::{render_result, Card, RenderedResult, PLACEHOLDER};
pub use service_client::{ExtractionClient, ExtractionError, ExtractionService};
