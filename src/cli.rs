// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::app_log;
use crate::core::render::cards_to_text;
use crate::core::{
    render_result, ConfigManager, ExtractionClient, ExtractionService, PanelState,
    RenderedResult, SelectedFile, UploadPanel,
};
use crate::utils::write_file_safe;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "cv-extract")]
#[command(about = "Send a résumé to the extraction service and show the parsed fields")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Extraction service origin, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a PDF résumé
    Pdf {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,
        /// Also write the JSON response to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Send plain résumé text read from a file, or stdin with "-"
    Text {
        input: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Check that the extraction service is up
    Health,
    /// Start the browser front end
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cards,
    Json,
    Both,
}

pub async fn handle_command(cli: Cli, mut config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Pdf { file, format, save } => {
            let client = ExtractionClient::new(&config.service)?;
            let rendered = extract_pdf(&client, &file).await?;
            print_rendered(&rendered, format);
            save_json(save.as_deref(), &rendered).await
        }

        Command::Text {
            input,
            format,
            save,
        } => {
            let client = ExtractionClient::new(&config.service)?;
            let text = read_text_input(&input).await?;
            let result = client
                .extract_text(&text)
                .await
                .map_err(|e| anyhow::anyhow!("Error: {}", e))?;
            let rendered = render_result(&result);
            print_rendered(&rendered, format);
            save_json(save.as_deref(), &rendered).await
        }

        Command::Health => {
            let client = ExtractionClient::new(&config.service)?;
            let health = client
                .health()
                .await
                .map_err(|e| anyhow::anyhow!("{} is not healthy: {}", client.base_url(), e))?;
            println!("{}: {}", client.base_url(), health.status);
            Ok(())
        }

        Command::Serve { port } => {
            if let Some(port) = port {
                config.web.port = port;
            }
            start_web_server(&config).await
        }
    }
}

/// Drive an upload panel from the terminal: pick, submit, report.
pub async fn extract_pdf<S>(service: &S, path: &Path) -> Result<RenderedResult>
where
    S: ExtractionService + ?Sized,
{
    let file = SelectedFile::from_path(path).await?;

    let mut panel = UploadPanel::new();
    if let Err(e) = panel.select(file) {
        anyhow::bail!("{} ({})", e.alert(), path.display());
    }
    eprintln!("{}", panel.selected_label());

    let Some(file) = panel.begin_submit() else {
        anyhow::bail!("Nothing to upload");
    };
    eprintln!("{}", panel.status());

    let outcome = service.extract_pdf(&file).await;
    panel.complete_submit(outcome);
    eprintln!("{}", panel.status());

    match panel.state() {
        PanelState::Done => Ok(RenderedResult {
            cards: panel.cards().to_vec(),
            json: panel.json_output().to_string(),
        }),
        _ => anyhow::bail!("{}", panel.status()),
    }
}

async fn read_text_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read text from stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read file: {}", input))
}

fn print_rendered(rendered: &RenderedResult, format: OutputFormat) {
    if matches!(format, OutputFormat::Cards | OutputFormat::Both) {
        println!("{}", cards_to_text(&rendered.cards));
    }
    if format == OutputFormat::Both {
        println!();
    }
    if matches!(format, OutputFormat::Json | OutputFormat::Both) {
        println!("{}", rendered.json);
    }
}

async fn save_json(path: Option<&Path>, rendered: &RenderedResult) -> Result<()> {
    if let Some(path) = path {
        write_file_safe(path, &rendered.json).await?;
        app_log!(info, "Saved extraction result to {}", path.display());
    }
    Ok(())
}
