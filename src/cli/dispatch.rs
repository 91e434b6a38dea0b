use super::commands::{Cli, Commands, PromptKind};
use anyhow::{Context, Result};
use draftwright::assistant::{DocumentSnapshot, select_content};
use draftwright::config::Config;
use draftwright::gateway::run_gateway;
use draftwright::prompt::{EditMode, PromptBuilder, PromptParams, RequestKind};
use std::path::Path;
use std::sync::Arc;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { host, port, config } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            run_gateway(Arc::new(config)).await
        }
        Commands::Prompt {
            kind,
            mode,
            instruction,
            message,
            file,
            base_hash,
            schema_hints,
        } => {
            let document = match file {
                Some(path) => read_snapshot(&path)?,
                None => DocumentSnapshot::default(),
            };
            let kind = match kind {
                PromptKind::Edit => RequestKind::Edit,
                PromptKind::Chat => RequestKind::Chat,
            };
            let mode = EditMode::parse_lenient(Some(&mode));
            let (content, content_format) = select_content(mode, &document);

            let prompt = PromptBuilder::new()?.build(&PromptParams {
                content: &content,
                content_format,
                base_hash: base_hash.as_deref(),
                schema_hints: schema_hints.as_deref(),
                instruction: instruction.as_deref().unwrap_or_default(),
                message: message.as_deref().unwrap_or_default(),
                ..PromptParams::new(kind, mode)
            })?;
            println!("{prompt}");
            Ok(())
        }
    }
}

fn read_snapshot(path: &Path) -> Result<DocumentSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read document {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    Ok(match extension.as_deref() {
        Some("json") => DocumentSnapshot {
            doc_json: Some(
                serde_json::from_str(&text)
                    .with_context(|| format!("parse document JSON {}", path.display()))?,
            ),
            ..DocumentSnapshot::default()
        },
        Some("html" | "htm") => DocumentSnapshot {
            html: Some(text),
            ..DocumentSnapshot::default()
        },
        _ => DocumentSnapshot {
            markdown: Some(text),
            ..DocumentSnapshot::default()
        },
    })
}
