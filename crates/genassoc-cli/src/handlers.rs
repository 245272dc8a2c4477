//! Command handlers.
//!
//! Each handler validates nothing itself: it forwards raw arguments to the
//! backend facade and turns the result into a JSON value for printing.

use genassoc_core::PageRequest;
use serde::Serialize;
use serde_json::{Value, json};

use crate::bootstrap::CliContext;
use crate::commands::Commands;
use crate::error::CliError;

fn to_json<T: Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|e| CliError::Output(e.to_string()))
}

/// Run one command against the backend and return its JSON result.
pub async fn execute(ctx: &CliContext, command: Commands) -> Result<Value, CliError> {
    let backend = ctx.backend();
    match command {
        Commands::Phewas { variant_id, page } => {
            to_json(&backend.phewas(&variant_id, page.into()).await?)
        }
        Commands::G2vSchema => to_json(&backend.g2v_schema().await),
        Commands::Studies { study_ids } => to_json(&backend.studies_by_ids(&study_ids).await?),
        Commands::Manhattan { study_id, page } => {
            to_json(&backend.manhattan(&study_id, page.into()).await?)
        }
        Commands::IndexVariant { variant_id, page } => {
            to_json(&backend.index_variant_associations(&variant_id, page.into()).await?)
        }
        Commands::TagVariant { variant_id, page } => {
            to_json(&backend.tag_variant_associations(&variant_id, page.into()).await?)
        }
        Commands::Gecko {
            chromosome,
            start,
            end,
        } => {
            let mut lines = backend.gecko(&chromosome, start, end).await?;
            let decoded: Vec<_> = lines.by_ref().collect();
            Ok(json!({
                "chromosome": chromosome,
                "start": start,
                "end": end,
                "lines": to_json(&decoded)?,
                "skipped": lines.skipped(),
            }))
        }
        Commands::G2v { variant_id } => to_json(&backend.g2v(&variant_id).await?),
        Commands::Search { query, page } => {
            to_json(&backend.search(&query, PageRequest::from(page)).await?)
        }
        Commands::ValidateStudy { study_id } => {
            let study_id = backend.validate_study_id(&study_id).await?;
            Ok(json!({ "study_id": study_id, "exists": true }))
        }
    }
}

/// Render a result for stdout.
pub fn render(value: &Value, pretty: bool) -> Result<String, CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(|e| CliError::Output(e.to_string()))
}
