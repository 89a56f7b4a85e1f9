//! Identifier inspection

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use wbmodel_core::EntityIdValue;

use crate::output::{format_table, to_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct IdArgs {
    /// Entity ids such as Q42, P31, L7-F2 or M9
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct IdReport {
    id: String,
    kind: String,
    iri: String,
    entity_type: String,
    numeric_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    lexeme_id: Option<String>,
}

impl IdReport {
    fn new(id: &EntityIdValue) -> Self {
        let (numeric_id, lexeme_id) = match id {
            EntityIdValue::Item(id) => (id.numeric_id(), None),
            EntityIdValue::Property(id) => (id.numeric_id(), None),
            EntityIdValue::Lexeme(id) => (id.numeric_id(), None),
            EntityIdValue::Form(id) => (id.numeric_id(), Some(id.lexeme_id().id().to_string())),
            EntityIdValue::Sense(id) => (id.numeric_id(), Some(id.lexeme_id().id().to_string())),
            EntityIdValue::MediaInfo(id) => (id.numeric_id(), None),
            EntityIdValue::Unsupported(_) => (0, None),
        };
        Self {
            id: id.id().to_string(),
            kind: id
                .kind()
                .map(|k| k.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            iri: id.iri(),
            entity_type: id.entity_type().to_string(),
            numeric_id,
            lexeme_id,
        }
    }
}

pub fn run(args: &IdArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::debug!("Inspecting {} ids on {}", args.ids.len(), ctx.site_iri);

    let mut reports = Vec::with_capacity(args.ids.len());
    for raw in &args.ids {
        let id = ctx
            .factory
            .parse_entity_id(raw, &ctx.site_iri)
            .with_context(|| format!("Invalid entity id '{}'", raw))?;
        reports.push(IdReport::new(&id));
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&reports)?),
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = reports
                .iter()
                .map(|r| {
                    vec![
                        r.id.clone(),
                        r.kind.clone(),
                        r.numeric_id.to_string(),
                        r.lexeme_id.clone().unwrap_or_else(|| "-".to_string()),
                        r.iri.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                format_table(&["ID", "KIND", "NUMBER", "LEXEME", "IRI"], &rows)
            );
        }
    }
    Ok(())
}
