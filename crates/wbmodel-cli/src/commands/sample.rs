//! Build the Douglas Adams sample and re-materialise it through a factory

use clap::Args;
use wbmodel_core::{
    DatamodelConverter, DataObjectFactory, Document, EntityDocument, ItemDocument,
    ItemDocumentBuilder, StandardFactory, StatementBuilder,
};

use crate::config::FactoryKind;
use crate::output::{to_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct SampleArgs {
    /// Factory to convert the sample through (defaults to the configured one)
    #[arg(long, value_enum)]
    pub factory: Option<FactoryKind>,
}

fn build_sample(factory: &StandardFactory, site_iri: &str) -> anyhow::Result<ItemDocument> {
    let q42 = factory.item_id_value("Q42", site_iri)?;
    let p31 = factory.property_id_value("P31", site_iri)?;
    let statement = StatementBuilder::new(factory, q42.clone(), p31)
        .with_value(factory.item_id_value("Q5", site_iri)?)
        .build()?;
    let document = ItemDocumentBuilder::for_item_id(factory, q42)
        .with_label_text("Douglas Adams", "en")?
        .with_statement(statement)
        .build()?;
    Ok(document)
}

pub fn run(args: &SampleArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let kind = args.factory.unwrap_or(ctx.config.factory);
    let source = StandardFactory::new();
    let document = build_sample(&source, &ctx.site_iri)?;

    let target = kind.build();
    let copy = DatamodelConverter::new(target.as_ref()).copy_item_document(&document)?;
    tracing::info!("Converted {} through the {} factory", copy.item_id().id(), target.name());

    if copy != document {
        anyhow::bail!("Converted document differs from the source");
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&EntityDocument::from(copy))?),
        OutputFormat::Table => {
            println!("Item: {} ({})", copy.item_id().id(), copy.item_id().iri());
            println!("  Factory: {}", kind);
            for (language, label) in copy.labels() {
                println!("  Label [{}]: {}", language, label.text());
            }
            for group in copy.statement_groups() {
                println!("  {} ({} statements):", group.property().id(), group.len());
                for statement in group {
                    let value = statement
                        .main_snak()
                        .value()
                        .and_then(|v| v.as_entity_id())
                        .map(|id| id.id().to_string())
                        .unwrap_or_else(|| "?".to_string());
                    println!("    - {} [{}]", value, statement.rank());
                }
            }
            println!("  Matches source: yes");
        }
    }
    Ok(())
}
