//! # Export-Schema Subcommand
//!
//! Writes the registry as a Draft 2020-12 JSON Schema. The schema is
//! compiled before it is written, so a printed schema always loads.

use std::path::PathBuf;

use acard_schema::{export, UnknownFields, ValidationOptions};
use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the `acard export-schema` subcommand.
#[derive(Args, Debug)]
pub struct ExportSchemaArgs {
    /// Close every object with `additionalProperties: false`.
    #[arg(long)]
    pub reject_unknown_fields: bool,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Pretty JSON text of the compiled schema.
pub fn schema_text(args: &ExportSchemaArgs, mut options: ValidationOptions) -> Result<String> {
    if args.reject_unknown_fields {
        options.unknown_fields = UnknownFields::Reject;
    }
    export::compile(&options).context("exported schema does not compile")?;
    let schema = export::json_schema(&options);
    let mut text = serde_json::to_string_pretty(&schema).context("failed to render schema")?;
    text.push('\n');
    Ok(text)
}

/// Execute the export-schema subcommand.
pub fn run_export_schema(args: &ExportSchemaArgs, options: ValidationOptions) -> Result<u8> {
    let text = schema_text(args, options)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote schema");
        }
        None => print!("{text}"),
    }
    Ok(0)
}
