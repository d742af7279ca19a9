//! Validation options shared by every subcommand.
//!
//! Precedence, lowest first: built-in defaults, the `--config` file,
//! `ACARD_*` environment variables, then subcommand flags.

use std::path::Path;

use acard_schema::ValidationOptions;
use anyhow::{Context, Result};
use clap::Args;

/// Flags that override the loaded validation options.
#[derive(Args, Debug, Default, Clone)]
pub struct PolicyArgs {
    /// Report fields that the contract does not declare.
    #[arg(long)]
    pub reject_unknown_fields: bool,

    /// Require input ids to be unique across the document.
    #[arg(long)]
    pub unique_input_ids: bool,

    /// Deepest nesting accepted; objects and arrays each count one level.
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_depth: Option<usize>,
}

impl PolicyArgs {
    /// Overlay these flags on `options`. Flags only ever tighten, and a
    /// depth of zero is refused while parsing.
    pub fn apply(&self, mut options: ValidationOptions) -> ValidationOptions {
        if self.reject_unknown_fields {
            options.unknown_fields = acard_schema::UnknownFields::Reject;
        }
        if self.unique_input_ids {
            options.unique_input_ids = true;
        }
        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        options
    }
}

/// Load options from `config` (if any) and the environment.
pub fn load_options(config: Option<&Path>) -> Result<ValidationOptions> {
    let base = match config {
        Some(path) => ValidationOptions::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ValidationOptions::default(),
    };
    let options = base
        .with_env_overrides()
        .context("invalid ACARD_* environment variable")?;
    tracing::debug!(?options, "resolved validation options");
    Ok(options)
}
