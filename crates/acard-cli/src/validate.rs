//! # Validate Subcommand
//!
//! Checks card files and reports every defect, grouped per node with its
//! document path.
//!
//! ## Usage
//!
//! ```bash
//! acard validate samples/weather.json samples/image-gallery.yaml
//! acard validate --reject-unknown-fields --unique-input-ids form.json
//! acard validate --kind element snippet.json
//! ```

use std::path::{Path, PathBuf};

use acard_core::{NodeKind, RawDocument};
use acard_schema::{codec, SchemaError, ValidationOptions, Validator, WireFormat};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::options::PolicyArgs;

/// Arguments for the `acard validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Card files to validate (`.json`, `.yaml`, `.yml`).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Position each file's root is validated as.
    #[arg(long, value_enum, default_value_t = KindArg::Card)]
    pub kind: KindArg,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Root kinds selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Card,
    ShowableCard,
    Element,
    Action,
    Column,
    Fact,
    Choice,
}

impl From<KindArg> for NodeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Card => NodeKind::Card,
            KindArg::ShowableCard => NodeKind::ShowableCard,
            KindArg::Element => NodeKind::Element,
            KindArg::Action => NodeKind::Action,
            KindArg::Column => NodeKind::Column,
            KindArg::Fact => NodeKind::Fact,
            KindArg::Choice => NodeKind::Choice,
        }
    }
}

/// Verdict for one file.
#[derive(Debug)]
pub enum FileReport {
    Valid,
    /// Rendered defects, or the syntax error for malformed input.
    Invalid(String),
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validate one file as `kind`.
///
/// Malformed text and validation defects are verdicts, not errors; only an
/// unreadable file is an error.
pub fn check_file(path: &Path, kind: NodeKind, validator: &Validator) -> Result<FileReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = match codec::parse(&text, WireFormat::from_path(path)) {
        Ok(value) => value,
        Err(e) => return Ok(FileReport::Invalid(format!("  {e}"))),
    };
    let (doc, root) = RawDocument::from_json(&value);
    match validator.validate(&doc, root, kind) {
        Ok(_) => Ok(FileReport::Valid),
        Err(SchemaError::ValidationFailed { violations, .. }) => {
            Ok(FileReport::Invalid(violations.to_string()))
        }
        Err(e) => Err(e).with_context(|| format!("failed to validate {}", path.display())),
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code 0 when every file is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, options: ValidationOptions) -> Result<u8> {
    let validator = Validator::new(args.policy.apply(options));
    let kind = NodeKind::from(args.kind);
    let mut invalid = 0usize;

    for path in &args.files {
        tracing::debug!(path = %path.display(), %kind, "validating");
        match check_file(path, kind, &validator)? {
            FileReport::Valid => println!("OK      {}", path.display()),
            FileReport::Invalid(details) => {
                invalid += 1;
                println!("INVALID {}", path.display());
                println!("{details}");
            }
        }
    }

    if invalid > 0 {
        println!();
        println!("{invalid} of {} files invalid", args.files.len());
        return Ok(1);
    }
    tracing::info!(files = args.files.len(), "all files valid");
    Ok(0)
}
