//! # Fmt Subcommand
//!
//! Decodes a card and writes it back in canonical form: fields in
//! declaration order, absent fields omitted. Also converts between JSON
//! and YAML.

use std::path::PathBuf;

use acard_core::Card;
use acard_schema::{codec, SchemaError, ValidationOptions, Validator, WireFormat};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

/// Arguments for the `acard fmt` subcommand.
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Card file to format.
    pub file: PathBuf,

    /// Output format. Defaults to the input file's format.
    #[arg(long, value_enum)]
    pub to: Option<FormatArg>,

    /// Exit with status 1 if the file is not already canonical, instead of
    /// printing it.
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for WireFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => WireFormat::Json,
            FormatArg::Yaml => WireFormat::Yaml,
        }
    }
}

/// Canonical text of the card in `args.file`.
///
/// # Errors
///
/// Returns the decode error unchanged, so callers can tell an invalid
/// card from an unreadable file.
pub fn canonical_text(args: &FmtArgs, options: ValidationOptions) -> Result<String, SchemaError> {
    let validator = Validator::new(options);
    let card: Card = codec::decode_file(&args.file, &validator)?;
    let format = args
        .to
        .map(WireFormat::from)
        .unwrap_or_else(|| WireFormat::from_path(&args.file));
    codec::encode(&card, format)
}

/// Execute the fmt subcommand.
///
/// Returns exit code 1 when the card is malformed, invalid, or (with
/// `--check`) not canonical.
pub fn run_fmt(args: &FmtArgs, options: ValidationOptions) -> Result<u8> {
    let text = match canonical_text(args, options) {
        Ok(text) => text,
        Err(SchemaError::ValidationFailed { violations, .. }) => {
            println!("INVALID {}", args.file.display());
            println!("{violations}");
            return Ok(1);
        }
        Err(e @ SchemaError::MalformedInput { .. }) => {
            println!("INVALID {}", args.file.display());
            println!("  {e}");
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("cannot format {}", args.file.display()));
        }
    };
    if !args.check {
        print!("{text}");
        return Ok(0);
    }

    let current = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    if current == text {
        tracing::info!(path = %args.file.display(), "already canonical");
        Ok(0)
    } else {
        println!("would reformat {}", args.file.display());
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "{\n  \"type\": \"AdaptiveCard\",\n  \"version\": \"1.0\",\n  \"body\": [\n    {\n      \"type\": \"TextBlock\",\n      \"text\": \"Hello\"\n    }\n  ]\n}\n";

    fn fmt_args(file: PathBuf, to: Option<FormatArg>, check: bool) -> FmtArgs {
        FmtArgs { file, to, check }
    }

    #[test]
    fn test_canonical_text_reorders_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.json");
        std::fs::write(
            &path,
            r#"{"body":[{"text":"Hello","type":"TextBlock"}],"version":"1.0","type":"AdaptiveCard"}"#,
        )
        .unwrap();
        let text = canonical_text(&fmt_args(path, None, false), ValidationOptions::default())
            .unwrap();
        assert_eq!(text, CANONICAL);
    }

    #[test]
    fn test_convert_to_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.json");
        std::fs::write(&path, CANONICAL).unwrap();
        let args = fmt_args(path, Some(FormatArg::Yaml), false);
        let text = canonical_text(&args, ValidationOptions::default()).unwrap();
        let back: Card =
            codec::decode(&text, WireFormat::Yaml, &Validator::default()).unwrap();
        let original: Card =
            codec::decode(CANONICAL, WireFormat::Json, &Validator::default()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_check_mode() {
        let dir = tempfile::tempdir().unwrap();
        let clean = dir.path().join("clean.json");
        let messy = dir.path().join("messy.json");
        std::fs::write(&clean, CANONICAL).unwrap();
        std::fs::write(&messy, CANONICAL.replace('\n', "")).unwrap();

        let code = run_fmt(&fmt_args(clean, None, true), ValidationOptions::default()).unwrap();
        assert_eq!(code, 0);
        let code = run_fmt(&fmt_args(messy, None, true), ValidationOptions::default()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_invalid_card_reports_defects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"type":"AdaptiveCard"}"#).unwrap();
        let args = fmt_args(path, None, false);
        let err = canonical_text(&args, ValidationOptions::default()).unwrap_err();
        assert!(err.violations().is_some());
        assert!(err.to_string().contains("version"));
        assert_eq!(run_fmt(&args, ValidationOptions::default()).unwrap(), 1);
    }

    #[test]
    fn test_malformed_card_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "type: [AdaptiveCard\n").unwrap();
        let args = fmt_args(path, None, true);
        assert_eq!(run_fmt(&args, ValidationOptions::default()).unwrap(), 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let args = fmt_args(PathBuf::from("/nonexistent/card.json"), None, false);
        assert!(run_fmt(&args, ValidationOptions::default()).is_err());
    }
}
