//! Integration test: validate every sample card under `samples/`.
//!
//! Cards directly under `samples/` must validate under both the default and
//! the strict options, survive a re-encode unchanged, and be accepted by the
//! exported JSON Schema. Cards under `samples/invalid/` must fail with the
//! defect their file name describes, and the exported schema must agree.

use std::path::{Path, PathBuf};

use acard_core::{Card, RawDocument};
use acard_schema::{
    codec, decode_file, encode, export, DefectKind, SchemaError, ValidationOptions, Validator,
    WireFormat,
};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

/// Card files directly inside `dir`, sorted.
fn card_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    matches!(
                        path.extension().and_then(|e| e.to_str()),
                        Some("json" | "yaml" | "yml")
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

fn read_value(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).unwrap();
    codec::parse(&text, WireFormat::from_path(path)).unwrap()
}

#[test]
fn test_discover_samples() {
    let valid = card_files(&repo_root().join("samples"));
    let invalid = card_files(&repo_root().join("samples/invalid"));
    assert!(valid.len() >= 4, "expected >= 4 sample cards, found {}", valid.len());
    assert!(invalid.len() >= 5, "expected >= 5 invalid cards, found {}", invalid.len());
}

#[test]
fn test_validate_all_samples() {
    let lenient = Validator::default();
    let strict = Validator::new(ValidationOptions::strict());
    let mut failures = Vec::new();

    for path in card_files(&repo_root().join("samples")) {
        for validator in [&lenient, &strict] {
            if let Err(e) = decode_file::<Card>(&path, validator) {
                failures.push(format!("{}: {e}", path.display()));
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} sample cards failed validation:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn test_samples_survive_reencoding() {
    let validator = Validator::default();
    for path in card_files(&repo_root().join("samples")) {
        let card: Card = decode_file(&path, &validator).unwrap();
        for format in [WireFormat::Json, WireFormat::Yaml] {
            let text = encode(&card, format).unwrap();
            let back: Card = acard_schema::decode(&text, format, &validator).unwrap();
            assert_eq!(back, card, "{} changed through {format}", path.display());
        }
    }
}

#[test]
fn test_samples_list_their_inputs() {
    let card: Card =
        decode_file(&repo_root().join("samples/input-form.json"), &Validator::default()).unwrap();
    let inputs = card.inputs();
    let ids: Vec<_> = inputs.iter().filter_map(|input| input.id()).collect();
    assert_eq!(
        ids,
        vec!["name", "bio", "age", "start", "alarm", "terms", "color", "comment"]
    );
}

/// The defect each invalid sample is named after.
fn expected_defect(name: &str) -> Option<(&'static str, DefectKind)> {
    let defect = match name {
        "missing-text.json" => (
            "/body/0",
            DefectKind::MissingRequiredField { field: "text" },
        ),
        "unknown-tag.json" => (
            "/body/0",
            DefectKind::UnknownTag {
                tag: "Media".to_string(),
            },
        ),
        "missing-version.json" => ("", DefectKind::MissingRequiredField { field: "version" }),
        "bad-enum.json" => (
            "/body/0",
            DefectKind::FieldTypeMismatch {
                field: "size".to_string(),
                expected: r#"one of "default", "extraLarge", "large", "medium", "small""#
                    .to_string(),
                found: r#"string "huge""#.to_string(),
            },
        ),
        "missing-input-id.yaml" => ("/body/0", DefectKind::MissingRequiredField { field: "id" }),
        _ => return None,
    };
    Some(defect)
}

#[test]
fn test_invalid_samples_report_their_defect() {
    let validator = Validator::default();
    for path in card_files(&repo_root().join("samples/invalid")) {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let (at, defect) = expected_defect(name)
            .unwrap_or_else(|| panic!("no expectation for invalid sample {name}"));

        let err = decode_file::<Card>(&path, &validator).unwrap_err();
        let violations = match err {
            SchemaError::ValidationFailed { violations, .. } => violations,
            other => panic!("{name}: expected a validation failure, got {other}"),
        };
        let found: Vec<_> = violations
            .violations()
            .map(|(path, defect)| (path.as_str().to_string(), defect.clone()))
            .collect();
        assert_eq!(found, vec![(at.to_string(), defect)], "{name}");
    }
}

#[test]
fn test_exported_schema_agrees_with_validator() {
    let options = ValidationOptions::default();
    let schema = export::compile(&options).unwrap();
    let validator = Validator::new(options);

    let valid = card_files(&repo_root().join("samples"));
    let invalid = card_files(&repo_root().join("samples/invalid"));
    for path in valid.iter().chain(invalid.iter()) {
        let value = read_value(path);
        let (doc, root) = RawDocument::from_json(&value);
        let ours = validator.validate_as::<Card>(&doc, root).is_ok();
        let theirs = schema.is_valid(&value);
        assert_eq!(ours, theirs, "verdicts differ for {}", path.display());
    }
}

#[test]
fn test_closed_schema_rejects_extra_fields() {
    let options = ValidationOptions::strict();
    let schema = export::compile(&options).unwrap();
    let value = serde_json::json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [{"type": "TextBlock", "text": "hi", "future": true}]
    });
    assert!(!schema.is_valid(&value));
    assert!(Validator::new(options).validate_value::<Card>(&value).is_err());
    assert!(Validator::default().validate_value::<Card>(&value).is_ok());
    assert!(export::compile(&ValidationOptions::default())
        .unwrap()
        .is_valid(&value));
}
