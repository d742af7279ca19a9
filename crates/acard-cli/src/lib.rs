//! # acard-cli: Adaptive Card Command-Line Interface
//!
//! A clap-based front end over `acard-schema`.
//!
//! ## Subcommands
//!
//! - `validate` - Check card files and print grouped, path-annotated defects
//! - `fmt` - Re-encode a card canonically, or check that it already is
//! - `contract` - List tags or print the field contract of one tag
//! - `export-schema` - Print the registry as a JSON Schema
//!
//! ## Exit Codes
//!
//! `0` success, `1` a document is invalid, malformed or not canonical, `2`
//! usage, I/O or config error.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `acard-schema`; no validation logic here.

pub mod contract;
pub mod export;
pub mod format;
pub mod options;
pub mod validate;
