//! # Contract Subcommand
//!
//! Prints the registry: every tag with its kind, or the field contract of
//! one tag or fixed kind.

use std::fmt::Write as _;
use std::str::FromStr;

use acard_core::NodeKind;
use acard_schema::{all_tagged_contracts, contract_for, contract_for_kind, Contract};
use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the `acard contract` subcommand.
#[derive(Args, Debug)]
pub struct ContractArgs {
    /// Element or action tag (e.g. `TextBlock`, `Action.Submit`), or a fixed
    /// kind (`Card`, `ShowableCard`, `Column`, `Fact`, `Choice`). Lists all
    /// tags when omitted.
    pub tag: Option<String>,
}

/// Resolve a tag or fixed kind name to its contract.
pub fn lookup(name: &str) -> Result<&'static Contract> {
    if let Some(contract) = NodeKind::from_str(name).ok().and_then(contract_for_kind) {
        return Ok(contract);
    }
    contract_for(name).with_context(|| format!("no contract named {name:?}"))
}

/// One line per tagged contract: tag and kind.
pub fn render_index() -> String {
    let mut out = String::new();
    for contract in all_tagged_contracts() {
        let _ = writeln!(out, "{:<20} {}", contract.name(), contract.kind);
    }
    out
}

/// Field table of one contract.
pub fn render_contract(contract: &Contract) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", contract.name(), contract.kind);
    if let Some(tag) = contract.tag {
        let _ = writeln!(out, "  {:<18} required  \"{tag}\"", "type");
    }
    for field in contract.fields() {
        let presence = if field.is_required() {
            "required"
        } else {
            "optional"
        };
        let _ = writeln!(out, "  {:<18} {presence:<9} {}", field.name, field.kind);
    }
    out
}

/// Execute the contract subcommand.
pub fn run_contract(args: &ContractArgs) -> Result<u8> {
    match &args.tag {
        None => print!("{}", render_index()),
        Some(name) => print!("{}", render_contract(lookup(name)?)),
    }
    Ok(0)
}
