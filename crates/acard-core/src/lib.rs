//! # acard-core: Typed Document Model for Adaptive Cards
//!
//! This crate defines the in-memory shape of an Adaptive Card 1.0 document:
//! a root [`Card`] holding an ordered body of [`Element`]s and an ordered
//! list of [`Action`]s. Every other crate in the workspace depends on
//! `acard-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed tag sets are enums.** Element and action kinds are the sum
//!    types [`Element`] and [`Action`], discriminated on the wire by their
//!    `type` field. Adding a kind forces every `match` to handle it.
//!
//! 2. **Base fields by composition.** Shared fields live in [`ElementBase`],
//!    [`InputBase`] and [`ActionBase`], embedded by value in each variant and
//!    flattened on the wire. There is no subtype hierarchy.
//!
//! 3. **One source for wire strings.** Every presentation enumeration exposes
//!    its closed string set as `VALUES`, which the schema registry reads
//!    instead of repeating the literals.
//!
//! 4. **Untyped input is an arena.** [`RawDocument`] stores untyped nodes
//!    addressed by [`NodeId`] so that shared and cyclic structure coming from
//!    authoring tools can be represented and rejected, not looped on.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `acard-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All model types derive `Debug`, `Clone`, `PartialEq` and implement
//!   `Serialize`/`Deserialize`, omitting absent optional fields on output.

#[macro_use]
mod macros;

pub mod action;
pub mod card;
pub mod element;
pub mod error;
pub mod input;
pub mod path;
pub mod raw;
pub mod style;
pub mod tag;

pub use action::{Action, ActionBase, OpenUrlAction, ShowCardAction, SubmitAction, SubmitData};
pub use card::{Card, CardContent, CardTag, SchemaUri, SchemaVersion, ShowableCard, SCHEMA_URI};
pub use element::{
    Column, ColumnSet, ColumnTag, ColumnWidth, Container, CustomWidth, Element, ElementBase, Fact,
    FactSet, Image, ImageSet, ImageSetItem, TextBlock,
};
pub use error::CardError;
pub use input::{
    Choice, ChoiceSetInput, DateInput, InputBase, NumberInput, TextInput, TimeInput, ToggleInput,
};
pub use path::DocPath;
pub use raw::{NodeId, RawDocument, RawNode};
pub use style::{
    ChoiceInputStyle, ContainerStyle, HorizontalAlignment, ImageSize, ImageStyle, Spacing,
    TextColor, TextSize, TextWeight, WidthKeyword,
};
pub use tag::{ActionTag, DocumentNode, ElementTag, NodeKind};
