//! # Closed Tag Sets
//!
//! The `type` discriminant of every tagged node is drawn from one of two
//! closed sets: [`ElementTag`] for body content and [`ActionTag`] for
//! actions. No other tag value is valid.
//!
//! [`NodeKind`] names the positions a node can be validated as, including
//! the untagged and fixed-tag kinds (Card, Column, Fact, Choice).

use serde::de::DeserializeOwned;
use serde::Serialize;

closed_enum! {
    /// Discriminant of the [`Element`](crate::Element) sum type.
    pub enum ElementTag {
        /// Formatted text.
        TextBlock => "TextBlock",
        /// A single image.
        Image => "Image",
        /// A grouping of elements with an optional style.
        Container => "Container",
        /// A horizontal row of columns.
        ColumnSet => "ColumnSet",
        /// A list of title/value facts.
        FactSet => "FactSet",
        /// A gallery of images.
        ImageSet => "ImageSet",
        /// Free-text input.
        TextInput => "Input.Text",
        /// Numeric input.
        NumberInput => "Input.Number",
        /// Date input.
        DateInput => "Input.Date",
        /// Time-of-day input.
        TimeInput => "Input.Time",
        /// On/off toggle input.
        ToggleInput => "Input.Toggle",
        /// Single or multi-select choice input.
        ChoiceSetInput => "Input.ChoiceSet",
    }
}

impl ElementTag {
    /// Returns true for the six input kinds. Inputs require an `id`.
    pub const fn is_input(&self) -> bool {
        matches!(
            self,
            Self::TextInput
                | Self::NumberInput
                | Self::DateInput
                | Self::TimeInput
                | Self::ToggleInput
                | Self::ChoiceSetInput
        )
    }
}

closed_enum! {
    /// Discriminant of the [`Action`](crate::Action) sum type.
    pub enum ActionTag {
        /// Open a URL.
        OpenUrl => "Action.OpenUrl",
        /// Gather input values and submit them.
        Submit => "Action.Submit",
        /// Reveal a nested card.
        ShowCard => "Action.ShowCard",
    }
}

closed_enum! {
    /// Position a node is expected to occupy in the document tree.
    pub enum NodeKind {
        /// The document root.
        Card => "Card",
        /// A card nested in a show-card action; `version` is optional.
        ShowableCard => "ShowableCard",
        /// Any body element (sum type over [`ElementTag`]).
        Element => "Element",
        /// Any action (sum type over [`ActionTag`]).
        Action => "Action",
        /// A column owned by a column set.
        Column => "Column",
        /// A title/value pair owned by a fact set.
        Fact => "Fact",
        /// A title/value pair owned by a choice-set input.
        Choice => "Choice",
    }
}

impl NodeKind {
    /// Returns true when the kind is a sum type dispatched on `type`.
    pub const fn is_sum_type(&self) -> bool {
        matches!(self, Self::Element | Self::Action)
    }
}

/// A model type that can stand at the root of a validated tree.
pub trait DocumentNode: Serialize + DeserializeOwned {
    /// The position this type is validated as.
    const KIND: NodeKind;
}
