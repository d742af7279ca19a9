//! # Cards
//!
//! [`Card`] is the document root. [`ShowableCard`] is the same shape nested
//! inside an `Action.ShowCard`, with `version` made optional. Both embed
//! [`CardContent`] for the fields they share.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::element::Element;
use crate::tag::{DocumentNode, NodeKind};

/// Well-known schema URI accepted in the `$schema` field.
pub const SCHEMA_URI: &str = "http://adaptivecards.io/schemas/adaptive-card.json";

closed_enum! {
    /// Format version of a card.
    pub enum SchemaVersion {
        V1_0 => "1.0",
    }
}

closed_enum! {
    /// Literal `type` tag carried by every card.
    pub enum CardTag {
        AdaptiveCard => "AdaptiveCard",
    }
}

closed_enum! {
    /// Value of the optional `$schema` marker. Only consumed by editors.
    pub enum SchemaUri {
        AdaptiveCard => "http://adaptivecards.io/schemas/adaptive-card.json",
    }
}

/// Fields shared by [`Card`] and [`ShowableCard`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardContent {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaUri>,
    /// Plain text shown by clients that cannot render the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_text: Option<String>,
    /// URL of the background image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Body elements, in presentation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<Element>,
    /// Top-level actions, in presentation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    /// Speech (SSML) rendering of the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,
    /// Language tag, e.g. `en-US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// The root of an Adaptive Card document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: CardTag,
    pub version: SchemaVersion,
    #[serde(flatten)]
    pub content: CardContent,
}

/// A card revealed by an `Action.ShowCard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowableCard {
    #[serde(rename = "type")]
    pub kind: CardTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<SchemaVersion>,
    #[serde(flatten)]
    pub content: CardContent,
}

impl Card {
    /// An empty version 1.0 card.
    pub fn new() -> Self {
        Self {
            kind: CardTag::AdaptiveCard,
            version: SchemaVersion::V1_0,
            content: CardContent::default(),
        }
    }

    /// Append a body element.
    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.content.body.push(element.into());
        self
    }

    /// Append a top-level action.
    pub fn with_action(mut self, action: impl Into<Action>) -> Self {
        self.content.actions.push(action.into());
        self
    }

    /// Every input element in the document, in document order.
    ///
    /// Includes inputs nested in containers, columns, and the cards of
    /// show-card actions, since all of them are submitted together.
    pub fn inputs(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.content.collect_inputs(&mut found);
        found
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowableCard {
    /// An empty nested card that inherits its version.
    pub fn new() -> Self {
        Self {
            kind: CardTag::AdaptiveCard,
            version: None,
            content: CardContent::default(),
        }
    }

    /// Append a body element.
    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.content.body.push(element.into());
        self
    }

    /// The version in force for this card: its own, or the enclosing one.
    pub fn effective_version(&self, enclosing: SchemaVersion) -> SchemaVersion {
        self.version.unwrap_or(enclosing)
    }
}

impl Default for ShowableCard {
    fn default() -> Self {
        Self::new()
    }
}

impl CardContent {
    pub(crate) fn collect_inputs<'a>(&'a self, found: &mut Vec<&'a Element>) {
        for element in &self.body {
            element.collect_inputs(found);
        }
        for action in &self.actions {
            if let Some(card) = action.show_card() {
                card.content.collect_inputs(found);
            }
        }
    }
}

impl DocumentNode for Card {
    const KIND: NodeKind = NodeKind::Card;
}

impl DocumentNode for ShowableCard {
    const KIND: NodeKind = NodeKind::ShowableCard;
}
