//! # Actions
//!
//! [`Action`] is the sum type over the three action kinds. `Action.ShowCard`
//! is the recursion point of the format: it owns a [`ShowableCard`] that
//! may carry actions of its own.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::card::ShowableCard;
use crate::tag::{ActionTag, DocumentNode, NodeKind};

/// Fields every action carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Button label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ActionBase {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
        }
    }
}

/// Any action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "Action.OpenUrl")]
    OpenUrl(OpenUrlAction),
    #[serde(rename = "Action.Submit")]
    Submit(SubmitAction),
    #[serde(rename = "Action.ShowCard")]
    ShowCard(ShowCardAction),
}

impl Action {
    pub fn tag(&self) -> ActionTag {
        match self {
            Self::OpenUrl(_) => ActionTag::OpenUrl,
            Self::Submit(_) => ActionTag::Submit,
            Self::ShowCard(_) => ActionTag::ShowCard,
        }
    }

    pub fn base(&self) -> &ActionBase {
        match self {
            Self::OpenUrl(a) => &a.base,
            Self::Submit(a) => &a.base,
            Self::ShowCard(a) => &a.base,
        }
    }

    /// The nested card of a show-card action, if any.
    pub fn show_card(&self) -> Option<&ShowableCard> {
        match self {
            Self::ShowCard(a) => a.card.as_ref(),
            _ => None,
        }
    }
}

impl DocumentNode for Action {
    const KIND: NodeKind = NodeKind::Action;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenUrlAction {
    #[serde(flatten)]
    pub base: ActionBase,
    pub url: String,
}

impl OpenUrlAction {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            base: ActionBase::titled(title),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAction {
    #[serde(flatten)]
    pub base: ActionBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SubmitData>,
}

impl SubmitAction {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            base: ActionBase::titled(title),
            data: None,
        }
    }
}

/// Extra payload merged into the submitted input values.
///
/// The contents are opaque: they are carried through validation and
/// serialization without being interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmitData {
    Text(String),
    Fields(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowCardAction {
    #[serde(flatten)]
    pub base: ActionBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<ShowableCard>,
}

impl ShowCardAction {
    pub fn new(title: impl Into<String>, card: ShowableCard) -> Self {
        Self {
            base: ActionBase::titled(title),
            card: Some(card),
        }
    }
}

impl From<OpenUrlAction> for Action {
    fn from(inner: OpenUrlAction) -> Self {
        Self::OpenUrl(inner)
    }
}

impl From<SubmitAction> for Action {
    fn from(inner: SubmitAction) -> Self {
        Self::Submit(inner)
    }
}

impl From<ShowCardAction> for Action {
    fn from(inner: ShowCardAction) -> Self {
        Self::ShowCard(inner)
    }
}
