//! # Body Elements
//!
//! [`Element`] is the sum type over the twelve body kinds, tagged on the
//! wire by `type`. Containers and column sets own nested element sequences,
//! so a card body is a tree. Sequence order is presentation order and is
//! preserved through every round trip.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::CardError;
use crate::input::{ChoiceSetInput, DateInput, NumberInput, TextInput, TimeInput, ToggleInput};
use crate::style::{
    ContainerStyle, HorizontalAlignment, ImageSize, ImageStyle, Spacing, TextColor, TextSize,
    TextWeight, WidthKeyword,
};
use crate::tag::{DocumentNode, ElementTag, NodeKind};

/// Fields every non-input element carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Draw a separator line above the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
}

/// Any body element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    TextBlock(TextBlock),
    Image(Image),
    Container(Container),
    ColumnSet(ColumnSet),
    FactSet(FactSet),
    ImageSet(ImageSet),
    #[serde(rename = "Input.Text")]
    TextInput(TextInput),
    #[serde(rename = "Input.Number")]
    NumberInput(NumberInput),
    #[serde(rename = "Input.Date")]
    DateInput(DateInput),
    #[serde(rename = "Input.Time")]
    TimeInput(TimeInput),
    #[serde(rename = "Input.Toggle")]
    ToggleInput(ToggleInput),
    #[serde(rename = "Input.ChoiceSet")]
    ChoiceSetInput(ChoiceSetInput),
}

impl Element {
    /// The wire discriminant of this element.
    pub fn tag(&self) -> ElementTag {
        match self {
            Self::TextBlock(_) => ElementTag::TextBlock,
            Self::Image(_) => ElementTag::Image,
            Self::Container(_) => ElementTag::Container,
            Self::ColumnSet(_) => ElementTag::ColumnSet,
            Self::FactSet(_) => ElementTag::FactSet,
            Self::ImageSet(_) => ElementTag::ImageSet,
            Self::TextInput(_) => ElementTag::TextInput,
            Self::NumberInput(_) => ElementTag::NumberInput,
            Self::DateInput(_) => ElementTag::DateInput,
            Self::TimeInput(_) => ElementTag::TimeInput,
            Self::ToggleInput(_) => ElementTag::ToggleInput,
            Self::ChoiceSetInput(_) => ElementTag::ChoiceSetInput,
        }
    }

    /// The element's identifier. Always present for inputs.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::TextBlock(e) => e.base.id.as_deref(),
            Self::Image(e) => e.base.id.as_deref(),
            Self::Container(e) => e.base.id.as_deref(),
            Self::ColumnSet(e) => e.base.id.as_deref(),
            Self::FactSet(e) => e.base.id.as_deref(),
            Self::ImageSet(e) => e.base.id.as_deref(),
            Self::TextInput(e) => Some(&e.base.id),
            Self::NumberInput(e) => Some(&e.base.id),
            Self::DateInput(e) => Some(&e.base.id),
            Self::TimeInput(e) => Some(&e.base.id),
            Self::ToggleInput(e) => Some(&e.base.id),
            Self::ChoiceSetInput(e) => Some(&e.base.id),
        }
    }

    pub fn is_input(&self) -> bool {
        self.tag().is_input()
    }

    pub(crate) fn collect_inputs<'a>(&'a self, found: &mut Vec<&'a Element>) {
        match self {
            Self::Container(container) => {
                for item in &container.items {
                    item.collect_inputs(found);
                }
            }
            Self::ColumnSet(set) => {
                for item in set.columns.iter().flat_map(|c| &c.items) {
                    item.collect_inputs(found);
                }
            }
            other if other.is_input() => found.push(other),
            _ => {}
        }
    }
}

impl DocumentNode for Element {
    const KIND: NodeKind = NodeKind::Element;
}

macro_rules! impl_into_element {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Element {
                fn from(inner: $variant) -> Self {
                    Self::$variant(inner)
                }
            }
        )+
    };
}

impl_into_element!(
    TextBlock,
    Image,
    Container,
    ColumnSet,
    FactSet,
    ImageSet,
    TextInput,
    NumberInput,
    DateInput,
    TimeInput,
    ToggleInput,
    ChoiceSetInput,
);

/// A block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(flatten)]
    pub base: ElementBase,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_subtle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TextSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<TextWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ElementBase::default(),
            text: text.into(),
            color: None,
            horizontal_alignment: None,
            is_subtle: None,
            max_lines: None,
            size: None,
            weight: None,
            wrap: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(flatten)]
    pub base: ElementBase,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            base: ElementBase::default(),
            url: url.into(),
            alt_text: None,
            horizontal_alignment: None,
            size: None,
            style: None,
        }
    }
}

/// Groups elements, optionally behind an emphasis background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(flatten)]
    pub base: ElementBase,
    pub items: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
}

impl Container {
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            base: ElementBase::default(),
            items,
            style: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSet {
    #[serde(flatten)]
    pub base: ElementBase,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            base: ElementBase::default(),
            columns,
            horizontal_alignment: None,
        }
    }
}

closed_enum! {
    /// Literal `type` tag carried by every column.
    pub enum ColumnTag {
        Column => "Column",
    }
}

/// One column of a [`ColumnSet`]. Not an element in its own right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "type")]
    pub kind: ColumnTag,
    pub items: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
}

impl Column {
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            kind: ColumnTag::Column,
            items,
            id: None,
            style: None,
            width: None,
        }
    }

    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }
}

impl DocumentNode for Column {
    const KIND: NodeKind = NodeKind::Column;
}

/// Width of a column: a keyword, a relative weight, or a free-form string
/// such as `"50px"`.
///
/// Weights keep the exact number that was read so they re-serialize
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidth {
    Weight(Number),
    Keyword(WidthKeyword),
    Other(CustomWidth),
}

impl ColumnWidth {
    /// Width from its string form: a keyword when the text is one,
    /// otherwise a custom width.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.parse::<WidthKeyword>() {
            Ok(keyword) => Self::Keyword(keyword),
            Err(_) => Self::Other(CustomWidth(text)),
        }
    }
}

/// A string column width that is not one of the [`WidthKeyword`]s.
///
/// Keyword strings always decode as [`ColumnWidth::Keyword`], so they are
/// rejected here to keep every width on a single wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomWidth(String);

impl CustomWidth {
    pub fn new(text: impl Into<String>) -> Result<Self, CardError> {
        let text = text.into();
        if WidthKeyword::VALUES.iter().any(|keyword| *keyword == text) {
            return Err(CardError::KeywordWidth(text));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CustomWidth {
    type Error = CardError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<CustomWidth> for String {
    fn from(width: CustomWidth) -> Self {
        width.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSet {
    #[serde(flatten)]
    pub base: ElementBase,
    pub facts: Vec<Fact>,
}

impl FactSet {
    pub fn new(facts: Vec<Fact>) -> Self {
        Self {
            base: ElementBase::default(),
            facts,
        }
    }
}

/// A title/value pair owned by a [`FactSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

impl Fact {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

impl DocumentNode for Fact {
    const KIND: NodeKind = NodeKind::Fact;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSet {
    #[serde(flatten)]
    pub base: ElementBase,
    pub images: Vec<ImageSetItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

impl ImageSet {
    pub fn new(images: Vec<Image>) -> Self {
        Self {
            base: ElementBase::default(),
            images: images.into_iter().map(ImageSetItem::Image).collect(),
            image_size: None,
        }
    }
}

/// An image owned by an [`ImageSet`]. Only `Image` elements are allowed
/// there, but each still carries its `"type": "Image"` tag on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ImageSetItem {
    Image(Image),
}

impl ImageSetItem {
    pub fn image(&self) -> &Image {
        match self {
            Self::Image(image) => image,
        }
    }
}
