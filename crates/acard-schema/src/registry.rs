//! # Schema Registry
//!
//! Static field contracts for every tag in the closed element and action
//! sets, plus the untagged and fixed-tag kinds (Card, ShowableCard, Column,
//! Fact, Choice).
//!
//! A [`Contract`] is a shared base field list followed by the variant's own
//! fields, mirroring how the model embeds `ElementBase`, `InputBase` and
//! `ActionBase` by value. All contracts are `'static` data: the registry
//! never changes at runtime and needs no synchronization.

use std::fmt;
use std::str::FromStr;

use acard_core::{
    ActionTag, CardTag, ChoiceInputStyle, ColumnTag, ContainerStyle, ElementTag,
    HorizontalAlignment, ImageSize, ImageStyle, NodeKind, SchemaUri, SchemaVersion, Spacing,
    TextColor, TextSize, TextWeight,
};

use crate::error::SchemaError;

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Declared kind of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    /// Non-negative integer that fits in 32 bits.
    Count,
    Number,
    /// One of a closed set of strings.
    Enum(&'static [&'static str]),
    /// Column width: any string or any number.
    Width,
    /// A string or a free-form object, passed through uninterpreted.
    Opaque,
    Elements,
    Columns,
    Facts,
    Choices,
    /// Sequence of elements restricted to the `Image` tag.
    Images,
    Actions,
    ShowableCard,
}

impl FieldKind {
    /// Returns true when values of this kind are validated as child nodes.
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            Self::Elements
                | Self::Columns
                | Self::Facts
                | Self::Choices
                | Self::Images
                | Self::Actions
                | Self::ShowableCard
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Bool => f.write_str("boolean"),
            Self::Count => f.write_str("non-negative integer"),
            Self::Number => f.write_str("number"),
            Self::Enum(values) => {
                f.write_str("one of ")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value:?}")?;
                }
                Ok(())
            }
            Self::Width => f.write_str("string or number"),
            Self::Opaque => f.write_str("string or object"),
            Self::Elements => f.write_str("array of Element"),
            Self::Columns => f.write_str("array of Column"),
            Self::Facts => f.write_str("array of Fact"),
            Self::Choices => f.write_str("array of Choice"),
            Self::Images => f.write_str("array of Image"),
            Self::Actions => f.write_str("array of Action"),
            Self::ShowableCard => f.write_str("ShowableCard"),
        }
    }
}

/// One field of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub presence: Presence,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        presence: Presence::Required,
        kind,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        presence: Presence::Optional,
        kind,
    }
}

/// Field contract of one tag or kind.
#[derive(Debug)]
pub struct Contract {
    /// Position the contract applies to.
    pub kind: NodeKind,
    /// Required literal value of the `type` field; `None` for untagged kinds.
    pub tag: Option<&'static str>,
    base: &'static [FieldSpec],
    own: &'static [FieldSpec],
}

impl Contract {
    /// All fields, base fields first, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.base.iter().chain(self.own.iter())
    }

    /// Look up a field by wire name. The `type` tag is not a field.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().find(|spec| spec.name == name)
    }

    /// Names of the required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields()
            .filter(|spec| spec.is_required())
            .map(|spec| spec.name)
    }

    /// Display name: the tag for tagged contracts, else the kind.
    pub fn name(&self) -> &'static str {
        match (self.kind, self.tag) {
            (NodeKind::Element | NodeKind::Action, Some(tag)) => tag,
            (kind, _) => kind.as_str(),
        }
    }
}

use self::FieldKind as K;

const ELEMENT_BASE: &[FieldSpec] = &[
    optional("id", K::String),
    optional("separator", K::Bool),
    optional("spacing", K::Enum(Spacing::VALUES)),
];

const INPUT_BASE: &[FieldSpec] = &[
    required("id", K::String),
    optional("separator", K::Bool),
    optional("spacing", K::Enum(Spacing::VALUES)),
];

const ACTION_BASE: &[FieldSpec] = &[optional("id", K::String), optional("title", K::String)];

const CARD_CONTENT: &[FieldSpec] = &[
    optional("$schema", K::Enum(SchemaUri::VALUES)),
    optional("fallbackText", K::String),
    optional("backgroundImage", K::String),
    optional("body", K::Elements),
    optional("actions", K::Actions),
    optional("speak", K::String),
    optional("lang", K::String),
];

static CARD: Contract = Contract {
    kind: NodeKind::Card,
    tag: Some(CardTag::AdaptiveCard.as_str()),
    base: &[required("version", K::Enum(SchemaVersion::VALUES))],
    own: CARD_CONTENT,
};

static SHOWABLE_CARD: Contract = Contract {
    kind: NodeKind::ShowableCard,
    tag: Some(CardTag::AdaptiveCard.as_str()),
    base: &[optional("version", K::Enum(SchemaVersion::VALUES))],
    own: CARD_CONTENT,
};

static COLUMN: Contract = Contract {
    kind: NodeKind::Column,
    tag: Some(ColumnTag::Column.as_str()),
    base: &[],
    own: &[
        required("items", K::Elements),
        optional("id", K::String),
        optional("style", K::Enum(ContainerStyle::VALUES)),
        optional("width", K::Width),
    ],
};

const TITLE_VALUE: &[FieldSpec] = &[required("title", K::String), required("value", K::String)];

static FACT: Contract = Contract {
    kind: NodeKind::Fact,
    tag: None,
    base: &[],
    own: TITLE_VALUE,
};

static CHOICE: Contract = Contract {
    kind: NodeKind::Choice,
    tag: None,
    base: &[],
    own: TITLE_VALUE,
};

static TEXT_BLOCK: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::TextBlock.as_str()),
    base: ELEMENT_BASE,
    own: &[
        required("text", K::String),
        optional("color", K::Enum(TextColor::VALUES)),
        optional("horizontalAlignment", K::Enum(HorizontalAlignment::VALUES)),
        optional("isSubtle", K::Bool),
        optional("maxLines", K::Count),
        optional("size", K::Enum(TextSize::VALUES)),
        optional("weight", K::Enum(TextWeight::VALUES)),
        optional("wrap", K::Bool),
    ],
};

static IMAGE: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::Image.as_str()),
    base: ELEMENT_BASE,
    own: &[
        required("url", K::String),
        optional("altText", K::String),
        optional("horizontalAlignment", K::Enum(HorizontalAlignment::VALUES)),
        optional("size", K::Enum(ImageSize::VALUES)),
        optional("style", K::Enum(ImageStyle::VALUES)),
    ],
};

static CONTAINER: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::Container.as_str()),
    base: ELEMENT_BASE,
    own: &[
        required("items", K::Elements),
        optional("style", K::Enum(ContainerStyle::VALUES)),
    ],
};

static COLUMN_SET: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::ColumnSet.as_str()),
    base: ELEMENT_BASE,
    own: &[
        required("columns", K::Columns),
        optional("horizontalAlignment", K::Enum(HorizontalAlignment::VALUES)),
    ],
};

static FACT_SET: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::FactSet.as_str()),
    base: ELEMENT_BASE,
    own: &[required("facts", K::Facts)],
};

static IMAGE_SET: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::ImageSet.as_str()),
    base: ELEMENT_BASE,
    own: &[
        required("images", K::Images),
        optional("imageSize", K::Enum(ImageSize::VALUES)),
    ],
};

static TEXT_INPUT: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::TextInput.as_str()),
    base: INPUT_BASE,
    own: &[
        optional("isMultiline", K::Bool),
        optional("maxLength", K::Count),
        optional("placeholder", K::String),
        optional("value", K::String),
    ],
};

static NUMBER_INPUT: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::NumberInput.as_str()),
    base: INPUT_BASE,
    own: &[
        optional("max", K::Number),
        optional("min", K::Number),
        optional("placeholder", K::String),
        optional("value", K::String),
    ],
};

const STRING_BOUNDED_INPUT: &[FieldSpec] = &[
    optional("max", K::String),
    optional("min", K::String),
    optional("placeholder", K::String),
    optional("value", K::String),
];

static DATE_INPUT: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::DateInput.as_str()),
    base: INPUT_BASE,
    own: STRING_BOUNDED_INPUT,
};

static TIME_INPUT: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::TimeInput.as_str()),
    base: INPUT_BASE,
    own: STRING_BOUNDED_INPUT,
};

static TOGGLE_INPUT: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::ToggleInput.as_str()),
    base: INPUT_BASE,
    own: &[
        required("title", K::String),
        optional("value", K::String),
        optional("valueOff", K::String),
        optional("valueOn", K::String),
    ],
};

static CHOICE_SET_INPUT: Contract = Contract {
    kind: NodeKind::Element,
    tag: Some(ElementTag::ChoiceSetInput.as_str()),
    base: INPUT_BASE,
    own: &[
        required("title", K::String),
        optional("choices", K::Choices),
        optional("isMultiSelect", K::Bool),
        optional("style", K::Enum(ChoiceInputStyle::VALUES)),
        optional("value", K::String),
        optional("placeholder", K::String),
    ],
};

static OPEN_URL: Contract = Contract {
    kind: NodeKind::Action,
    tag: Some(ActionTag::OpenUrl.as_str()),
    base: ACTION_BASE,
    own: &[required("url", K::String)],
};

static SUBMIT: Contract = Contract {
    kind: NodeKind::Action,
    tag: Some(ActionTag::Submit.as_str()),
    base: ACTION_BASE,
    own: &[optional("data", K::Opaque)],
};

static SHOW_CARD: Contract = Contract {
    kind: NodeKind::Action,
    tag: Some(ActionTag::ShowCard.as_str()),
    base: ACTION_BASE,
    own: &[optional("card", K::ShowableCard)],
};

/// Contract of an element tag.
pub fn element_contract(tag: ElementTag) -> &'static Contract {
    match tag {
        ElementTag::TextBlock => &TEXT_BLOCK,
        ElementTag::Image => &IMAGE,
        ElementTag::Container => &CONTAINER,
        ElementTag::ColumnSet => &COLUMN_SET,
        ElementTag::FactSet => &FACT_SET,
        ElementTag::ImageSet => &IMAGE_SET,
        ElementTag::TextInput => &TEXT_INPUT,
        ElementTag::NumberInput => &NUMBER_INPUT,
        ElementTag::DateInput => &DATE_INPUT,
        ElementTag::TimeInput => &TIME_INPUT,
        ElementTag::ToggleInput => &TOGGLE_INPUT,
        ElementTag::ChoiceSetInput => &CHOICE_SET_INPUT,
    }
}

/// Contract of an action tag.
pub fn action_contract(tag: ActionTag) -> &'static Contract {
    match tag {
        ActionTag::OpenUrl => &OPEN_URL,
        ActionTag::Submit => &SUBMIT,
        ActionTag::ShowCard => &SHOW_CARD,
    }
}

/// Contract of a non-sum kind. `None` for `Element` and `Action`, whose
/// contract depends on the node's tag.
pub fn contract_for_kind(kind: NodeKind) -> Option<&'static Contract> {
    match kind {
        NodeKind::Card => Some(&CARD),
        NodeKind::ShowableCard => Some(&SHOWABLE_CARD),
        NodeKind::Column => Some(&COLUMN),
        NodeKind::Fact => Some(&FACT),
        NodeKind::Choice => Some(&CHOICE),
        NodeKind::Element | NodeKind::Action => None,
    }
}

/// Contract for an element or action tag.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownTag`] when `tag` is in neither closed set.
pub fn contract_for(tag: &str) -> Result<&'static Contract, SchemaError> {
    if let Ok(element) = ElementTag::from_str(tag) {
        return Ok(element_contract(element));
    }
    if let Ok(action) = ActionTag::from_str(tag) {
        return Ok(action_contract(action));
    }
    Err(SchemaError::UnknownTag {
        tag: tag.to_string(),
    })
}

/// Membership test over the closed element tag set.
pub fn is_element_tag(tag: &str) -> bool {
    ElementTag::VALUES.iter().any(|value| *value == tag)
}

/// Membership test over the closed action tag set.
pub fn is_action_tag(tag: &str) -> bool {
    ActionTag::VALUES.iter().any(|value| *value == tag)
}

/// Every element and action contract, elements first, in tag order.
pub fn all_tagged_contracts() -> impl Iterator<Item = &'static Contract> {
    ElementTag::all()
        .iter()
        .map(|tag| element_contract(*tag))
        .chain(ActionTag::all().iter().map(|tag| action_contract(*tag)))
}
