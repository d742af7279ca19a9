//! # Inputs
//!
//! The six input elements. Unlike other elements an input must have an
//! `id`: submitted values are keyed by it. `value` fields and the date/time
//! bounds are strings even when they look numeric; parsing and range checks
//! belong to the consumer.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::style::{ChoiceInputStyle, Spacing};
use crate::tag::{DocumentNode, NodeKind};

/// Fields every input carries. `id` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBase {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
}

impl InputBase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            separator: None,
            spacing: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multiline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TextInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id),
            is_multiline: None,
            max_length: None,
            placeholder: None,
            value: None,
        }
    }
}

/// Numeric input. `min`/`max` are numbers; `value` stays a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberInput {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl NumberInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id),
            max: None,
            min: None,
            placeholder: None,
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInput {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl DateInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id),
            max: None,
            min: None,
            placeholder: None,
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInput {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TimeInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id),
            max: None,
            min: None,
            placeholder: None,
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleInput {
    #[serde(flatten)]
    pub base: InputBase,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Submitted value when off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_off: Option<String>,
    /// Submitted value when on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_on: Option<String>,
}

impl ToggleInput {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id),
            title: title.into(),
            value: None,
            value_off: None,
            value_on: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSetInput {
    #[serde(flatten)]
    pub base: InputBase,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_multi_select: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ChoiceInputStyle>,
    /// Comma-separated choice values when multi-select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl ChoiceSetInput {
    pub fn new(id: impl Into<String>, title: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            base: InputBase::new(id),
            title: title.into(),
            choices,
            is_multi_select: None,
            style: None,
            value: None,
            placeholder: None,
        }
    }
}

/// A selectable option of a [`ChoiceSetInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub title: String,
    pub value: String,
}

impl Choice {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

impl DocumentNode for Choice {
    const KIND: NodeKind = NodeKind::Choice;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use serde_json::json;

    #[test]
    fn test_number_input_keeps_exact_bounds() {
        let element: Element = serde_json::from_value(json!({
            "type": "Input.Number",
            "id": "qty",
            "min": 1,
            "max": 9.5,
            "value": "3"
        }))
        .unwrap();
        let Element::NumberInput(input) = &element else {
            panic!("expected a number input, got {element:?}");
        };
        assert_eq!(input.min, Some(Number::from(1)));
        assert_eq!(input.value.as_deref(), Some("3"));
        let back = serde_json::to_value(&element).unwrap();
        assert_eq!(back["max"], json!(9.5));
    }

    #[test]
    fn test_choice_set_omits_empty_choices() {
        let input = ChoiceSetInput::new("color", "Pick one", Vec::new());
        let value = serde_json::to_value(Element::from(input)).unwrap();
        assert_eq!(
            value,
            json!({"type": "Input.ChoiceSet", "id": "color", "title": "Pick one"})
        );
    }

    #[test]
    fn test_toggle_camel_case_fields() {
        let mut toggle = ToggleInput::new("agree", "I agree");
        toggle.value_on = Some("yes".to_string());
        let value = serde_json::to_value(Element::from(toggle)).unwrap();
        assert_eq!(value["valueOn"], "yes");
        assert!(value.get("valueOff").is_none());
    }
}
