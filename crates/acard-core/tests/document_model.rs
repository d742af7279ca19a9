//! Integration tests for the typed document model: builder helpers, input
//! discovery across nested structure, and the wire names serde produces.

use acard_core::{
    Action, Card, Column, ColumnSet, Container, Element, ShowCardAction, ShowableCard,
    SchemaVersion, SubmitAction, SubmitData, TextBlock, TextInput, ToggleInput,
};
use serde_json::json;

fn nested_card() -> Card {
    let columns = ColumnSet::new(vec![
        Column::new(vec![TextInput::new("first").into()]),
        Column::new(vec![TextBlock::new("between").into()]),
    ]);
    let details = ShowableCard::new().with_element(ToggleInput::new("agree", "I agree"));
    Card::new()
        .with_element(TextBlock::new("Form"))
        .with_element(Container::new(vec![columns.into()]))
        .with_element(TextInput::new("last"))
        .with_action(ShowCardAction::new("More", details))
        .with_action(SubmitAction::new("Send"))
}

#[test]
fn test_inputs_in_document_order() {
    let card = nested_card();
    let inputs = card.inputs();
    let ids: Vec<_> = inputs.iter().filter_map(|input| input.id()).collect();
    assert_eq!(ids, vec!["first", "last", "agree"]);
    assert!(inputs.iter().all(|input| input.is_input()));
}

#[test]
fn test_wire_names() {
    let value = serde_json::to_value(nested_card()).unwrap();
    assert_eq!(value["type"], "AdaptiveCard");
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["body"][1]["type"], "Container");
    assert_eq!(value["body"][1]["items"][0]["columns"][0]["type"], "Column");
    assert_eq!(value["body"][2]["type"], "Input.Text");
    assert_eq!(value["actions"][0]["type"], "Action.ShowCard");
    assert_eq!(value["actions"][0]["card"]["body"][0]["type"], "Input.Toggle");
    assert!(value["actions"][0]["card"].get("version").is_none());
    assert!(value.get("speak").is_none());
}

#[test]
fn test_showable_card_inherits_version() {
    let nested = ShowableCard::new();
    assert_eq!(nested.effective_version(SchemaVersion::V1_0), SchemaVersion::V1_0);
}

#[test]
fn test_submit_data_is_opaque() {
    let value = json!({
        "type": "Action.Submit",
        "title": "Go",
        "data": {"anything": [1, {"deep": null}]}
    });
    let action: Action = serde_json::from_value(value.clone()).unwrap();
    match &action {
        Action::Submit(submit) => {
            assert!(matches!(submit.data, Some(SubmitData::Fields(_))));
        }
        other => panic!("expected submit, got {other:?}"),
    }
    assert_eq!(serde_json::to_value(&action).unwrap(), value);
}

#[test]
fn test_element_tags_match_wire_names() {
    let element: Element = TextInput::new("x").into();
    assert_eq!(element.tag().as_str(), "Input.Text");
    assert_eq!(element.id(), Some("x"));
}
