//! Round-trip laws of the codec over generated cards.
//!
//! For every valid typed tree `t`, decoding the encoding of `t` yields `t`
//! again, in both wire formats, and sequences keep their order.

use acard_core::{
    Action, ActionBase, Card, Choice, ChoiceInputStyle, ChoiceSetInput, Column, ColumnSet,
    ColumnWidth, Container, ContainerStyle, DateInput, Element, ElementBase, Fact, FactSet,
    HorizontalAlignment, Image, ImageSet, ImageSize, ImageStyle, InputBase, NumberInput,
    OpenUrlAction, SchemaUri, SchemaVersion, ShowCardAction, ShowableCard, Spacing, SubmitAction,
    SubmitData, TextBlock, TextColor, TextInput, TextSize, TextWeight, TimeInput, ToggleInput,
    WidthKeyword,
};
use acard_schema::{decode, encode, Validator, WireFormat};
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,12}"
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.!?]{0,30}[A-Za-z0-9]"
}

fn number() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i32>().prop_map(Number::from),
        (0u32..400).prop_map(|n| {
            Number::from_f64(f64::from(n) / 4.0).unwrap_or_else(|| Number::from(n))
        }),
    ]
}

fn closed<T: Copy + std::fmt::Debug + 'static>(all: &'static [T]) -> impl Strategy<Value = T> {
    proptest::sample::select(all)
}

fn element_base() -> impl Strategy<Value = ElementBase> {
    (
        proptest::option::of(word()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(closed(Spacing::all())),
    )
        .prop_map(|(id, separator, spacing)| ElementBase {
            id,
            separator,
            spacing,
        })
}

fn input_base() -> impl Strategy<Value = InputBase> {
    (
        word(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(closed(Spacing::all())),
    )
        .prop_map(|(id, separator, spacing)| InputBase {
            id,
            separator,
            spacing,
        })
}

fn text_block() -> impl Strategy<Value = Element> {
    (
        element_base(),
        text(),
        proptest::option::of(closed(TextColor::all())),
        proptest::option::of(closed(HorizontalAlignment::all())),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<u32>()),
        proptest::option::of(closed(TextSize::all())),
        proptest::option::of(closed(TextWeight::all())),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(
            |(base, text, color, horizontal_alignment, is_subtle, max_lines, size, weight, wrap)| {
                Element::TextBlock(TextBlock {
                    base,
                    text,
                    color,
                    horizontal_alignment,
                    is_subtle,
                    max_lines,
                    size,
                    weight,
                    wrap,
                })
            },
        )
}

fn image() -> impl Strategy<Value = Image> {
    (
        element_base(),
        word(),
        proptest::option::of(text()),
        proptest::option::of(closed(HorizontalAlignment::all())),
        proptest::option::of(closed(ImageSize::all())),
        proptest::option::of(closed(ImageStyle::all())),
    )
        .prop_map(|(base, name, alt_text, horizontal_alignment, size, style)| Image {
            base,
            url: format!("https://example.com/{name}.png"),
            alt_text,
            horizontal_alignment,
            size,
            style,
        })
}

fn inputs() -> impl Strategy<Value = Element> {
    let optional_text = || proptest::option::of(text());
    prop_oneof![
        (
            input_base(),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<u32>()),
            optional_text(),
        )
            .prop_map(|(base, is_multiline, max_length, placeholder)| {
                Element::TextInput(TextInput {
                    base,
                    is_multiline,
                    max_length,
                    placeholder,
                    value: None,
                })
            }),
        (input_base(), proptest::option::of(number()), proptest::option::of(number()))
            .prop_map(|(base, max, min)| {
                Element::NumberInput(NumberInput {
                    base,
                    max,
                    min,
                    placeholder: None,
                    value: Some("0".to_string()),
                })
            }),
        (input_base(), optional_text()).prop_map(|(base, placeholder)| {
            Element::DateInput(DateInput {
                base,
                max: Some("2030-12-31".to_string()),
                min: None,
                placeholder,
                value: None,
            })
        }),
        input_base().prop_map(|base| {
            Element::TimeInput(TimeInput {
                base,
                max: None,
                min: Some("08:00".to_string()),
                placeholder: None,
                value: Some("09:30".to_string()),
            })
        }),
        (input_base(), text(), optional_text()).prop_map(|(base, title, value_on)| {
            Element::ToggleInput(ToggleInput {
                base,
                title,
                value: None,
                value_off: None,
                value_on,
            })
        }),
        (
            input_base(),
            text(),
            prop::collection::vec((text(), word()), 0..5),
            proptest::option::of(any::<bool>()),
            proptest::option::of(closed(ChoiceInputStyle::all())),
        )
            .prop_map(|(base, title, choices, is_multi_select, style)| {
                Element::ChoiceSetInput(ChoiceSetInput {
                    base,
                    title,
                    choices: choices
                        .into_iter()
                        .map(|(title, value)| Choice::new(title, value))
                        .collect(),
                    is_multi_select,
                    style,
                    value: None,
                    placeholder: None,
                })
            }),
    ]
}

fn leaf_element() -> impl Strategy<Value = Element> {
    prop_oneof![
        text_block(),
        image().prop_map(Element::Image),
        (element_base(), prop::collection::vec((text(), text()), 1..5)).prop_map(
            |(base, facts)| {
                Element::FactSet(FactSet {
                    base,
                    facts: facts
                        .into_iter()
                        .map(|(title, value)| Fact::new(title, value))
                        .collect(),
                })
            }
        ),
        (prop::collection::vec(image(), 0..4), proptest::option::of(closed(ImageSize::all())))
            .prop_map(|(images, image_size)| {
                let mut set = ImageSet::new(images);
                set.image_size = image_size;
                Element::ImageSet(set)
            }),
        inputs(),
    ]
}

fn width() -> impl Strategy<Value = ColumnWidth> {
    prop_oneof![
        (1u8..10).prop_map(|n| ColumnWidth::Weight(Number::from(n))),
        closed(WidthKeyword::all()).prop_map(ColumnWidth::Keyword),
        (1u16..500).prop_map(|px| ColumnWidth::from_text(format!("{px}px"))),
        prop_oneof![Just("auto"), Just("stretch"), Just("50%"), Just("1fr")]
            .prop_map(|text| ColumnWidth::from_text(text)),
    ]
}

fn element() -> impl Strategy<Value = Element> {
    leaf_element().prop_recursive(3, 24, 4, |inner| {
        let items = prop::collection::vec(inner, 0..4);
        prop_oneof![
            (element_base(), items.clone(), proptest::option::of(closed(ContainerStyle::all())))
                .prop_map(|(base, items, style)| {
                    Element::Container(Container { base, items, style })
                }),
            (
                element_base(),
                prop::collection::vec(
                    (items, proptest::option::of(word()), proptest::option::of(width())),
                    0..4
                ),
                proptest::option::of(closed(HorizontalAlignment::all())),
            )
                .prop_map(|(base, columns, horizontal_alignment)| {
                    Element::ColumnSet(ColumnSet {
                        base,
                        columns: columns
                            .into_iter()
                            .map(|(items, id, width)| {
                                let mut column = Column::new(items);
                                column.id = id;
                                column.width = width;
                                column
                            })
                            .collect(),
                        horizontal_alignment,
                    })
                }),
        ]
    })
}

fn submit_data() -> impl Strategy<Value = SubmitData> {
    prop_oneof![
        text().prop_map(SubmitData::Text),
        prop::collection::btree_map(word(), any::<i64>(), 0..4).prop_map(|fields| {
            let map: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect();
            SubmitData::Fields(map)
        }),
    ]
}

fn action_base() -> impl Strategy<Value = ActionBase> {
    (proptest::option::of(word()), proptest::option::of(text()))
        .prop_map(|(id, title)| ActionBase { id, title })
}

fn simple_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (action_base(), word()).prop_map(|(base, path)| {
            Action::OpenUrl(OpenUrlAction {
                base,
                url: format!("https://example.com/{path}"),
            })
        }),
        (action_base(), proptest::option::of(submit_data()))
            .prop_map(|(base, data)| Action::Submit(SubmitAction { base, data })),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => simple_action(),
        1 => (
            action_base(),
            prop::collection::vec(element(), 0..3),
            prop::collection::vec(simple_action(), 0..2),
            any::<bool>(),
        )
            .prop_map(|(base, body, actions, versioned)| {
                let mut card = ShowableCard::new();
                card.version = versioned.then_some(SchemaVersion::V1_0);
                card.content.body = body;
                card.content.actions = actions;
                Action::ShowCard(ShowCardAction {
                    base,
                    card: Some(card),
                })
            }),
    ]
}

const LANGUAGES: &[&str] = &["en", "fr", "de-CH"];

fn card() -> impl Strategy<Value = Card> {
    (
        prop::collection::vec(element(), 0..5),
        prop::collection::vec(action(), 0..3),
        any::<bool>(),
        proptest::option::of(text()),
        proptest::option::of(closed(LANGUAGES)),
    )
        .prop_map(|(body, actions, with_schema, fallback_text, lang)| {
            let mut card = Card::new();
            card.content.schema = with_schema.then_some(SchemaUri::AdaptiveCard);
            card.content.body = body;
            card.content.actions = actions;
            card.content.fallback_text = fallback_text;
            card.content.lang = lang.map(str::to_string);
            card
        })
}

proptest! {
    /// JSON: decode(encode(t)) == t.
    #[test]
    fn json_round_trip(card in card()) {
        let text = encode(&card, WireFormat::Json).unwrap();
        let back: Card = decode(&text, WireFormat::Json, &Validator::default()).unwrap();
        prop_assert_eq!(back, card);
    }

    /// YAML: decode(encode(t)) == t.
    #[test]
    fn yaml_round_trip(card in card()) {
        let text = encode(&card, WireFormat::Yaml).unwrap();
        let back: Card = decode(&text, WireFormat::Yaml, &Validator::default()).unwrap();
        prop_assert_eq!(back, card);
    }

    /// Encoding is a fixed point after one round trip.
    #[test]
    fn encoding_is_stable(card in card()) {
        let first = encode(&card, WireFormat::Json).unwrap();
        let back: Card = decode(&first, WireFormat::Json, &Validator::default()).unwrap();
        let second = encode(&back, WireFormat::Json).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Columns come back in the order they were written.
    #[test]
    fn column_order_is_preserved(labels in prop::collection::vec(word(), 1..8)) {
        let columns: Vec<Column> = labels
            .iter()
            .map(|label| Column::new(vec![TextBlock::new(label.clone()).into()]))
            .collect();
        let card = Card::new().with_element(ColumnSet::new(columns));
        let text = encode(&card, WireFormat::Json).unwrap();
        let back: Card = decode(&text, WireFormat::Json, &Validator::default()).unwrap();

        let Element::ColumnSet(set) = &back.content.body[0] else {
            panic!("expected a column set");
        };
        let read: Vec<String> = set
            .columns
            .iter()
            .map(|column| match &column.items[0] {
                Element::TextBlock(block) => block.text.clone(),
                other => panic!("unexpected item {other:?}"),
            })
            .collect();
        prop_assert_eq!(read, labels);
    }
}

#[test]
fn test_column_order_abc() {
    let columns = ["A", "B", "C"]
        .iter()
        .map(|label| {
            let mut column = Column::new(vec![TextBlock::new(*label).into()]);
            column.id = Some(label.to_string());
            column
        })
        .collect();
    let card = Card::new().with_element(ColumnSet::new(columns));
    let text = encode(&card, WireFormat::Json).unwrap();
    let back: Card = decode(&text, WireFormat::Json, &Validator::default()).unwrap();
    let Element::ColumnSet(set) = &back.content.body[0] else {
        panic!("expected a column set");
    };
    let ids: Vec<_> = set.columns.iter().filter_map(|c| c.id.as_deref()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[test]
fn test_keyword_width_text_round_trip() {
    for text in ["auto", "stretch"] {
        let column = Column::new(vec![]).with_width(ColumnWidth::from_text(text));
        let card = Card::new().with_element(ColumnSet::new(vec![column]));
        let encoded = encode(&card, WireFormat::Json).unwrap();
        let back: Card = decode(&encoded, WireFormat::Json, &Validator::default()).unwrap();
        assert_eq!(back, card, "width {text:?} changed through JSON");
    }
}
