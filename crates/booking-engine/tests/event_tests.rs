//! Tests for event type validation and duration limits.

use booking_engine::event::{
    DURATION_FLOAT_MESSAGE, DURATION_MAX_MESSAGE, DURATION_NAN_MESSAGE, DURATION_POSITIVE_MESSAGE,
    NAME_MESSAGE,
};
use booking_engine::{validate_event_type, EventDuration, EventType, Field, RawEventType};
use serde_json::{json, Value};

fn raw(name: &str, duration: Value) -> RawEventType {
    RawEventType {
        name: name.to_string(),
        description: None,
        is_active: None,
        duration_in_minutes: Some(duration),
    }
}

#[test]
fn valid_event_is_accepted_with_defaults() {
    let event = validate_event_type(&raw("Intro call", json!(30))).unwrap();

    assert_eq!(event.name, "Intro call");
    assert_eq!(event.duration.minutes(), 30);
    assert!(event.is_active, "isActive should default to true");
    assert_eq!(event.description, None);
    assert_eq!(event.duration_label(), "30 mins");
}

#[test]
fn explicit_inactive_is_kept() {
    let mut input = raw("Retro", json!(60));
    input.is_active = Some(false);
    assert!(!validate_event_type(&input).unwrap().is_active);
}

#[test]
fn short_name_rejected() {
    let violations = validate_event_type(&raw("A", json!(30))).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert!(violations.contains(Field::Name, NAME_MESSAGE));
}

#[test]
fn two_character_name_accepted() {
    assert!(validate_event_type(&raw("1:", json!(30))).is_ok());
    // Counted in UTF-16 units: one accented letter is one unit, an emoji is two.
    assert!(validate_event_type(&raw("é", json!(30))).is_err());
    assert!(validate_event_type(&raw("😀", json!(30))).is_ok());
}

#[test]
fn duration_boundaries() {
    let zero = validate_event_type(&raw("Call", json!(0))).unwrap_err();
    assert!(zero.contains(Field::DurationInMinutes, DURATION_POSITIVE_MESSAGE));

    let too_long = validate_event_type(&raw("Call", json!(721))).unwrap_err();
    assert!(too_long.contains(Field::DurationInMinutes, DURATION_MAX_MESSAGE));

    let max = validate_event_type(&raw("Call", json!(720))).unwrap();
    assert_eq!(max.duration.minutes(), 720);
    assert_eq!(max.duration_label(), "12 hrs");
}

#[test]
fn numeric_strings_are_coerced() {
    let event = validate_event_type(&raw("Call", json!(" 45 "))).unwrap();
    assert_eq!(event.duration.minutes(), 45);
}

#[test]
fn blank_string_coerces_to_zero() {
    let violations = validate_event_type(&raw("Call", json!(""))).unwrap_err();
    assert!(violations.contains(Field::DurationInMinutes, DURATION_POSITIVE_MESSAGE));
}

#[test]
fn non_numeric_duration_rejected() {
    let violations = validate_event_type(&raw("Call", json!("half an hour"))).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert!(violations.contains(Field::DurationInMinutes, DURATION_NAN_MESSAGE));
}

#[test]
fn missing_duration_rejected() {
    let input = RawEventType {
        name: "Call".to_string(),
        ..RawEventType::default()
    };
    let violations = validate_event_type(&input).unwrap_err();
    assert!(violations.contains(Field::DurationInMinutes, DURATION_NAN_MESSAGE));
}

#[test]
fn null_duration_coerces_to_zero() {
    let input: RawEventType =
        serde_json::from_str(r#"{"name":"Call","durationInMinutes":null}"#).unwrap();
    assert_eq!(input.duration_in_minutes, Some(Value::Null));

    let violations = validate_event_type(&input).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert!(violations.contains(Field::DurationInMinutes, DURATION_POSITIVE_MESSAGE));
}

#[test]
fn absent_duration_stays_distinct_from_null() {
    let input: RawEventType = serde_json::from_str(r#"{"name":"Call"}"#).unwrap();
    assert_eq!(input.duration_in_minutes, None);
}

#[test]
fn float_parser_spellings_are_not_numbers() {
    for spelling in ["inf", "-inf", "infinity", "nan", "NaN"] {
        let violations = validate_event_type(&raw("Call", json!(spelling))).unwrap_err();
        assert_eq!(violations.len(), 1, "{:?} should only be reported as NaN", spelling);
        assert!(
            violations.contains(Field::DurationInMinutes, DURATION_NAN_MESSAGE),
            "{:?} should coerce to NaN",
            spelling
        );
    }
}

#[test]
fn infinity_literal_is_not_an_integer() {
    let violations = validate_event_type(&raw("Call", json!("Infinity"))).unwrap_err();
    assert!(violations.contains(Field::DurationInMinutes, DURATION_FLOAT_MESSAGE));
    assert!(violations.contains(Field::DurationInMinutes, DURATION_MAX_MESSAGE));
}

#[test]
fn exponent_strings_are_numbers() {
    let event = validate_event_type(&raw("Call", json!("1.2e2"))).unwrap();
    assert_eq!(event.duration.minutes(), 120);
}

#[test]
fn fractional_duration_rejected() {
    let violations = validate_event_type(&raw("Call", json!(30.5))).unwrap_err();
    assert!(violations.contains(Field::DurationInMinutes, DURATION_FLOAT_MESSAGE));
}

#[test]
fn negative_fraction_reports_every_duration_rule() {
    let violations = validate_event_type(&raw("Call", json!(-1.5))).unwrap_err();
    assert!(violations.contains(Field::DurationInMinutes, DURATION_FLOAT_MESSAGE));
    assert!(violations.contains(Field::DurationInMinutes, DURATION_POSITIVE_MESSAGE));
    assert_eq!(violations.len(), 2);
}

#[test]
fn all_fields_reported_together() {
    let violations = validate_event_type(&raw("", json!(1000))).unwrap_err();
    assert!(violations.contains(Field::Name, NAME_MESSAGE));
    assert!(violations.contains(Field::DurationInMinutes, DURATION_MAX_MESSAGE));
}

#[test]
fn empty_description_is_absent() {
    let mut input = raw("Call", json!(15));
    input.description = Some(String::new());
    assert_eq!(validate_event_type(&input).unwrap().description, None);

    input.description = Some("Quick sync".to_string());
    assert_eq!(
        validate_event_type(&input).unwrap().description.as_deref(),
        Some("Quick sync")
    );
}

#[test]
fn raw_payload_deserializes_from_form_json() {
    let input: RawEventType = serde_json::from_str(
        r#"{"name":"Demo","durationInMinutes":"90","isActive":false}"#,
    )
    .unwrap();
    let event = validate_event_type(&input).unwrap();
    assert_eq!(event.duration_label(), "1 hr 30 mins");
    assert!(!event.is_active);
}

#[test]
fn event_duration_rejects_out_of_range() {
    assert!(EventDuration::new(0).is_err());
    assert!(EventDuration::new(721).is_err());
    assert_eq!(EventDuration::new(1).unwrap().label(), "1 min");
    assert!(serde_json::from_str::<EventDuration>("0").is_err());
}

#[test]
fn event_type_serializes_with_form_field_names() {
    let event = validate_event_type(&raw("Call", json!(15))).unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(
        json,
        json!({"name": "Call", "description": null, "durationInMinutes": 15, "isActive": true})
    );
    let back: EventType = serde_json::from_value(json).unwrap();
    assert_eq!(back, event);
}
