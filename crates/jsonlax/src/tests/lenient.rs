use crate::{CharReader, ParserOptions, ValueKind};

fn reader(options: ParserOptions) -> CharReader {
    CharReader::new(options)
}

#[test]
fn single_quoted_strings() {
    let reader = reader(ParserOptions {
        allow_single_quotes: true,
        ..ParserOptions::default()
    });
    let root = reader.parse_str("{'key': 'value'}").unwrap();
    assert_eq!(root["key"].as_str(), Some("value"));

    // Both quote styles mix, and a raw `"` inside a single-quoted string is
    // just a byte.
    let root = reader.parse_str("['say \"hi\"', \"y\"]").unwrap();
    assert_eq!(root[0].as_str(), Some("say \"hi\""));
    assert_eq!(root[1].as_str(), Some("y"));
}

#[test]
fn numeric_keys() {
    let reader = reader(ParserOptions {
        allow_numeric_keys: true,
        ..ParserOptions::default()
    });
    let root = reader.parse_str("{1: \"one\", 2.5: \"half\", -3: \"neg\"}").unwrap();
    assert_eq!(root["1"].as_str(), Some("one"));
    assert_eq!(root["2.5"].as_str(), Some("half"));
    assert_eq!(root["-3"].as_str(), Some("neg"));
}

#[test]
fn numeric_keys_rejected_by_default() {
    let err = crate::parse("{1: \"one\"}").unwrap_err();
    let error = &err.report().expect("syntax failure").errors()[0];
    assert_eq!(error.message, "Missing '}' or object member name");
}

#[test]
fn dropped_null_placeholders_in_arrays() {
    let reader = reader(ParserOptions {
        allow_dropped_null_placeholders: true,
        ..ParserOptions::default()
    });

    let root = reader.parse_str("[1,,3]").unwrap();
    assert_eq!(root.len(), 3);
    assert_eq!(root[0].as_i64(), Some(1));
    assert!(root[1].is_null());
    assert_eq!(root[2].as_i64(), Some(3));

    let root = reader.parse_str("[,]").unwrap();
    assert_eq!(root.len(), 2);
    assert!(root[0].is_null());
    assert!(root[1].is_null());

    // A trailing comma reads as one more elided element.
    let root = reader.parse_str("[1,]").unwrap();
    assert_eq!(root.len(), 2);
    assert!(root[1].is_null());
}

#[test]
fn dropped_null_placeholder_in_object_member() {
    let reader = reader(ParserOptions {
        allow_dropped_null_placeholders: true,
        ..ParserOptions::default()
    });
    let root = reader.parse_str("{\"a\":, \"b\": 2}").unwrap();
    assert!(root["a"].is_null());
    assert_eq!(root["b"].as_i64(), Some(2));
}

#[test]
fn elision_rejected_by_default() {
    assert!(crate::parse("[1,,3]").is_err());
    assert!(crate::parse("[,]").is_err());
}

#[test]
fn special_floats() {
    let reader = reader(ParserOptions {
        allow_special_floats: true,
        ..ParserOptions::default()
    });

    let root = reader.parse_str("-Infinity").unwrap();
    assert_eq!(root.kind(), ValueKind::Double);
    assert_eq!(root.as_f64(), Some(f64::NEG_INFINITY));

    let root = reader.parse_str("[NaN, Infinity, -Infinity]").unwrap();
    assert!(root[0].as_f64().unwrap().is_nan());
    assert_eq!(root[1].as_f64(), Some(f64::INFINITY));
    assert_eq!(root[2].as_f64(), Some(f64::NEG_INFINITY));
}

#[test]
fn special_floats_do_not_shadow_numbers() {
    let reader = reader(ParserOptions {
        allow_special_floats: true,
        ..ParserOptions::default()
    });
    assert_eq!(reader.parse_str("-12").unwrap().as_i64(), Some(-12));
    assert_eq!(reader.parse_str("12").unwrap().as_i64(), Some(12));
}

#[test]
fn settings_bag_drives_the_same_switches() {
    let mut builder = crate::ReaderBuilder::new();
    builder
        .set("allowDroppedNullPlaceholders", true)
        .set("allowSpecialFloats", true);
    let reader = builder.new_reader();
    let root = reader.parse_str("[NaN,,1]").unwrap();
    assert!(root[0].as_f64().unwrap().is_nan());
    assert!(root[1].is_null());
    assert_eq!(root[2].as_i64(), Some(1));
}
