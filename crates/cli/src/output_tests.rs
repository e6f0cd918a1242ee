// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

fn sink(default: OutputFormat, forced: Option<OutputFormat>) -> TerminalSink {
    TerminalSink::new(default, forced)
}

#[parameterized(
    nested = { "nested", Some(OutputFormat::Nested) },
    yaml = { "yaml", Some(OutputFormat::Yaml) },
    json = { "json", Some(OutputFormat::Json) },
    raw = { "raw", Some(OutputFormat::Raw) },
    txt = { "txt", Some(OutputFormat::Txt) },
    upper = { "JSON", Some(OutputFormat::Json) },
    unknown = { "highstate", None },
)]
fn format_names(name: &str, expected: Option<OutputFormat>) {
    assert_eq!(OutputFormat::from_name(name), expected);
}

#[parameterized(
    no_hint = { None, None, OutputFormat::Nested },
    hint = { None, Some("json"), OutputFormat::Json },
    unknown_hint = { None, Some("highstate"), OutputFormat::Nested },
    forced_over_hint = { Some(OutputFormat::Raw), Some("json"), OutputFormat::Raw },
    forced_without_hint = { Some(OutputFormat::Txt), None, OutputFormat::Txt },
)]
fn format_resolution(forced: Option<OutputFormat>, hint: Option<&str>, expected: OutputFormat) {
    assert_eq!(sink(OutputFormat::Nested, forced).resolve(hint), expected);
}

#[test]
fn nested_indents_maps_and_lists() {
    let data = json!({
        "20230101120000000001": {
            "Function": "test.ping",
            "Arguments": ["a", {"k": 1}],
            "Running": [],
        }
    });

    let text = sink(OutputFormat::Nested, None).render(&data, None).unwrap();

    similar_asserts::assert_eq!(
        text,
        "\
20230101120000000001:
    Function:
        test.ping
    Arguments:
        - a
        -
            k:
                1
    Running:
        []
"
    );
}

#[test]
fn nested_empty_result_is_visible() {
    let text = sink(OutputFormat::Nested, None).render(&json!({}), None).unwrap();
    assert_eq!(text, "{}\n");
}

#[test]
fn raw_is_single_line_json() {
    let text = sink(OutputFormat::Raw, None).render(&json!({"web1": [1, 2]}), None).unwrap();
    assert_eq!(text, "{\"web1\":[1,2]}\n");
}

#[test]
fn json_is_pretty() {
    let text = sink(OutputFormat::Nested, None).render(&json!({"web1": true}), Some("json")).unwrap();
    assert_eq!(text, "{\n  \"web1\": true\n}\n");
}

#[test]
fn txt_prints_one_line_per_key() {
    let text =
        sink(OutputFormat::Txt, None).render(&json!({"web1": "ok", "web2": {"a": 1}}), None).unwrap();
    assert_eq!(text, "web1: ok\nweb2: {\"a\":1}\n");
}

#[test]
fn colored_nested_paints_keys() {
    let sink = TerminalSink::new(OutputFormat::Nested, None).with_palette(Palette::new(true));
    let text = sink.render(&json!({"web1": true}), None).unwrap();
    assert!(text.contains("\x1b[38;5;74mweb1\x1b[0m:"), "got {text:?}");
}
