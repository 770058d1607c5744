//! Block parsing: states validation, NBT suffix, completions.

mod helpers;

use helpers::{test_cache, test_suite};
use mcfunction::base::StringReader;
use mcfunction::parser::ParseContext;
use mcfunction::syntax::{NbtValue, Severity};
use mcfunction::{Config, Span};

// ============================================================
// Structure
// ============================================================

#[test]
fn id_only() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new("minecraft:stone"), &ctx);
    assert!(res.errors.is_empty());
    assert_eq!(res.data.id.lookup_key(), "minecraft:stone");
    assert!(res.data.states.is_empty());
    assert!(res.data.tag.is_none());
}

#[test]
fn states_and_nbt_suffix() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let mut reader = StringReader::new("minecraft:stone[ snowy = true , age = 2 ]{fizz: buzz}");
    let res = parser.parse(&mut reader, &ctx);
    assert!(res.errors.is_empty(), "unexpected: {:?}", res.errors);
    assert_eq!(res.data.states.get("snowy").map(String::as_str), Some("true"));
    assert_eq!(res.data.states.get("age").map(String::as_str), Some("2"));
    let tag = res.data.tag.as_ref().unwrap();
    assert_eq!(tag.get("fizz"), Some(&NbtValue::String("buzz".to_string())));
    assert!(!reader.can_read());
}

#[test]
fn empty_state_brackets_are_fine() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new("minecraft:grass_block[]"), &ctx);
    assert!(res.errors.is_empty());
    assert!(res.data.states.is_empty());
}

// ============================================================
// Validation against block definitions
// ============================================================

#[test]
fn unknown_block_id_warns_and_skips_state_validation() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new("spgoding:wtf[anything=goes]"), &ctx);
    assert_eq!(res.errors.len(), 1);
    assert_eq!(res.errors[0].severity, Severity::Warning);
    assert_eq!(res.data.states.get("anything").map(String::as_str), Some("goes"));
}

#[test]
fn tags_skip_state_validation() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new("#spgoding:stone_like[mood=low]"), &ctx);
    // The tag's member set is unknown here, so the states parse unchecked.
    assert!(res.errors.is_empty(), "unexpected: {:?}", res.errors);
    assert_eq!(res.data.states.get("mood").map(String::as_str), Some("low"));
}

#[test]
fn unknown_state_key_is_reported_with_the_expected_set() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new("minecraft:stone[color=red]"), &ctx);
    assert!(res.errors.iter().any(|e| {
        e.message == "expected 'snowy' or 'age' but got 'color'"
            && e.range == Span::new(16, 21)
    }));
}

#[test]
fn duplicate_state_key_is_reported_at_the_second_use() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(
        &mut StringReader::new("minecraft:stone[snowy=true,snowy=false]"),
        &ctx,
    );
    // Both the not-in-remaining-set and the duplicate diagnostics fire,
    // anchored at the second `snowy`.
    let at_second: Vec<&str> = res
        .errors
        .iter()
        .filter(|e| e.range == Span::new(27, 32))
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(
        at_second,
        ["expected 'age' but got 'snowy'", "duplicate key 'snowy'"]
    );
    // Last write wins for the recovered value.
    assert_eq!(res.data.states.get("snowy").map(String::as_str), Some("false"));
}

#[test]
fn wrong_state_value_is_reported_against_the_allowed_values() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new("minecraft:stone[snowy=maybe]"), &ctx);
    assert!(res
        .errors
        .iter()
        .any(|e| e.message == "expected 'true' or 'false' but got 'maybe'"));
}

#[test]
fn missing_value_reports_both_the_value_and_the_bracket() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let ctx = ParseContext::new(&suite, &config, &cache);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new("minecraft:stone[snowy="), &ctx);
    let messages: Vec<&str> = res.errors.iter().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&"expected 'true' or 'false' but got nothing"));
    assert!(messages.contains(&"expected ']' but got nothing"));
    assert_eq!(res.data.states.get("snowy").map(String::as_str), Some(""));
}

// ============================================================
// Completions
// ============================================================

#[test]
fn caret_at_a_key_position_offers_unused_keys() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let input = "minecraft:stone[snowy=true,]";
    let ctx = ParseContext::new(&suite, &config, &cache).with_cursor(27);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new(input), &ctx);
    let labels: Vec<&str> = res.completions.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["age"], "snowy is already used");
}

#[test]
fn caret_at_a_value_position_offers_allowed_values() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let input = "minecraft:stone[snowy=]";
    let ctx = ParseContext::new(&suite, &config, &cache).with_cursor(22);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new(input), &ctx);
    let labels: Vec<&str> = res.completions.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["true", "false"]);
}

#[test]
fn blocks_without_properties_offer_nothing() {
    let suite = test_suite();
    let config = Config::default();
    let cache = test_cache();
    let input = "minecraft:grass_block[]";
    let ctx = ParseContext::new(&suite, &config, &cache).with_cursor(22);
    let parser = suite.block(true).unwrap();

    let res = parser.parse(&mut StringReader::new(input), &ctx);
    assert!(res.completions.is_empty());
}
