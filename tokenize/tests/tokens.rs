use std::time::Instant;

use tokenize::tokenizer::SEARCH_DELAY;
use tokenize::{Key, SelectOption, TokenEvent, TokenEventKind, Tokenizer};

fn tokenizer_with(values: &[&str]) -> Tokenizer {
    let mut tokenizer = Tokenizer::new("", true);
    for value in values {
        tokenizer.select_mut().push(SelectOption::new(*value));
    }
    tokenizer.remap(Some(values.iter().map(|v| v.to_string()).collect()));
    tokenizer
}

fn kinds(events: &[TokenEvent]) -> Vec<TokenEventKind> {
    events.iter().map(|e| e.kind).collect()
}

// ============================================================================
// Add / Remove
// ============================================================================

#[test]
fn test_add_then_remove() {
    let mut t = tokenizer_with(&["A", "B", "C"]);
    t.token_add("A", None, false);
    t.token_add("B", None, false);
    t.token_add("C", None, false);
    t.token_remove("B", false);

    assert_eq!(t.values(), vec!["A", "C"]);
    assert_eq!(
        t.take_events(),
        vec![
            TokenEvent::add("A", "A"),
            TokenEvent::add("B", "B"),
            TokenEvent::add("C", "C"),
            TokenEvent::remove("B"),
        ]
    );

    let selected: Vec<&str> = t.select().selected().map(|o| o.value.as_str()).collect();
    assert_eq!(selected, vec!["A", "C"]);
}

#[test]
fn test_tokens_keep_insertion_order() {
    let mut t = tokenizer_with(&["A", "B", "C"]);
    t.token_add("C", None, false);
    t.token_add("A", None, false);

    assert_eq!(t.values(), vec!["C", "A"]);
}

#[test]
fn test_duplicate_add_is_idempotent() {
    let mut t = tokenizer_with(&["A", "B"]);
    t.token_add("A", None, false);
    t.token_add("A", Some("Alpha"), false);

    assert_eq!(t.values(), vec!["A"]);
    assert_eq!(
        kinds(&t.take_events()),
        vec![TokenEventKind::Add, TokenEventKind::Duplicate]
    );
}

#[test]
fn test_internal_duplicate_is_silent() {
    let mut t = tokenizer_with(&["A"]);
    t.token_add("A", None, true);
    t.token_add("A", None, true);

    assert_eq!(t.values(), vec!["A"]);
    assert!(t.take_events().is_empty());
}

#[test]
fn test_unknown_value_rejected() {
    let mut t = tokenizer_with(&["A"]);
    t.token_add("Z", None, false);

    assert!(t.tokens().is_empty());
    assert!(t.take_events().is_empty());
}

#[test]
fn test_empty_value_is_noop() {
    let mut t = tokenizer_with(&["A"]);
    t.token_add("\"\"", None, false);

    assert!(t.tokens().is_empty());
}

#[test]
fn test_values_are_sanitized() {
    let mut t = tokenizer_with(&["OBrien", "a &lt; b"]);
    t.token_add("O'Brien", None, false);
    t.token_add("a < b", None, false);

    assert_eq!(t.values(), vec!["OBrien", "a &lt; b"]);
}

#[test]
fn test_text_defaults_to_value() {
    let mut t = tokenizer_with(&["A"]);
    t.token_add("A", Some(""), false);

    assert_eq!(t.tokens()[0].text, "A");
}

#[test]
fn test_remove_unknown_value_is_silent() {
    let mut t = tokenizer_with(&["A"]);
    t.token_add("A", None, false);
    t.take_events();

    t.token_remove("Z", false);

    assert_eq!(t.values(), vec!["A"]);
    assert!(t.take_events().is_empty());
    assert!(!t.is_dropdown_visible());
}

#[test]
fn test_remove_unselected_option_is_silent() {
    let mut t = tokenizer_with(&["A", "B"]);
    t.token_add("A", None, false);
    t.take_events();

    t.token_remove("B", false);

    assert_eq!(t.values(), vec!["A"]);
    assert!(t.take_events().is_empty());
}

// ============================================================================
// Limit
// ============================================================================

#[test]
fn test_add_at_limit_is_rejected() {
    let mut t = tokenizer_with(&["A", "B", "C"]);
    t.set_max_elements(Some(2));
    t.token_add("A", None, false);
    t.token_add("B", None, false);
    t.token_add("C", None, false);

    assert_eq!(t.values(), vec!["A", "B"]);
    assert_eq!(t.take_events().len(), 2);
    assert!(!t.select().get("C").unwrap().selected);
}

#[test]
fn test_zero_limit_is_unlimited() {
    let mut t = tokenizer_with(&["A", "B", "C"]);
    t.set_max_elements(Some(0));
    for v in ["A", "B", "C"] {
        t.token_add(v, None, false);
    }

    assert_eq!(t.tokens().len(), 3);
}

// ============================================================================
// Readonly
// ============================================================================

#[test]
fn test_readonly_rejects_user_mutations() {
    let mut t = tokenizer_with(&["A", "B"]);
    t.select_mut().select("A");
    t.toggle_readonly(true);
    t.remap(None);

    assert_eq!(t.values(), vec!["A"]);

    t.token_add("B", None, false);
    t.token_remove("A", false);
    t.clear(false);

    assert_eq!(t.values(), vec!["A"]);
    assert!(t.take_events().is_empty());
}

#[test]
fn test_readonly_population_ignores_limit() {
    let mut t = tokenizer_with(&["A", "B", "C"]);
    t.set_max_elements(Some(1));
    for v in ["A", "B", "C"] {
        t.select_mut().select(v);
    }
    t.toggle_readonly(true);
    t.remap(None);

    assert_eq!(t.tokens().len(), 3);
}

// ============================================================================
// Clear / Remap
// ============================================================================

#[test]
fn test_clear_emits_once() {
    let mut t = tokenizer_with(&["A", "B"]);
    t.token_add("A", None, false);
    t.token_add("B", None, false);
    t.take_events();

    t.clear(false);

    assert!(t.tokens().is_empty());
    assert_eq!(t.select().selected_count(), 0);
    assert_eq!(t.take_events(), vec![TokenEvent::clear()]);
}

#[test]
fn test_clear_on_empty_still_emits() {
    let mut t = tokenizer_with(&["A"]);
    t.clear(false);

    assert_eq!(kinds(&t.take_events()), vec![TokenEventKind::Clear]);
}

#[test]
fn test_internal_clear_is_silent() {
    let mut t = tokenizer_with(&["A"]);
    t.token_add("A", None, true);
    t.clear(true);

    assert!(t.tokens().is_empty());
    assert!(t.take_events().is_empty());
}

#[test]
fn test_remap_rebuilds_from_selected_options() {
    let mut t = Tokenizer::new("", false);
    t.select_mut().push(SelectOption::new("A"));
    t.select_mut().push(SelectOption::new("B").with_selected(true));
    t.select_mut()
        .push(SelectOption::new("C").with_text("Charlie").with_selected(true));
    t.remap(Some(vec!["A".into(), "B".into(), "C".into()]));

    assert_eq!(t.values(), vec!["B", "C"]);
    assert_eq!(t.tokens()[1].text, "Charlie");
    assert!(t.take_events().is_empty());

    t.remap(None);
    assert_eq!(t.values(), vec!["B", "C"]);
    assert!(t.take_events().is_empty());
}

// ============================================================================
// Custom options
// ============================================================================

#[test]
fn test_dropdown_only_value_becomes_custom_option() {
    let now = Instant::now();
    let mut t = Tokenizer::new("", false);
    t.select_mut().push(SelectOption::new("A"));
    t.remap(Some(vec!["A".into(), "B".into()]));

    t.press(Key::Char('B'), now);
    t.tick(now + SEARCH_DELAY);
    assert_eq!(t.dropdown_entries().len(), 1);

    t.press(Key::Enter, now + SEARCH_DELAY);
    assert_eq!(t.values(), vec!["B"]);
    assert!(t.select().get("B").unwrap().custom);

    t.token_remove("B", false);
    assert!(t.select().get("B").is_none());
    assert!(t.select().get("A").is_some());
}

#[test]
fn test_remap_deselects_options_beyond_limit() {
    let mut t = Tokenizer::new("", false);
    for v in ["A", "B", "C"] {
        t.select_mut().push(SelectOption::new(v).with_selected(true));
    }
    t.set_max_elements(Some(2));
    t.remap(Some(vec!["A".into(), "B".into(), "C".into()]));

    assert_eq!(t.values(), vec!["A", "B"]);
    assert_eq!(t.select().selected_count(), 2);
    assert!(!t.select().get("C").unwrap().selected);
}
