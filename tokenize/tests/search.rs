use std::time::{Duration, Instant};

use tokenize::tokenizer::{LIST_ALL_CHUNK, LIST_ALL_INTERVAL, SEARCH_DELAY, SEARCH_LIMIT};
use tokenize::{Key, SelectOption, Tokenizer, TokenizerState};

fn tokenizer_with(values: &[String]) -> Tokenizer {
    let mut tokenizer = Tokenizer::new("", true);
    for value in values {
        tokenizer.select_mut().push(SelectOption::new(value.clone()));
    }
    tokenizer.remap(Some(values.to_vec()));
    tokenizer
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn type_text(t: &mut Tokenizer, text: &str, now: Instant) {
    for c in text.chars() {
        t.press(Key::Char(c), now);
    }
}

fn entry_values(t: &Tokenizer) -> Vec<&str> {
    t.dropdown_entries().iter().map(|e| e.value.as_str()).collect()
}

// ============================================================================
// Text search
// ============================================================================

#[test]
fn test_search_is_case_insensitive() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["Italy", "France", "Spain"]));

    type_text(&mut t, "ITAL", now);
    assert_eq!(t.state(), TokenizerState::Typing);
    assert!(t.tick(now + SEARCH_DELAY));

    assert_eq!(entry_values(&t), vec!["Italy"]);
    assert_eq!(t.hovered(), Some(0));
    assert_eq!(t.state(), TokenizerState::DropdownOpen);
}

#[test]
fn test_search_is_literal() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["a.b", "axb", "A.B.C"]));

    type_text(&mut t, "a.b", now);
    t.tick(now + SEARCH_DELAY);

    assert_eq!(entry_values(&t), vec!["a.b", "A.B.C"]);
}

#[test]
fn test_search_caps_results() {
    let now = Instant::now();
    let values: Vec<String> = (0..25).map(|i| format!("item {}", i)).collect();
    let mut t = tokenizer_with(&values);

    type_text(&mut t, "item", now);
    t.tick(now + SEARCH_DELAY);

    assert_eq!(t.dropdown_entries().len(), SEARCH_LIMIT);
    assert_eq!(t.dropdown_entries()[0].value, "item 0");
}

#[test]
fn test_search_skips_selected_values() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["apple", "apricot", "banana"]));
    t.token_add("apple", None, false);

    type_text(&mut t, "ap", now);
    t.tick(now + SEARCH_DELAY);

    assert_eq!(entry_values(&t), vec!["apricot"]);
}

#[test]
fn test_search_without_match_hides_dropdown() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["Italy", "France"]));

    type_text(&mut t, "zzz", now);
    t.tick(now + SEARCH_DELAY);

    assert!(!t.is_dropdown_visible());
    assert!(t.dropdown_entries().is_empty());
    assert_eq!(t.state(), TokenizerState::Searching);
}

#[test]
fn test_blank_search_lists_all() {
    let now = Instant::now();
    let values: Vec<String> = (0..20).map(|i| format!("v{}", i)).collect();
    let mut t = tokenizer_with(&values);

    type_text(&mut t, " ", now);
    t.tick(now + SEARCH_DELAY);

    assert!(t.is_dropdown_visible());
    assert_eq!(t.dropdown_entries().len(), LIST_ALL_CHUNK);
    assert_eq!(t.hovered(), Some(0));
}

// ============================================================================
// Debounce
// ============================================================================

#[test]
fn test_keystroke_restarts_debounce() {
    let t0 = Instant::now();
    let mut t = tokenizer_with(&strings(&["Italy", "France"]));

    t.press(Key::Char('I'), t0);
    let t1 = t0 + Duration::from_millis(300);
    t.press(Key::Char('t'), t1);

    assert!(!t.tick(t0 + SEARCH_DELAY));
    assert!(!t.is_dropdown_visible());
    assert_eq!(t.next_deadline(), Some(t1 + SEARCH_DELAY));

    assert!(t.tick(t1 + SEARCH_DELAY));
    assert_eq!(entry_values(&t), vec!["Italy"]);
}

#[test]
fn test_escape_cancels_pending_search() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["Italy"]));

    type_text(&mut t, "it", now);
    t.press(Key::Escape, now);

    assert_eq!(t.input(), "");
    assert_eq!(t.next_deadline(), None);
    assert_eq!(t.state(), TokenizerState::Idle);
}

#[test]
fn test_click_container_searches_waiting_text() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["Italy", "France"]));

    type_text(&mut t, "fr", now);
    t.click_container(now);

    assert!(t.is_focused());
    assert_eq!(entry_values(&t), vec!["France"]);
}

// ============================================================================
// Full listing
// ============================================================================

#[test]
fn test_list_all_pages() {
    let now = Instant::now();
    let values: Vec<String> = (0..40).map(|i| format!("v{}", i)).collect();
    let mut t = tokenizer_with(&values);

    t.toggle_dropdown(now);
    assert!(t.is_dropdown_visible());
    assert_eq!(t.dropdown_entries().len(), 15);
    assert_eq!(t.hovered(), Some(0));

    t.tick(now + LIST_ALL_INTERVAL);
    assert_eq!(t.dropdown_entries().len(), 30);

    t.tick(now + LIST_ALL_INTERVAL * 2);
    assert_eq!(t.dropdown_entries().len(), 40);
    assert_eq!(t.next_deadline(), None);
    assert_eq!(t.hovered(), Some(0));
}

#[test]
fn test_hiding_stops_listing() {
    let now = Instant::now();
    let values: Vec<String> = (0..40).map(|i| format!("v{}", i)).collect();
    let mut t = tokenizer_with(&values);

    t.toggle_dropdown(now);
    t.toggle_dropdown(now);

    assert!(!t.is_dropdown_visible());
    assert_eq!(t.next_deadline(), None);
    assert!(!t.tick(now + LIST_ALL_INTERVAL));
    assert!(t.dropdown_entries().is_empty());
}

#[test]
fn test_disabled_arrow_does_nothing() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["a", "b"]));
    t.toggle_dropdown_arrow(false);

    t.toggle_dropdown(now);

    assert!(!t.is_dropdown_visible());
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_pointer_leave_hides_after_delay() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["a", "b"]));
    t.toggle_dropdown(now);

    t.pointer_leave(now);
    assert!(!t.tick(now + Duration::from_millis(999)));
    assert!(t.is_dropdown_visible());

    assert!(t.tick(now + Duration::from_millis(1000)));
    assert!(!t.is_dropdown_visible());
}

#[test]
fn test_pointer_return_keeps_dropdown() {
    let now = Instant::now();
    let mut t = tokenizer_with(&strings(&["a", "b"]));
    t.toggle_dropdown(now);

    t.pointer_leave(now);
    t.pointer_enter();

    assert!(!t.tick(now + Duration::from_secs(2)));
    assert!(t.is_dropdown_visible());
}
