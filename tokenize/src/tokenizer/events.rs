//! Event handling for the Tokenizer widget.

use std::time::Instant;

use log::trace;

use crate::event::{EventResult, Key};

use super::{HIDE_DELAY, PASTE_DELAY, TimerKind, Tokenizer};

impl Tokenizer {
    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Deliver a full key press: keydown, the search box's own editing when
    /// the key was not consumed, then keyup.
    ///
    /// Returns `Ignored` when the key was left to the host (e.g. Tab moving
    /// focus) or when the input is disabled or readonly.
    pub fn press(&mut self, key: Key, now: Instant) -> EventResult {
        if !self.accepts_input() {
            return EventResult::Ignored;
        }

        let mut result = self.key_down(key);
        if !result.is_consumed() && self.edit_input(key) {
            result = EventResult::Consumed;
        }
        self.key_up(key, now);
        result
    }

    /// Keydown handling, before the key edits the search text.
    pub fn key_down(&mut self, key: Key) -> EventResult {
        match key {
            Key::Backspace => {
                if self.input.is_empty() && !self.readonly && !self.is_collapsed() {
                    let pending = self
                        .tokens
                        .iter()
                        .find(|t| t.pending_delete)
                        .map(|t| t.value.clone());
                    match pending {
                        Some(value) => self.token_remove(&value, false),
                        None => {
                            if let Some(last) = self.tokens.last_mut() {
                                last.pending_delete = true;
                            }
                            self.dropdown_hide();
                        }
                    }
                    return EventResult::Consumed;
                }
                EventResult::Ignored
            }

            Key::Tab | Key::Enter => {
                let mut result = EventResult::Ignored;
                if let Some(entry) = self.dropdown.hovered().cloned() {
                    result = EventResult::Consumed;
                    self.token_add(&entry.value, Some(&entry.text), false);
                } else if !self.input.is_empty() {
                    result = EventResult::Consumed;
                    let typed = self.input.clone();
                    self.token_add(&typed, None, false);
                }
                self.reset_pending_tokens();
                result
            }

            Key::Escape => {
                self.reset_search_input();
                self.dropdown_hide();
                self.reset_pending_tokens();
                EventResult::Ignored
            }

            Key::Up => {
                self.reset_pending_tokens();
                self.dropdown_prev();
                EventResult::Consumed
            }

            Key::Down => {
                self.reset_pending_tokens();
                self.dropdown_next();
                EventResult::Consumed
            }

            _ => {
                self.reset_pending_tokens();
                EventResult::Ignored
            }
        }
    }

    /// Keyup handling, after the key edited the search text.
    pub fn key_up(&mut self, key: Key, now: Instant) {
        if key.is_navigation() {
            return;
        }

        if key == Key::Backspace && self.input.is_empty() {
            self.timers.search.cancel();
            self.dropdown_hide();
            return;
        }

        if !self.input.is_empty() {
            self.delay_search(now);
        }
    }

    /// The search box's default editing for a key the tokenizer did not
    /// consume. Returns whether the text changed.
    fn edit_input(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) => {
                self.input.push(c);
                true
            }
            Key::Backspace => self.input.pop().is_some(),
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Paste
    // -------------------------------------------------------------------------

    /// Paste text into the search box.
    ///
    /// Shortly after, the search text is split on commas; with more than one
    /// segment every trimmed segment is submitted as a token.
    pub fn paste(&mut self, text: &str, now: Instant) {
        if !self.accepts_input() {
            return;
        }
        self.input.push_str(text);
        self.timers.paste.arm(now, PASTE_DELAY);
    }

    fn split_paste(&mut self) {
        let segments: Vec<String> = self.input.split(',').map(|s| s.trim().to_string()).collect();
        if segments.len() < 2 {
            return;
        }
        trace!("{}: pasted {} segments", self.id, segments.len());
        for segment in segments {
            self.token_add(&segment, None, false);
        }
    }

    // -------------------------------------------------------------------------
    // Pointer
    // -------------------------------------------------------------------------

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Click on the token container: focus the search box and search again
    /// if text is waiting and the dropdown is closed.
    pub fn click_container(&mut self, now: Instant) {
        if self.disabled {
            return;
        }
        self.focus();
        if !self.dropdown.visible && !self.input.is_empty() {
            self.search(now);
        }
    }

    /// Click on the arrow: list everything, or close an open dropdown.
    pub fn toggle_dropdown(&mut self, now: Instant) {
        if self.disabled || !self.arrow_enabled {
            return;
        }
        if self.dropdown.visible {
            self.dropdown_hide();
        } else {
            self.list_all(true, now);
        }
    }

    /// Click on the resetter: empty the search box and clear all tokens.
    pub fn click_resetter(&mut self) {
        if self.disabled || self.resetter_visible != Some(true) {
            return;
        }
        self.reset_search_input();
        self.clear(false);
    }

    /// Pointer moved over a dropdown entry (`None` when it left the list).
    pub fn hover_entry(&mut self, index: Option<usize>) {
        if self.disabled {
            return;
        }
        self.dropdown.set_hover(index);
    }

    /// Click on a dropdown entry.
    pub fn click_entry(&mut self, index: usize) {
        if self.disabled {
            return;
        }
        if let Some(entry) = self.dropdown.entries.get(index).cloned() {
            self.token_add(&entry.value, Some(&entry.text), false);
        }
    }

    /// Click on the remove affordance of a selected dropdown entry.
    pub fn click_entry_remove(&mut self, index: usize) {
        if self.disabled {
            return;
        }
        let value = self
            .dropdown
            .entries
            .get(index)
            .filter(|e| e.selected)
            .map(|e| e.value.clone());
        if let Some(value) = value {
            self.token_remove(&value, false);
        }
    }

    /// Click on a chip's close button.
    pub fn click_token_close(&mut self, value: &str) {
        if self.disabled {
            return;
        }
        self.token_remove(value, false);
    }

    /// Pointer entered the widget area: keep the dropdown open.
    pub fn pointer_enter(&mut self) {
        self.timers.hide.cancel();
    }

    /// Pointer left the widget area: close the dropdown shortly.
    pub fn pointer_leave(&mut self, now: Instant) {
        self.timers.hide.arm(now, HIDE_DELAY);
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    /// Fire every timer due at `now`, earliest first.
    ///
    /// Returns whether anything fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut fired = false;
        while let Some(kind) = self.timers.take_due(now) {
            fired = true;
            match kind {
                TimerKind::Search => self.search(now),
                TimerKind::Paste => self.split_paste(),
                TimerKind::ListAll => self.list_all(false, now),
                TimerKind::Hide => self.dropdown_hide(),
            }
        }
        fired
    }
}
