//! Selection mutations, search and dropdown population.

use std::time::Instant;

use log::{debug, trace};

use crate::sanitize::sanitize;
use crate::search::LiteralPattern;

use super::dropdown::DropdownEntry;
use super::{
    LIST_ALL_CHUNK, LIST_ALL_INTERVAL, SEARCH_DELAY, SEARCH_LIMIT, Token, TokenEvent, Tokenizer,
};

impl Tokenizer {
    // -------------------------------------------------------------------------
    // Tokens
    // -------------------------------------------------------------------------

    /// Add a token.
    ///
    /// `text` defaults to the value when `None` or empty. `internal` marks
    /// programmatic population: it bypasses the readonly guard and never
    /// emits events.
    ///
    /// Rejected adds (readonly, cap reached, unknown value) only reset the
    /// search box. Adding an existing token is idempotent.
    pub fn token_add(&mut self, value: &str, text: Option<&str>, internal: bool) {
        let existing = self.tokens.len();
        self.input_placeholder = false;

        let value = sanitize(value).into_owned();
        if value.is_empty() {
            return;
        }
        let text = match text {
            Some(t) if !t.is_empty() => sanitize(t).into_owned(),
            _ => value.clone(),
        };

        if self.readonly && !internal {
            trace!("{}: add of {:?} ignored, readonly", self.id, value);
            self.reset_search_input();
            return;
        }

        if !self.readonly && self.cap_reached(existing) {
            debug!("{}: add of {:?} ignored, limit reached", self.id, value);
            self.reset_search_input();
            return;
        }

        if let Some(option) = self.select.get_mut(&value) {
            if !internal && option.selected {
                self.events.push(TokenEvent::duplicate(&value, &text));
            }
            option.selected = true;
        } else if self.dropdown.contains(&value) {
            self.select.push_custom(value.clone(), text.clone());
        } else {
            trace!("{}: add of unknown value {:?} ignored", self.id, value);
            self.reset_search_input();
            return;
        }

        if self.has_token(&value) {
            return;
        }

        debug!("{}: token added {:?}", self.id, value);
        self.tokens.push(Token {
            value: value.clone(),
            text: text.clone(),
            pending_delete: false,
        });

        if !internal {
            self.events.push(TokenEvent::add(value, text));
        }

        self.reset_search_input();
        self.dropdown_hide();
    }

    /// Remove a token and release its backing option.
    ///
    /// Unknown values change nothing, but the dropdown is still hidden.
    pub fn token_remove(&mut self, value: &str, internal: bool) {
        if self.readonly && !internal {
            trace!("{}: remove of {:?} ignored, readonly", self.id, value);
            return;
        }

        let value = sanitize(value);
        let released = self.select.release(&value);
        let before = self.tokens.len();
        self.tokens.retain(|t| t.value != value);
        let removed = self.tokens.len() != before;

        if removed || released {
            debug!("{}: token removed {:?}", self.id, value);
            if !internal {
                self.events.push(TokenEvent::remove(value.into_owned()));
            }
        }

        self.dropdown_hide();
    }

    /// Remove every token, then emit a single clear event.
    pub fn clear(&mut self, internal: bool) {
        if self.readonly && !internal {
            return;
        }

        let values: Vec<String> = self.tokens.iter().map(|t| t.value.clone()).collect();
        for value in values {
            self.token_remove(&value, true);
        }

        if !internal {
            self.events.push(TokenEvent::clear());
        }
        self.dropdown_hide();
    }

    /// Replace the candidate list (when given) and rebuild the chips from the
    /// selected backing options, silently.
    ///
    /// Custom tokens that are no longer offered by the dropdown are dropped,
    /// and selected options beyond the limit are deselected.
    pub fn remap(&mut self, candidates: Option<Vec<String>>) {
        if let Some(candidates) = candidates {
            self.candidates = candidates;
        }

        let selected: Vec<(String, String)> = self
            .select
            .selected()
            .map(|o| (o.value.clone(), o.text.clone()))
            .collect();

        self.clear(true);

        for (value, text) in selected {
            self.token_add(&value, Some(&text), true);
            if !self.has_token(&value) {
                // Rejected by the limit.
                self.select.release(&value);
            }
        }
        debug!(
            "{}: remapped {} candidates, {} tokens",
            self.id,
            self.candidates.len(),
            self.tokens.len()
        );
    }

    fn cap_reached(&self, count: usize) -> bool {
        self.max_elements
            .is_some_and(|max| max > 0 && count >= max)
    }

    // -------------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------------

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn enable(&mut self) {
        self.disabled = false;
    }

    pub fn toggle_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
        self.reset_pending_tokens();
    }

    /// Enable or disable the "show all entries" arrow.
    pub fn toggle_dropdown_arrow(&mut self, enabled: bool) {
        self.arrow_enabled = enabled;
    }

    /// Show or hide the resetter. No effect without one.
    pub fn toggle_resetter(&mut self, show: bool) {
        if let Some(visible) = self.resetter_visible.as_mut() {
            *visible = show;
        }
    }

    pub(crate) fn reset_pending_tokens(&mut self) {
        for token in &mut self.tokens {
            token.pending_delete = false;
        }
    }

    // -------------------------------------------------------------------------
    // Search box
    // -------------------------------------------------------------------------

    /// Clear the search text and cancel a pending search.
    pub fn reset_search_input(&mut self) {
        self.timers.search.cancel();
        self.input.clear();
    }

    /// Width of the search box in characters.
    pub fn search_width(&self) -> usize {
        let text_width = unicode_width::UnicodeWidthStr::width(self.input.as_str());
        if self.input.chars().count() < 2 {
            let placeholder = if self.input_placeholder {
                unicode_width::UnicodeWidthStr::width(self.placeholder.as_str())
            } else {
                0
            };
            placeholder.max(3)
        } else {
            text_width + 3
        }
    }

    /// Restart the search debounce.
    pub fn delay_search(&mut self, now: Instant) {
        self.timers.search.arm(now, SEARCH_DELAY);
    }

    /// Fill the dropdown from the current search text.
    ///
    /// Blank text lists every candidate page by page. Otherwise candidates
    /// containing the text (case-insensitive, literal) are listed, up to
    /// [`SEARCH_LIMIT`] entries, and the first one is hovered.
    pub fn search(&mut self, now: Instant) {
        self.dropdown_reset();

        let Some(pattern) = LiteralPattern::new(&self.input) else {
            self.list_all(true, now);
            return;
        };

        let matches: Vec<String> = self
            .candidates
            .iter()
            .filter(|c| pattern.is_match(c))
            .cloned()
            .collect();

        let mut found = 0;
        for value in matches {
            if found >= SEARCH_LIMIT {
                break;
            }
            if self.dropdown_add_item(&value, None) {
                found += 1;
            }
        }

        trace!("{}: search {:?} found {}", self.id, self.input, found);
        if found > 0 {
            self.dropdown.hover_first();
            self.dropdown_show();
        } else {
            self.dropdown_hide();
        }
    }

    /// Reveal the next page of candidates.
    ///
    /// With `show` the dropdown is opened (first entry hovered) if hidden.
    /// Without it, listing only continues while the dropdown stays visible.
    pub fn list_all(&mut self, show: bool, now: Instant) {
        if !show && !self.dropdown.visible {
            return;
        }

        let start = self.dropdown.list_start;
        let end = (start + LIST_ALL_CHUNK).min(self.candidates.len());
        self.dropdown.list_start = end;

        for i in start..end {
            let value = self.candidates[i].clone();
            self.dropdown_add_item(&value, None);
        }

        if end < self.candidates.len() {
            self.timers.list_all.arm(now, LIST_ALL_INTERVAL);
        }

        if show && !self.dropdown.visible {
            self.dropdown.hover_first();
            self.dropdown_show();
        }
    }

    // -------------------------------------------------------------------------
    // Dropdown
    // -------------------------------------------------------------------------

    /// Append a dropdown entry unless the value is already a token. In
    /// compression mode with collapsed chips, selected values are listed too.
    ///
    /// Returns whether an entry was appended.
    pub(crate) fn dropdown_add_item(&mut self, value: &str, text: Option<&str>) -> bool {
        let value = sanitize(value).into_owned();
        let text = match text {
            Some(t) if !t.is_empty() => sanitize(t).into_owned(),
            _ => value.clone(),
        };

        let already_selected = self.has_token(&value);
        if already_selected && !self.is_collapsed() {
            return false;
        }

        self.dropdown.entries.push(DropdownEntry {
            value,
            text,
            selected: already_selected,
        });
        true
    }

    pub fn dropdown_show(&mut self) {
        self.dropdown.visible = true;
    }

    /// Close the dropdown and cancel every timer that could repopulate it.
    pub fn dropdown_hide(&mut self) {
        self.timers.hide.cancel();
        self.timers.search.cancel();
        self.dropdown_reset();
        self.dropdown.visible = false;
    }

    /// Empty the dropdown and stop paginated listing.
    pub fn dropdown_reset(&mut self) {
        self.timers.list_all.cancel();
        self.dropdown.reset();
    }

    pub fn dropdown_prev(&mut self) {
        self.dropdown.prev();
    }

    pub fn dropdown_next(&mut self) {
        self.dropdown.next();
    }
}
