//! Render projection for the Tokenizer widget.
//!
//! A view is rebuilt from the tokenizer's state on every frame; it never feeds
//! back into the state.

use crate::style::TokenStyle;

use super::{MULTIPLE_LABEL, Tokenizer};

/// A chip in the token container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipView {
    /// An individual token.
    Token {
        value: String,
        text: String,
        pending_delete: bool,
        /// Whether the chip shows a close button.
        closable: bool,
    },
    /// Stand-in for all tokens in compression mode.
    Summary { text: String, count: usize },
}

impl ChipView {
    pub fn text(&self) -> &str {
        match self {
            ChipView::Token { text, .. } | ChipView::Summary { text, .. } => text,
        }
    }
}

/// A dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub value: String,
    pub text: String,
    pub hovered: bool,
    /// Already selected; rendered highlighted with a remove affordance.
    pub selected: bool,
}

/// Everything needed to draw one tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizerView {
    pub label: String,
    /// Visible chips, in insertion order.
    pub chips: Vec<ChipView>,
    pub input: String,
    /// Placeholder shown in the empty search box.
    pub input_placeholder: Option<String>,
    /// Search box width in characters.
    pub input_width: usize,
    /// Rows of the open dropdown, `None` when closed.
    pub dropdown: Option<Vec<EntryView>>,
    pub arrow_enabled: bool,
    pub resetter_visible: bool,
    pub focused: bool,
    pub readonly: bool,
    pub disabled: bool,
    pub style: TokenStyle,
}

impl Tokenizer {
    /// Project the current state into a drawable view.
    pub fn view(&self) -> TokenizerView {
        let chips = if self.is_collapsed() {
            let label = if self.placeholder.is_empty() {
                MULTIPLE_LABEL
            } else {
                self.placeholder.as_str()
            };
            vec![ChipView::Summary {
                text: format!("{} ({})", label, self.tokens.len()),
                count: self.tokens.len(),
            }]
        } else {
            self.tokens
                .iter()
                .map(|t| ChipView::Token {
                    value: t.value.clone(),
                    text: t.text.clone(),
                    pending_delete: t.pending_delete,
                    closable: !self.readonly,
                })
                .collect()
        };

        let dropdown = self.dropdown.visible.then(|| {
            self.dropdown
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| EntryView {
                    value: e.value.clone(),
                    text: e.text.clone(),
                    hovered: self.dropdown.hover == Some(i),
                    selected: e.selected,
                })
                .collect()
        });

        let input_placeholder = (self.input_placeholder && !self.placeholder.is_empty())
            .then(|| self.placeholder.clone());

        TokenizerView {
            label: self.placeholder.clone(),
            chips,
            input: self.input.clone(),
            input_placeholder,
            input_width: self.search_width(),
            dropdown,
            arrow_enabled: self.arrow_enabled,
            resetter_visible: self.resetter_visible == Some(true),
            focused: self.focused,
            readonly: self.readonly,
            disabled: self.disabled,
            style: self.style,
        }
    }
}
