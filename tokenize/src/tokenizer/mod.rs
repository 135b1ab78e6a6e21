//! Tokenizer widget - a multi-select tag input with a search dropdown.

mod dropdown;
mod events;
mod render;
mod select;
mod state;

pub use dropdown::DropdownEntry;
pub use render::{ChipView, EntryView, TokenizerView};
pub use select::{Select, SelectOption};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::style::TokenStyle;
use crate::timer::Timer;

use dropdown::Dropdown;

/// Debounce between the last keystroke and the search it triggers.
pub const SEARCH_DELAY: Duration = Duration::from_millis(500);
/// Delay between a paste and splitting its text on commas.
pub const PASTE_DELAY: Duration = Duration::from_millis(20);
/// Delay between two pages of a full listing.
pub const LIST_ALL_INTERVAL: Duration = Duration::from_millis(500);
/// Delay before the dropdown closes after the pointer leaves the widget.
pub const HIDE_DELAY: Duration = Duration::from_millis(1000);
/// Candidates revealed per listing page.
pub const LIST_ALL_CHUNK: usize = 15;
/// Maximum dropdown entries produced by a text search.
pub const SEARCH_LIMIT: usize = 10;
/// Label of the summary chip when the tokenizer has no placeholder.
pub const MULTIPLE_LABEL: &str = "Multiple";

/// Unique identifier for a Tokenizer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenizerId(usize);

impl TokenizerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TokenizerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tokenizer_{}", self.0)
    }
}

/// A value with an optional distinct display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub text: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
        }
    }

    pub fn with_text(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// A selected value rendered as a removable chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub text: String,
    /// Armed by a first Backspace on an empty search box.
    pub pending_delete: bool,
}

/// What happened to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenEventKind {
    Add,
    Remove,
    Clear,
    /// A user tried to add a value that is already selected.
    Duplicate,
}

/// Notification emitted by user-driven mutations.
///
/// Internal population (`remap`, the per-token removals of `clear`) never
/// emits events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEvent {
    pub kind: TokenEventKind,
    pub value: String,
    pub text: String,
}

impl TokenEvent {
    pub fn add(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: TokenEventKind::Add,
            value: value.into(),
            text: text.into(),
        }
    }

    pub fn remove(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind: TokenEventKind::Remove,
            text: value.clone(),
            value,
        }
    }

    pub fn clear() -> Self {
        Self {
            kind: TokenEventKind::Clear,
            value: String::new(),
            text: String::new(),
        }
    }

    pub fn duplicate(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: TokenEventKind::Duplicate,
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Interaction state, derived from the tokenizer's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerState {
    /// No search text, dropdown hidden.
    Idle,
    /// Search text present, debounced search pending.
    Typing,
    /// Search ran and produced nothing to show.
    Searching,
    /// Full or filtered list shown.
    DropdownOpen,
    /// Input disabled; tokens still rendered.
    Readonly,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Timers {
    pub(crate) search: Timer,
    pub(crate) paste: Timer,
    pub(crate) list_all: Timer,
    pub(crate) hide: Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    Search,
    Paste,
    ListAll,
    Hide,
}

impl Timers {
    fn all(&self) -> [(TimerKind, &Timer); 4] {
        [
            (TimerKind::Search, &self.search),
            (TimerKind::Paste, &self.paste),
            (TimerKind::ListAll, &self.list_all),
            (TimerKind::Hide, &self.hide),
        ]
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.all().iter().filter_map(|(_, t)| t.deadline()).min()
    }

    /// The due timer with the earliest deadline, disarmed.
    pub(crate) fn take_due(&mut self, now: Instant) -> Option<TimerKind> {
        let kind = self
            .all()
            .iter()
            .filter(|(_, t)| t.is_due(now))
            .min_by_key(|(_, t)| t.deadline())
            .map(|(kind, _)| *kind)?;

        let fired = match kind {
            TimerKind::Search => self.search.fire(now),
            TimerKind::Paste => self.paste.fire(now),
            TimerKind::ListAll => self.list_all.fire(now),
            TimerKind::Hide => self.hide.fire(now),
        };
        fired.then_some(kind)
    }
}

/// A multi-select tag input with an autocomplete dropdown.
///
/// The tokenizer owns a backing [`Select`] (the authoritative selection),
/// the list of searchable candidate values, the chips, the search box text
/// and the dropdown. Mutations requested by the user emit [`TokenEvent`]s
/// that the host drains with [`Tokenizer::take_events`].
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use tokenize::{Key, SelectOption, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new("Country", true);
/// for value in ["Italy", "France", "Spain"] {
///     tokenizer.select_mut().push(SelectOption::new(value));
/// }
/// tokenizer.remap(Some(vec!["Italy".into(), "France".into(), "Spain".into()]));
///
/// let now = Instant::now();
/// tokenizer.paste("Italy, Spain", now);
/// tokenizer.tick(now + tokenize::tokenizer::PASTE_DELAY);
///
/// assert_eq!(tokenizer.values(), vec!["Italy", "Spain"]);
/// tokenizer.press(Key::Backspace, now);
/// tokenizer.press(Key::Backspace, now);
/// assert_eq!(tokenizer.values(), vec!["Italy"]);
/// ```
#[derive(Debug)]
pub struct Tokenizer {
    id: TokenizerId,

    // Configuration
    /// Label, also used for the summary chip.
    placeholder: String,
    /// Maximum number of tokens; `None` or `Some(0)` means unlimited.
    max_elements: Option<usize>,
    compress_multiple: bool,
    style: TokenStyle,

    // Selection
    select: Select,
    /// Searchable values, in listing order.
    candidates: Vec<String>,
    /// Chips in insertion order.
    tokens: Vec<Token>,

    // Search box
    input: String,
    /// The search box shows the placeholder until the first add attempt.
    input_placeholder: bool,
    focused: bool,

    dropdown: Dropdown,
    arrow_enabled: bool,
    /// `None` when the tokenizer was built without a resetter.
    resetter_visible: Option<bool>,

    readonly: bool,
    disabled: bool,

    timers: Timers,
    events: Vec<TokenEvent>,
}

impl Tokenizer {
    /// Create a tokenizer. `placeholder` labels the search box and the
    /// summary chip; `resetter` adds a "clear selections" control.
    pub fn new(placeholder: &str, resetter: bool) -> Self {
        Self {
            id: TokenizerId::new(),
            placeholder: crate::sanitize(placeholder).into_owned(),
            max_elements: None,
            compress_multiple: false,
            style: TokenStyle::default(),
            select: Select::new(),
            candidates: Vec::new(),
            tokens: Vec::new(),
            input: String::new(),
            input_placeholder: true,
            focused: false,
            dropdown: Dropdown::default(),
            arrow_enabled: true,
            resetter_visible: resetter.then_some(true),
            readonly: false,
            disabled: false,
            timers: Timers::default(),
            events: Vec::new(),
        }
    }

    /// Get the unique ID for this tokenizer.
    pub fn id(&self) -> TokenizerId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = crate::sanitize(placeholder).into_owned();
    }

    pub fn max_elements(&self) -> Option<usize> {
        self.max_elements
    }

    pub fn set_max_elements(&mut self, max: Option<usize>) {
        self.max_elements = max;
    }

    pub fn compress_multiple(&self) -> bool {
        self.compress_multiple
    }

    pub fn set_compress_multiple(&mut self, compress: bool) {
        self.compress_multiple = compress;
    }

    pub fn style(&self) -> &TokenStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: TokenStyle) {
        self.style = style;
    }

    // -------------------------------------------------------------------------
    // Selection accessors
    // -------------------------------------------------------------------------

    /// The backing option list.
    pub fn select(&self) -> &Select {
        &self.select
    }

    /// Mutable access to the backing options. Call [`Tokenizer::remap`]
    /// afterwards to rebuild the chips.
    pub fn select_mut(&mut self) -> &mut Select {
        &mut self.select
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token values in insertion order.
    pub fn values(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    pub fn has_token(&self, value: &str) -> bool {
        self.tokens.iter().any(|t| t.value == value)
    }

    /// Whether the chips are collapsed into a single summary chip.
    pub fn is_collapsed(&self) -> bool {
        self.compress_multiple && self.tokens.len() > 1
    }

    // -------------------------------------------------------------------------
    // Search box and dropdown accessors
    // -------------------------------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_dropdown_visible(&self) -> bool {
        self.dropdown.visible
    }

    pub fn dropdown_entries(&self) -> &[DropdownEntry] {
        &self.dropdown.entries
    }

    pub fn hovered(&self) -> Option<usize> {
        self.dropdown.hover
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether keyboard and paste input reach the search box.
    pub fn accepts_input(&self) -> bool {
        !self.readonly && !self.disabled
    }

    pub fn state(&self) -> TokenizerState {
        if self.readonly {
            TokenizerState::Readonly
        } else if self.timers.search.is_armed() {
            TokenizerState::Typing
        } else if self.dropdown.visible {
            TokenizerState::DropdownOpen
        } else if !self.input.trim().is_empty() {
            TokenizerState::Searching
        } else {
            TokenizerState::Idle
        }
    }

    // -------------------------------------------------------------------------
    // Events and timers
    // -------------------------------------------------------------------------

    /// Drain the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.events)
    }

    /// The earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}
