//! Tokenize - a tag input with an autocomplete dropdown.
//!
//! The widget is headless: every interaction is a method call on
//! [`Tokenizer`], timers are deadlines fired by [`Tokenizer::tick`], and the
//! rendered form is the projection returned by [`Tokenizer::view`].

pub mod event;
pub mod sanitize;
pub mod search;
pub mod style;
pub mod timer;
pub mod tokenizer;

pub use event::{EventResult, Key};
pub use sanitize::sanitize;
pub use search::LiteralPattern;
pub use style::{Rgb, TokenStyle};
pub use timer::Timer;
pub use tokenizer::{
    Candidate, ChipView, DropdownEntry, EntryView, Select, SelectOption, Token, TokenEvent,
    TokenEventKind, Tokenizer, TokenizerId, TokenizerState, TokenizerView,
};
