//! Smart Filter - token-based multi-category filtering.
//!
//! Builds a selection model from categorical data and a persisted filter
//! map, drives one [`tokenize::Tokenizer`] per category and keeps the
//! cross-filter selection and the property store in sync with the tokens.

pub mod data;
pub mod error;
pub mod filters;
pub mod model;
pub mod selection;
pub mod settings;
pub mod store;
pub mod widget;

pub use data::{CategoryColumn, CellValue, DataView, IdentityKey, IdentityProvider, RowIdentity};
pub use error::{FilterError, Result};
pub use filters::Filters;
pub use model::{DataGroup, DataPoint, Model};
pub use selection::SelectionManager;
pub use settings::{Fill, Settings};
pub use store::{MemoryStore, Properties, PropertyStore};
pub use widget::{SmartFilter, UpdateKind};
