//! Widget settings, read from the `general` and `search` objects of the
//! property store.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokenize::style::{DEFAULT_BACK_COLOR, pt_to_px};
use tokenize::{Rgb, TokenStyle};

use crate::error::Result;
use crate::store::PropertyStore;

pub const GENERAL: &str = "general";
pub const SEARCH: &str = "search";

/// A solid color property, `{"solid": {"color": "#RRGGBB"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub solid: SolidFill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidFill {
    pub color: String,
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            solid: SolidFill {
                color: color.into(),
            },
        }
    }

    /// The parsed color, `None` when it is not a hex color.
    pub fn rgb(&self) -> Option<Rgb> {
        Rgb::from_hex(&self.solid.color)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// JSON-encoded filter map, see [`crate::filters::Filters`].
    pub selection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchSettings {
    /// Maximum tokens per category; `None` is unlimited.
    pub limit: Option<i64>,
    pub compress_multiple: bool,
    pub back_fill: Fill,
    /// Chip text color; automatic contrast when unset.
    pub fill: Option<Fill>,
    /// Font size in points.
    pub font_size: f32,
    pub border: bool,
    /// Label each tokenizer with its category name.
    pub label: bool,
    /// Filter each category by the selections of the others.
    pub filter_multiple: bool,
    pub observer_mode: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: None,
            compress_multiple: false,
            back_fill: Fill::solid(DEFAULT_BACK_COLOR.to_hex()),
            fill: None,
            font_size: 10.0,
            border: true,
            label: false,
            filter_multiple: true,
            observer_mode: false,
        }
    }
}

impl SearchSettings {
    /// Token limit as understood by the tokenizer.
    pub fn max_elements(&self) -> Option<usize> {
        self.limit.and_then(|l| usize::try_from(l.max(1)).ok())
    }

    /// Chip style derived from the fills, font size and border flag.
    pub fn token_style(&self) -> TokenStyle {
        let back_color = self.back_fill.rgb().unwrap_or(DEFAULT_BACK_COLOR);
        let fore_color = self
            .fill
            .as_ref()
            .and_then(Fill::rgb)
            .unwrap_or_else(|| back_color.contrasting_text());

        TokenStyle {
            font_size: pt_to_px(self.font_size),
            back_color,
            fore_color,
            border: self.border,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
}

impl Settings {
    /// Read the settings, filling unset properties with defaults.
    ///
    /// A limit below 1 is raised to 1.
    pub fn from_store(store: &impl PropertyStore) -> Result<Self> {
        let mut settings = Self {
            general: read_object(store, GENERAL)?,
            search: read_object(store, SEARCH)?,
        };
        settings.search.limit = settings.search.limit.map(|l| l.max(1));
        Ok(settings)
    }

    /// Names of the `search` properties a property pane should offer, given
    /// the number of categories.
    pub fn visible_properties(&self, groups: usize) -> Vec<&'static str> {
        let mut names = vec!["observerMode"];
        if !self.search.observer_mode {
            if groups > 1 {
                names.push("filterMultiple");
            }
            names.extend(["compressMultiple", "limit"]);
        }
        names.extend(["backFill", "fill", "fontSize", "label", "border"]);
        names
    }
}

fn read_object<T: DeserializeOwned + Default>(store: &impl PropertyStore, name: &str) -> Result<T> {
    match store.object(name) {
        Some(props) => Ok(serde_json::from_value(Value::Object(props))?),
        None => Ok(T::default()),
    }
}
