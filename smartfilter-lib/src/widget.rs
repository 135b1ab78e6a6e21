//! The Smart Filter widget: one tokenizer per category, wired to the
//! selection model, the cross-filter selection and the property store.

use std::time::Instant;

use log::{debug, info};
use serde_json::Value;
use tokenize::{SelectOption, TokenEventKind, Tokenizer, sanitize};

use crate::data::{DataView, IdentityProvider, RowIdentity};
use crate::error::Result;
use crate::model::Model;
use crate::selection::SelectionManager;
use crate::settings::{GENERAL, Settings};
use crate::store::{Properties, PropertyStore};

/// Maximum values pre-selected in a tokenizer on update.
pub const MAX_SELECTED_VALUES: usize = 100;

/// Property holding the persisted filter map.
pub const SELECTION: &str = "selection";
/// Filter property of older versions, removed together with the selection.
pub const LEGACY_FILTER: &str = "filter";

/// What changed since the previous update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Data,
    Settings,
    All,
}

impl UpdateKind {
    fn data_changed(self) -> bool {
        matches!(self, UpdateKind::Data | UpdateKind::All)
    }
}

/// A multi-category filter.
///
/// The host calls [`update`](Self::update) whenever data or settings change,
/// forwards input to a tokenizer through [`interact`](Self::interact) and
/// fires timers with [`tick`](Self::tick). Token events are routed into the
/// filter map, which is persisted to the property store after every change.
#[derive(Debug)]
pub struct SmartFilter<S, I = RowIdentity> {
    store: S,
    identities: I,
    model: Model,
    selection: SelectionManager,
    tokenizers: Vec<Tokenizer>,
}

impl<S: PropertyStore> SmartFilter<S, RowIdentity> {
    /// Create a filter that identifies rows by index.
    pub fn new(store: S) -> Self {
        Self::with_identities(store, RowIdentity)
    }
}

impl<S: PropertyStore, I: IdentityProvider> SmartFilter<S, I> {
    pub fn with_identities(store: S, identities: I) -> Self {
        Self {
            store,
            identities,
            model: Model::default(),
            selection: SelectionManager::new(),
            tokenizers: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Rebuild the model from `data` and the stored settings.
    ///
    /// Tokenizers are recreated when the data changed, and reconfigured and
    /// remapped in place on a settings-only update.
    pub fn update(&mut self, data: &DataView, kind: UpdateKind) -> Result<()> {
        let settings = Settings::from_store(&self.store)?;
        self.model = Model::transform(data, settings, &self.identities);

        let recreate = kind.data_changed() || self.tokenizers.len() != self.model.groups.len();
        if recreate {
            self.tokenizers = self
                .model
                .groups
                .iter()
                .map(|_| Tokenizer::new("", true))
                .collect();
        }

        self.selection.sync(&self.model.filters);
        for index in 0..self.tokenizers.len() {
            self.configure(index);
        }

        info!(
            "Updated ({:?}): {} categories, {} keys selected",
            kind,
            self.model.groups.len(),
            self.selection.applied().len()
        );
        Ok(())
    }

    fn configure(&mut self, index: usize) {
        let search = &self.model.settings.search;
        let (Some(group), Some(tokenizer)) =
            (self.model.groups.get(index), self.tokenizers.get_mut(index))
        else {
            return;
        };

        tokenizer.set_placeholder(if search.label { &group.display_name } else { "" });
        tokenizer.set_max_elements(search.max_elements());
        tokenizer.set_compress_multiple(search.compress_multiple && !search.observer_mode);
        tokenizer.toggle_resetter(!search.observer_mode);
        tokenizer.set_style(search.token_style());

        let select = tokenizer.select_mut();
        select.clear();

        let mut values = Vec::new();
        let mut preselected = 0;
        let mut has_selection = false;
        for point in group.visible_points() {
            let value = sanitize(&point.display_name).into_owned();
            let selected = point.selected && preselected < MAX_SELECTED_VALUES;
            if selected {
                preselected += 1;
            }
            has_selection |= point.selected;
            select.push(SelectOption::new(value.clone()).with_selected(selected));
            values.push(value);
        }

        if !has_selection && search.observer_mode {
            for value in values.iter().take(MAX_SELECTED_VALUES) {
                select.select(value);
            }
        }

        tokenizer.toggle_readonly(search.observer_mode);
        tokenizer.remap(Some(values));

        let selected = tokenizer.select().selected_count();
        tokenizer.toggle_dropdown_arrow(selected < tokenizer.candidates().len());
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Run an interaction on one tokenizer, then route its events.
    ///
    /// Opening a dropdown closes the dropdowns of the other tokenizers.
    /// Returns `None` for an unknown index.
    pub fn interact<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Tokenizer) -> R,
    ) -> Result<Option<R>> {
        let Some(tokenizer) = self.tokenizers.get_mut(index) else {
            return Ok(None);
        };

        let was_open = tokenizer.is_dropdown_visible();
        let result = f(tokenizer);
        if !was_open && tokenizer.is_dropdown_visible() {
            self.close_dropdowns_except(index);
        }

        self.process_events()?;
        Ok(Some(result))
    }

    /// Fire due timers of every tokenizer and route the resulting events.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        let mut fired = false;
        for index in 0..self.tokenizers.len() {
            let tokenizer = &mut self.tokenizers[index];
            let was_open = tokenizer.is_dropdown_visible();
            if tokenizer.tick(now) {
                fired = true;
                if !was_open && tokenizer.is_dropdown_visible() {
                    self.close_dropdowns_except(index);
                }
            }
        }

        self.process_events()?;
        Ok(fired)
    }

    /// The earliest pending timer deadline over all tokenizers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tokenizers.iter().filter_map(Tokenizer::next_deadline).min()
    }

    fn close_dropdowns_except(&mut self, index: usize) {
        for (i, tokenizer) in self.tokenizers.iter_mut().enumerate() {
            if i != index && tokenizer.is_dropdown_visible() {
                tokenizer.dropdown_hide();
            }
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Drain the events of every tokenizer into the filter map, the
    /// selection and the store.
    pub fn process_events(&mut self) -> Result<()> {
        for index in 0..self.tokenizers.len() {
            for event in self.tokenizers[index].take_events() {
                match event.kind {
                    TokenEventKind::Add => self.perform_selection(index, &event.value, true)?,
                    TokenEventKind::Remove => self.perform_selection(index, &event.value, false)?,
                    TokenEventKind::Clear => self.clear_group(index)?,
                    TokenEventKind::Duplicate => {
                        debug!("{:?} is already selected", event.value);
                    }
                }
            }
        }
        Ok(())
    }

    fn perform_selection(&mut self, index: usize, value: &str, add: bool) -> Result<()> {
        let Model { groups, filters, .. } = &mut self.model;
        let Some(group) = groups.get_mut(index) else {
            return Ok(());
        };
        let Some(point) = group
            .points
            .iter_mut()
            .find(|p| sanitize(&p.display_name) == value)
        else {
            debug!("No data point for {:?} in {:?}", value, group.display_name);
            return Ok(());
        };

        point.selected = add;
        for key in point.all_identities() {
            if add {
                filters.add(&group.display_name, key.clone());
            } else {
                filters.remove(&group.display_name, key);
            }
        }
        debug!(
            "{} {:?} in {:?}",
            if add { "Selected" } else { "Deselected" },
            value,
            group.display_name
        );

        self.selection.sync(&self.model.filters);
        self.persist_selection()
    }

    fn clear_group(&mut self, index: usize) -> Result<()> {
        let Some(group) = self.model.groups.get_mut(index) else {
            return Ok(());
        };
        for point in &mut group.points {
            point.selected = false;
        }
        self.model.filters.clear_category(&group.display_name);
        debug!("Cleared {:?}", group.display_name);

        self.selection.sync(&self.model.filters);
        if self.model.filters.is_empty() {
            self.store.remove(GENERAL, &[LEGACY_FILTER, SELECTION])
        } else {
            self.persist_selection()
        }
    }

    fn persist_selection(&mut self) -> Result<()> {
        let mut properties = Properties::new();
        properties.insert(
            SELECTION.to_string(),
            Value::String(self.model.filters.to_json()?),
        );
        self.store.merge(GENERAL, properties)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn tokenizers(&self) -> &[Tokenizer] {
        &self.tokenizers
    }

    pub fn tokenizer(&self, index: usize) -> Option<&Tokenizer> {
        self.tokenizers.get(index)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn settings(&self) -> &Settings {
        &self.model.settings
    }

    /// The selection the host filters other views by.
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct access to the property store, e.g. to change settings before
    /// a settings update.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Settings a property pane should currently offer.
    pub fn visible_properties(&self) -> Vec<&'static str> {
        self.model
            .settings
            .visible_properties(self.model.groups.len())
    }
}
