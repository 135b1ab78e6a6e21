//! Application state and input routing.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use serde_json::Value;
use smartfilter_lib::settings::SEARCH;
use smartfilter_lib::{DataView, Filters, Properties, PropertyStore, SmartFilter, UpdateKind};
use tokenize::{EventResult, Key, Tokenizer};

use crate::error::AppError;
use crate::render::{HitMap, Target};
use crate::store::JsonFileStore;

pub struct App {
    filter: SmartFilter<JsonFileStore>,
    data: DataView,
    /// Tokenizer receiving keyboard input.
    focus: usize,
    /// Tokenizer under the mouse pointer.
    pointer: Option<usize>,
    hits: HitMap,
    status: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(store: JsonFileStore, data: DataView) -> Result<Self, AppError> {
        let mut filter = SmartFilter::new(store);
        filter.update(&data, UpdateKind::All)?;
        filter.interact(0, Tokenizer::focus)?;

        Ok(Self {
            filter,
            data,
            focus: 0,
            pointer: None,
            hits: HitMap::default(),
            status: None,
            quit: false,
        })
    }

    pub fn filter(&self) -> &SmartFilter<JsonFileStore> {
        &self.filter
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn set_hits(&mut self, hits: HitMap) {
        self.hits = hits;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.filter.next_deadline()
    }

    pub fn tick(&mut self, now: Instant) -> Result<(), AppError> {
        let before = self.filter.model().filters.clone();
        self.filter.tick(now)?;
        self.refresh(&before)
    }

    /// Run an interaction on one tokenizer.
    fn interact<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Tokenizer) -> R,
    ) -> Result<Option<R>, AppError> {
        let before = self.filter.model().filters.clone();
        let result = self.filter.interact(index, f)?;
        self.refresh(&before)?;
        Ok(result)
    }

    /// Send a data update after the filters changed, so every category is
    /// narrowed by the new selection.
    fn refresh(&mut self, before: &Filters) -> Result<(), AppError> {
        if self.filter.model().filters == *before {
            return Ok(());
        }
        debug!("Filters changed, reloading data");
        self.filter.update(&self.data, UpdateKind::Data)?;
        self.filter.interact(self.focus, Tokenizer::focus)?;
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) -> Result<(), AppError> {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Paste(text) => {
                self.interact(self.focus, |t| t.paste(&text, now))?;
                Ok(())
            }
            Event::FocusLost => self.pointer_to(None, now),
            Event::FocusGained | Event::Resize(..) => Ok(()),
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<(), AppError> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        self.status = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    info!("Quit requested");
                    self.quit = true;
                }
                KeyCode::Char('r') => {
                    self.interact(self.focus, Tokenizer::click_resetter)?;
                }
                KeyCode::Char('o') => self.toggle_setting("observerMode")?,
                KeyCode::Char('k') => self.toggle_setting("compressMultiple")?,
                KeyCode::Char('l') => self.toggle_setting("label")?,
                KeyCode::Char('f') => self.toggle_setting("filterMultiple")?,
                _ => {}
            }
            return Ok(());
        }

        if key.code == KeyCode::F(2) {
            self.interact(self.focus, |t| t.toggle_dropdown(now))?;
            return Ok(());
        }

        let key = Key::from(key.code);
        let result = self.interact(self.focus, |t| t.press(key, now))?;
        if result == Some(EventResult::Ignored) {
            match key {
                Key::Tab => self.move_focus(true)?,
                Key::BackTab => self.move_focus(false)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn move_focus(&mut self, forward: bool) -> Result<(), AppError> {
        let count = self.filter.tokenizers().len();
        if count == 0 {
            return Ok(());
        }
        let next = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.set_focus(next)
    }

    fn set_focus(&mut self, index: usize) -> Result<(), AppError> {
        if index == self.focus {
            return Ok(());
        }
        self.interact(self.focus, Tokenizer::blur)?;
        self.interact(index, Tokenizer::focus)?;
        debug!("Focus moved to tokenizer {}", index);
        self.focus = index;
        Ok(())
    }

    /// Flip a boolean `search` setting, persist it and reconfigure.
    fn toggle_setting(&mut self, name: &str) -> Result<(), AppError> {
        if !self.filter.visible_properties().iter().any(|p| *p == name) {
            self.set_status(format!("{} is not available", name));
            return Ok(());
        }

        let search = &self.filter.settings().search;
        let current = match name {
            "observerMode" => search.observer_mode,
            "compressMultiple" => search.compress_multiple,
            "label" => search.label,
            "filterMultiple" => search.filter_multiple,
            _ => return Ok(()),
        };

        let mut properties = Properties::new();
        properties.insert(name.to_string(), Value::Bool(!current));
        self.filter.store_mut().merge(SEARCH, properties)?;
        self.filter.update(&self.data, UpdateKind::Settings)?;

        info!("Setting {} = {}", name, !current);
        self.set_status(format!("{}: {}", name, if current { "off" } else { "on" }));
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Mouse
    // -------------------------------------------------------------------------

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Result<(), AppError> {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(x, y, now),
            MouseEventKind::Moved => {
                self.pointer_to(self.hits.group_at(y), now)?;
                let entry = match self.hits.target_at(x, y) {
                    Some(Target::Entry(g, i) | Target::EntryRemove(g, i)) => Some((*g, *i)),
                    _ => None,
                };
                if let Some((group, index)) = entry {
                    self.interact(group, |t| t.hover_entry(Some(index)))?;
                }
                Ok(())
            }
            MouseEventKind::ScrollDown => {
                self.interact(self.focus, Tokenizer::dropdown_next)?;
                Ok(())
            }
            MouseEventKind::ScrollUp => {
                self.interact(self.focus, Tokenizer::dropdown_prev)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn click(&mut self, x: u16, y: u16, now: Instant) -> Result<(), AppError> {
        let Some(target) = self.hits.target_at(x, y).cloned() else {
            return Ok(());
        };
        debug!("Click on {:?}", target);

        match target {
            Target::Container(g) => {
                self.set_focus(g)?;
                self.interact(g, |t| t.click_container(now))?;
            }
            Target::Arrow(g) => {
                self.set_focus(g)?;
                self.interact(g, |t| t.toggle_dropdown(now))?;
            }
            Target::Resetter(g) => {
                self.interact(g, Tokenizer::click_resetter)?;
            }
            Target::ChipClose(g, value) => {
                self.interact(g, |t| t.click_token_close(&value))?;
            }
            Target::Entry(g, i) => {
                self.interact(g, |t| t.click_entry(i))?;
            }
            Target::EntryRemove(g, i) => {
                self.interact(g, |t| t.click_entry_remove(i))?;
            }
        }
        Ok(())
    }

    /// Track the tokenizer under the pointer, arming or cancelling the
    /// dropdown hide timers as it enters and leaves.
    fn pointer_to(&mut self, group: Option<usize>, now: Instant) -> Result<(), AppError> {
        if group == self.pointer {
            return Ok(());
        }
        if let Some(old) = self.pointer {
            self.interact(old, |t| t.pointer_leave(now))?;
        }
        if let Some(new) = group {
            self.interact(new, Tokenizer::pointer_enter)?;
        }
        self.pointer = group;
        Ok(())
    }
}
