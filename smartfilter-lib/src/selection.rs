//! Cross-filter selection handed to the host.

use log::trace;

use crate::data::IdentityKey;
use crate::filters::Filters;

/// The identity keys the host filters other views by.
///
/// Selection changes are staged with [`select`](Self::select) and
/// [`clear`](Self::clear) and become visible to the host on
/// [`apply`](Self::apply).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    pending: Vec<IdentityKey>,
    applied: Vec<IdentityKey>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a key in the staged selection.
    pub fn select(&mut self, key: IdentityKey) {
        match self.pending.iter().position(|k| *k == key) {
            Some(i) => {
                self.pending.remove(i);
            }
            None => self.pending.push(key),
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Publish the staged selection.
    pub fn apply(&mut self) {
        trace!("Applying selection of {} keys", self.pending.len());
        self.applied = self.pending.clone();
    }

    pub fn is_selected(&self, key: &IdentityKey) -> bool {
        self.pending.contains(key)
    }

    /// The selection the host currently filters by.
    pub fn applied(&self) -> &[IdentityKey] {
        &self.applied
    }

    /// Whether toggling `key` moves the staged selection in the requested
    /// direction.
    ///
    /// A key is only selectable if every non-empty category filter contains
    /// it. A selectable key may be added when absent and removed when
    /// present.
    pub fn can_select(&self, key: &IdentityKey, add: bool, filters: &Filters) -> bool {
        let in_every_filter = filters.active().all(|(_, keys)| keys.contains(key));
        if !in_every_filter {
            return false;
        }
        self.is_selected(key) != add
    }

    /// Rebuild and apply the selection from the filter map: the keys present
    /// in every non-empty category filter, in selection order.
    pub fn sync(&mut self, filters: &Filters) {
        self.clear();
        let candidates: Vec<IdentityKey> = filters
            .active()
            .next()
            .map(|(_, keys)| keys.to_vec())
            .unwrap_or_default();

        for key in candidates {
            if self.can_select(&key, true, filters) {
                self.select(key);
            }
        }
        self.apply();
    }
}
