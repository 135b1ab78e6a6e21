//! Dropdown list state: entries, visibility and the hover cursor.

/// A candidate presented in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownEntry {
    pub value: String,
    pub text: String,
    /// Already a token; only listed in compression mode, with a remove
    /// affordance.
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Dropdown {
    pub(crate) visible: bool,
    pub(crate) entries: Vec<DropdownEntry>,
    /// Index into `entries`. At most one entry is hovered.
    pub(crate) hover: Option<usize>,
    /// Next candidate index for paginated listing.
    pub(crate) list_start: usize,
}

impl Dropdown {
    /// Drop all entries and restart pagination.
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.hover = None;
        self.list_start = 0;
    }

    pub(crate) fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e.value == value)
    }

    pub(crate) fn hovered(&self) -> Option<&DropdownEntry> {
        self.hover.and_then(|i| self.entries.get(i))
    }

    /// Hover an entry, or clear the hover with `None`. Out of range indices
    /// clear the hover.
    pub(crate) fn set_hover(&mut self, index: Option<usize>) {
        self.hover = index.filter(|i| *i < self.entries.len());
    }

    pub(crate) fn hover_first(&mut self) {
        self.set_hover(Some(0));
    }

    /// Move the hover to the previous entry, wrapping to the last.
    pub(crate) fn prev(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        self.hover = Some(match self.hover {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        });
    }

    /// Move the hover to the next entry, wrapping to the first.
    pub(crate) fn next(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        self.hover = Some(match self.hover {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropdown(n: usize) -> Dropdown {
        Dropdown {
            entries: (0..n)
                .map(|i| DropdownEntry {
                    value: i.to_string(),
                    text: i.to_string(),
                    selected: false,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_move_hovers_first_entry() {
        let mut up = dropdown(3);
        up.prev();
        assert_eq!(up.hover, Some(0));

        let mut down = dropdown(3);
        down.next();
        assert_eq!(down.hover, Some(0));
    }

    #[test]
    fn test_wraps_at_both_ends() {
        let mut d = dropdown(3);
        d.hover = Some(2);
        d.next();
        assert_eq!(d.hover, Some(0));
        d.prev();
        assert_eq!(d.hover, Some(2));
    }

    #[test]
    fn test_empty_dropdown_has_no_hover() {
        let mut d = dropdown(0);
        d.next();
        d.prev();
        d.hover_first();
        assert_eq!(d.hover, None);
    }
}
