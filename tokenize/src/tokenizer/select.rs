//! The backing option list of a tokenizer.
//!
//! This is the authoritative selection of a single tokenizer: a token exists
//! exactly when its option is selected. Hosts fill it with the selectable
//! values of a category and mark pre-selected ones before calling
//! `Tokenizer::remap`.

/// One selectable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
    /// Created on the fly from a dropdown entry that had no option.
    /// Custom options are deleted, not deselected, when their token goes.
    pub custom: bool,
}

impl SelectOption {
    /// A regular, unselected option whose text equals its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
            selected: false,
            custom: false,
        }
    }

    /// Set a display text distinct from the value.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the initial selection flag.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Ordered option list, the `<select multiple>` behind the chips.
#[derive(Debug, Clone, Default)]
pub struct Select {
    options: Vec<SelectOption>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter()
    }

    /// Append an option. A value that already exists is ignored.
    pub fn push(&mut self, option: SelectOption) {
        if self.position(&option.value).is_none() {
            self.options.push(option);
        }
    }

    /// Append a selected custom option.
    pub(crate) fn push_custom(&mut self, value: String, text: String) {
        self.push(SelectOption {
            value,
            text,
            selected: true,
            custom: true,
        });
    }

    /// Remove every option.
    pub fn clear(&mut self) {
        self.options.clear();
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }

    pub fn get(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn get_mut(&mut self, value: &str) -> Option<&mut SelectOption> {
        self.options.iter_mut().find(|o| o.value == value)
    }

    /// Mark an option selected. Returns false if the value is unknown.
    pub fn select(&mut self, value: &str) -> bool {
        match self.get_mut(value) {
            Some(option) => {
                option.selected = true;
                true
            }
            None => false,
        }
    }

    /// Drop the selection of an option: custom options are removed, regular
    /// ones deselected. Returns false if nothing was selected.
    pub(crate) fn release(&mut self, value: &str) -> bool {
        let Some(index) = self.position(value) else {
            return false;
        };
        let option = &mut self.options[index];
        if option.custom {
            self.options.remove(index);
            true
        } else {
            std::mem::replace(&mut option.selected, false)
        }
    }

    /// Selected options in option order.
    pub fn selected(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter().filter(|o| o.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_ignores_duplicates() {
        let mut select = Select::new();
        select.push(SelectOption::new("a"));
        select.push(SelectOption::new("a").with_selected(true));
        assert_eq!(select.len(), 1);
        assert_eq!(select.selected_count(), 0);
    }

    #[test]
    fn test_release_custom_removes() {
        let mut select = Select::new();
        select.push(SelectOption::new("a").with_selected(true));
        select.push_custom("b".into(), "b".into());

        assert!(select.release("a"));
        assert!(!select.release("a"));
        assert!(select.release("b"));
        assert!(!select.release("c"));

        assert_eq!(select.len(), 1);
        assert!(!select.get("a").unwrap().selected);
        assert!(select.get("b").is_none());
    }
}
