//! Key bindings for the auto-complete component.
//!
//! Printable characters always go to the search box, so navigation only uses
//! arrows and control chords.
//!
//! - **Highlight**: `↑/ctrl+p`, `↓/ctrl+n`
//! - **Select**: `enter` toggles the highlighted option
//! - **Paging**: `ctrl+l/pgdown` loads the next page
//! - **Search**: `backspace` deletes a character, `esc` clears the search
//! - **Chips**: `ctrl+d` removes the most recently selected option

use crate::key::{self, KeyMap};
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings of [`Model`](super::Model).
#[derive(Debug, Clone)]
pub struct AutocompleteKeyMap {
    /// Move the highlight up.
    pub up: key::Binding,
    /// Move the highlight down.
    pub down: key::Binding,
    /// Toggle the highlighted option.
    pub select: key::Binding,
    /// Load the next page.
    pub load_more: key::Binding,
    /// Delete the last search character.
    pub delete_char: key::Binding,
    /// Clear the search term.
    pub clear_search: key::Binding,
    /// Remove the most recently selected option.
    pub remove_last: key::Binding,
}

impl Default for AutocompleteKeyMap {
    fn default() -> Self {
        Self {
            up: key::Binding::new(vec![
                (KeyCode::Up, KeyModifiers::NONE),
                (KeyCode::Char('p'), KeyModifiers::CONTROL),
            ])
            .with_help("↑/ctrl+p", "up"),
            down: key::Binding::new(vec![
                (KeyCode::Down, KeyModifiers::NONE),
                (KeyCode::Char('n'), KeyModifiers::CONTROL),
            ])
            .with_help("↓/ctrl+n", "down"),
            select: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "select"),
            load_more: key::Binding::new(vec![
                (KeyCode::Char('l'), KeyModifiers::CONTROL),
                (KeyCode::PageDown, KeyModifiers::NONE),
            ])
            .with_help("ctrl+l", "load more"),
            delete_char: key::Binding::new(vec![KeyCode::Backspace])
                .with_help("backspace", "delete"),
            clear_search: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear search"),
            remove_last: key::Binding::new(vec![(KeyCode::Char('d'), KeyModifiers::CONTROL)])
                .with_help("ctrl+d", "remove last"),
        }
    }
}

impl KeyMap for AutocompleteKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.select, &self.load_more]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.up, &self.down, &self.select, &self.remove_last],
            vec![&self.load_more, &self.delete_char, &self.clear_search],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_help_layout() {
        let keymap = AutocompleteKeyMap::default();
        assert_eq!(keymap.short_help().len(), 4);
        let columns = keymap.full_help();
        assert_eq!(columns.iter().map(Vec::len).sum::<usize>(), 7);
        assert_eq!(
            key::short_help_view(&keymap),
            "↑/ctrl+p up • ↓/ctrl+n down • enter select • ctrl+l load more"
        );
    }
}
