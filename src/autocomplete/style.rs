//! Styles for the auto-complete view.
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::AutocompleteStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = AutocompleteStyles::default();
//! styles.highlighted = Style::new().foreground(Color::from("cyan")).bold(true);
//! ```

use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthChar;

/// Ellipsis appended to truncated labels.
pub const ELLIPSIS: &str = "…";

/// Labels wider than this many columns are truncated.
pub const MAX_LABEL_WIDTH: usize = 40;

/// Styling for every part of the auto-complete view.
#[derive(Debug, Clone)]
pub struct AutocompleteStyles {
    /// Search prompt and typed term.
    pub prompt: Style,
    /// Selected values shown above the options.
    pub chip: Style,
    /// Options that are neither highlighted nor selected.
    pub option: Style,
    /// The highlighted option.
    pub highlighted: Style,
    /// Selected options in the list.
    pub selected: Style,
    /// Options still waiting for their record.
    pub placeholder: Style,
    /// The "load more" affordance.
    pub load_more: Style,
    /// Loading and empty notices.
    pub notice: Style,
}

impl Default for AutocompleteStyles {
    fn default() -> Self {
        Self {
            prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            chip: Style::new()
                .foreground(Color::from("#FFFFFF"))
                .background(Color::from("#6124DF"))
                .padding(0, 1, 0, 1),
            option: Style::new(),
            highlighted: Style::new().foreground(Color::from("212")).bold(true),
            selected: Style::new().foreground(Color::from("99")),
            placeholder: Style::new().foreground(Color::from("243")).italic(true),
            load_more: Style::new().foreground(Color::from("63")).bold(true),
            notice: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}

/// Shortens `label` to at most `max` columns, ending it with [`ELLIPSIS`]
/// when cut.
pub fn truncate(label: &str, max: usize) -> String {
    let width: usize = label.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max {
        return label.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_labels_untouched() {
        assert_eq!(truncate("Kathmandu Branch", MAX_LABEL_WIDTH), "Kathmandu Branch");
    }

    #[test]
    fn test_long_labels_truncated_by_width() {
        let label = "a".repeat(50);
        let cut = truncate(&label, 10);
        assert_eq!(cut, format!("{}{}", "a".repeat(9), ELLIPSIS));

        // Wide characters take two columns each.
        assert_eq!(truncate("日本語テキスト", 6), "日本…");
    }
}
