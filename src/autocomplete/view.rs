//! Text rendering of the auto-complete.

use super::style::{truncate, MAX_LABEL_WIDTH};
use super::types::Record;
use super::Model;
use crate::key;

const PROMPT: &str = "> ";
const CURSOR: &str = "› ";

impl Model {
    /// Renders the control: the selected values, the search prompt and, while
    /// focused, the visible options followed by the paging affordance and
    /// short help.
    pub fn view(&self) -> String {
        let mut out = String::new();

        let chips: Vec<String> = self
            .selection
            .ids()
            .into_iter()
            .map(|id| {
                let label = self
                    .pool
                    .get(id)
                    .map(|r| self.label(r))
                    .unwrap_or_else(|| id.to_string());
                self.styles.chip.render(&label)
            })
            .collect();
        if !chips.is_empty() {
            out.push_str(&chips.join(" "));
            out.push('\n');
        }

        out.push_str(&self.styles.prompt.render(&format!("{}{}", PROMPT, self.search)));

        if !self.focused {
            return out;
        }
        out.push('\n');

        let visible = self.visible_items();
        if visible.is_empty() {
            let notice = if self.is_loading() {
                "Loading…"
            } else {
                "No data available"
            };
            out.push_str(&self.styles.notice.render(notice));
            out.push('\n');
        }

        for (i, record) in visible.iter().enumerate() {
            let selected = record
                .identifier(&self.fields)
                .map(|id| self.selection.contains(&id))
                .unwrap_or(false);
            let marker = match (self.selection.is_multiple(), selected) {
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
                (false, true) => "• ",
                (false, false) => "  ",
            };
            let line = format!("{}{}", marker, self.label(record));

            if i == self.highlight {
                out.push_str(CURSOR);
                out.push_str(&self.styles.highlighted.render(&line));
            } else {
                out.push_str("  ");
                let provisional = record
                    .identifier(&self.fields)
                    .map(|id| self.pool.is_provisional(&id))
                    .unwrap_or(false);
                let style = if provisional {
                    &self.styles.placeholder
                } else if selected {
                    &self.styles.selected
                } else {
                    &self.styles.option
                };
                out.push_str(&style.render(&line));
            }
            out.push('\n');
        }

        if self.has_more() {
            out.push_str(&self.styles.load_more.render("Load More Items ..."));
            out.push('\n');
        } else if self.is_loading() && !visible.is_empty() {
            out.push_str(&self.styles.notice.render("Loading…"));
            out.push('\n');
        }

        out.push_str(&self.styles.notice.render(&key::short_help_view(&self.keymap)));
        out
    }

    /// Label shown for `record`: its display field, or the identifier while
    /// the record is only a placeholder.
    fn label(&self, record: &Record) -> String {
        let display = record.display(&self.fields);
        let text = if display.is_empty() {
            record
                .identifier(&self.fields)
                .map(|id| id.to_string())
                .unwrap_or_default()
        } else {
            display
        };
        truncate(&text, MAX_LABEL_WIDTH)
    }
}
