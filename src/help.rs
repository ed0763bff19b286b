//! Footer help bar listing the currently available key bindings.
//!
//! Renders either a compact one-line view (" • "-separated) or a
//! multi-column expanded view, depending on `show_all`. Disabled bindings
//! are skipped, so the bar only ever advertises commands that will
//! actually do something.

use crate::key;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help view elements.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for the truncation ellipsis.
    pub ellipsis: Style,
    /// Style for key names in the short view.
    pub short_key: Style,
    /// Style for descriptions in the short view.
    pub short_desc: Style,
    /// Style for the separator in the short view.
    pub short_separator: Style,
    /// Style for key names in the full view.
    pub full_key: Style,
    /// Style for descriptions in the full view.
    pub full_desc: Style,
    /// Style for the separator between full-view columns.
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// The help bar model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Toggles between the one-line and the multi-column view.
    pub show_all: bool,
    /// Maximum width in characters; 0 means no limit.
    pub width: usize,
    /// Separator between items in the short view.
    pub short_separator: String,
    /// Separator between columns in the full view.
    pub full_separator: String,
    /// Marker shown when content is truncated.
    pub ellipsis: String,
    /// Visual styling.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help model with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum width of the rendered help.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the help for the given key map, honoring `show_all`.
    pub fn view<K: key::KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders the compact one-line view.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        if bindings.is_empty() {
            return String::new();
        }

        let mut builder = String::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        for kb in bindings {
            if !kb.enabled() {
                continue;
            }

            let sep = if total_width > 0 { separator.as_str() } else { "" };

            let help = kb.help();
            let key_part = self.styles.short_key.clone().inline(true).render(&help.key);
            let desc_part = self
                .styles
                .short_desc
                .clone()
                .inline(true)
                .render(&help.desc);
            let item_str = format!("{}{} {}", sep, key_part, desc_part);

            let item_width = lipgloss::width_visible(&item_str);

            if let Some(tail) = self.should_add_item(total_width, item_width) {
                if !tail.is_empty() {
                    builder.push_str(&tail);
                }
                break;
            }

            total_width += item_width;
            builder.push_str(&item_str);
        }
        builder
    }

    /// Renders the multi-column expanded view.
    pub fn full_help_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        if groups.is_empty() {
            return String::new();
        }

        let mut columns: Vec<String> = Vec::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        for group in groups.iter() {
            if group.iter().all(|b| !b.enabled()) {
                continue;
            }

            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    let key_part = self.styles.full_key.clone().inline(true).render(&help.key);
                    let desc_part = self
                        .styles
                        .full_desc
                        .clone()
                        .inline(true)
                        .render(&help.desc);
                    format!("{} {}", key_part, desc_part)
                })
                .collect();

            let col_str = rows.join("\n");
            let col_width = lipgloss::width_visible(&col_str);

            if let Some(tail) = self.should_add_item(total_width, col_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }

            total_width += col_width;
            columns.push(col_str);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(col.as_str());
        }

        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    // Returns Some(tail) when the item would exceed the width limit; the
    // tail is the ellipsis if it still fits, or empty otherwise.
    fn should_add_item(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width > 0 && total_width + item_width > self.width {
            let tail = format!(
                " {}",
                self.styles
                    .ellipsis
                    .clone()
                    .inline(true)
                    .render(&self.ellipsis)
            );
            if total_width + lipgloss::width_visible(&tail) < self.width {
                return Some(tail);
            }
            return Some(String::new());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Binding;
    use crossterm::event::KeyCode;

    struct Map {
        start: Binding,
        stop: Binding,
        quit: Binding,
    }

    impl key::KeyMap for Map {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.start, &self.stop, &self.quit]
        }
        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.start, &self.stop], vec![&self.quit]]
        }
    }

    fn map() -> Map {
        Map {
            start: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "start"),
            stop: Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "stop"),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
        }
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_short_view_lists_enabled_bindings() {
        let help = Model::new();
        let out = plain(&help.view(&map()));
        assert_eq!(out, "s start • space stop • q quit");
    }

    #[test]
    fn test_short_view_skips_disabled() {
        let mut m = map();
        m.stop.set_enabled(false);
        let help = Model::new();
        let out = plain(&help.view(&m));
        assert_eq!(out, "s start • q quit");
    }

    #[test]
    fn test_short_view_truncates_with_ellipsis() {
        let help = Model::new().with_width(14);
        let out = plain(&help.view(&map()));
        assert!(out.starts_with("s start"));
        assert!(out.len() <= 14 + "…".len());
    }

    #[test]
    fn test_full_view_renders_columns() {
        let mut help = Model::new();
        help.show_all = true;
        let out = plain(&help.view(&map()));
        assert!(out.contains("s start"));
        assert!(out.contains("space stop"));
        assert!(out.contains("q quit"));
        assert!(out.contains('\n')); // first column has two rows
    }

    #[test]
    fn test_empty_keymap_is_empty() {
        struct Empty;
        impl key::KeyMap for Empty {
            fn short_help(&self) -> Vec<&Binding> {
                vec![]
            }
            fn full_help(&self) -> Vec<Vec<&Binding>> {
                vec![]
            }
        }
        let help = Model::new();
        assert_eq!(help.view(&Empty), "");
        let mut help = help;
        help.show_all = true;
        assert_eq!(help.view(&Empty), "");
    }
}
