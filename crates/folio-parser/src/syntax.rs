//! Code block highlighting.

use syntect::{
    highlighting::{Theme, ThemeSet},
    html::highlighted_html_for_string,
    parsing::{SyntaxReference, SyntaxSet},
};

/// Theme used when none is configured or the configured one is unknown.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Syntax highlighter using syntect's bundled syntaxes and themes.
#[derive(Debug)]
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme: String,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl SyntaxHighlighter {
    pub fn new(theme: &str) -> Self {
        let mut highlighter = Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme: DEFAULT_THEME.to_string(),
        };
        highlighter.set_theme(theme);
        highlighter
    }

    pub fn available_themes(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(String::as_str).collect()
    }

    pub fn theme_name(&self) -> &str {
        &self.theme
    }

    /// Switch themes; unknown names leave the current theme in place.
    pub fn set_theme(&mut self, theme: &str) -> bool {
        if self.theme_set.themes.contains_key(theme) {
            self.theme = theme.to_string();
            true
        } else {
            false
        }
    }

    /// Highlight `code` as `lang`.
    ///
    /// Unknown languages, or a highlighting failure, produce an escaped
    /// `<pre><code class="language-…">` block instead.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let highlighted = self
            .syntax_for(lang)
            .zip(self.current_theme())
            .and_then(|(syntax, theme)| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            });

        highlighted.unwrap_or_else(|| plain_block(code, lang))
    }

    fn syntax_for(&self, lang: Option<&str>) -> Option<&SyntaxReference> {
        let lang = lang?;
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
    }

    fn current_theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme)
            .or_else(|| self.theme_set.themes.values().next())
    }
}

fn plain_block(code: &str, lang: Option<&str>) -> String {
    let lang_class = lang
        .map(|l| format!(" class=\"language-{}\"", html_escape(l)))
        .unwrap_or_default();
    format!("<pre><code{lang_class}>{}</code></pre>", html_escape(code))
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_php() {
        let highlighter = SyntaxHighlighter::default();
        let code = "<?php\nfunction hook_help() {\n  return 'help';\n}\n";
        let html = highlighter.highlight(code, Some("php"));

        assert!(html.contains("<pre"));
        assert!(html.contains("hook_help"));
        assert!(html.contains("style="));
    }

    #[test]
    fn test_highlight_unknown_language_falls_back() {
        let highlighter = SyntaxHighlighter::default();
        let html = highlighter.highlight("a < b", Some("twig-xyz"));

        assert_eq!(
            html,
            "<pre><code class=\"language-twig-xyz\">a &lt; b</code></pre>"
        );
    }

    #[test]
    fn test_highlight_no_language() {
        let highlighter = SyntaxHighlighter::default();
        let html = highlighter.highlight("plain text", None);

        assert_eq!(html, "<pre><code>plain text</code></pre>");
    }

    #[test]
    fn test_unknown_theme_keeps_default() {
        let mut highlighter = SyntaxHighlighter::new("no-such-theme");
        assert_eq!(highlighter.theme_name(), DEFAULT_THEME);

        assert!(highlighter.set_theme("InspiredGitHub"));
        assert_eq!(highlighter.theme_name(), "InspiredGitHub");
        assert!(!highlighter.set_theme("nope"));
        assert_eq!(highlighter.theme_name(), "InspiredGitHub");
    }

    #[test]
    fn test_available_themes() {
        let highlighter = SyntaxHighlighter::default();
        let themes = highlighter.available_themes();

        assert!(themes.contains(&"base16-ocean.dark"));
        assert!(themes.contains(&"InspiredGitHub"));
    }
}
