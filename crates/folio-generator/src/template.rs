//! HTML template system for page generation.
//!
//! Templates are plain strings with `{{ name }}` placeholders (required) and
//! `{{ name? }}` placeholders (optional, empty when unset). Values are inserted
//! verbatim: text coming from configuration or front matter must go through
//! [`escape_html`] or [`TemplateContext::insert_text`] first.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pre-rendered HTML value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Insert plain text, escaping it.
    pub fn insert_text(&mut self, key: impl Into<String>, text: &str) {
        self.insert(key, escape_html(text));
    }

    /// Insert a value only when it is non-empty, leaving optional
    /// placeholders blank otherwise.
    pub fn insert_non_empty(&mut self, key: impl Into<String>, value: String) {
        if !value.is_empty() {
            self.insert(key, value);
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A named template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are never re-scanned for placeholders.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut output = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                TemplateError::InvalidSyntax(format!("unclosed {{{{ in template `{}`", self.name))
            })?;

            let var_name = after[..end].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (var_name, false),
            };
            if var_name.is_empty() {
                return Err(TemplateError::InvalidSyntax(format!(
                    "empty placeholder in template `{}`",
                    self.name
                )));
            }

            match context.get(var_name) {
                Some(value) => output.push_str(value),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            }

            rest = &after[end + 2..];
        }
        output.push_str(rest);

        Ok(output)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a registry holding the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", BASE_TEMPLATE));
        registry.register(Template::new("home", HOME_TEMPLATE));
        registry.register(Template::new("about", ABOUT_TEMPLATE));
        registry.register(Template::new("work", WORK_TEMPLATE));
        registry.register(Template::new("project", PROJECT_TEMPLATE));
        registry.register(Template::new("not_found", NOT_FOUND_TEMPLATE));
        registry
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Page shell: head metadata, navigation, footer and the dialog script.
pub const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ description? }}">
    <meta name="author" content="{{ author }}">
    <link rel="canonical" href="{{ canonical_url }}">
    <meta property="og:type" content="{{ og_type }}">
    <meta property="og:site_name" content="{{ site_name }}">
    <meta property="og:title" content="{{ title }}">
    <meta property="og:description" content="{{ description? }}">
    <meta property="og:url" content="{{ canonical_url }}">
    <meta property="og:image" content="{{ og_image? }}">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{{ title }}">
    <meta name="twitter:description" content="{{ description? }}">
    <meta name="twitter:image" content="{{ og_image? }}">
    <link rel="alternate" type="application/rss+xml" title="{{ site_name }}" href="/rss.xml">
    <style>
        :root {
            --color-brand: #2563EB;
            --color-bg: #FAFAF9;
            --color-surface: #FFFFFF;
            --color-text: #1C1917;
            --color-muted: #57534E;
            --color-border: #E7E5E4;
            --radius: 0.75rem;
            color-scheme: light;
        }

        @media (prefers-color-scheme: dark) {
            :root {
                --color-brand: #60A5FA;
                --color-bg: #0C0A09;
                --color-surface: #1C1917;
                --color-text: #F5F5F4;
                --color-muted: #A8A29E;
                --color-border: #292524;
                color-scheme: dark;
            }
        }

        *, *::before, *::after { box-sizing: border-box; }
        * { margin: 0; padding: 0; }

        body {
            font-family: Inter, system-ui, -apple-system, sans-serif;
            line-height: 1.6;
            color: var(--color-text);
            background: var(--color-bg);
            min-height: 100vh;
            display: flex;
            flex-direction: column;
        }

        a { color: var(--color-brand); text-decoration: none; }
        a:hover { text-decoration: underline; }
        img { max-width: 100%; height: auto; border-radius: var(--radius); }

        .container { max-width: 56rem; margin: 0 auto; padding: 0 1.5rem; width: 100%; }
        main { flex: 1; padding: 3rem 0; }

        header.site-header { border-bottom: 1px solid var(--color-border); background: var(--color-surface); }
        header.site-header nav { display: flex; gap: 1.5rem; align-items: center; height: 3.5rem; }
        header.site-header nav a { color: var(--color-muted); font-weight: 500; }
        header.site-header nav a.active { color: var(--color-text); }

        footer.site-footer { border-top: 1px solid var(--color-border); padding: 1.5rem 0; color: var(--color-muted); font-size: 0.875rem; }
        footer.site-footer .container { display: flex; justify-content: space-between; flex-wrap: wrap; gap: 1rem; }

        .social-links { display: flex; gap: 1rem; list-style: none; }

        .display-m { font-size: 2.75rem; line-height: 1.15; font-weight: 700; }
        .display-s { font-size: 2rem; line-height: 1.2; font-weight: 700; }
        .subline { color: var(--color-muted); font-size: 1.25rem; margin-top: 1rem; }

        .breadcrumbs { display: flex; gap: 0.5rem; justify-content: center; font-weight: 600; font-size: 0.875rem; }
        .breadcrumbs .separator { color: var(--color-muted); }

        .project-header { text-align: center; display: flex; flex-direction: column; gap: 1rem; margin-bottom: 2rem; }
        .project-cover { aspect-ratio: 16 / 9; object-fit: cover; width: 100%; margin-bottom: 2rem; }
        .project-meta { color: var(--color-muted); font-size: 0.875rem; }

        .prose { max-width: 40rem; margin: 0 auto; }
        .prose > * + * { margin-top: 1rem; }
        .prose pre { padding: 1rem; border-radius: var(--radius); overflow-x: auto; font-size: 0.875rem; }
        .prose ul, .prose ol { padding-left: 1.5rem; }
        .prose table { border-collapse: collapse; width: 100%; }
        .prose td, .prose th { border: 1px solid var(--color-border); padding: 0.5rem; }

        .project-grid { display: grid; gap: 2rem; margin-top: 2rem; }
        .project-card { display: flex; flex-direction: column; gap: 0.75rem; }
        .project-card h3 { font-size: 1.5rem; }
        .project-card p { color: var(--color-muted); }
        .project-card--featured h3 { font-size: 2rem; }

        .section { margin-top: 3rem; }
        .section > h2 { font-size: 1.75rem; margin-bottom: 1.5rem; }
        .related { margin-top: 4rem; padding-top: 2rem; border-top: 1px solid var(--color-border); text-align: center; }

        .about { display: grid; grid-template-columns: 14rem 1fr; gap: 3rem; }
        .about-avatar { display: flex; flex-direction: column; align-items: center; gap: 0.75rem; text-align: center; position: sticky; top: 2rem; align-self: start; }
        .about-avatar img { width: 10rem; height: 10rem; border-radius: 50%; object-fit: cover; }
        .about-toc { position: fixed; left: 1.5rem; top: 50%; transform: translateY(-50%); list-style: none; font-size: 0.875rem; }
        .about-toc ul { list-style: none; padding-left: 1rem; }
        .experience + .experience, .institution + .institution, .skill + .skill { margin-top: 2rem; }
        .experience-head { display: flex; justify-content: space-between; gap: 1rem; }
        .timeframe { color: var(--color-muted); font-size: 0.875rem; }
        .role { color: var(--color-brand); font-size: 0.875rem; margin-bottom: 0.5rem; }
        .achievements { padding-left: 1.25rem; }
        .image-row { display: flex; gap: 1rem; flex-wrap: wrap; margin-top: 1rem; }
        .tags { display: flex; gap: 0.5rem; flex-wrap: wrap; list-style: none; margin-top: 0.5rem; }
        .tag { border: 1px solid var(--color-border); border-radius: 999px; padding: 0.125rem 0.75rem; font-size: 0.8125rem; }
        .button { display: inline-flex; align-items: center; gap: 0.5rem; border: 1px solid var(--color-border); border-radius: 999px; padding: 0.375rem 1rem; background: var(--color-surface); color: var(--color-text); font: inherit; font-size: 0.875rem; cursor: pointer; }

        .action-list { list-style: none; display: flex; flex-direction: column; gap: 1.5rem; margin-top: 2rem; }
        .action-list .action-list { margin-top: 1rem; padding-left: 1.5rem; border-left: 2px solid var(--color-border); }
        .action-item-label { font-weight: 600; }
        .action-item-text { color: var(--color-muted); }
        .action-row { display: flex; gap: 0.75rem; flex-wrap: wrap; margin-top: 0.5rem; }

        dialog.action-dialog { margin: auto; max-width: 48rem; width: calc(100% - 2rem); border: 1px solid var(--color-border); border-radius: var(--radius); padding: 1.5rem; background: var(--color-surface); color: var(--color-text); }
        dialog.action-dialog::backdrop { background: rgb(0 0 0 / 0.6); }
        dialog.action-dialog header { display: flex; justify-content: space-between; align-items: start; gap: 1rem; margin-bottom: 1rem; }
        .carousel { position: relative; }
        .carousel-slide { display: none; }
        .carousel-slide.active { display: block; }
        .carousel-controls { display: flex; justify-content: space-between; margin-top: 0.75rem; }

        @media (max-width: 768px) {
            .about { grid-template-columns: 1fr; }
            .about-avatar { position: static; }
            .about-toc { display: none; }
            .display-m { font-size: 2.25rem; }
        }
    </style>
</head>
<body>
    <header class="site-header">
        <div class="container">
            <nav aria-label="Main">
                {{ nav }}
            </nav>
        </div>
    </header>
    <main>
        <div class="container">
            {{ content }}
        </div>
    </main>
    <footer class="site-footer">
        <div class="container">
            <p>&copy; {{ year }} {{ author }}</p>
            {{ footer_social? }}
        </div>
    </footer>
    <script>
        (function() {
            document.addEventListener('click', function(event) {
                var opener = event.target.closest('[data-dialog-open]');
                if (opener) {
                    document.querySelectorAll('dialog[open]').forEach(function(d) {
                        if (d.dataset.list === opener.dataset.list) d.close();
                    });
                    var dialog = document.getElementById(opener.dataset.dialogOpen);
                    if (dialog) dialog.showModal();
                    return;
                }

                var closer = event.target.closest('[data-dialog-close]');
                if (closer) {
                    closer.closest('dialog').close();
                    return;
                }

                if (event.target.tagName === 'DIALOG') {
                    event.target.close();
                    return;
                }

                var step = event.target.closest('[data-carousel-step]');
                if (step) {
                    var carousel = step.closest('.carousel');
                    var slides = carousel.querySelectorAll('.carousel-slide');
                    var current = Array.prototype.findIndex.call(slides, function(s) {
                        return s.classList.contains('active');
                    });
                    var next = (current + Number(step.dataset.carouselStep) + slides.length) % slides.length;
                    slides[current].classList.remove('active');
                    slides[next].classList.add('active');
                }
            });
        })();
    </script>
    {{ custom_js? }}
</body>
</html>"##;

/// Home page body.
pub const HOME_TEMPLATE: &str = r#"<section class="home">
    <h1 class="display-m">{{ headline }}</h1>
    <p class="subline">{{ subline? }}</p>
    {{ about_link? }}
    {{ featured? }}
    {{ projects? }}
</section>"#;

/// About page body.
pub const ABOUT_TEMPLATE: &str = r#"{{ toc? }}
<section class="about">
    {{ avatar? }}
    <div class="about-main">
        <header id="intro-header">
            <h1 class="display-m">{{ name }}</h1>
            <p class="subline">{{ role }}</p>
            {{ calendar? }}
            {{ social? }}
        </header>
        {{ sections }}
    </div>
</section>"#;

/// Work index body.
pub const WORK_TEMPLATE: &str = r#"<section class="work">
    <h1 class="display-s">{{ title }}</h1>
    <p class="subline">{{ description? }}</p>
    {{ projects }}
</section>"#;

/// Project page body.
pub const PROJECT_TEMPLATE: &str = r#"<article class="project">
    <header class="project-header">
        {{ breadcrumbs }}
        <h1 class="{{ heading_class }}">{{ title }}</h1>
        <p class="project-meta">{{ published? }}</p>
    </header>
    {{ cover? }}
    <div class="prose">
        {{ content }}
    </div>
    {{ actions? }}
    {{ children? }}
    {{ related? }}
</article>"#;

/// 404 body.
pub const NOT_FOUND_TEMPLATE: &str = r#"<section class="not-found">
    <h1 class="display-m">404</h1>
    <p class="subline">This page could not be found.</p>
    <p><a href="{{ home_url }}">Back home</a></p>
</section>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let mut ctx = TemplateContext::new();
        ctx.insert("name", "World");

        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");

        assert_eq!(template.render(&TemplateContext::new()).unwrap(), "Hello!");

        let ctx = TemplateContext::new().with_var("suffix", ", World");
        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let result = template.render(&TemplateContext::new());

        assert!(matches!(result, Err(TemplateError::MissingVariable(v)) if v == "name"));
    }

    #[test]
    fn test_template_invalid_syntax() {
        let unclosed = Template::new("test", "Hello, {{ name");
        assert!(matches!(
            unclosed.render(&TemplateContext::new()),
            Err(TemplateError::InvalidSyntax(_))
        ));

        let empty = Template::new("test", "Hello, {{ }}");
        assert!(matches!(
            empty.render(&TemplateContext::new()),
            Err(TemplateError::InvalidSyntax(_))
        ));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template::new("test", "{{ a }}-{{ b }}");
        let ctx = TemplateContext::new()
            .with_var("a", "{{ b }}")
            .with_var("b", "x");

        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}-x");
    }

    #[test]
    fn test_insert_helpers() {
        let mut ctx = TemplateContext::new();
        ctx.insert_text("title", "Tom & Jerry <3");
        ctx.insert_non_empty("empty", String::new());
        ctx.insert_non_empty("full", "x".to_string());

        assert_eq!(ctx.get("title"), Some("Tom &amp; Jerry &lt;3"));
        assert!(!ctx.contains("empty"));
        assert!(ctx.contains("full"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'hi' & bye</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;hi&#x27; &amp; bye&lt;/a&gt;"
        );
        assert_eq!(escape_html("Zürich"), "Zürich");
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        for name in ["base", "home", "about", "work", "project", "not_found"] {
            assert!(registry.get(name).is_some(), "missing template {name}");
        }
        assert!(registry.get("post").is_none());
        assert!(matches!(
            registry.render("post", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_registry_override() {
        let mut registry = TemplateRegistry::new();
        registry.register(Template::new("not_found", "gone: {{ home_url }}"));

        let ctx = TemplateContext::new().with_var("home_url", "/");
        assert_eq!(registry.render("not_found", &ctx).unwrap(), "gone: /");
    }

    #[test]
    fn test_render_base_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("lang", "en")
            .with_var("title", "My Page")
            .with_var("author", "Ada Lovelace")
            .with_var("canonical_url", "https://example.com/my-page")
            .with_var("og_type", "website")
            .with_var("site_name", "Ada's Portfolio")
            .with_var("nav", "<a href=\"/\">Home</a>")
            .with_var("content", "<p>Hello!</p>")
            .with_var("year", "2026");

        let result = registry.render("base", &ctx).unwrap();
        assert!(result.contains("<!DOCTYPE html>"));
        assert!(result.contains("<title>My Page</title>"));
        assert!(result.contains("<meta property=\"og:title\" content=\"My Page\">"));
        assert!(result.contains("<p>Hello!</p>"));
        assert!(result.contains("&copy; 2026 Ada Lovelace"));
        assert!(result.contains("data-dialog-open"));
    }
}
