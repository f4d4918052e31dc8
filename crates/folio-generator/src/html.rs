//! HTML generation for every page of the site.
//!
//! Each page body is rendered from its own template and then wrapped in the
//! `base` template, which carries head metadata, navigation and footer.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use folio_core::{
    Config, Post,
    config::{ImageRef, normalize_route},
    content::format_date,
};
use folio_parser::{MarkdownParser, slugify};
use thiserror::Error;
use tracing::debug;

use crate::{
    collector::{ProjectRange, SiteContent, select_projects},
    components::{
        action_list_html, breadcrumbs_html, project_crumbs, project_grid_html, social_links_html,
    },
    template::{Template, TemplateContext, TemplateError, TemplateRegistry, escape_html},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Head metadata of one page.
#[derive(Debug, Clone)]
struct PageMeta {
    title: String,
    description: String,
    route: String,
    image: String,
    og_type: &'static str,
}

/// Navigation entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavItem {
    Home,
    About,
    Work,
    None,
}

/// HTML page generator.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: Config,
    markdown: MarkdownParser,
    live_reload: Option<String>,
}

impl HtmlGenerator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let markdown = MarkdownParser::with_theme(&config.build.syntax_theme);
        Self {
            templates: TemplateRegistry::new(),
            config,
            markdown,
            live_reload: None,
        }
    }

    /// Replace a built-in template.
    pub fn register_template(&mut self, template: Template) {
        self.templates.register(template);
    }

    /// Append a script to every page, used by the dev server for live reload.
    pub fn set_live_reload_script(&mut self, script: impl Into<String>) {
        self.live_reload = Some(script.into());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Home page: headline, about link, the featured project and the rest.
    pub fn generate_home(&self, content: &SiteContent) -> Result<String> {
        let home = &self.config.home;
        let person = &self.config.person;
        debug!(route = %home.path, "generating home page");

        let mut ctx = TemplateContext::new();
        ctx.insert_text("headline", &home.headline);
        ctx.insert_non_empty("subline", escape_html(&home.subline));

        if self.config.about.path != home.path {
            let avatar = if self.config.about.avatar.display && !person.avatar.is_empty() {
                format!(
                    r#"<img class="avatar-s" src="{}" alt="" width="32" height="32">"#,
                    escape_html(&person.avatar)
                )
            } else {
                String::new()
            };
            let first_name = if person.first_name.is_empty() {
                &person.name
            } else {
                &person.first_name
            };
            ctx.insert(
                "about_link",
                format!(
                    r#"<p><a class="button" href="{}">{avatar}About {}</a></p>"#,
                    escape_html(&self.config.about.path),
                    escape_html(first_name)
                ),
            );
        }

        let top_level = content.top_level();
        let featured = select_projects(top_level.clone(), &[], Some(ProjectRange::single(1)));
        let rest = select_projects(top_level, &[], Some(ProjectRange::starting_at(2)));
        ctx.insert_non_empty("featured", project_grid_html(&self.config, &featured, true));
        ctx.insert_non_empty("projects", project_grid_html(&self.config, &rest, false));

        let body = self.templates.render("home", &ctx)?;
        self.wrap(
            &PageMeta {
                title: home.title.clone(),
                description: home.description.clone(),
                route: home.path.clone(),
                image: home.image.clone(),
                og_type: "website",
            },
            NavItem::Home,
            &body,
        )
    }

    /// About page: avatar column, resume sections and their table of contents.
    pub fn generate_about(&self) -> Result<String> {
        let about = &self.config.about;
        let person = &self.config.person;
        debug!(route = %about.path, "generating about page");

        let mut ctx = TemplateContext::new();
        ctx.insert_text("name", &person.name);
        ctx.insert_text("role", &person.role);

        if about.avatar.display {
            ctx.insert("avatar", self.avatar_column());
        }
        if about.calendar.display && !about.calendar.link.is_empty() {
            ctx.insert(
                "calendar",
                format!(
                    r#"<p><a class="button" href="{}" target="_blank" rel="noopener noreferrer">Schedule a call</a></p>"#,
                    escape_html(&about.calendar.link)
                ),
            );
        }
        ctx.insert_non_empty("social", social_links_html(&self.config.social));

        let sections = self.about_sections();
        let body: String = sections.iter().map(|s| s.html.as_str()).collect();
        ctx.insert("sections", body);

        if about.table_of_content.display && !sections.is_empty() {
            ctx.insert(
                "toc",
                about_toc_html(&sections, about.table_of_content.sub_items),
            );
        }

        let body = self.templates.render("about", &ctx)?;
        self.wrap(
            &PageMeta {
                title: about.title.clone(),
                description: about.description.clone(),
                route: about.path.clone(),
                image: self.config.home.image.clone(),
                og_type: "profile",
            },
            NavItem::About,
            &body,
        )
    }

    /// Work index: every top-level project, newest first.
    pub fn generate_work_index(&self, content: &SiteContent) -> Result<String> {
        let work = &self.config.work;
        debug!(route = %work.path, "generating work index");

        let projects = select_projects(content.top_level(), &[], None);

        let mut ctx = TemplateContext::new();
        ctx.insert_text("title", &work.title);
        ctx.insert_non_empty("description", escape_html(&work.description));
        ctx.insert("projects", project_grid_html(&self.config, &projects, false));

        let body = self.templates.render("work", &ctx)?;
        self.wrap(
            &PageMeta {
                title: work.title.clone(),
                description: work.description.clone(),
                route: work.path.clone(),
                image: self.config.home.image.clone(),
                og_type: "website",
            },
            NavItem::Work,
            &body,
        )
    }

    /// A project page.
    pub fn generate_project(&self, post: &Post, content: &SiteContent) -> Result<String> {
        let route = self.config.project_url(post.slug.as_str());
        debug!(slug = %post.slug, route = %route, "generating project page");

        let title = post.display_title();
        let mut ctx = TemplateContext::new();
        ctx.insert("breadcrumbs", breadcrumbs_html(&project_crumbs(&self.config, post)));
        ctx.insert(
            "heading_class",
            if post.slug.is_nested() {
                "display-s"
            } else {
                "display-m"
            },
        );
        ctx.insert_text("title", &title);
        ctx.insert("content", post.html.as_str());

        if let Some(date) = post.published_date() {
            ctx.insert(
                "published",
                format!(
                    r#"<time datetime="{}">{}</time>"#,
                    date.format("%Y-%m-%d"),
                    format_date(date)
                ),
            );
        }

        if let Some(cover) = post.metadata.cover_image() {
            ctx.insert(
                "cover",
                format!(
                    r#"<img class="project-cover" src="{}" alt="{}">"#,
                    escape_html(cover),
                    escape_html(&title)
                ),
            );
        }

        ctx.insert_non_empty(
            "actions",
            action_list_html(&post.metadata.actions, "actions", &self.markdown),
        );

        let children = select_projects(content.children_of(&post.slug), &[], None);
        if !children.is_empty() {
            ctx.insert(
                "children",
                format!(
                    r#"<section class="section sub-projects"><h2>More in {}</h2>{}</section>"#,
                    escape_html(&title),
                    project_grid_html(&self.config, &children, false)
                ),
            );
        }

        let related = select_projects(
            content.top_level(),
            &[post.slug.as_str()],
            Some(ProjectRange::starting_at(2)),
        );
        if !related.is_empty() {
            ctx.insert(
                "related",
                format!(
                    r#"<section class="related"><h2>Related projects</h2>{}</section>"#,
                    project_grid_html(&self.config, &related, false)
                ),
            );
        }

        let body = self.templates.render("project", &ctx)?;
        let image = if post.metadata.image.is_empty() {
            self.config.home.image.clone()
        } else {
            post.metadata.image.clone()
        };

        self.wrap(
            &PageMeta {
                title,
                description: post.metadata.summary.clone(),
                route,
                image,
                og_type: "article",
            },
            NavItem::Work,
            &body,
        )
    }

    pub fn generate_not_found(&self) -> Result<String> {
        let ctx = TemplateContext::new().with_var("home_url", escape_html(&self.config.home.path));
        let body = self.templates.render("not_found", &ctx)?;

        self.wrap(
            &PageMeta {
                title: format!("Page not found – {}", self.config.person.name),
                description: String::new(),
                route: "/404.html".to_string(),
                image: self.config.home.image.clone(),
                og_type: "website",
            },
            NavItem::None,
            &body,
        )
    }

    /// File a route is written to: `/work/shop` → `out/work/shop/index.html`.
    #[must_use]
    pub fn output_path(route: &str, output_dir: &Path) -> PathBuf {
        let relative = normalize_route(route);

        if relative.is_empty() {
            output_dir.join("index.html")
        } else if relative.ends_with(".html") {
            output_dir.join(relative)
        } else {
            output_dir.join(relative).join("index.html")
        }
    }

    fn wrap(&self, meta: &PageMeta, active: NavItem, body: &str) -> Result<String> {
        let person = &self.config.person;

        let description = if meta.description.is_empty() {
            self.config.site.description.clone().unwrap_or_default()
        } else {
            meta.description.clone()
        };

        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(&self.config.site.default_language))
            .with_var("og_type", meta.og_type)
            .with_var("canonical_url", escape_html(&self.config.url_for(&meta.route)))
            .with_var("nav", self.nav_html(active))
            .with_var("content", body)
            .with_var("year", Utc::now().year().to_string());
        ctx.insert_text("title", &meta.title);
        ctx.insert_text("author", &person.name);
        ctx.insert_text("site_name", &self.config.home.title);
        ctx.insert_non_empty("description", escape_html(&description));
        ctx.insert_non_empty("og_image", escape_html(&self.absolute_url(&meta.image)));
        ctx.insert_non_empty("footer_social", social_links_html(&self.config.social));
        if let Some(script) = &self.live_reload {
            ctx.insert("custom_js", script.as_str());
        }

        let html = self.templates.render("base", &ctx)?;
        Ok(if self.config.build.minify {
            collapse_indentation(&html)
        } else {
            html
        })
    }

    fn nav_html(&self, active: NavItem) -> String {
        [
            (NavItem::Home, &self.config.home.path, &self.config.home.label),
            (NavItem::About, &self.config.about.path, &self.config.about.label),
            (NavItem::Work, &self.config.work.path, &self.config.work.label),
        ]
        .into_iter()
        .map(|(item, path, label)| {
            let class = if item == active {
                r#" class="active" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"<a href="{}"{class}>{}</a>"#,
                escape_html(path),
                escape_html(label)
            )
        })
        .collect()
    }

    fn absolute_url(&self, src: &str) -> String {
        if src.is_empty() || src.starts_with("http://") || src.starts_with("https://") {
            src.to_string()
        } else {
            self.config.url_for(src)
        }
    }

    fn avatar_column(&self) -> String {
        let person = &self.config.person;
        let mut html = String::from(r#"<aside class="about-avatar">"#);

        if !person.avatar.is_empty() {
            html.push_str(&format!(
                r#"<img src="{}" alt="{}">"#,
                escape_html(&person.avatar),
                escape_html(&person.name)
            ));
        }
        if !person.location.is_empty() {
            html.push_str(&format!(
                r#"<p class="location">{}</p>"#,
                escape_html(&person.location)
            ));
        }
        if !person.languages.is_empty() {
            let tags: String = person
                .languages
                .iter()
                .map(|l| format!(r#"<li class="tag">{}</li>"#, escape_html(l)))
                .collect();
            html.push_str(&format!(r#"<ul class="tags">{tags}</ul>"#));
        }

        html.push_str("</aside>");
        html
    }

    fn about_sections(&self) -> Vec<AboutSection> {
        let about = &self.config.about;
        let mut sections = Vec::new();

        if about.intro.display {
            let description = self.markdown.parse_body(&about.intro.description).0;
            sections.push(AboutSection::new(
                &about.intro.title,
                Vec::new(),
                format!(r#"<div class="prose intro">{description}</div>"#),
            ));
        }

        if about.work.display {
            let entries = about
                .work
                .experiences
                .iter()
                .map(|exp| {
                    let achievements: String = exp
                        .achievements
                        .iter()
                        .map(|a| format!("<li>{}</li>", escape_html(a)))
                        .collect();
                    let html = format!(
                        r#"<div class="experience" id="{id}"><div class="experience-head"><h3>{company}</h3><span class="timeframe">{timeframe}</span></div><p class="role">{role}</p><ul class="achievements">{achievements}</ul>{images}</div>"#,
                        id = slugify(&exp.company),
                        company = escape_html(&exp.company),
                        timeframe = escape_html(&exp.timeframe),
                        role = escape_html(&exp.role),
                        images = image_row_html(&exp.images),
                    );
                    (exp.company.clone(), html)
                })
                .collect();
            sections.push(AboutSection::with_entries(&about.work.title, entries));
        }

        if about.studies.display {
            let entries = about
                .studies
                .institutions
                .iter()
                .map(|inst| {
                    let html = format!(
                        r#"<div class="institution" id="{}"><h3>{}</h3><p>{}</p></div>"#,
                        slugify(&inst.name),
                        escape_html(&inst.name),
                        escape_html(&inst.description)
                    );
                    (inst.name.clone(), html)
                })
                .collect();
            sections.push(AboutSection::with_entries(&about.studies.title, entries));
        }

        if about.technical.display {
            let entries = about
                .technical
                .skills
                .iter()
                .map(|skill| {
                    let tags: String = skill
                        .tags
                        .iter()
                        .map(|tag| {
                            let icon = tag
                                .icon
                                .as_deref()
                                .map(|i| format!(r#" data-icon="{}""#, escape_html(i)))
                                .unwrap_or_default();
                            format!(r#"<li class="tag"{icon}>{}</li>"#, escape_html(&tag.name))
                        })
                        .collect();
                    let tags = if tags.is_empty() {
                        String::new()
                    } else {
                        format!(r#"<ul class="tags">{tags}</ul>"#)
                    };
                    let html = format!(
                        r#"<div class="skill" id="{}"><h3>{}</h3><p>{}</p>{tags}{}</div>"#,
                        slugify(&skill.title),
                        escape_html(&skill.title),
                        escape_html(&skill.description),
                        image_row_html(&skill.images),
                    );
                    (skill.title.clone(), html)
                })
                .collect();
            sections.push(AboutSection::with_entries(&about.technical.title, entries));
        }

        sections
    }
}

/// A rendered about page section, with the entries it lists in the TOC.
struct AboutSection {
    id: String,
    title: String,
    entries: Vec<String>,
    html: String,
}

impl AboutSection {
    fn new(title: &str, entries: Vec<String>, inner: String) -> Self {
        let id = slugify(title);
        let html = format!(
            r#"<section class="section" id="{}"><h2>{}</h2>{inner}</section>"#,
            escape_html(&id),
            escape_html(title)
        );
        Self {
            id,
            title: title.to_string(),
            entries,
            html,
        }
    }

    fn with_entries(title: &str, entries: Vec<(String, String)>) -> Self {
        let (names, bodies): (Vec<String>, Vec<String>) = entries.into_iter().unzip();
        Self::new(title, names, bodies.concat())
    }
}

fn about_toc_html(sections: &[AboutSection], sub_items: bool) -> String {
    let items: String = sections
        .iter()
        .map(|section| {
            let children = if sub_items && !section.entries.is_empty() {
                let links: String = section
                    .entries
                    .iter()
                    .map(|entry| {
                        format!(
                            r##"<li><a href="#{}">{}</a></li>"##,
                            escape_html(&slugify(entry)),
                            escape_html(entry)
                        )
                    })
                    .collect();
                format!("<ul>{links}</ul>")
            } else {
                String::new()
            };
            format!(
                r##"<li><a href="#{}">{}</a>{children}</li>"##,
                escape_html(&section.id),
                escape_html(&section.title)
            )
        })
        .collect();

    format!(r#"<nav class="about-toc" aria-label="Table of contents"><ul>{items}</ul></nav>"#)
}

fn image_row_html(images: &[ImageRef]) -> String {
    if images.is_empty() {
        return String::new();
    }

    let imgs: String = images
        .iter()
        .map(|img| {
            let size = match (img.width, img.height) {
                (Some(w), Some(h)) => format!(r#" width="{w}" height="{h}""#),
                _ => String::new(),
            };
            format!(
                r#"<img src="{}" alt="{}"{size} loading="lazy">"#,
                escape_html(&img.src),
                escape_html(&img.alt)
            )
        })
        .collect();
    format!(r#"<div class="image-row">{imgs}</div>"#)
}

/// Strip indentation and blank lines outside `<pre>` blocks.
pub fn collapse_indentation(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_pre = false;

    for line in html.lines() {
        let opens = line.matches("<pre").count();
        let closes = line.matches("</pre>").count();

        if in_pre {
            out.push_str(line);
            out.push('\n');
        } else {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                out.push_str(trimmed);
                out.push('\n');
            }
        }

        if opens > closes {
            in_pre = true;
        } else if closes > opens {
            in_pre = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio_core::{ProjectMetadata, Slug};

    use super::*;

    const CONFIG: &str = r#"
[site]
base_url = "https://example.com"

[person]
first_name = "Ada"
name = "Ada Lovelace"
role = "Drupal Developer"
avatar = "/images/avatar.jpg"
location = "Europe/London"
languages = ["English"]

[home]
image = "/images/og.png"
headline = "Building <sites>"

[[social]]
name = "GitLab"
icon = "gitlab"
link = "https://gitlab.com/ada"

[about.table_of_content]
sub_items = true

[about.intro]
description = "I build **Drupal** sites."

[[about.work.experiences]]
company = "Analytical Engines"
timeframe = "2022 - 2023"
role = "Developer"
achievements = ["Shipped things"]

[[about.studies.institutions]]
name = "University"
description = "Studied maths"

[[about.technical.skills]]
title = "Drupal"
description = "Site building"
tags = [{ name = "PHP", icon = "php" }, { name = "Twig" }]
"#;

    fn config() -> Config {
        Config::from_toml_str(CONFIG).expect("config")
    }

    fn post(slug: &str, date: &str) -> Post {
        Post {
            slug: Slug::new(slug),
            metadata: ProjectMetadata {
                title: format!("Project {slug}"),
                published_at: Some(date.to_string()),
                summary: format!("Summary of {slug}"),
                images: vec![format!("/images/{slug}.png")],
                ..Default::default()
            },
            content: String::new(),
            html: "<p>Body</p>".to_string(),
            toc: Vec::new(),
            source_path: PathBuf::new(),
        }
    }

    fn content() -> SiteContent {
        SiteContent::new(vec![
            post("alpha", "2024-03-01"),
            post("beta", "2023-01-01"),
            post("gamma", "2022-01-01"),
            post("alpha/detail", "2024-04-01"),
        ])
    }

    #[test]
    fn test_generate_home() {
        let generator = HtmlGenerator::new(config());
        let html = generator.generate_home(&content()).expect("home");

        assert!(html.contains("<title>Ada Lovelace&#x27;s Portfolio</title>"));
        assert!(html.contains("Building &lt;sites&gt;"));
        assert!(html.contains(">About Ada</a>"));
        assert!(html.contains(r#"content="https://example.com/images/og.png""#));

        let featured = html.find("project-card--featured").expect("featured");
        let alpha = html.find("Project alpha").expect("alpha");
        let beta = html.find("Project beta").expect("beta");
        assert!(featured < alpha && alpha < beta);
        assert!(!html.contains("Project alpha/detail"));
        assert!(html.contains(r#"<a href="/" class="active" aria-current="page">Home</a>"#));
    }

    #[test]
    fn test_generate_about() {
        let generator = HtmlGenerator::new(config());
        let html = generator.generate_about().expect("about");

        assert!(html.contains("<title>About – Ada Lovelace</title>"));
        assert!(html.contains(r#"<section class="section" id="introduction">"#));
        assert!(html.contains("<strong>Drupal</strong>"));
        assert!(html.contains("Analytical Engines"));
        assert!(html.contains("Shipped things"));
        assert!(html.contains("Studied maths"));
        assert!(html.contains(r#"<li class="tag" data-icon="php">PHP</li>"#));
        assert!(html.contains(r##"<a href="#work-experience">Work Experience</a>"##));
        assert!(html.contains(r##"<a href="#analytical-engines">Analytical Engines</a>"##));
        assert!(html.contains("Europe/London"));
        assert!(!html.contains("Schedule a call"));
    }

    #[test]
    fn test_about_hidden_sections() {
        let mut config = config();
        config.about.studies.display = false;
        config.about.table_of_content.display = false;
        config.about.avatar.display = false;

        let html = HtmlGenerator::new(config).generate_about().expect("about");
        assert!(!html.contains("Studied maths"));
        assert!(!html.contains(r#"<nav class="about-toc""#));
        assert!(!html.contains(r#"<aside class="about-avatar">"#));
    }

    #[test]
    fn test_generate_work_index() {
        let generator = HtmlGenerator::new(config());
        let html = generator.generate_work_index(&content()).expect("work");

        assert!(html.contains("<title>Projects – Ada Lovelace</title>"));
        assert!(html.contains("Project gamma"));
        assert!(!html.contains("Project alpha/detail"));
        assert!(html.contains(r#"<a href="/work" class="active" aria-current="page">Work</a>"#));
    }

    #[test]
    fn test_generate_project() {
        let generator = HtmlGenerator::new(config());
        let content = content();
        let alpha = content.get("alpha").expect("alpha");
        let html = generator.generate_project(alpha, &content).expect("project");

        assert!(html.contains(r#"<h1 class="display-m">Project alpha</h1>"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/work/alpha">"#));
        assert!(html.contains(r#"<img class="project-cover" src="/images/alpha.png""#));
        assert!(html.contains("March 1, 2024"));
        assert!(html.contains("More in Project alpha"));
        assert!(html.contains("Project alpha/detail"));
        assert!(html.contains("Related projects"));
        assert!(html.contains("Project gamma"));
        assert!(!html.contains(r#"<h3><a href="/work/alpha">"#));
        assert!(html.contains(r#"content="https://example.com/images/og.png""#));
    }

    #[test]
    fn test_generate_nested_project() {
        let generator = HtmlGenerator::new(config());
        let content = content();
        let detail = content.get("alpha/detail").expect("detail");
        let html = generator.generate_project(detail, &content).expect("project");

        assert!(html.contains(r#"<h1 class="display-s">"#));
        assert!(html.contains(r#"<a href="/work/alpha">Alpha</a>"#));
        assert!(!html.contains("More in"));
    }

    #[test]
    fn test_generate_not_found() {
        let html = HtmlGenerator::new(config()).generate_not_found().expect("404");
        assert!(html.contains("404"));
        assert!(html.contains(r#"<a href="/">Back home</a>"#));
    }

    #[test]
    fn test_live_reload_script() {
        let mut generator = HtmlGenerator::new(config());
        generator.set_live_reload_script("<script>reload()</script>");
        let html = generator.generate_not_found().expect("404");
        assert!(html.contains("<script>reload()</script>"));
    }

    #[test]
    fn test_output_path() {
        let out = Path::new("/out");
        assert_eq!(HtmlGenerator::output_path("/", out), PathBuf::from("/out/index.html"));
        assert_eq!(
            HtmlGenerator::output_path("/work/design/colors", out),
            PathBuf::from("/out/work/design/colors/index.html")
        );
        assert_eq!(
            HtmlGenerator::output_path("/404.html", out),
            PathBuf::from("/out/404.html")
        );
    }

    #[test]
    fn test_collapse_indentation_keeps_pre() {
        let html = "<div>\n    <p>Hi</p>\n\n<pre>\n  keep\n    this\n</pre>\n    <span>x</span>\n</div>";
        assert_eq!(
            collapse_indentation(html),
            "<div>\n<p>Hi</p>\n<pre>\n  keep\n    this\n</pre>\n<span>x</span>\n</div>\n"
        );
    }

    #[test]
    fn test_minify_setting() {
        let mut config = config();
        config.build.minify = true;
        let html = HtmlGenerator::new(config).generate_not_found().expect("404");
        assert!(!html.contains("\n    "));
    }
}
