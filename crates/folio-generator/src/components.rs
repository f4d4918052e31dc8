//! Reusable HTML fragments: action lists, project cards, breadcrumbs and
//! link lists.

use folio_core::{
    Config, Post, SwiperItem,
    action::{
        ActionDialog, ActionLink, ActionListItem, DialogBody, DialogId, ItemHeading, LinkKind,
        dialog_dom_id,
    },
    config::SocialLink,
    content::{format_date, format_name},
};
use folio_parser::MarkdownParser;

use crate::template::escape_html;

const ARROW_RIGHT: &str = r#"<span class="icon" aria-hidden="true">&rarr;</span>"#;
const EXTERNAL: &str = r#"<span class="icon" aria-hidden="true">&#8599;</span>"#;

/// Render a nested action list.
///
/// `list_id` prefixes the DOM ids of this level's dialogs; nested levels
/// derive their own ids from it so dialogs never collide.
pub fn action_list_html(items: &[ActionListItem], list_id: &str, markdown: &MarkdownParser) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut html = format!(r#"<ul class="action-list" id="{}">"#, escape_html(list_id));

    for (index, item) in items.iter().enumerate() {
        html.push_str(r#"<li class="action-item">"#);
        html.push_str(&item_heading_html(item));

        if item.has_actions() {
            html.push_str(r#"<div class="action-row">"#);
            for link in &item.links {
                html.push_str(&action_link_html(link));
            }
            for (dialog_index, dialog) in item.dialogs.iter().enumerate() {
                let dom_id = dialog_dom_id(list_id, DialogId::new(index, dialog_index));
                html.push_str(&format!(
                    r#"<button type="button" class="button" data-dialog-open="{}" data-list="{}">{}</button>"#,
                    escape_html(&dom_id),
                    escape_html(list_id),
                    escape_html(dialog.button_label())
                ));
            }
            html.push_str("</div>");
        }

        if item.has_children() {
            html.push_str(&action_list_html(
                &item.items,
                &format!("{list_id}-{index}"),
                markdown,
            ));
        }

        html.push_str("</li>");
    }
    html.push_str("</ul>");

    for (index, item) in items.iter().enumerate() {
        for (dialog_index, dialog) in item.dialogs.iter().enumerate() {
            let dom_id = dialog_dom_id(list_id, DialogId::new(index, dialog_index));
            let description = dialog
                .description
                .as_deref()
                .or(item.modal_description.as_deref());
            html.push_str(&dialog_html(&dom_id, list_id, dialog, description, markdown));
        }
    }

    html
}

fn item_heading_html(item: &ActionListItem) -> String {
    let label = |l: &str| format!(r#"<span class="action-item-label">{}</span>"#, escape_html(l));
    let text = |t: &str| format!(r#"<p class="action-item-text">{}</p>"#, escape_html(t));

    match item.heading() {
        ItemHeading::LabelAndText { label: l, text: t } => {
            format!(r#"<div class="action-item-heading">{}{}</div>"#, label(l), text(t))
        }
        ItemHeading::LabelOnly(l) => format!(r#"<div class="action-item-heading">{}</div>"#, label(l)),
        ItemHeading::TextOnly(t) => format!(r#"<div class="action-item-heading">{}</div>"#, text(t)),
        ItemHeading::Empty => String::new(),
    }
}

/// One link of an action row, styled by where it points.
pub fn action_link_html(link: &ActionLink) -> String {
    let href = escape_html(&link.href);
    let label = escape_html(link.display_label());

    match link.kind() {
        LinkKind::Internal => {
            format!(r#"<a class="action-link" href="{href}">{label} {ARROW_RIGHT}</a>"#)
        }
        LinkKind::Hash => format!(r#"<a class="action-link" href="{href}">{label}</a>"#),
        LinkKind::External => format!(
            r#"<a class="action-link" href="{href}" target="_blank" rel="noopener noreferrer">{label} {EXTERNAL}</a>"#
        ),
    }
}

fn dialog_html(
    dom_id: &str,
    list_id: &str,
    dialog: &ActionDialog,
    description: Option<&str>,
    markdown: &MarkdownParser,
) -> String {
    let description = description
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="dialog-description">{}</p>"#, escape_html(d)))
        .unwrap_or_default();

    let body = match &dialog.body {
        DialogBody::Carousel { items } => carousel_html(items),
        DialogBody::Content { content } => {
            format!(r#"<div class="prose">{}</div>"#, markdown.parse_body(content).0)
        }
    };

    format!(
        r#"<dialog class="action-dialog" id="{id}" data-list="{list}" aria-labelledby="{id}-title"><header><div><h2 id="{id}-title">{title}</h2>{description}</div></header>{body}<button type="button" class="button" data-dialog-close>Close</button></dialog>"#,
        id = escape_html(dom_id),
        list = escape_html(list_id),
        title = escape_html(dialog.dialog_title()),
    )
}

fn carousel_html(items: &[SwiperItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let slides: String = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let active = if i == 0 { " active" } else { "" };
            format!(
                r#"<figure class="carousel-slide{active}"><img src="{}" alt="{}" loading="lazy"></figure>"#,
                escape_html(&item.slide),
                escape_html(item.alt.as_deref().unwrap_or_default())
            )
        })
        .collect();

    let controls = if items.len() > 1 {
        r#"<div class="carousel-controls"><button type="button" class="button" data-carousel-step="-1" aria-label="Previous slide">&larr;</button><button type="button" class="button" data-carousel-step="1" aria-label="Next slide">&rarr;</button></div>"#
    } else {
        ""
    };

    format!(r#"<div class="carousel">{slides}{controls}</div>"#)
}

/// A breadcrumb trail entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
}

/// Breadcrumbs of a project page: `Projects`, then the parent folder for
/// nested projects.
pub fn project_crumbs(config: &Config, post: &Post) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: "Projects".to_string(),
        href: config.work.path.clone(),
    }];

    if let Some(parent) = post.slug.parent() {
        crumbs.push(Crumb {
            label: format_name(parent),
            href: config.project_url(parent),
        });
    }

    crumbs
}

pub fn breadcrumbs_html(crumbs: &[Crumb]) -> String {
    let inner = crumbs
        .iter()
        .map(|c| {
            format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(&c.href),
                escape_html(&c.label)
            )
        })
        .collect::<Vec<_>>()
        .join(r#"<span class="separator">/</span>"#);

    format!(r#"<nav class="breadcrumbs" aria-label="Breadcrumb">{inner}</nav>"#)
}

/// Card for a project listing.
pub fn project_card_html(config: &Config, post: &Post, featured: bool) -> String {
    let url = escape_html(&config.project_url(post.slug.as_str()));
    let class = if featured {
        "project-card project-card--featured"
    } else {
        "project-card"
    };

    let cover = post
        .metadata
        .cover_image()
        .map(|src| {
            format!(
                r#"<a href="{url}"><img class="project-cover" src="{}" alt="{}" loading="lazy"></a>"#,
                escape_html(src),
                escape_html(&post.display_title())
            )
        })
        .unwrap_or_default();

    let date = post
        .published_date()
        .map(|d| {
            format!(
                r#"<time datetime="{}">{}</time>"#,
                d.format("%Y-%m-%d"),
                format_date(d)
            )
        })
        .unwrap_or_default();

    let summary = if post.metadata.summary.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", escape_html(&post.metadata.summary))
    };

    format!(
        r#"<article class="{class}">{cover}<h3><a href="{url}">{}</a></h3>{date}{summary}<a class="action-link" href="{url}">Read case study {ARROW_RIGHT}</a></article>"#,
        escape_html(&post.display_title())
    )
}

/// A grid of project cards; empty when there is nothing to list.
pub fn project_grid_html(config: &Config, posts: &[&Post], featured: bool) -> String {
    if posts.is_empty() {
        return String::new();
    }

    let cards: String = posts
        .iter()
        .map(|p| project_card_html(config, p, featured))
        .collect();
    format!(r#"<div class="project-grid">{cards}</div>"#)
}

pub fn social_links_html(links: &[SocialLink]) -> String {
    if links.is_empty() {
        return String::new();
    }

    let items: String = links
        .iter()
        .filter(|l| !l.link.is_empty())
        .map(|l| {
            let external = if l.link.starts_with("http") {
                r#" target="_blank" rel="noopener noreferrer""#
            } else {
                ""
            };
            format!(
                r#"<li><a href="{}" data-icon="{}"{external}>{}</a></li>"#,
                escape_html(&l.link),
                escape_html(&l.icon),
                escape_html(&l.name)
            )
        })
        .collect();

    format!(r#"<ul class="social-links">{items}</ul>"#)
}

#[cfg(test)]
mod tests {
    use folio_core::{ProjectMetadata, Slug};

    use super::*;

    fn config() -> Config {
        Config::from_toml_str(
            "[site]\nbase_url = \"https://example.com\"\n\n[person]\nname = \"Ada\"\n",
        )
        .expect("config")
    }

    fn post(slug: &str) -> Post {
        Post {
            slug: Slug::new(slug),
            metadata: ProjectMetadata {
                title: "Shop & Cart".to_string(),
                published_at: Some("2024-01-05".to_string()),
                summary: "A shop".to_string(),
                images: vec!["/images/shop.png".to_string()],
                ..Default::default()
            },
            content: String::new(),
            html: String::new(),
            toc: Vec::new(),
            source_path: Default::default(),
        }
    }

    fn link(href: &str, label: &str) -> ActionLink {
        ActionLink {
            href: href.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_action_links_by_kind() {
        let internal = action_link_html(&link("/work/shop", "Case study"));
        assert!(internal.contains(r#"href="/work/shop""#));
        assert!(internal.contains("&rarr;"));
        assert!(!internal.contains("_blank"));

        let hash = action_link_html(&link("#contact", "Contact"));
        assert_eq!(hash, r##"<a class="action-link" href="#contact">Contact</a>"##);

        let external = action_link_html(&link("https://gitlab.com/x", ""));
        assert!(external.contains(r#"target="_blank""#));
        assert!(external.contains("View code"));
    }

    #[test]
    fn test_action_list_structure() {
        let items = vec![
            ActionListItem {
                label: "Modules".to_string(),
                text: "Custom modules".to_string(),
                links: vec![link("/work/shop", "Shop")],
                dialogs: vec![
                    ActionDialog {
                        label: None,
                        title: None,
                        description: None,
                        body: DialogBody::Content {
                            content: "Some **bold**".to_string(),
                        },
                    },
                    ActionDialog {
                        label: Some("Gallery".to_string()),
                        title: Some("Screens".to_string()),
                        description: Some("All screens".to_string()),
                        body: DialogBody::Carousel {
                            items: vec![
                                SwiperItem {
                                    slide: "/a.png".to_string(),
                                    alt: Some("A".to_string()),
                                },
                                SwiperItem {
                                    slide: "/b.png".to_string(),
                                    alt: None,
                                },
                            ],
                        },
                    },
                ],
                items: vec![ActionListItem {
                    text: "Nested only text".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ActionListItem {
                label: "Plain".to_string(),
                ..Default::default()
            },
        ];

        let html = action_list_html(&items, "actions", &MarkdownParser::new());

        assert!(html.starts_with(r#"<ul class="action-list" id="actions">"#));
        assert_eq!(html.matches(r#"<div class="action-row">"#).count(), 1);
        assert!(html.contains(r#"data-dialog-open="actions-dialog-0-0""#));
        assert!(html.contains(">View details</button>"));
        assert!(html.contains(">Gallery</button>"));
        assert!(html.contains(r#"<ul class="action-list" id="actions-0">"#));
        assert!(html.contains(r#"<p class="action-item-text">Nested only text</p>"#));

        assert!(html.contains(r#"<dialog class="action-dialog" id="actions-dialog-0-0""#));
        assert!(html.contains(">Details</h2>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(">Screens</h2>"));
        assert!(html.contains("All screens"));
        assert_eq!(html.matches("carousel-slide").count(), 2);
        assert_eq!(html.matches("data-dialog-close").count(), 2);

        let list_end = html.rfind("</ul>").expect("list end");
        let first_dialog = html.find("<dialog").expect("dialog");
        assert!(first_dialog > list_end);
    }

    #[test]
    fn test_action_list_empty() {
        assert!(action_list_html(&[], "actions", &MarkdownParser::new()).is_empty());
    }

    #[test]
    fn test_modal_description_fallback() {
        let items = vec![ActionListItem {
            label: "Item".to_string(),
            modal_description: Some("From item".to_string()),
            dialogs: vec![ActionDialog {
                label: None,
                title: None,
                description: None,
                body: DialogBody::Content {
                    content: "x".to_string(),
                },
            }],
            ..Default::default()
        }];

        let html = action_list_html(&items, "a", &MarkdownParser::new());
        assert!(html.contains(r#"<p class="dialog-description">From item</p>"#));
    }

    #[test]
    fn test_project_crumbs() {
        let config = config();

        let top = project_crumbs(&config, &post("shop"));
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].href, "/work");

        let nested = project_crumbs(&config, &post("ui-kit/forms"));
        assert_eq!(nested[1].label, "Ui Kit");
        assert_eq!(nested[1].href, "/work/ui-kit");

        let html = breadcrumbs_html(&nested);
        assert!(html.contains(r#"<a href="/work">Projects</a><span class="separator">/</span><a href="/work/ui-kit">Ui Kit</a>"#));
    }

    #[test]
    fn test_project_card() {
        let html = project_card_html(&config(), &post("shop"), true);

        assert!(html.contains("project-card--featured"));
        assert!(html.contains(r#"href="/work/shop""#));
        assert!(html.contains("Shop &amp; Cart"));
        assert!(html.contains(r#"<time datetime="2024-01-05">January 5, 2024</time>"#));
        assert!(html.contains(r#"src="/images/shop.png""#));
        assert!(html.contains("<p>A shop</p>"));
    }

    #[test]
    fn test_social_links() {
        let links = vec![
            SocialLink {
                name: "GitLab".to_string(),
                icon: "gitlab".to_string(),
                link: "https://gitlab.com/ada".to_string(),
            },
            SocialLink {
                name: "X".to_string(),
                icon: "x".to_string(),
                link: String::new(),
            },
        ];

        let html = social_links_html(&links);
        assert_eq!(html.matches("<li>").count(), 1);
        assert!(html.contains(r#"target="_blank""#));
        assert!(social_links_html(&[]).is_empty());
    }
}
