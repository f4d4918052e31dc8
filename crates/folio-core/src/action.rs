//! Nested action lists.
//!
//! An action list is a list of labelled entries, each with optional links,
//! dialog triggers and a nested child list. This module holds the data model
//! and the view state shared by the static HTML renderer and the Leptos
//! component.
//!
//! In front matter an action list looks like:
//!
//! ```yaml
//! actions:
//!   - label: "Custom modules"
//!     text: "Built and extended custom modules."
//!     links:
//!       - href: "/work/shop"
//!         label: "Read the case study"
//!     dialogs:
//!       - label: "Screenshots"
//!         modal_carousel: true
//!         modal_carousel_items:
//!           - slide: "/images/shop/cart.png"
//!             alt: "Cart"
//!       - title: "Notes"
//!         content: "Some **markdown**"
//!     items:
//!       - label: "Nested entry"
//! ```

use serde::{Deserialize, Serialize};

/// Default label of a dialog trigger button.
pub const DEFAULT_DIALOG_LABEL: &str = "View details";

/// Default title of a dialog.
pub const DEFAULT_DIALOG_TITLE: &str = "Details";

/// A link shown in an item's action row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionLink {
    pub href: String,
    #[serde(default)]
    pub label: String,
}

/// How a link target is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Site-relative path, e.g. `/work/shop`.
    Internal,
    /// In-page anchor, e.g. `#contact`.
    Hash,
    /// Anything else; opened in a new tab.
    External,
}

impl LinkKind {
    /// Classify an `href`.
    pub fn classify(href: &str) -> Self {
        if href.starts_with('/') {
            Self::Internal
        } else if href.starts_with('#') {
            Self::Hash
        } else {
            Self::External
        }
    }
}

impl ActionLink {
    pub fn kind(&self) -> LinkKind {
        LinkKind::classify(&self.href)
    }

    /// Visible label; external links without one read "View code".
    pub fn display_label(&self) -> &str {
        match (self.label.is_empty(), self.kind()) {
            (true, LinkKind::External) => "View code",
            (true, _) => &self.href,
            (false, _) => &self.label,
        }
    }
}

/// A carousel slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwiperItem {
    /// Image URL.
    pub slide: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// What a dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogBody {
    /// An image carousel.
    Carousel { items: Vec<SwiperItem> },
    /// Markdown content.
    Content { content: String },
}

/// A modal dialog attached to an action list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDialog", into = "RawDialog")]
pub struct ActionDialog {
    /// Trigger button label.
    pub label: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: DialogBody,
}

/// Wire shape of [`ActionDialog`]: a carousel flag plus either slides or content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawDialog {
    #[serde(default, alias = "modalCarousel")]
    modal_carousel: bool,
    #[serde(
        default,
        alias = "modalCarouselItems",
        skip_serializing_if = "Vec::is_empty"
    )]
    modal_carousel_items: Vec<SwiperItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TryFrom<RawDialog> for ActionDialog {
    type Error = String;

    fn try_from(raw: RawDialog) -> Result<Self, Self::Error> {
        let body = if raw.modal_carousel {
            DialogBody::Carousel {
                items: raw.modal_carousel_items,
            }
        } else {
            let content = raw
                .content
                .ok_or_else(|| "dialog needs `content` unless `modal_carousel` is true".to_string())?;
            DialogBody::Content { content }
        };

        Ok(Self {
            label: raw.label,
            title: raw.title,
            description: raw.description,
            body,
        })
    }
}

impl From<ActionDialog> for RawDialog {
    fn from(dialog: ActionDialog) -> Self {
        let mut raw = RawDialog {
            label: dialog.label,
            title: dialog.title,
            description: dialog.description,
            ..Default::default()
        };
        match dialog.body {
            DialogBody::Carousel { items } => {
                raw.modal_carousel = true;
                raw.modal_carousel_items = items;
            }
            DialogBody::Content { content } => raw.content = Some(content),
        }
        raw
    }
}

impl ActionDialog {
    pub fn button_label(&self) -> &str {
        non_empty(self.label.as_deref()).unwrap_or(DEFAULT_DIALOG_LABEL)
    }

    pub fn dialog_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(DEFAULT_DIALOG_TITLE)
    }

    pub fn is_carousel(&self) -> bool {
        matches!(self.body, DialogBody::Carousel { .. })
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// One entry of an action list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionListItem {
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub links: Vec<ActionLink>,

    #[serde(default, alias = "modalDescription")]
    pub modal_description: Option<String>,

    #[serde(default)]
    pub dialogs: Vec<ActionDialog>,

    /// Nested child list.
    #[serde(default)]
    pub items: Vec<ActionListItem>,
}

/// Which parts of an item's heading are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemHeading<'a> {
    LabelAndText { label: &'a str, text: &'a str },
    LabelOnly(&'a str),
    TextOnly(&'a str),
    Empty,
}

impl ActionListItem {
    pub fn heading(&self) -> ItemHeading<'_> {
        match (self.label.is_empty(), self.text.is_empty()) {
            (false, false) => ItemHeading::LabelAndText {
                label: &self.label,
                text: &self.text,
            },
            (false, true) => ItemHeading::LabelOnly(&self.label),
            (true, false) => ItemHeading::TextOnly(&self.text),
            (true, true) => ItemHeading::Empty,
        }
    }

    /// The action row is shown only when there is something to click.
    pub fn has_actions(&self) -> bool {
        !self.links.is_empty() || !self.dialogs.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.items.is_empty()
    }

    /// Total number of items in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.items.iter().map(Self::subtree_len).sum::<usize>()
    }
}

/// Identifies one dialog within one list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId {
    pub item_index: usize,
    pub dialog_index: usize,
}

impl DialogId {
    pub fn new(item_index: usize, dialog_index: usize) -> Self {
        Self {
            item_index,
            dialog_index,
        }
    }
}

/// Open/closed state of the dialogs of one list level.
///
/// At most one dialog is open; opening another replaces it. Each nested list
/// keeps its own state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogState {
    open: Option<DialogId>,
}

impl DialogState {
    pub fn open(&mut self, id: DialogId) {
        self.open = Some(id);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self, id: DialogId) -> bool {
        self.open == Some(id)
    }

    pub fn current(&self) -> Option<DialogId> {
        self.open
    }

    /// Resolve the open dialog against the items it indexes into.
    pub fn current_dialog<'a>(&self, items: &'a [ActionListItem]) -> Option<&'a ActionDialog> {
        let id = self.open?;
        items.get(id.item_index)?.dialogs.get(id.dialog_index)
    }
}

/// DOM id of a dialog in statically rendered markup.
pub fn dialog_dom_id(list_id: &str, id: DialogId) -> String {
    format!("{list_id}-dialog-{}-{}", id.item_index, id.dialog_index)
}
