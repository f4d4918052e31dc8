//! Folio Core Library
//!
//! Configuration, content records, front matter and the action list model
//! shared by the Folio generator, parser and UI crates.

pub mod action;
pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;

pub use action::{
    ActionDialog, ActionLink, ActionListItem, DialogBody, DialogId, DialogState, ItemHeading,
    LinkKind, SwiperItem,
};
pub use config::Config;
pub use content::{ContentType, ParsedContent, Post, Slug, TocEntry, format_date, format_name};
pub use error::{CoreError, Result};
pub use frontmatter::ProjectMetadata;
