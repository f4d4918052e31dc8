//! Folio Generator Library
//!
//! Static generation engine for portfolio sites.
//!
//! # Modules
//!
//! - [`collector`] - Project discovery, parsing and listings
//! - [`template`] - HTML template system with variable interpolation
//! - [`components`] - Reusable HTML fragments: cards, breadcrumbs, action lists
//! - [`html`] - Page generation
//! - [`rss`] - RSS feed generation
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod components;
pub mod html;
pub mod robots;
pub mod rss;
pub mod sitemap;
pub mod template;

pub use assets::AssetCopier;
pub use build::{BuildError, BuildStats, Builder};
pub use collector::{CollectorError, ContentCollector, ProjectRange, SiteContent, select_projects};
pub use html::HtmlGenerator;
pub use robots::RobotsGenerator;
pub use rss::RssGenerator;
pub use sitemap::SitemapGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
