//! RSS feed of published projects.

use std::io::Write;

use chrono::{NaiveTime, Utc};
use folio_core::{Config, Post};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;
use tracing::debug;

use crate::collector::SiteContent;

/// RSS generation errors.
#[derive(Debug, Error)]
pub enum RssError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RssError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct RssGenerator {
    config: Config,
}

impl RssGenerator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate the feed: dated projects, newest first, up to `rss.limit`.
    pub fn generate(&self, content: &SiteContent) -> String {
        let limit = self.config.rss.limit;
        let items: Vec<Item> = content
            .by_date()
            .into_iter()
            .take(limit)
            .map(|post| self.post_to_item(post))
            .collect();

        debug!(count = items.len(), limit, "generating RSS feed");

        let home = &self.config.home;
        let description = if home.description.is_empty() {
            self.config.site.description.clone().unwrap_or_default()
        } else {
            home.description.clone()
        };

        let channel = ChannelBuilder::default()
            .title(home.title.clone())
            .link(self.config.url_for(&home.path))
            .description(description)
            .language(Some(self.config.site.default_language.clone()))
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .items(items)
            .build();

        channel.to_string()
    }

    fn post_to_item(&self, post: &Post) -> Item {
        let url = self
            .config
            .url_for(&self.config.project_url(post.slug.as_str()));
        let guid = GuidBuilder::default().value(url.clone()).permalink(true).build();

        let mut builder = ItemBuilder::default();
        builder.title(Some(post.display_title()));
        builder.link(Some(url));
        builder.guid(Some(guid));

        if let Some(date) = post.published_date() {
            builder.pub_date(Some(date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()));
        }

        if !post.metadata.summary.is_empty() {
            builder.description(Some(post.metadata.summary.clone()));
        }

        if !self.config.person.email.is_empty() {
            builder.author(Some(format!(
                "{} ({})",
                self.config.person.email, self.config.person.name
            )));
        }

        if let Some(tag) = &post.metadata.tag {
            builder.categories(vec![rss::Category {
                name: tag.clone(),
                domain: None,
            }]);
        }

        builder.build()
    }

    /// Write RSS feed to a writer.
    pub fn write_to<W: Write>(&self, content: &SiteContent, writer: &mut W) -> Result<()> {
        writer.write_all(self.generate(content).as_bytes())?;
        Ok(())
    }
}
