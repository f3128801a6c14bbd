use std::collections::BTreeSet;

use shared::{
    domain::{ContentItem, ContentKind},
    protocol::ContentListing,
};
use tracing::{debug, error};

use crate::{
    filter::{aggregate_tags, filter_items, FilterState, LanguageFilter},
    source::ContentSource,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Ready {
        base: Vec<ContentItem>,
        all_tags: BTreeSet<String>,
    },
}

/// One mounted content view: its base collection and its own filter
/// controls. Nothing here is shared between views.
#[derive(Debug, Clone)]
pub struct ContentView {
    kind: ContentKind,
    filter: FilterState,
    state: ViewState,
}

impl ContentView {
    pub fn new(kind: ContentKind) -> Self {
        Self::seeded(kind, FilterState::default())
    }

    /// Filter state can only be seeded here, before the first load.
    pub fn seeded(kind: ContentKind, filter: FilterState) -> Self {
        Self {
            kind,
            filter,
            state: ViewState::Loading,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn all_tags(&self) -> Option<&BTreeSet<String>> {
        match &self.state {
            ViewState::Ready { all_tags, .. } => Some(all_tags),
            _ => None,
        }
    }

    /// Fetches the base collection once. A failure leaves the view with a
    /// message and no items; there is no retry.
    pub async fn load<S>(&mut self, source: &S)
    where
        S: ContentSource + ?Sized,
    {
        self.state = ViewState::Loading;
        match source.fetch_all(self.kind).await {
            Ok(items) => self.replace_base(items),
            Err(err) => {
                error!(kind = %self.kind, error = %err, "failed to fetch content");
                self.state =
                    ViewState::Failed(format!("Failed to fetch {}", self.kind.collection_label()));
            }
        }
    }

    /// Swaps in a new base collection wholesale and recomputes the tag
    /// universe from it.
    pub fn replace_base(&mut self, base: Vec<ContentItem>) {
        let all_tags = aggregate_tags(&base);
        debug!(kind = %self.kind, items = base.len(), tags = all_tags.len(), "content loaded");
        self.state = ViewState::Ready { base, all_tags };
    }

    pub fn set_language(&mut self, language: impl Into<LanguageFilter>) {
        self.filter.set_language(language);
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.filter.set_tag(tag);
    }

    /// The filtered view. Empty while loading or after a failed load.
    pub fn visible(&self) -> Vec<ContentItem> {
        match &self.state {
            ViewState::Ready { base, .. } => filter_items(base, &self.filter),
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> ContentListing {
        ContentListing {
            kind: self.kind,
            language: self.filter.language().language(),
            tag: self.filter.tag().map(str::to_string),
            all_tags: self
                .all_tags()
                .map(|tags| tags.iter().cloned().collect())
                .unwrap_or_default(),
            items: self.visible(),
            share_query: self.filter.share_query(),
        }
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
