use std::collections::BTreeSet;

use shared::domain::{ContentItem, Language};
use url::form_urlencoded;

/// Query value meaning "no language constraint".
pub const ALL_LANGUAGES: &str = "all";
pub const LANG_PARAM: &str = "lang";
pub const TAG_PARAM: &str = "tag";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LanguageFilter {
    #[default]
    All,
    Only(Language),
    /// A shared-link value naming no known language. It matches nothing.
    Unmatched(String),
}

impl LanguageFilter {
    /// `all` and the empty string lift the constraint. Any other value is
    /// compared exactly, so `english` or `French` select no items.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_LANGUAGES {
            return LanguageFilter::All;
        }
        match value.parse() {
            Ok(language) => LanguageFilter::Only(language),
            Err(_) => LanguageFilter::Unmatched(value.to_string()),
        }
    }

    pub fn language(&self) -> Option<Language> {
        match self {
            LanguageFilter::Only(language) => Some(*language),
            LanguageFilter::All | LanguageFilter::Unmatched(_) => None,
        }
    }

    /// The raw query value, `None` when unconstrained.
    pub fn as_query_value(&self) -> Option<&str> {
        match self {
            LanguageFilter::All => None,
            LanguageFilter::Only(language) => Some(language.as_str()),
            LanguageFilter::Unmatched(value) => Some(value),
        }
    }

    pub fn matches(&self, lang: Language) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(language) => *language == lang,
            LanguageFilter::Unmatched(_) => false,
        }
    }
}

impl From<Language> for LanguageFilter {
    fn from(value: Language) -> Self {
        LanguageFilter::Only(value)
    }
}

/// The two filter controls of one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    language: LanguageFilter,
    tag: Option<String>,
}

impl FilterState {
    pub fn new(language: impl Into<LanguageFilter>, tag: impl Into<String>) -> Self {
        let mut state = Self {
            language: language.into(),
            tag: None,
        };
        state.set_tag(tag);
        state
    }

    /// Seeds a filter from the `lang` / `tag` parameters of a shared link.
    pub fn from_query(lang: Option<&str>, tag: Option<&str>) -> Self {
        let language = lang.map(LanguageFilter::parse).unwrap_or_default();
        Self::new(language, tag.unwrap_or_default())
    }

    pub fn language(&self) -> &LanguageFilter {
        &self.language
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_language(&mut self, language: impl Into<LanguageFilter>) {
        self.language = language.into();
    }

    /// An empty tag clears the tag constraint.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        self.tag = (!tag.is_empty()).then_some(tag);
    }

    pub fn is_unconstrained(&self) -> bool {
        self.language == LanguageFilter::All && self.tag.is_none()
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        if !self.language.matches(item.lang) {
            return false;
        }
        match self.tag.as_deref() {
            Some(tag) => item.tags.iter().any(|candidate| candidate == tag),
            None => true,
        }
    }

    /// Query string that reproduces this filter; empty when nothing is set.
    pub fn share_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(language) = self.language.as_query_value() {
            serializer.append_pair(LANG_PARAM, language);
        }
        if let Some(tag) = self.tag.as_deref() {
            serializer.append_pair(TAG_PARAM, tag);
        }
        serializer.finish()
    }
}

/// Distinct tags across `items`.
pub fn aggregate_tags(items: &[ContentItem]) -> BTreeSet<String> {
    items
        .iter()
        .flat_map(|item| item.tags.iter().cloned())
        .collect()
}

/// Items passing both the language and the tag predicate, in their original
/// order.
pub fn filter_items(items: &[ContentItem], filter: &FilterState) -> Vec<ContentItem> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
