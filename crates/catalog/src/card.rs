use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use shared::domain::{ContentId, ContentItem, ContentKind, ContentLink, Language};

/// A content row as it is stored and imported, before the presentation
/// fields are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub kind: ContentKind,
    pub name: String,
    #[serde(default)]
    pub override_title: Option<String>,
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub override_description: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub og_image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub slides_url: Option<String>,
    /// Conference for talks, show for podcasts.
    #[serde(default)]
    pub venue: Option<String>,
    pub lang: Language,
    #[serde(default)]
    pub description_lang: Option<Language>,
    #[serde(deserialize_with = "deserialize_content_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ContentRecord {
    pub fn display_title(&self) -> &str {
        first_filled([&self.override_title, &self.og_title]).unwrap_or(self.name.as_str())
    }

    pub fn display_description(&self) -> &str {
        first_filled([
            &self.override_description,
            &self.og_description,
            &self.short_desc,
        ])
        .unwrap_or_default()
    }

    pub fn links(&self) -> Vec<ContentLink> {
        let primary_label = match self.kind {
            ContentKind::Talk => "Watch",
            ContentKind::Podcast => "Listen",
            ContentKind::Blog => "Read More",
        };
        [(primary_label, &self.url), ("Slides", &self.slides_url)]
            .into_iter()
            .filter_map(|(label, url)| {
                let url = url.as_deref().filter(|url| !url.is_empty())?;
                Some(ContentLink {
                    label: label.to_string(),
                    url: url.to_string(),
                })
            })
            .collect()
    }

    pub fn into_item(self, id: ContentId) -> ContentItem {
        let title = self.display_title().to_string();
        let description = self.display_description().to_string();
        let links = self.links();
        ContentItem {
            id,
            kind: self.kind,
            date: self.date,
            lang: self.lang,
            tags: self.tags.unwrap_or_default(),
            title,
            description,
            description_lang: self.description_lang.unwrap_or(self.lang),
            venue: self.venue.filter(|venue| !venue.is_empty()),
            image_url: self.og_image_url.filter(|url| !url.is_empty()),
            links,
        }
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_content_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_content_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_content_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid content date '{raw}'")))
}

fn first_filled<const N: usize>(candidates: [&Option<String>; N]) -> Option<&str> {
    candidates
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod tests;
