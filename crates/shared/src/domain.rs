use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UnknownVariant;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ContentId);
id_newtype!(SubmissionId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Talk,
    Podcast,
    Blog,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Talk => "talk",
            ContentKind::Podcast => "podcast",
            ContentKind::Blog => "blog",
        }
    }

    /// Plural noun used in user-facing messages.
    pub fn collection_label(self) -> &'static str {
        match self {
            ContentKind::Talk => "talks",
            ContentKind::Podcast => "podcasts",
            ContentKind::Blog => "blog posts",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "talk" | "talks" => Ok(ContentKind::Talk),
            "podcast" | "podcasts" => Ok(ContentKind::Podcast),
            "blog" | "blogs" => Ok(ContentKind::Blog),
            other => Err(UnknownVariant::new("content kind", other)),
        }
    }
}

/// Locales content is published in. Values compare exactly; there is no
/// case folding anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hebrew,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hebrew => "Hebrew",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "English" => Ok(Language::English),
            "Hebrew" => Ok(Language::Hebrew),
            other => Err(UnknownVariant::new("language", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub date: DateTime<Utc>,
    pub lang: Language,
    #[serde(default)]
    pub tags: Vec<String>,
    pub title: String,
    pub description: String,
    pub description_lang: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub links: Vec<ContentLink>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactTopic {
    Talk,
    Podcast,
    Investment,
    Mentorship,
    Smarthome,
    #[default]
    Other,
}

impl ContactTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactTopic::Talk => "talk",
            ContactTopic::Podcast => "podcast",
            ContactTopic::Investment => "investment",
            ContactTopic::Mentorship => "mentorship",
            ContactTopic::Smarthome => "smarthome",
            ContactTopic::Other => "other",
        }
    }
}

impl fmt::Display for ContactTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactTopic {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "talk" => Ok(ContactTopic::Talk),
            "podcast" => Ok(ContactTopic::Podcast),
            "investment" => Ok(ContactTopic::Investment),
            "mentorship" => Ok(ContactTopic::Mentorship),
            "smarthome" => Ok(ContactTopic::Smarthome),
            "other" => Ok(ContactTopic::Other),
            other => Err(UnknownVariant::new("contact topic", other)),
        }
    }
}
