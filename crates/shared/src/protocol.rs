use serde::{Deserialize, Serialize};

use crate::domain::{ContactTopic, ContentItem, ContentKind, Language, SubmissionId};

/// One content collection as a view presents it: the tag universe of the
/// whole collection plus the items that pass the active filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentListing {
    pub kind: ContentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub all_tags: Vec<String>,
    pub items: Vec<ContentItem>,
    /// Query string reproducing the active filter, without a leading `?`.
    pub share_query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub topic: ContactTopic,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podcast_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentorship_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_devices: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub submission_id: SubmissionId,
    pub message: String,
}
