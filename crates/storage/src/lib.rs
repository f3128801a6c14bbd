use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog::{parse_content_date, ContactSink, ContentRecord, ContentSource};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use shared::{
    domain::{ContactTopic, ContentId, ContentItem, ContentKind, Language, SubmissionId},
    protocol::ContactSubmission,
};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredContent {
    pub content_id: ContentId,
    pub record: ContentRecord,
}

impl StoredContent {
    pub fn into_item(self) -> ContentItem {
        self.record.into_item(self.content_id)
    }
}

#[derive(Debug, Clone)]
pub struct StoredSubmission {
    pub submission_id: SubmissionId,
    pub submission: ContactSubmission,
    pub created_at: DateTime<Utc>,
}

const CONTENT_COLUMNS: &str = "id, kind, name, override_title, og_title, short_desc, \
     override_description, og_description, og_image_url, url, slides_url, venue, lang, \
     description_lang, date, tags";

const CONTACT_COLUMNS: &str = "id, topic, name, email, message, event_name, event_date, \
     event_format, audience_size, podcast_name, company_name, company_website, deck_url, \
     project_description, round_size, mentorship_area, paid, home_size, number_of_devices, \
     event_topic, created_at";

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to an in-memory database is its own database.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(connect_options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn insert_content(&self, record: &ContentRecord) -> Result<ContentId> {
        let tags = record
            .tags
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("failed to encode tags")?;
        let rec = sqlx::query(
            "INSERT INTO content_items (
                kind, name, override_title, og_title, short_desc, override_description,
                og_description, og_image_url, url, slides_url, venue, lang, description_lang,
                date, tags
             )
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(record.kind.as_str())
        .bind(&record.name)
        .bind(&record.override_title)
        .bind(&record.og_title)
        .bind(&record.short_desc)
        .bind(&record.override_description)
        .bind(&record.og_description)
        .bind(&record.og_image_url)
        .bind(&record.url)
        .bind(&record.slides_url)
        .bind(&record.venue)
        .bind(record.lang.as_str())
        .bind(record.description_lang.map(Language::as_str))
        .bind(encode_date(record.date))
        .bind(tags)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert content item")?;
        Ok(ContentId(rec.get::<i64, _>(0)))
    }

    /// All rows of `kind`, newest first. Rows sharing a date keep a stable
    /// order by id.
    pub async fn list_content(&self, kind: ContentKind) -> Result<Vec<StoredContent>> {
        let rows = sqlx::query(&format!(
            "SELECT {CONTENT_COLUMNS}
             FROM content_items
             WHERE kind = ?
             ORDER BY date DESC, id DESC"
        ))
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to list {kind} content"))?;

        rows.iter().map(content_from_row).collect()
    }

    pub async fn delete_content(&self, content_id: ContentId) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM content_items WHERE id = ?")
            .bind(content_id.0)
            .execute(&self.pool)
            .await
            .context("failed to delete content item")?
            .rows_affected();
        Ok(affected > 0)
    }

    pub async fn insert_contact_submission(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SubmissionId> {
        let rec = sqlx::query(
            "INSERT INTO contact_me (
                topic, name, email, message, event_name, event_date, event_format,
                audience_size, podcast_name, company_name, company_website, deck_url,
                project_description, round_size, mentorship_area, paid, home_size,
                number_of_devices, event_topic, created_at
             )
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(submission.topic.as_str())
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.message)
        .bind(&submission.event_name)
        .bind(&submission.event_date)
        .bind(&submission.event_format)
        .bind(&submission.audience_size)
        .bind(&submission.podcast_name)
        .bind(&submission.company_name)
        .bind(&submission.company_website)
        .bind(&submission.deck_url)
        .bind(&submission.project_description)
        .bind(&submission.round_size)
        .bind(&submission.mentorship_area)
        .bind(submission.paid)
        .bind(&submission.home_size)
        .bind(&submission.number_of_devices)
        .bind(&submission.event_topic)
        .bind(encode_date(Utc::now()))
        .fetch_one(&self.pool)
        .await
        .context("failed to insert contact submission")?;
        Ok(SubmissionId(rec.get::<i64, _>(0)))
    }

    /// Most recent submissions first.
    pub async fn list_contact_submissions(&self, limit: u32) -> Result<Vec<StoredSubmission>> {
        let rows = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS}
             FROM contact_me
             ORDER BY id DESC
             LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("failed to list contact submissions")?;

        rows.iter().map(submission_from_row).collect()
    }
}

fn content_from_row(row: &SqliteRow) -> Result<StoredContent> {
    let content_id = ContentId(row.try_get::<i64, _>("id")?);
    let kind: String = row.try_get("kind")?;
    let lang: String = row.try_get("lang")?;
    let description_lang: Option<String> = row.try_get("description_lang")?;
    let date: String = row.try_get("date")?;
    let tags: Option<String> = row.try_get("tags")?;

    let tags = tags
        .map(|raw| serde_json::from_str::<Vec<String>>(&raw))
        .transpose()
        .with_context(|| format!("content item {} has malformed tags", content_id.0))?;

    let record = ContentRecord {
        kind: kind.parse()?,
        name: row.try_get("name")?,
        override_title: row.try_get("override_title")?,
        og_title: row.try_get("og_title")?,
        short_desc: row.try_get("short_desc")?,
        override_description: row.try_get("override_description")?,
        og_description: row.try_get("og_description")?,
        og_image_url: row.try_get("og_image_url")?,
        url: row.try_get("url")?,
        slides_url: row.try_get("slides_url")?,
        venue: row.try_get("venue")?,
        lang: lang.parse()?,
        description_lang: description_lang
            .as_deref()
            .map(Language::from_str)
            .transpose()?,
        date: parse_content_date(&date).with_context(|| {
            format!("content item {} has malformed date '{date}'", content_id.0)
        })?,
        tags,
    };
    Ok(StoredContent { content_id, record })
}

fn submission_from_row(row: &SqliteRow) -> Result<StoredSubmission> {
    let submission_id = SubmissionId(row.try_get::<i64, _>("id")?);
    let topic: String = row.try_get("topic")?;
    let created_at: String = row.try_get("created_at")?;

    let submission = ContactSubmission {
        topic: topic.parse::<ContactTopic>()?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        message: row.try_get("message")?,
        event_name: row.try_get("event_name")?,
        event_date: row.try_get("event_date")?,
        event_format: row.try_get("event_format")?,
        audience_size: row.try_get("audience_size")?,
        podcast_name: row.try_get("podcast_name")?,
        company_name: row.try_get("company_name")?,
        company_website: row.try_get("company_website")?,
        deck_url: row.try_get("deck_url")?,
        project_description: row.try_get("project_description")?,
        round_size: row.try_get("round_size")?,
        mentorship_area: row.try_get("mentorship_area")?,
        paid: row.try_get("paid")?,
        home_size: row.try_get("home_size")?,
        number_of_devices: row.try_get("number_of_devices")?,
        event_topic: row.try_get("event_topic")?,
    };
    Ok(StoredSubmission {
        submission_id,
        submission,
        created_at: parse_content_date(&created_at).with_context(|| {
            format!(
                "contact submission {} has malformed created_at",
                submission_id.0
            )
        })?,
    })
}

/// Fixed-width UTC timestamps so lexical order in SQL is chronological.
fn encode_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl ContentSource for Storage {
    async fn fetch_all(&self, kind: ContentKind) -> Result<Vec<ContentItem>> {
        let rows = self.list_content(kind).await?;
        debug!(%kind, rows = rows.len(), "fetched content rows");
        Ok(rows.into_iter().map(StoredContent::into_item).collect())
    }
}

#[async_trait]
impl ContactSink for Storage {
    async fn insert_contact(&self, submission: &ContactSubmission) -> Result<SubmissionId> {
        self.insert_contact_submission(submission).await
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.contains(":memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
