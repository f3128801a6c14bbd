use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use catalog::ContentRecord;
use clap::{Parser, Subcommand};
use server_api::{list_content, ApiContext};
use shared::{
    domain::{ContentId, ContentKind},
    error::ApiException,
};
use storage::Storage;
use tracing::info;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://./data/portfolio.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load content rows from a JSON array file.
    Import { path: PathBuf },
    /// Print a filtered collection as JSON.
    List {
        kind: ContentKind,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Print the tag universe of a collection.
    Tags { kind: ContentKind },
    /// Delete one content item by id.
    Remove { content_id: i64 },
    /// Print stored contact form submissions, newest first.
    Submissions {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::Import { path } => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let records: Vec<ContentRecord> = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            for record in &records {
                let content_id = storage.insert_content(record).await?;
                info!(content_id = content_id.0, kind = %record.kind, name = %record.name, "imported");
            }
            println!("imported {} items", records.len());
        }
        Command::List { kind, lang, tag } => {
            let ctx = ApiContext { storage };
            let listing = list_content(&ctx, kind, lang.as_deref(), tag.as_deref())
                .await
                .map_err(ApiException::from)?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Tags { kind } => {
            let ctx = ApiContext { storage };
            let listing = list_content(&ctx, kind, None, None)
                .await
                .map_err(ApiException::from)?;
            for tag in listing.all_tags {
                println!("{tag}");
            }
        }
        Command::Remove { content_id } => {
            if storage.delete_content(ContentId(content_id)).await? {
                println!("removed content_id={content_id}");
            } else {
                println!("no content with id {content_id}");
            }
        }
        Command::Submissions { limit } => {
            for stored in storage.list_contact_submissions(limit).await? {
                println!(
                    "#{} {} [{}] {} <{}>",
                    stored.submission_id.0,
                    stored.created_at.format("%Y-%m-%d %H:%M"),
                    stored.submission.topic,
                    stored.submission.name,
                    stored.submission.email
                );
                println!("{}", serde_json::to_string(&stored.submission)?);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
