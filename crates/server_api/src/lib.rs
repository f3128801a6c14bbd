use catalog::{ContactSink, ContentSource, ContentView, FilterState};
use shared::{
    domain::{ContactTopic, ContentKind},
    error::{ApiError, ErrorCode},
    protocol::{ContactReceipt, ContactSubmission, ContentListing},
};
use storage::Storage;
use tracing::{error, info};

pub const SUBMISSION_FAILED: &str = "There was an error submitting your form. Please try again.";

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub async fn list_content(
    ctx: &ApiContext,
    kind: ContentKind,
    lang: Option<&str>,
    tag: Option<&str>,
) -> Result<ContentListing, ApiError> {
    list_content_from(&ctx.storage, kind, lang, tag).await
}

/// Mounts one view over `source`: parse the shared-link filter, fetch the
/// base collection once, and derive the listing.
pub async fn list_content_from<S>(
    source: &S,
    kind: ContentKind,
    lang: Option<&str>,
    tag: Option<&str>,
) -> Result<ContentListing, ApiError>
where
    S: ContentSource + ?Sized,
{
    let filter = FilterState::from_query(lang, tag);
    let mut view = ContentView::seeded(kind, filter);
    view.load(source).await;
    if let Some(message) = view.error() {
        return Err(ApiError::new(ErrorCode::Internal, message));
    }
    Ok(view.snapshot())
}

pub async fn submit_contact(
    ctx: &ApiContext,
    submission: ContactSubmission,
) -> Result<ContactReceipt, ApiError> {
    record_contact(&ctx.storage, submission).await
}

pub async fn record_contact<S>(
    sink: &S,
    submission: ContactSubmission,
) -> Result<ContactReceipt, ApiError>
where
    S: ContactSink + ?Sized,
{
    validate_submission(&submission)?;
    let submission_id = sink.insert_contact(&submission).await.map_err(|err| {
        error!(topic = %submission.topic, error = %err, "failed to store contact submission");
        ApiError::new(ErrorCode::Internal, SUBMISSION_FAILED)
    })?;
    info!(
        topic = %submission.topic,
        submission_id = submission_id.0,
        "contact submission stored"
    );
    Ok(ContactReceipt {
        submission_id,
        message: acknowledgement(submission.topic).to_string(),
    })
}

pub fn acknowledgement(topic: ContactTopic) -> &'static str {
    match topic {
        ContactTopic::Talk => "Thank you for your invitation! I will get back to you soon.",
        ContactTopic::Podcast => {
            "Thank you for your podcast invitation! I will get back to you soon."
        }
        ContactTopic::Investment => {
            "Thank you for your investment inquiry! I will review your proposal and get back to you soon."
        }
        ContactTopic::Mentorship => {
            "Thank you for your mentorship request! I will review your application and get back to you soon."
        }
        ContactTopic::Smarthome => {
            "Thank you for your smart home consulting request! I will get back to you soon with more information."
        }
        ContactTopic::Other => "Thank you for your message! I will get back to you soon.",
    }
}

/// Fields each topic's form requires beyond name and email.
pub fn required_fields(topic: ContactTopic) -> &'static [&'static str] {
    match topic {
        ContactTopic::Talk => &["event_name", "event_date", "message"],
        ContactTopic::Podcast => &["podcast_name", "message"],
        ContactTopic::Investment => &[
            "company_name",
            "company_website",
            "deck_url",
            "project_description",
            "round_size",
        ],
        ContactTopic::Mentorship => &["mentorship_area", "message"],
        ContactTopic::Smarthome => &["home_size", "number_of_devices", "message"],
        ContactTopic::Other => &["message"],
    }
}

pub fn validate_submission(submission: &ContactSubmission) -> Result<(), ApiError> {
    if is_blank(Some(&submission.name)) {
        return Err(missing("name"));
    }
    if is_blank(Some(&submission.email)) {
        return Err(missing("email"));
    }
    if !looks_like_email(submission.email.trim()) {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "email must be a valid address",
        ));
    }
    for field in required_fields(submission.topic) {
        if is_blank(field_value(submission, field)) {
            return Err(missing(field));
        }
    }
    Ok(())
}

fn field_value<'a>(submission: &'a ContactSubmission, field: &str) -> Option<&'a String> {
    match field {
        "message" => Some(&submission.message),
        "event_name" => submission.event_name.as_ref(),
        "event_date" => submission.event_date.as_ref(),
        "podcast_name" => submission.podcast_name.as_ref(),
        "company_name" => submission.company_name.as_ref(),
        "company_website" => submission.company_website.as_ref(),
        "deck_url" => submission.deck_url.as_ref(),
        "project_description" => submission.project_description.as_ref(),
        "round_size" => submission.round_size.as_ref(),
        "mentorship_area" => submission.mentorship_area.as_ref(),
        "home_size" => submission.home_size.as_ref(),
        "number_of_devices" => submission.number_of_devices.as_ref(),
        _ => None,
    }
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}

fn missing(field: &str) -> ApiError {
    ApiError::new(ErrorCode::Validation, format!("{field} is required"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
