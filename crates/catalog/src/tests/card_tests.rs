use super::*;
use chrono::{Datelike, Timelike};

fn talk_record() -> ContentRecord {
    ContentRecord {
        kind: ContentKind::Talk,
        name: "Scaling teams".to_string(),
        override_title: None,
        og_title: None,
        short_desc: Some("short".to_string()),
        override_description: None,
        og_description: None,
        og_image_url: Some(String::new()),
        url: Some("https://video.example/watch".to_string()),
        slides_url: None,
        venue: Some("DevConf".to_string()),
        lang: Language::Hebrew,
        description_lang: None,
        date: parse_content_date("2023-05-15").expect("date"),
        tags: None,
    }
}

#[test]
fn title_falls_back_from_override_to_og_to_name() {
    let mut record = talk_record();
    assert_eq!(record.display_title(), "Scaling teams");

    record.og_title = Some("OG title".to_string());
    assert_eq!(record.display_title(), "OG title");

    record.override_title = Some(String::new());
    assert_eq!(record.display_title(), "OG title");

    record.override_title = Some("Override".to_string());
    assert_eq!(record.display_title(), "Override");
}

#[test]
fn description_prefers_override_then_og_then_short() {
    let mut record = talk_record();
    assert_eq!(record.display_description(), "short");
    record.og_description = Some("og".to_string());
    assert_eq!(record.display_description(), "og");
    record.short_desc = None;
    record.og_description = None;
    assert_eq!(record.display_description(), "");
}

#[test]
fn talk_links_include_slides_only_when_present() {
    let mut record = talk_record();
    let labels: Vec<_> = record.links().into_iter().map(|link| link.label).collect();
    assert_eq!(labels, vec!["Watch".to_string()]);

    record.slides_url = Some("https://slides.example/deck".to_string());
    let labels: Vec<_> = record.links().into_iter().map(|link| link.label).collect();
    assert_eq!(labels, vec!["Watch".to_string(), "Slides".to_string()]);
}

#[test]
fn into_item_defaults_missing_tags_and_description_language() {
    let item = talk_record().into_item(ContentId(7));
    assert_eq!(item.id, ContentId(7));
    assert!(item.tags.is_empty());
    assert_eq!(item.description_lang, Language::Hebrew);
    assert_eq!(item.venue.as_deref(), Some("DevConf"));
    assert_eq!(item.image_url, None);
}

#[test]
fn parses_bare_dates_and_timestamps() {
    let date = parse_content_date("2023-08-10").expect("bare date");
    assert_eq!((date.year(), date.month(), date.day()), (2023, 8, 10));
    assert_eq!(date.hour(), 0);

    let stamp = parse_content_date("2023-08-10T12:30:00+02:00").expect("timestamp");
    assert_eq!(stamp.hour(), 10);

    assert!(parse_content_date("yesterday").is_none());
}

#[test]
fn record_deserializes_from_import_json() {
    let record: ContentRecord = serde_json::from_value(serde_json::json!({
        "kind": "podcast",
        "name": "Episode 12",
        "url": "https://audio.example/12.mp3",
        "venue": "Tech Talk Podcast",
        "lang": "English",
        "date": "2023-06-22",
        "tags": ["ai"]
    }))
    .expect("record");
    assert_eq!(record.kind, ContentKind::Podcast);
    assert_eq!(record.links()[0].label, "Listen");
    assert_eq!(record.tags, Some(vec!["ai".to_string()]));
}
