use catalog::{aggregate_tags, filter_items, FilterState, LanguageFilter};
use chrono::{Duration, TimeZone, Utc};
use shared::domain::{ContentId, ContentItem, ContentKind, Language};

fn entry<'a>(lang: Language, tags: &'a [&'a str]) -> (Language, &'a [&'a str]) {
    (lang, tags)
}

fn collection(entries: &[(Language, &[&str])]) -> Vec<ContentItem> {
    let newest = Utc
        .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .expect("date");
    entries.iter()
        .enumerate()
        .map(|(index, (lang, tags))| ContentItem {
            id: ContentId(index as i64 + 1),
            kind: ContentKind::Blog,
            date: newest - Duration::days(index as i64),
            lang: *lang,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            title: format!("post {index}"),
            description: String::new(),
            description_lang: *lang,
            venue: None,
            image_url: None,
            links: Vec::new(),
        })
        .collect()
}

fn collections() -> Vec<Vec<ContentItem>> {
    use Language::{English, Hebrew};
    vec![
        Vec::new(),
        collection(&[entry(English, &[])]),
        collection(&[
            entry(English, &["ai", "leadership"]),
            entry(Hebrew, &["ai"]),
            entry(English, &[]),
        ]),
        collection(&[
            entry(Hebrew, &["ai", "ai"]),
            entry(Hebrew, &["startups"]),
            entry(English, &["startups", "smart home"]),
            entry(English, &["leadership"]),
        ]),
    ]
}

fn filters() -> Vec<FilterState> {
    let languages = [
        LanguageFilter::All,
        LanguageFilter::Only(Language::English),
        LanguageFilter::Only(Language::Hebrew),
        LanguageFilter::Unmatched("english".to_string()),
    ];
    let tags = ["", "ai", "startups", "absent"];
    languages
        .into_iter()
        .flat_map(|language| tags.map(|tag| FilterState::new(language.clone(), tag)))
        .collect()
}

fn is_ordered_subsequence(sub: &[ContentItem], full: &[ContentItem]) -> bool {
    let mut remaining = full.iter();
    sub.iter()
        .all(|wanted| remaining.by_ref().any(|candidate| candidate == wanted))
}

#[test]
fn filtered_view_is_an_ordered_subsequence() {
    for items in collections() {
        for filter in filters() {
            let filtered = filter_items(&items, &filter);
            assert!(
                is_ordered_subsequence(&filtered, &items),
                "filter {filter:?} reordered or invented items"
            );
            assert!(filtered.windows(2).all(|pair| pair[0].date >= pair[1].date));
        }
    }
}

#[test]
fn filtering_is_idempotent_and_deterministic() {
    for items in collections() {
        for filter in filters() {
            let once = filter_items(&items, &filter);
            assert_eq!(filter_items(&once, &filter), once);
            assert_eq!(filter_items(&items, &filter), once);
        }
    }
}

#[test]
fn filtered_tags_stay_within_tag_universe() {
    for items in collections() {
        let universe = aggregate_tags(&items);
        for filter in filters() {
            let filtered = filter_items(&items, &filter);
            assert!(aggregate_tags(&filtered).is_subset(&universe));
        }
    }
}

#[test]
fn tag_universe_is_exactly_the_observed_tags() {
    for items in collections() {
        let universe = aggregate_tags(&items);
        let observed: Vec<&String> = items.iter().flat_map(|item| &item.tags).collect();
        assert!(observed.iter().all(|tag| universe.contains(*tag)));
        assert!(universe.iter().all(|tag| observed.contains(&tag)));
    }
}

#[test]
fn unconstrained_filter_returns_everything() {
    for items in collections() {
        assert_eq!(filter_items(&items, &FilterState::default()), items);
    }
}

#[test]
fn unknown_shared_language_selects_nothing() {
    let mut all = collections();
    all.push(Vec::new());
    for items in all {
        for tag in ["", "ai", "absent"] {
            let filter = FilterState::from_query(Some("French"), Some(tag));
            assert!(filter_items(&items, &filter).is_empty());
        }
    }
}
