use chrono::{DateTime, Utc};

use crate::types::{CanonicalArticle, RawArticle};

pub const NO_TITLE: &str = "No title available";
pub const NO_URL: &str = "#";
pub const NO_SUMMARY: &str = "No summary available";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

const SUMMARY_MAX_CHARS: usize = 200;

/// Maps a raw source record into the canonical article shape. Total: any
/// input produces a valid article, placeholder-filled where the source is
/// silent. The scrape id is stamped by the caller, never here.
pub fn normalize(raw: &RawArticle, scrape_id: &str) -> CanonicalArticle {
    let summary = match (&raw.description, &raw.content) {
        (Some(description), _) if !description.is_empty() => description.clone(),
        (_, Some(content)) if !content.is_empty() => {
            content.chars().take(SUMMARY_MAX_CHARS).collect()
        }
        _ => NO_SUMMARY.to_string(),
    };

    let published_at = raw
        .published_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    CanonicalArticle {
        title: raw
            .title
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string()),
        url: raw
            .url
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_URL.to_string()),
        summary,
        image_url: raw.image_url.clone(),
        source: raw
            .source
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
        published_at,
        scrape_id: scrape_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn title_only_record_gets_placeholders() {
        let raw = RawArticle {
            title: Some("Just a title".to_string()),
            ..Default::default()
        };

        let article = normalize(&raw, "scrape-1");

        assert_eq!(article.title, "Just a title");
        assert_eq!(article.url, NO_URL);
        assert_eq!(article.summary, NO_SUMMARY);
        assert_eq!(article.source, UNKNOWN_SOURCE);
        assert_eq!(article.scrape_id, "scrape-1");
        assert!(Utc::now() - article.published_at < Duration::seconds(5));
    }

    #[test]
    fn empty_string_fields_get_placeholders() {
        // Sources sometimes send "" instead of omitting a field; an empty
        // title or url must never persist.
        let raw = RawArticle {
            title: Some(String::new()),
            url: Some(String::new()),
            source: Some(String::new()),
            published_at: Some(String::new()),
            ..Default::default()
        };

        let article = normalize(&raw, "scrape-1");

        assert_eq!(article.title, NO_TITLE);
        assert_eq!(article.url, NO_URL);
        assert_eq!(article.source, UNKNOWN_SOURCE);
        assert!(Utc::now() - article.published_at < Duration::seconds(5));
    }

    #[test]
    fn description_wins_over_content() {
        let raw = RawArticle {
            description: Some("short description".to_string()),
            content: Some("long content body".to_string()),
            ..Default::default()
        };

        assert_eq!(normalize(&raw, "s").summary, "short description");
    }

    #[test]
    fn content_is_truncated_to_200_chars() {
        let raw = RawArticle {
            content: Some("x".repeat(500)),
            ..Default::default()
        };

        assert_eq!(normalize(&raw, "s").summary.chars().count(), 200);
    }

    #[test]
    fn valid_timestamp_is_preserved() {
        let raw = RawArticle {
            published_at: Some("2024-03-01T12:00:00Z".to_string()),
            ..Default::default()
        };

        let article = normalize(&raw, "s");
        assert_eq!(article.published_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_now() {
        let raw = RawArticle {
            published_at: Some("yesterday-ish".to_string()),
            ..Default::default()
        };

        let article = normalize(&raw, "s");
        assert!(Utc::now() - article.published_at < Duration::seconds(5));
    }
}
