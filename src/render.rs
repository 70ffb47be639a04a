// src/render.rs

//! RSS 2.0 feed rendering.
//!
//! Takes the ordered item sequence an extractor produced and serializes it
//! into a channel document. Malformed items never reach this stage; the
//! only failure mode left is writing the file, which storage owns.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::models::JudgmentItem;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
const FEED_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";
const FEED_GENERATOR: &str = "uksc-feeds";

/// Channel-level metadata for one feed.
#[derive(Debug, Clone)]
pub struct FeedSpec {
    /// Channel title
    pub title: String,

    /// Channel link (the source page the feed mirrors)
    pub link: String,

    /// Channel description
    pub description: String,
}

/// Render a feed document from extracted items.
///
/// Items are deduplicated by link (first occurrence in page order wins),
/// ordered by publication date descending with page order breaking ties,
/// and capped at `max_items`.
pub fn render_feed(
    spec: &FeedSpec,
    items: &[JudgmentItem],
    max_items: usize,
    build_time: DateTime<Utc>,
) -> String {
    let prepared = prepare_items(items, max_items);

    let rss_items: Vec<Item> = prepared.iter().map(|item| build_item(item)).collect();

    let channel = ChannelBuilder::default()
        .title(spec.title.clone())
        .link(spec.link.clone())
        .description(spec.description.clone())
        .last_build_date(Some(build_time.to_rfc2822()))
        .docs(Some(FEED_DOCS.to_string()))
        .generator(Some(FEED_GENERATOR.to_string()))
        .items(rss_items)
        .build();

    format!("{XML_DECLARATION}\n{channel}")
}

/// Dedup by link, sort most-recent-first, cap the item count.
fn prepare_items(items: &[JudgmentItem], max_items: usize) -> Vec<JudgmentItem> {
    let mut seen = HashSet::new();
    let mut deduped: Vec<JudgmentItem> = items
        .iter()
        .filter(|item| seen.insert(item.link.clone()))
        .cloned()
        .collect();

    // Stable sort keeps page order for equal dates.
    deduped.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    deduped.truncate(max_items);
    deduped
}

fn build_item(item: &JudgmentItem) -> Item {
    let guid = GuidBuilder::default()
        .value(item.guid())
        .permalink(false)
        .build();

    let categories = item
        .category
        .as_ref()
        .map(|name| vec![CategoryBuilder::default().name(name.clone()).build()])
        .unwrap_or_default();

    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(item.link.clone()))
        .pub_date(Some(item.published_at.to_rfc2822()))
        .guid(Some(guid))
        .description(item.summary.clone())
        .categories(categories)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn spec() -> FeedSpec {
        FeedSpec {
            title: "UK Supreme Court - Latest judgments".to_string(),
            link: "https://www.supremecourt.uk/news/latest-judgments".to_string(),
            description: "Latest judgments feed".to_string(),
        }
    }

    fn item(title: &str, link: &str, day: u32) -> JudgmentItem {
        JudgmentItem {
            title: title.to_string(),
            link: link.to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 3, day, 0, 0, 0).unwrap(),
            category: None,
            summary: Some("Latest judgments".to_string()),
        }
    }

    fn build_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn renders_required_channel_fields() {
        let xml = render_feed(&spec(), &[], 25, build_time());
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<channel>"));
        assert!(xml.contains("<title>UK Supreme Court - Latest judgments</title>"));
        assert!(xml.contains("<lastBuildDate>Tue, 10 Mar 2026 09:30:00 +0000</lastBuildDate>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn orders_items_most_recent_first() {
        let items = vec![
            item("Older", "https://example.org/a", 1),
            item("Newest", "https://example.org/b", 9),
            item("Middle", "https://example.org/c", 5),
        ];
        let prepared = prepare_items(&items, 25);
        let titles: Vec<&str> = prepared.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Newest", "Middle", "Older"]);
    }

    #[test]
    fn equal_dates_keep_page_order() {
        let items = vec![
            item("First on page", "https://example.org/a", 5),
            item("Second on page", "https://example.org/b", 5),
        ];
        let prepared = prepare_items(&items, 25);
        assert_eq!(prepared[0].title, "First on page");
        assert_eq!(prepared[1].title, "Second on page");
    }

    #[test]
    fn duplicate_links_collapse_first_wins() {
        let items = vec![
            item("Kept", "https://example.org/a", 3),
            item("Dropped duplicate", "https://example.org/a", 7),
        ];
        let prepared = prepare_items(&items, 25);
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].title, "Kept");
    }

    #[test]
    fn caps_item_count() {
        let items: Vec<JudgmentItem> = (1..=30)
            .map(|d| item(&format!("Case {d}"), &format!("https://example.org/{d}"), 1))
            .collect();
        let prepared = prepare_items(&items, 25);
        assert_eq!(prepared.len(), 25);
    }

    #[test]
    fn rendered_output_is_idempotent_except_build_date() {
        let items = vec![item("Case", "https://example.org/a", 5)];
        let first = render_feed(&spec(), &items, 25, build_time());
        let second = render_feed(
            &spec(),
            &items,
            25,
            Utc.with_ymd_and_hms(2026, 3, 11, 9, 30, 0).unwrap(),
        );
        let strip = |s: &str| {
            s.lines()
                .map(str::to_string)
                .collect::<String>()
                .split("<lastBuildDate>")
                .map(|part| part.split("</lastBuildDate>").last().unwrap().to_string())
                .collect::<String>()
        };
        assert_ne!(first, second);
        assert_eq!(strip(&first), strip(&second));
    }

    #[test]
    fn escapes_xml_in_titles() {
        let items = vec![item("Smith & Jones <Holdings>", "https://example.org/a", 5)];
        let xml = render_feed(&spec(), &items, 25, build_time());
        assert!(xml.contains("Smith &amp; Jones &lt;Holdings&gt;"));
        assert!(!xml.contains("Smith & Jones"));
    }

    #[test]
    fn guid_rendered_as_non_permalink() {
        let items = vec![item("Case", "https://example.org/a", 5)];
        let xml = render_feed(&spec(), &items, 25, build_time());
        assert!(xml.contains("isPermaLink=\"false\""));
    }

    #[test]
    fn item_renders_pub_date_rfc2822() {
        let items = vec![item("Case", "https://example.org/a", 5)];
        let xml = render_feed(&spec(), &items, 25, build_time());
        assert!(xml.contains("<pubDate>Thu, 05 Mar 2026 00:00:00 +0000</pubDate>"));
    }
}
