//! Judgment item data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One entry extracted from a listing page, destined for a feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JudgmentItem {
    /// Case name or headline
    pub title: String,

    /// Absolute URL of the detail page; unique within a feed
    pub link: String,

    /// Publication date; time-of-day is fixed at midnight UTC
    pub published_at: DateTime<Utc>,

    /// Category tag from the listing card, when the page carries one
    pub category: Option<String>,

    /// Short free text shown as the item description
    pub summary: Option<String>,
}

impl JudgmentItem {
    /// Stable content-addressed identifier for `<guid isPermaLink="false">`.
    ///
    /// SHA-256 over link, title and date, so the GUID survives reordering
    /// but changes when the listing entry itself changes.
    pub fn guid(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.link.as_bytes());
        hasher.update(b"|");
        hasher.update(self.title.as_bytes());
        hasher.update(b"|");
        hasher.update(self.published_at.to_rfc2822().as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_item() -> JudgmentItem {
        JudgmentItem {
            title: "R v Example".to_string(),
            link: "https://www.supremecourt.uk/cases/uksc-2026-0001".to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap(),
            category: None,
            summary: Some("Latest judgments".to_string()),
        }
    }

    #[test]
    fn test_guid_is_stable() {
        let item = sample_item();
        assert_eq!(item.guid(), item.guid());
        assert_eq!(item.guid().len(), 64);
    }

    #[test]
    fn test_guid_changes_with_content() {
        let a = sample_item();
        let mut b = sample_item();
        b.title = "R v Other".to_string();
        assert_ne!(a.guid(), b.guid());
    }
}
