use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::info;

const USER_AGENT: &str = concat!("fsc_cases/", env!("CARGO_PKG_VERSION"));

/// One item of the syndication feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Raw HTML as carried by the item description.
    pub description: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub categories: Vec<String>,
}

/// Fetch the feed once, bypassing caches, and return its entries in feed order.
pub async fn fetch_entries(feed_url: &str) -> Result<Vec<FeedEntry>> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    info!("Fetching feed: {}", feed_url);
    let bytes = client
        .get(feed_url)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .context("Failed to fetch feed")?
        .error_for_status()
        .context("Feed request was rejected")?
        .bytes()
        .await
        .context("Failed to read feed body")?;

    let entries = parse_feed(&bytes[..])?;
    info!("Entries in feed: {}", entries.len());
    Ok(entries)
}

/// Parse an RSS, Atom or JSON feed document into entries.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(body).context("Failed to parse RSS/Atom feed")?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            let description = entry
                .summary
                .map(|t| t.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();

            FeedEntry {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                link,
                description,
                pub_date: entry.published.or(entry.updated),
                categories: entry
                    .categories
                    .into_iter()
                    .map(|c| c.label.unwrap_or(c.term))
                    .filter(|c| !c.is_empty())
                    .collect(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<FeedEntry> {
        let xml = std::fs::read_to_string("tests/fixtures/feed.xml").unwrap();
        parse_feed(xml.as_bytes()).unwrap()
    }

    #[test]
    fn reads_all_items_in_order() {
        let entries = fixture();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].link.contains("dataserno=202410150001"));
        assert!(entries[1].link.contains("dataserno=202410080002"));
        assert!(!entries[2].link.contains("dataserno"));
    }

    #[test]
    fn channel_title_is_not_an_entry_title() {
        let entries = fixture();
        assert!(entries[0].title.starts_with("裁罰案件"));
    }

    #[test]
    fn cdata_description_is_raw_html() {
        let e = &fixture()[0];
        assert!(e.description.contains("<p>發文日期：中華民國113年10月15日"));
    }

    #[test]
    fn escaped_description_is_unescaped() {
        let e = &fixture()[1];
        assert!(e.description.contains("<div>"));
        assert!(e.description.contains("受處分人姓名或名稱"));
    }

    #[test]
    fn categories_and_dates() {
        let entries = fixture();
        assert_eq!(entries[0].categories, vec!["銀行局", "裁罰案件"]);
        assert!(entries[1].categories.is_empty());
        let date = entries[0].pub_date.unwrap();
        assert_eq!(
            date.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-10-15 09:30:00"
        );
        assert_eq!(entries[2].pub_date, None);
    }

    #[test]
    fn atom_entries() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>裁罰案件</title>
  <id>urn:fsc:penalty</id>
  <updated>2024-10-15T09:30:00+08:00</updated>
  <entry>
    <title>裁罰案件：某證券商</title>
    <id>urn:fsc:penalty:1</id>
    <link href="https://www.fsc.gov.tw/ch/home.jsp?id=131&amp;dataserno=1"/>
    <updated>2024-10-15T09:30:00+08:00</updated>
    <summary type="html">&lt;p&gt;受處分人：某證券商&lt;/p&gt;</summary>
    <category term="證期局"/>
  </entry>
</feed>"#;
        let entries = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert!(e.link.ends_with("dataserno=1"));
        assert!(e.description.contains("受處分人：某證券商"));
        assert_eq!(e.categories, vec!["證期局"]);
        assert_eq!(
            e.pub_date.unwrap().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-10-15 01:30:00"
        );
    }

    #[test]
    fn rdf_items_with_dublin_core_date() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns="http://purl.org/rss/1.0/"
         xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="https://www.fsc.gov.tw/">
    <title>裁罰案件</title>
    <link>https://www.fsc.gov.tw/</link>
    <description>裁罰案件</description>
  </channel>
  <item rdf:about="https://www.fsc.gov.tw/ch/home.jsp?dataserno=7">
    <title>裁罰案件：某保險公司</title>
    <link>https://www.fsc.gov.tw/ch/home.jsp?dataserno=7</link>
    <description>受處分人：某保險公司</description>
    <dc:date>2024-10-15T09:30:00+08:00</dc:date>
  </item>
</rdf:RDF>"#;
        let entries = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].link.ends_with("dataserno=7"));
        assert!(entries[0].pub_date.is_some());
    }

    #[test]
    fn not_a_feed_is_an_error() {
        assert!(parse_feed(b"<html><body>hello</body></html>").is_err());
    }
}
